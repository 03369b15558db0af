/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use num_enum::TryFromPrimitive;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

// Root SmugMug API
pub const API_ORIGIN: &str = "https://api.smugmug.com";

// Every request asks for the compact form of the response
pub(crate) const VERBOSITY_PARAM: (&str, &str) = ("_verbosity", "1");

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, &'a str)];

/// Error codes per the SmugMug API site
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
pub enum ApiErrorCodes {
    // Good Codes
    Ok = 200,
    CreatedSuccessfully = 201,
    Accepted = 202,
    MovedPermanently = 301,
    MovedTemporarily = 302,

    // Failing Codes
    BadRequest = 400,
    Unauthorized = 401,
    PaymentRequired = 402,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    BadAccept = 406,
    Conflict = 409,
    TooManyRequests = 429,
    InternalServerError = 500,
    ServiceUnavailable = 503,
}

impl ApiErrorCodes {
    /// Maps an HTTP status onto the API code table. Unlisted statuses yield `None`.
    pub fn from_status(status: StatusCode) -> Option<Self> {
        Self::try_from(u32::from(status.as_u16())).ok()
    }

    /// Determine if the code is a success based on SmugMug API Docs
    pub fn is_success(self) -> bool {
        use ApiErrorCodes as E;
        matches!(
            self,
            E::Accepted | E::Ok | E::CreatedSuccessfully | E::MovedPermanently | E::MovedTemporarily
        )
    }
}

/// Joins `uri` onto the API origin and appends `params` the uri does not
/// already carry. Next-page cursors come back without the verbosity setting,
/// so this is applied to every request.
pub fn api_url(origin: &Url, uri: &str, params: &ApiParams<'_>) -> Result<Url, SmugMugError> {
    let mut url = origin.join(uri)?;
    let existing: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
    let missing: Vec<_> = params
        .iter()
        .filter(|(k, _)| !existing.iter().any(|e| e == k))
        .collect();
    if !missing.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in missing {
            pairs.append_pair(k, v);
        }
    }
    Ok(url)
}

// Base expected response body to be returned from the API
#[derive(Deserialize, Debug)]
pub(crate) struct ResponseBody<ResponseType> {
    #[serde(rename = "Code")]
    code: u32,

    #[serde(default, rename = "Message")]
    message: String,

    #[serde(rename = "Response")]
    response: Option<ResponseType>,
}

impl<ResponseType> ResponseBody<ResponseType> {
    fn into_response(self) -> Result<Option<ResponseType>, SmugMugError> {
        if !ApiErrorCodes::try_from(self.code)?.is_success() {
            return Err(SmugMugError::ApiResponse(self.code, self.message));
        }
        Ok(self.response)
    }
}

/// Decodes the `{Code, Message, Response}` envelope wrapped around every payload.
pub(crate) fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<Option<T>, SmugMugError> {
    let body = serde_json::from_str::<ResponseBody<T>>(text).map_err(|err| {
        log::debug!("Api Malformed Err {:?}", err);
        SmugMugError::ApiResponseMalformed(err)
    })?;
    body.into_response()
}

/// Pulls the `Message` out of an error body when there is one.
pub(crate) fn error_message(text: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(rename = "Message")]
        message: String,
    }
    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .map(|b| b.message)
}
