/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::api::{
    API_ORIGIN, ApiParams, VERBOSITY_PARAM, api_url, decode_envelope, error_message,
};
use crate::v2::creds::Creds;
use crate::v2::errors::SmugMugError;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use url::Url;

/// Signed transport to the SmugMug API.
///
/// Cloning is cheap; every clone shares the same credentials and connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    creds: Creds,
    origin: Url,
    https_client: reqwest::Client,
}

impl Client {
    /// Client talking to the public SmugMug API
    pub fn new(creds: Creds) -> Result<Self, SmugMugError> {
        Ok(Self::with_origin(creds, Url::parse(API_ORIGIN)?))
    }

    /// Client talking to an alternate API origin
    pub fn with_origin(creds: Creds, origin: Url) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                creds,
                origin,
                https_client: reqwest::Client::new(),
            }),
        }
    }

    pub fn origin(&self) -> &Url {
        &self.inner.origin
    }

    /// Full request url for an API uri with the verbosity parameter applied
    pub fn api_url(&self, uri: &str, params: &ApiParams<'_>) -> Result<Url, SmugMugError> {
        let mut all = vec![VERBOSITY_PARAM];
        all.extend_from_slice(params);
        api_url(&self.inner.origin, uri, &all)
    }

    /// Performs a signed GET asking for JSON and hands back the raw response.
    /// Status handling is left to the caller.
    pub async fn send_get(&self, url: &Url) -> Result<reqwest::Response, SmugMugError> {
        self.signed_get(url, Some("application/json")).await
    }

    /// Performs a signed GET for media bytes
    pub async fn fetch_media(&self, url: &Url) -> Result<reqwest::Response, SmugMugError> {
        self.signed_get(url, None).await
    }

    /// Fetches and decodes a single API object
    pub async fn get_object<T: DeserializeOwned>(&self, url: &Url) -> Result<T, SmugMugError> {
        let resp = self.send_get(url).await?;
        Self::decode::<T>(resp)
            .await?
            .ok_or(SmugMugError::ResponseMissing())
    }

    /// Checks the HTTP status and unwraps the API envelope
    pub(crate) async fn decode<T: DeserializeOwned>(
        resp: reqwest::Response,
    ) -> Result<Option<T>, SmugMugError> {
        let status = resp.status();
        let url = resp.url().to_string();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(match error_message(&text) {
                Some(msg) => SmugMugError::ApiResponse(u32::from(status.as_u16()), msg),
                None => SmugMugError::HttpStatus(url, status.as_u16()),
            });
        }
        decode_envelope(&text)
    }

    async fn signed_get(
        &self,
        url: &Url,
        accept: Option<&str>,
    ) -> Result<reqwest::Response, SmugMugError> {
        let auth = self.inner.creds.authorization_header("GET", url, &[])?;
        log::debug!("GET {}", url);
        let mut req = self
            .inner
            .https_client
            .get(url.clone())
            .header(AUTHORIZATION, auth);
        if let Some(accept) = accept {
            req = req.header(ACCEPT, accept);
        }
        let resp = req.send().await?;
        log::debug!("Response status: {}", resp.status());
        Ok(resp)
    }
}
