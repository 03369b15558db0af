/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v2::ApiErrorCodes;
use num_enum::TryFromPrimitiveError;
use std::io;
use thiserror::Error;

/// Error conditions that can be returned
#[derive(Error, Debug)]
pub enum SmugMugError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Request network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Authorization error. {0}")]
    Auth(String),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("URL Parse error: {0}")]
    UrlParsing(#[from] url::ParseError),

    #[error("Expected response missing")]
    ResponseMissing(),

    #[error("API Response was error: {0}, msg: {1}")]
    ApiResponse(u32, String),

    #[error("API Response error code is invalid")]
    ApiResponseCode(#[from] TryFromPrimitiveError<ApiErrorCodes>),

    #[error("HTTP request to {0} failed with status {1}")]
    HttpStatus(String, u16),

    #[error("Access forbidden (403). The access token may be expired or invalid")]
    AccessForbidden(),

    #[error("API Response is malformed: {0:?}")]
    ApiResponseMalformed(serde_json::Error),

    #[error("Listing entry for {0} has no image uri")]
    ImageUriMissing(String),

    #[error("No downloadable source for {0}")]
    NoMediaSource(String),

    #[error("Pagination did not terminate: {0}")]
    PaginationCycle(String),

    #[error("Missing configuration: {0}")]
    MissingConfig(String),
}
