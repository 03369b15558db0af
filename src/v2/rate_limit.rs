/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::ApiErrorCodes;
use chrono::{DateTime, Local, Utc};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;

pub const RATE_LIMIT_REMAINING_HEADER: &str = "X-RateLimit-Remaining";
pub const RATE_LIMIT_RESET_HEADER: &str = "X-RateLimit-Reset";

/// Wait applied to a 429 that carries no usable `Retry-After`
pub const DEFAULT_RETRY_WAIT: Duration = Duration::from_secs(60);

/// Rate limit metadata read off a single response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitState {
    pub remaining: Option<u64>,
    pub reset_at: Option<DateTime<Utc>>,
    pub retry_after: Option<u64>,
}

impl RateLimitState {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            remaining: header_str(headers, RATE_LIMIT_REMAINING_HEADER)
                .and_then(|v| v.parse().ok()),
            reset_at: header_str(headers, RATE_LIMIT_RESET_HEADER)
                .and_then(|v| v.parse::<i64>().ok())
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            retry_after: header_str(headers, RETRY_AFTER.as_str()).and_then(|v| v.parse().ok()),
        }
    }

    fn log(&self) {
        if let Some(remaining) = self.remaining {
            log::info!("Rate Limit Remaining: {}", remaining);
        }
        if let Some(reset_at) = self.reset_at {
            log::info!(
                "Rate Limit Resets At: {} (local time)",
                reset_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            );
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
}

/// What the caller does with the response it just handed to the governor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Go on and inspect the response
    Proceed,
    /// The governor already waited; send the identical request again
    Retry,
}

/// Reacts to throttled responses by sleeping before the request is repeated.
///
/// Only a 429 blocks. A low remaining quota on a successful response is
/// reported but never waited on.
#[derive(Debug, Clone)]
pub struct RateLimitGovernor {
    default_wait: Duration,
}

impl Default for RateLimitGovernor {
    fn default() -> Self {
        Self::new(DEFAULT_RETRY_WAIT)
    }
}

impl RateLimitGovernor {
    pub fn new(default_wait: Duration) -> Self {
        Self { default_wait }
    }

    /// How long to wait before repeating a request, or `None` to go ahead
    pub fn wait_for(&self, status: StatusCode, state: &RateLimitState) -> Option<Duration> {
        match ApiErrorCodes::from_status(status) {
            Some(ApiErrorCodes::TooManyRequests) => Some(
                state
                    .retry_after
                    .map(Duration::from_secs)
                    .unwrap_or(self.default_wait),
            ),
            _ => None,
        }
    }

    /// Inspects a response before its body is read, sleeping when throttled
    pub async fn govern(&self, status: StatusCode, headers: &HeaderMap) -> Verdict {
        let state = RateLimitState::from_headers(headers);
        state.log();

        match self.wait_for(status, &state) {
            Some(wait) => {
                match state.retry_after {
                    Some(secs) => log::warn!("Rate limit hit! Retry after {} seconds.", secs),
                    None => log::warn!("Rate limit hit! No Retry-After header found."),
                }
                log::info!("Waiting {} seconds before retrying...", wait.as_secs());
                tokio::time::sleep(wait).await;
                Verdict::Retry
            }
            None => Verdict::Proceed,
        }
    }
}
