/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Runtime settings, handed to each component when it is built.

use crate::v2::{API_ORIGIN, Creds, DEFAULT_MAX_PAGES, DEFAULT_RETRY_WAIT, SmugMugError};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const API_KEY_VAR: &str = "SMUGMUG_API_KEY";
pub const API_SECRET_VAR: &str = "SMUGMUG_API_SECRET";
pub const AUTH_CACHE_VAR: &str = "SMUGMUG_AUTH_CACHE";
pub const DOWNLOAD_DIR_VAR: &str = "SMUGMUG_DOWNLOAD_DIR";
pub const API_ORIGIN_VAR: &str = "SMUGMUG_API_ORIGIN";

pub const DEFAULT_DOWNLOAD_DIR: &str = "smugmug_photos";
pub const ALBUM_PAGE_SIZE: usize = 15;
pub const ALBUMS_PER_REQUEST: u32 = 300;
pub const IMAGES_PER_REQUEST: u32 = 5500;

#[derive(Debug, Clone)]
pub struct Config {
    /// Scheme and host every API uri is resolved against
    pub api_origin: Url,
    /// Albums are written to `<download_root>/<album name>/`
    pub download_root: PathBuf,
    /// Where the access token pair is cached between runs
    pub auth_cache: Option<PathBuf>,
    /// Albums shown per menu page
    pub album_page_size: usize,
    pub albums_per_request: u32,
    pub images_per_request: u32,
    /// Wait after a 429 that has no Retry-After
    pub retry_wait: Duration,
    /// Pages walked before a listing is given up on
    pub max_pages: usize,
}

impl Config {
    /// Built-in settings against the public API
    pub fn new() -> Result<Self, SmugMugError> {
        Ok(Self {
            api_origin: Url::parse(API_ORIGIN)?,
            download_root: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            auth_cache: None,
            album_page_size: ALBUM_PAGE_SIZE,
            albums_per_request: ALBUMS_PER_REQUEST,
            images_per_request: IMAGES_PER_REQUEST,
            retry_wait: DEFAULT_RETRY_WAIT,
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    /// Builds the configuration from the process environment
    pub fn from_env() -> Result<Self, SmugMugError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SmugMugError> {
        let mut config = Self::new()?;
        if let Some(origin) = lookup(API_ORIGIN_VAR) {
            config.api_origin = Url::parse(&origin)?;
        }
        if let Some(dir) = lookup(DOWNLOAD_DIR_VAR).filter(|d| !d.trim().is_empty()) {
            config.download_root = PathBuf::from(dir);
        }
        config.download_root = std::path::absolute(&config.download_root)?;
        config.auth_cache = lookup(AUTH_CACHE_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        Ok(config)
    }

    #[must_use]
    pub fn with_api_origin(mut self, origin: Url) -> Self {
        self.api_origin = origin;
        self
    }

    #[must_use]
    pub fn with_download_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.download_root = root.into();
        self
    }

    #[must_use]
    pub fn with_auth_cache(mut self, path: impl Into<PathBuf>) -> Self {
        self.auth_cache = Some(path.into());
        self
    }

    #[must_use]
    pub const fn with_album_page_size(mut self, page_size: usize) -> Self {
        self.album_page_size = page_size;
        self
    }

    #[must_use]
    pub const fn with_retry_wait(mut self, wait: Duration) -> Self {
        self.retry_wait = wait;
        self
    }

    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

/// Consumer key and secret from the process environment
pub fn consumer_creds_from_env() -> Result<Creds, SmugMugError> {
    consumer_creds_from_lookup(|key| std::env::var(key).ok())
}

pub fn consumer_creds_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Creds, SmugMugError> {
    let api_key =
        lookup(API_KEY_VAR).ok_or_else(|| SmugMugError::MissingConfig(API_KEY_VAR.into()))?;
    let api_secret =
        lookup(API_SECRET_VAR).ok_or_else(|| SmugMugError::MissingConfig(API_SECRET_VAR.into()))?;
    Ok(Creds::from_tokens(&api_key, Some(&api_secret), None, None))
}
