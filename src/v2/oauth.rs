/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Out-of-band (PIN based) OAuth1 handshake.
//!
//! 1. [`OAuthHandshake::request_token`] gets a temporary token pair.
//! 2. The user opens [`OAuthHandshake::authorize_url`] and reads back a PIN.
//! 3. [`OAuthHandshake::access_token`] trades the PIN for the access token pair.

use crate::v2::creds::Creds;
use crate::v2::errors::SmugMugError;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use url::Url;

const REQUEST_TOKEN_PATH: &str = "/services/oauth/1.0a/getRequestToken";
const AUTHORIZE_PATH: &str = "/services/oauth/1.0a/authorize";
const ACCESS_TOKEN_PATH: &str = "/services/oauth/1.0a/getAccessToken";

/// Oauth token pair. Also the format of the token cache file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub token: String,
    pub secret: String,
}

impl TokenPair {
    /// Reads a token pair previously written by [`TokenPair::save`]
    pub fn load(path: &Path) -> Result<Self, SmugMugError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), SmugMugError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Drives the three request handshake against the API origin
#[derive(Debug)]
pub struct OAuthHandshake {
    consumer: Creds,
    origin: Url,
    https_client: reqwest::Client,
}

impl OAuthHandshake {
    pub fn new(consumer: Creds, origin: Url) -> Self {
        Self {
            consumer,
            origin,
            https_client: reqwest::Client::new(),
        }
    }

    /// Fetches the temporary request token
    pub async fn request_token(&self) -> Result<TokenPair, SmugMugError> {
        let url = self.origin.join(REQUEST_TOKEN_PATH)?;
        self.fetch_token(&self.consumer, &url, &[("oauth_callback", "oob")])
            .await
            .map_err(|e| SmugMugError::Auth(format!("Failed to fetch request token: {}", e)))
    }

    /// Url the user visits to authorize this application and obtain the PIN
    pub fn authorize_url(&self, request_token: &TokenPair) -> Result<Url, SmugMugError> {
        let mut url = self.origin.join(AUTHORIZE_PATH)?;
        url.query_pairs_mut()
            .append_pair("oauth_token", &request_token.token);
        Ok(url)
    }

    /// Trades the request token and user supplied PIN for the access token
    pub async fn access_token(
        &self,
        request_token: &TokenPair,
        verifier: &str,
    ) -> Result<TokenPair, SmugMugError> {
        let url = self.origin.join(ACCESS_TOKEN_PATH)?;
        let creds = self
            .consumer
            .with_token(&request_token.token, &request_token.secret);
        self.fetch_token(&creds, &url, &[("oauth_verifier", verifier.trim())])
            .await
            .map_err(|e| SmugMugError::Auth(format!("Failed to fetch access token: {}", e)))
    }

    /// Signed credentials for API calls from the obtained access token
    pub fn access_creds(&self, access_token: &TokenPair) -> Creds {
        self.consumer
            .with_token(&access_token.token, &access_token.secret)
    }

    async fn fetch_token(
        &self,
        creds: &Creds,
        url: &Url,
        extra: &[(&str, &str)],
    ) -> Result<TokenPair, SmugMugError> {
        let auth = creds.authorization_header("GET", url, extra)?;
        let resp = self
            .https_client
            .get(url.clone())
            .header(AUTHORIZATION, auth)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(SmugMugError::HttpStatus(url.to_string(), status.as_u16()));
        }
        parse_token_response(&body)
    }
}

// Token endpoints answer with a form encoded body
fn parse_token_response(body: &str) -> Result<TokenPair, SmugMugError> {
    let mut token = None;
    let mut secret = None;
    for (k, v) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        match k.as_ref() {
            "oauth_token" => token = Some(v.into_owned()),
            "oauth_token_secret" => secret = Some(v.into_owned()),
            _ => (),
        }
    }
    match (token, secret) {
        (Some(token), Some(secret)) => Ok(TokenPair { token, secret }),
        _ => Err(SmugMugError::Auth(format!(
            "Token response missing oauth_token/oauth_token_secret: {}",
            body
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_form_encoded_token_response() {
        let pair = parse_token_response(
            "oauth_token=abc&oauth_token_secret=s%2Fcret&oauth_callback_confirmed=true",
        )
        .unwrap();
        assert_eq!(pair.token, "abc");
        assert_eq!(pair.secret, "s/cret");
    }

    #[test]
    fn incomplete_token_response_is_auth_error() {
        assert!(matches!(
            parse_token_response("oauth_token=abc"),
            Err(SmugMugError::Auth(_))
        ));
    }

    #[test]
    fn authorize_url_carries_request_token() {
        let handshake = OAuthHandshake::new(
            Creds::from_tokens("key", Some("secret"), None, None),
            Url::parse("https://api.smugmug.com").unwrap(),
        );
        let url = handshake
            .authorize_url(&TokenPair {
                token: "req".into(),
                secret: "reqsecret".into(),
            })
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.smugmug.com/services/oauth/1.0a/authorize?oauth_token=req"
        );
    }

    #[test]
    fn token_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("tokens.json");
        let pair = TokenPair {
            token: "t".into(),
            secret: "s".into(),
        };
        pair.save(&path).unwrap();
        assert_eq!(TokenPair::load(&path).unwrap(), pair);
    }
}
