/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

type HmacSha1 = Hmac<Sha1>;

/// API key/secret plus the (optional) OAuth1 access token pair used to sign requests.
#[derive(Default, Clone)]
pub struct Creds {
    consumer_api_key: String,
    consumer_api_secret: Option<String>,
    access_token: Option<String>,
    token_secret: Option<String>,
}

impl Creds {
    /// Creates credentials from already obtained tokens
    pub fn from_tokens(
        api_key: &str,
        api_secret: Option<&str>,
        access_token: Option<&str>,
        token_secret: Option<&str>,
    ) -> Self {
        Self {
            consumer_api_key: api_key.into(),
            consumer_api_secret: api_secret.map(Into::into),
            access_token: access_token.map(Into::into),
            token_secret: token_secret.map(Into::into),
        }
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Same consumer, different token pair. Used while walking the handshake.
    pub(crate) fn with_token(&self, token: &str, secret: &str) -> Self {
        Self {
            consumer_api_key: self.consumer_api_key.clone(),
            consumer_api_secret: self.consumer_api_secret.clone(),
            access_token: Some(token.into()),
            token_secret: Some(secret.into()),
        }
    }

    /// Builds the `Authorization` header value for a request.
    ///
    /// `extra` carries protocol parameters that are only sent at certain
    /// handshake steps (`oauth_callback`, `oauth_verifier`).
    pub fn authorization_header(
        &self,
        method: &str,
        url: &Url,
        extra: &[(&str, &str)],
    ) -> Result<String, SmugMugError> {
        let nonce = format!("{:016x}{:016x}", rand::random::<u64>(), rand::random::<u64>());
        let timestamp = chrono::Utc::now().timestamp();
        self.authorization_header_with(method, url, extra, &nonce, timestamp)
    }

    fn authorization_header_with(
        &self,
        method: &str,
        url: &Url,
        extra: &[(&str, &str)],
        nonce: &str,
        timestamp: i64,
    ) -> Result<String, SmugMugError> {
        let timestamp = timestamp.to_string();
        let mut oauth_params: Vec<(String, String)> = vec![
            ("oauth_consumer_key".into(), self.consumer_api_key.clone()),
            ("oauth_nonce".into(), nonce.into()),
            ("oauth_signature_method".into(), "HMAC-SHA1".into()),
            ("oauth_timestamp".into(), timestamp),
            ("oauth_version".into(), "1.0".into()),
        ];
        if let Some(token) = &self.access_token {
            oauth_params.push(("oauth_token".into(), token.clone()));
        }
        oauth_params.extend(extra.iter().map(|(k, v)| (k.to_string(), v.to_string())));

        let mut signed_params = oauth_params.clone();
        signed_params.extend(
            url.query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        );
        let base = signature_base_string(method, url, &signed_params);
        let signature = self.sign(&base)?;
        oauth_params.push(("oauth_signature".into(), signature));

        let fields: Vec<String> = oauth_params
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect();
        Ok(format!("OAuth {}", fields.join(", ")))
    }

    fn sign(&self, base: &str) -> Result<String, SmugMugError> {
        let key = format!(
            "{}&{}",
            percent_encode(self.consumer_api_secret.as_deref().unwrap_or_default()),
            percent_encode(self.token_secret.as_deref().unwrap_or_default())
        );
        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| SmugMugError::Auth(format!("Invalid signing key: {}", e)))?;
        mac.update(base.as_bytes());
        Ok(STANDARD.encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for Creds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Creds")
            .field("consumer_api_key", &"xxx")
            .field("consumer_api_secret", &"xxx")
            .field("access_token", &"xxx")
            .field("token_secret", &"xxx")
            .finish()
    }
}

// RFC 3986 unreserved characters pass through, everything else is escaped
fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

// METHOD&encoded(base url)&encoded(sorted, encoded params)
pub(crate) fn signature_base_string(
    method: &str,
    url: &Url,
    params: &[(String, String)],
) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();
    let param_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    let port = url.port().map(|p| format!(":{}", p)).unwrap_or_default();
    let base_url = format!(
        "{}://{}{}{}",
        url.scheme(),
        url.host_str().unwrap_or_default().to_lowercase(),
        port,
        url.path()
    );

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(&base_url),
        percent_encode(&param_string)
    )
}
