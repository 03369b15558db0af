/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde::Deserialize;

// Parses strings that may be "" or null and sets to None
pub fn from_empty_str_to_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.is_empty()))
}

// Entries under "Uris" are plain strings with _verbosity=1 and objects otherwise
#[derive(Deserialize)]
#[serde(untagged)]
enum UriRef {
    Plain(String),
    Object {
        #[serde(rename = "Uri")]
        uri: String,
    },
}

// Parses a Uris entry in either form
pub fn from_uri_ref<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let r: Option<UriRef> = Deserialize::deserialize(deserializer)?;
    Ok(r.map(|r| match r {
        UriRef::Plain(uri) => uri,
        UriRef::Object { uri } => uri,
    })
    .filter(|uri| !uri.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "from_uri_ref")]
        uri: Option<String>,

        #[serde(default, deserialize_with = "from_empty_str_to_none")]
        url: Option<String>,
    }

    #[test]
    fn uri_ref_accepts_both_forms() {
        let plain: Probe = serde_json::from_value(json!({"uri": "/api/v2/image/a"})).unwrap();
        assert_eq!(plain.uri.as_deref(), Some("/api/v2/image/a"));

        let object: Probe = serde_json::from_value(json!({
            "uri": {"Uri": "/api/v2/image/b", "Locator": "Image"}
        }))
        .unwrap();
        assert_eq!(object.uri.as_deref(), Some("/api/v2/image/b"));

        let missing: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.uri, None);
    }

    #[test]
    fn empty_and_null_strings_are_none() {
        let empty: Probe = serde_json::from_value(json!({"url": ""})).unwrap();
        assert_eq!(empty.url, None);
        let null: Probe = serde_json::from_value(json!({"url": null})).unwrap();
        assert_eq!(null.url, None);
        let set: Probe = serde_json::from_value(json!({"url": "https://x"})).unwrap();
        assert_eq!(set.url.as_deref(), Some("https://x"));
    }
}
