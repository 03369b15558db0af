/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde_json::{Value, json};
use smugmug_dl::config::Config;
use smugmug_dl::v2::{Album, AlbumImage, Client, Creds};
use std::path::Path;
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub(crate) const ALBUM_URI: &str = "/api/v2/album/abc";

#[allow(dead_code)]
pub(crate) const ALBUM_IMAGES_PATH: &str = "/api/v2/album/abc!images";

// Wraps a payload the way the API does
#[allow(dead_code)]
pub(crate) fn envelope(response: Value) -> Value {
    json!({"Code": 200, "Message": "Ok", "Response": response})
}

#[allow(dead_code)]
pub(crate) fn ok_json(response: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(envelope(response))
}

#[allow(dead_code)]
pub(crate) fn test_creds() -> Creds {
    Creds::from_tokens("key", Some("secret"), Some("token"), Some("token_secret"))
}

#[allow(dead_code)]
pub(crate) fn client_for(server: &MockServer) -> Client {
    Client::with_origin(test_creds(), origin_of(server))
}

#[allow(dead_code)]
pub(crate) fn origin_of(server: &MockServer) -> Url {
    Url::parse(&server.uri()).unwrap()
}

#[allow(dead_code)]
pub(crate) fn config_for(server: &MockServer, root: &Path) -> Config {
    Config::new()
        .unwrap()
        .with_api_origin(origin_of(server))
        .with_download_root(root)
        .with_retry_wait(Duration::from_millis(50))
}

#[allow(dead_code)]
pub(crate) fn album(name: &str) -> Album {
    serde_json::from_value(json!({"Uri": ALBUM_URI, "Name": name})).unwrap()
}

// An AlbumImage listing entry pointing at /api/v2/image/<key>-0
#[allow(dead_code)]
pub(crate) fn album_image_json(file_name: &str, key: &str) -> Value {
    json!({
        "FileName": file_name,
        "ImageKey": key,
        "Uris": {"Image": {"Uri": format!("/api/v2/image/{}-0", key)}}
    })
}

#[allow(dead_code)]
pub(crate) fn album_image(file_name: &str, key: &str) -> AlbumImage {
    serde_json::from_value(album_image_json(file_name, key)).unwrap()
}

#[allow(dead_code)]
pub(crate) async fn mount_image_detail(server: &MockServer, key: &str, detail: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v2/image/{}-0", key)))
        .respond_with(ok_json(json!({"Image": detail})))
        .mount(server)
        .await;
}

// Image record whose archived rendition is served by the mock at /photos/<file>
#[allow(dead_code)]
pub(crate) async fn mount_photo(server: &MockServer, key: &str, file_name: &str, body: &[u8]) {
    let photo_path = format!("/photos/{}", file_name);
    mount_image_detail(
        server,
        key,
        json!({
            "FileName": file_name,
            "IsVideo": false,
            "ArchivedUri": format!("{}{}", server.uri(), photo_path)
        }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(photo_path))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}
