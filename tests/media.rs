/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
mod helpers;

#[cfg(test)]
mod test {
    use crate::helpers::{self, album_image, mount_image_detail, ok_json};
    use serde_json::json;
    use smugmug_dl::media::{MediaKind, MediaResolver, MediaSource, Unresolved};
    use smugmug_dl::v2::{AlbumImage, SmugMugError};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn image_prefers_original_when_not_archived() {
        let server = MockServer::start().await;
        mount_image_detail(
            &server,
            "k1",
            json!({
                "FileName": "IMG_0001.JPG",
                "IsVideo": false,
                "OriginalUri": "https://photos.example/original.jpg",
                "LargestImageUrl": "https://photos.example/largest.jpg"
            }),
        )
        .await;

        let resolver = MediaResolver::new(helpers::client_for(&server));
        let media = resolver
            .resolve(&album_image("IMG_0001.JPG", "k1"))
            .await
            .unwrap();

        assert_eq!(media.kind, MediaKind::Image);
        assert_eq!(media.file_name, "IMG_0001.JPG");
        assert_eq!(
            media.source,
            MediaSource::Url("https://photos.example/original.jpg".into())
        );
    }

    #[tokio::test]
    async fn image_without_any_rendition_is_unresolvable() {
        let server = MockServer::start().await;
        mount_image_detail(&server, "k1", json!({"IsVideo": false})).await;

        let resolver = MediaResolver::new(helpers::client_for(&server));
        let media = resolver.resolve(&album_image("a.jpg", "k1")).await.unwrap();

        assert_eq!(media.source, MediaSource::Missing(Unresolved::MissingImageUrl));
    }

    #[tokio::test]
    async fn video_without_largest_video_is_unresolvable() {
        let server = MockServer::start().await;
        mount_image_detail(
            &server,
            "v1",
            json!({
                "FileName": "clip.mp4",
                "IsVideo": true,
                "ArchivedUri": "https://photos.example/clip-still.jpg"
            }),
        )
        .await;

        let resolver = MediaResolver::new(helpers::client_for(&server));
        let media = resolver.resolve(&album_image("clip.mp4", "v1")).await.unwrap();

        assert_eq!(media.kind, MediaKind::Video);
        assert_eq!(
            media.source,
            MediaSource::Missing(Unresolved::MissingLargestVideo)
        );
        assert_eq!(media.source_url(), None);
    }

    #[tokio::test]
    async fn video_resolves_through_largest_video() {
        let server = MockServer::start().await;
        mount_image_detail(
            &server,
            "v1",
            json!({
                "FileName": "clip.mp4",
                "IsVideo": true,
                "Uris": {"LargestVideo": {"Uri": "/api/v2/largestvideo/v1-0"}}
            }),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/largestvideo/v1-0"))
            .respond_with(ok_json(json!({
                "LargestVideo": {"Url": "https://video.example/clip-1080.mp4", "Size": 1024}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let resolver = MediaResolver::new(helpers::client_for(&server));
        let media = resolver.resolve(&album_image("clip.mp4", "v1")).await.unwrap();

        assert_eq!(media.kind, MediaKind::Video);
        assert_eq!(
            media.source_url(),
            Some("https://video.example/clip-1080.mp4")
        );
    }

    #[tokio::test]
    async fn video_record_without_url_is_unresolvable() {
        let server = MockServer::start().await;
        mount_image_detail(
            &server,
            "v1",
            json!({
                "IsVideo": true,
                "Uris": {"LargestVideo": "/api/v2/largestvideo/v1-0"}
            }),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/largestvideo/v1-0"))
            .respond_with(ok_json(json!({"LargestVideo": {"Size": 0}})))
            .mount(&server)
            .await;

        let resolver = MediaResolver::new(helpers::client_for(&server));
        let media = resolver.resolve(&album_image("clip.mp4", "v1")).await.unwrap();

        assert_eq!(media.source, MediaSource::Missing(Unresolved::MissingVideoUrl));
    }

    #[tokio::test]
    async fn failed_detail_lookup_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/image/k1-0"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"Code": 404, "Message": "Not Found"})),
            )
            .mount(&server)
            .await;

        let resolver = MediaResolver::new(helpers::client_for(&server));
        let result = resolver.resolve(&album_image("a.jpg", "k1")).await;

        assert!(matches!(result, Err(SmugMugError::ApiResponse(404, _))));
    }

    #[tokio::test]
    async fn entry_without_image_uri_is_an_error() {
        let server = MockServer::start().await;
        let item: AlbumImage = serde_json::from_value(json!({"FileName": "a.jpg"})).unwrap();

        let resolver = MediaResolver::new(helpers::client_for(&server));
        let result = resolver.resolve(&item).await;

        assert!(matches!(result, Err(SmugMugError::ImageUriMissing(name)) if name == "a.jpg"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
