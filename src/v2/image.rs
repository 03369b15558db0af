/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::Client;
use crate::v2::errors::SmugMugError;
use crate::v2::parsers::{from_empty_str_to_none, from_uri_ref};
use serde::Deserialize;
use url::Url;

/// Name used when the listing carries no file name
pub const UNKNOWN_FILE_NAME: &str = "unknown.dat";

/// One entry of an album's image listing.
///
/// Only enough to name the file and find the full image record.
#[derive(Deserialize, Debug, Clone)]
pub struct AlbumImage {
    #[serde(default, rename = "FileName", deserialize_with = "from_empty_str_to_none")]
    file_name: Option<String>,

    #[serde(default, rename = "ImageKey")]
    pub image_key: Option<String>,

    #[serde(default, rename = "Uris")]
    uris: AlbumImageUris,
}

impl AlbumImage {
    pub fn file_name(&self) -> &str {
        self.file_name.as_deref().unwrap_or(UNKNOWN_FILE_NAME)
    }

    /// Uri of the full image record
    pub fn image_uri(&self) -> Option<&str> {
        self.uris.image.as_deref()
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
struct AlbumImageUris {
    #[serde(default, rename = "Image", deserialize_with = "from_uri_ref")]
    image: Option<String>,
}

/// Holds information returned from the Image API.
///
/// See [SmugMug API Docs](https://api.smugmug.com/api/v2/doc/reference/image.html) for more
/// details on the individual fields.
#[derive(Deserialize, Debug, Clone)]
pub struct ImageDetail {
    #[serde(default, rename = "FileName", deserialize_with = "from_empty_str_to_none")]
    pub file_name: Option<String>,

    #[serde(default, rename = "IsVideo")]
    pub is_video: bool,

    #[serde(default, rename = "ArchivedUri", deserialize_with = "from_empty_str_to_none")]
    pub archived_uri: Option<String>,

    #[serde(default, rename = "ArchivedSize")]
    pub archived_size: Option<u64>,

    #[serde(default, rename = "OriginalUri", deserialize_with = "from_empty_str_to_none")]
    pub original_uri: Option<String>,

    #[serde(default, rename = "LargestImageUrl", deserialize_with = "from_empty_str_to_none")]
    pub largest_image_url: Option<String>,

    #[serde(default, rename = "Uris")]
    uris: ImageUris,
}

impl ImageDetail {
    /// Returns information for the image at the provided full url
    pub async fn from_url(client: &Client, url: &Url) -> Result<Self, SmugMugError> {
        client
            .get_object::<ImageResponse>(url)
            .await
            .map(|v| v.image)
    }

    /// Best downloadable rendition: archived, then original, then the largest render
    pub fn best_image_url(&self) -> Option<&str> {
        self.archived_uri
            .as_deref()
            .or(self.original_uri.as_deref())
            .or(self.largest_image_url.as_deref())
    }

    /// Uri of the largest video rendition record, videos only
    pub fn largest_video_uri(&self) -> Option<&str> {
        self.uris.largest_video.as_deref()
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
struct ImageUris {
    #[serde(default, rename = "LargestVideo", deserialize_with = "from_uri_ref")]
    largest_video: Option<String>,
}

/// The largest video rendition of a video image
#[derive(Deserialize, Debug, Clone)]
pub struct LargestVideo {
    #[serde(default, rename = "Url", deserialize_with = "from_empty_str_to_none")]
    pub url: Option<String>,

    #[serde(default, rename = "Size")]
    pub size: Option<u64>,
}

impl LargestVideo {
    pub async fn from_url(client: &Client, url: &Url) -> Result<Self, SmugMugError> {
        client
            .get_object::<LargestVideoResponse>(url)
            .await
            .map(|v| v.largest_video)
    }
}

// Expected response for a request to get an Image
#[derive(Deserialize, Debug)]
struct ImageResponse {
    #[serde(rename = "Image")]
    image: ImageDetail,
}

// Expected response for a request to get a LargestVideo
#[derive(Deserialize, Debug)]
struct LargestVideoResponse {
    #[serde(rename = "LargestVideo")]
    largest_video: LargestVideo,
}
