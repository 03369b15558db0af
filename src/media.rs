/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Works out what an album entry is and where its best rendition lives.

use crate::v2::{AlbumImage, Client, ImageDetail, LargestVideo, SmugMugError};
use strum_macros::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// Why an item has nothing to download. None of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Unresolved {
    #[strum(to_string = "No 'LargestVideo' URI")]
    MissingLargestVideo,
    #[strum(to_string = "No downloadable video URL found")]
    MissingVideoUrl,
    #[strum(to_string = "No downloadable image URL found")]
    MissingImageUrl,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaSource {
    Url(String),
    Missing(Unresolved),
}

/// An album entry with its kind and source worked out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMedia {
    pub kind: MediaKind,
    pub file_name: String,
    pub source: MediaSource,
}

impl ResolvedMedia {
    pub fn source_url(&self) -> Option<&str> {
        match &self.source {
            MediaSource::Url(url) => Some(url),
            MediaSource::Missing(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MediaResolver {
    client: Client,
}

impl MediaResolver {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn classify(detail: &ImageDetail) -> MediaKind {
        if detail.is_video {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }

    /// Fetches the image record (and the video record for videos) behind an
    /// album entry.
    ///
    /// A missing rendition is not an error: it comes back as
    /// [`MediaSource::Missing`]. Errors are transport, status or decode
    /// failures of the lookups themselves.
    pub async fn resolve(&self, item: &AlbumImage) -> Result<ResolvedMedia, SmugMugError> {
        let file_name = item.file_name().to_string();
        let image_uri = item
            .image_uri()
            .ok_or_else(|| SmugMugError::ImageUriMissing(file_name.clone()))?;
        let detail_url = self.client.api_url(image_uri, &[])?;
        let detail = ImageDetail::from_url(&self.client, &detail_url).await?;

        let kind = Self::classify(&detail);
        let source = match kind {
            MediaKind::Video => {
                log::info!("Video detected: {}", file_name);
                self.video_source(&detail).await?
            }
            MediaKind::Image => match detail.best_image_url() {
                Some(url) => MediaSource::Url(url.to_string()),
                None => MediaSource::Missing(Unresolved::MissingImageUrl),
            },
        };

        Ok(ResolvedMedia {
            kind,
            file_name,
            source,
        })
    }

    async fn video_source(&self, detail: &ImageDetail) -> Result<MediaSource, SmugMugError> {
        let Some(largest_video_uri) = detail.largest_video_uri() else {
            return Ok(MediaSource::Missing(Unresolved::MissingLargestVideo));
        };
        let video_url = self.client.api_url(largest_video_uri, &[])?;
        let video = LargestVideo::from_url(&self.client, &video_url).await?;
        Ok(match video.url {
            Some(url) => MediaSource::Url(url),
            None => MediaSource::Missing(Unresolved::MissingVideoUrl),
        })
    }
}
