/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use crate::v2::paging::{Listing, ListingPolicy, PagedFetcher, PagedResponse, Pages};
use crate::v2::parsers::{from_empty_str_to_none, from_uri_ref};
use crate::v2::rate_limit::RateLimitGovernor;
use crate::v2::{AlbumImage, Client};
use serde::Deserialize;

/// Holds information returned from the Album API.
///
/// See [SmugMug API Docs](https://api.smugmug.com/api/v2/doc/reference/album.html) for more
/// details on the individual fields.
#[derive(Deserialize, Debug, Clone)]
pub struct Album {
    #[serde(rename = "Uri")]
    pub uri: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(default, rename = "AlbumKey")]
    pub album_key: Option<String>,

    #[serde(default, rename = "ImageCount")]
    pub image_count: Option<u64>,

    #[serde(default, rename = "Uris")]
    uris: AlbumUris,
}

impl Album {
    /// Uri of this album's image listing
    pub fn images_uri(&self) -> String {
        self.uris
            .album_images
            .clone()
            .unwrap_or_else(|| format!("{}!images", self.uri))
    }

    /// Retrieves the images contained in this Album.
    ///
    /// Throttled pages are waited out and fetched again. A 403 ends the
    /// listing early and is flagged on the returned [`Listing`].
    pub async fn images(
        &self,
        client: &Client,
        per_request: u32,
        governor: RateLimitGovernor,
        max_pages: usize,
    ) -> Result<Listing<AlbumImage>, SmugMugError> {
        let count = per_request.to_string();
        let req_url = client.api_url(&self.images_uri(), &[("count", count.as_str())])?;

        PagedFetcher::new(client, ListingPolicy::Governed(governor))
            .with_max_pages(max_pages)
            .fetch_all::<AlbumImagesResponse>(req_url)
            .await
    }
}

impl std::fmt::Display for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

// Uris returned for an Album
#[derive(Deserialize, Debug, Clone, Default)]
struct AlbumUris {
    #[serde(default, rename = "AlbumImages", deserialize_with = "from_uri_ref")]
    album_images: Option<String>,
}

// Expected response for a request to list a user's albums
#[derive(Deserialize, Debug)]
pub(crate) struct AlbumsResponse {
    #[serde(default, rename = "Album")]
    albums: Vec<Album>,

    #[serde(rename = "Pages")]
    pages: Option<Pages>,
}

impl PagedResponse for AlbumsResponse {
    type Item = Album;

    fn into_page(self) -> (Vec<Album>, Option<String>) {
        (self.albums, self.pages.and_then(|p| p.next_page))
    }
}

// Expected response for a request to get an Album's images
#[derive(Deserialize, Debug)]
pub(crate) struct AlbumImagesResponse {
    #[serde(default, rename = "AlbumImage")]
    images: Vec<AlbumImage>,

    #[serde(rename = "Pages")]
    pages: Option<Pages>,

    // Some responses carry the cursor directly
    #[serde(default, rename = "NextPage", deserialize_with = "from_empty_str_to_none")]
    next_page: Option<String>,
}

impl PagedResponse for AlbumImagesResponse {
    type Item = AlbumImage;

    fn into_page(self) -> (Vec<AlbumImage>, Option<String>) {
        let next_page = self
            .pages
            .and_then(|p| p.next_page)
            .or(self.next_page);
        (self.images, next_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn images_page_reads_either_cursor() {
        let nested: AlbumImagesResponse = serde_json::from_value(json!({
            "AlbumImage": [{"FileName": "a.jpg"}],
            "Pages": {"Total": 2, "NextPage": "/api/v2/album/x!images?start=2"}
        }))
        .unwrap();
        let (items, next) = nested.into_page();
        assert_eq!(items.len(), 1);
        assert_eq!(next.as_deref(), Some("/api/v2/album/x!images?start=2"));

        let direct: AlbumImagesResponse = serde_json::from_value(json!({
            "AlbumImage": [],
            "NextPage": "/api/v2/album/x!images?start=3"
        }))
        .unwrap();
        assert_eq!(
            direct.into_page().1.as_deref(),
            Some("/api/v2/album/x!images?start=3")
        );
    }

    #[test]
    fn empty_cursor_ends_listing() {
        let page: AlbumImagesResponse = serde_json::from_value(json!({
            "AlbumImage": [{"FileName": "a.jpg"}],
            "Pages": {"NextPage": ""},
            "NextPage": ""
        }))
        .unwrap();
        let (items, next) = page.into_page();
        assert_eq!(items.len(), 1);
        assert!(next.is_none());
    }

    #[test]
    fn empty_album_page_has_no_items() {
        let empty: AlbumImagesResponse = serde_json::from_value(json!({})).unwrap();
        let (items, next) = empty.into_page();
        assert!(items.is_empty());
        assert!(next.is_none());
    }

    #[test]
    fn images_uri_falls_back_to_album_uri() {
        let album: Album = serde_json::from_value(json!({
            "Uri": "/api/v2/album/abc",
            "Name": "Trip"
        }))
        .unwrap();
        assert_eq!(album.images_uri(), "/api/v2/album/abc!images");
        assert_eq!(album.to_string(), "Trip");
    }
}
