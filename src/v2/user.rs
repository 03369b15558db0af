/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::errors::SmugMugError;
use crate::v2::paging::{ListingPolicy, PagedFetcher};
use crate::v2::parsers::from_uri_ref;
use crate::v2::album::AlbumsResponse;
use crate::v2::{Album, Client};
use serde::Deserialize;
use url::Url;

/// Holds information returned from the User API.
///
/// See [SmugMug API Docs](https://api.smugmug.com/api/v2/doc/reference/user.html) for more
/// details on the individual fields.
#[derive(Deserialize, Debug, Clone)]
pub struct User {
    #[serde(rename = "Uri")]
    pub uri: String,

    #[serde(rename = "NickName")]
    pub nick_name: String,

    #[serde(default, rename = "Name")]
    pub name: Option<String>,

    #[serde(default, rename = "UserKey")]
    pub user_key: Option<String>,

    #[serde(default, rename = "Uris")]
    uris: UserUris,
}

impl User {
    /// Returns information for the user at the provided full url
    pub async fn from_url(client: &Client, url: &Url) -> Result<User, SmugMugError> {
        client
            .get_object::<UserResponse>(url)
            .await
            .map(|v| v.user)
    }

    /// Returns information for the authenticated user
    pub async fn authenticated_user_info(client: &Client) -> Result<User, SmugMugError> {
        let req_url = client.api_url("/api/v2!authuser", &[])?;
        Self::from_url(client, &req_url).await
    }

    /// Uri of this user's album listing
    pub fn albums_uri(&self) -> String {
        self.uris
            .user_albums
            .clone()
            .unwrap_or_else(|| format!("{}!albums", self.uri))
    }

    /// Retrieves every album owned by this user.
    ///
    /// Any failed page aborts the whole listing.
    pub async fn albums(
        &self,
        client: &Client,
        per_request: u32,
        max_pages: usize,
    ) -> Result<Vec<Album>, SmugMugError> {
        let count = per_request.to_string();
        let req_url = client.api_url(&self.albums_uri(), &[("count", count.as_str())])?;
        log::info!("Fetching albums: {}", req_url);

        let listing = PagedFetcher::new(client, ListingPolicy::Strict)
            .with_max_pages(max_pages)
            .fetch_all::<AlbumsResponse>(req_url)
            .await?;
        log::info!("Total albums retrieved: {}", listing.items.len());
        Ok(listing.items)
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
struct UserUris {
    #[serde(default, rename = "UserAlbums", deserialize_with = "from_uri_ref")]
    user_albums: Option<String>,
}

// Expected response from a User request
#[derive(Deserialize, Debug)]
struct UserResponse {
    #[serde(rename = "User")]
    user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn albums_uri_prefers_listed_uri() {
        let user: User = serde_json::from_value(json!({
            "Uri": "/api/v2/user/cmac",
            "NickName": "cmac",
            "Uris": {"UserAlbums": {"Uri": "/api/v2/user/cmac!albums"}}
        }))
        .unwrap();
        assert_eq!(user.albums_uri(), "/api/v2/user/cmac!albums");
    }

    #[test]
    fn albums_uri_falls_back_to_user_uri() {
        let user: User = serde_json::from_value(json!({
            "Uri": "/api/v2/user/cmac",
            "NickName": "cmac"
        }))
        .unwrap();
        assert_eq!(user.albums_uri(), "/api/v2/user/cmac!albums");
        assert_eq!(user.user_key, None);
    }
}
