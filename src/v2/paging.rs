/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::v2::Client;
use crate::v2::errors::SmugMugError;
use crate::v2::parsers::from_empty_str_to_none;
use crate::v2::rate_limit::{RateLimitGovernor, Verdict};
use async_stream::try_stream;
use futures::{Stream, StreamExt, pin_mut};
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use url::Url;

/// Upper bound on pages walked for one listing
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// One page of a listing endpoint: its items and the cursor to the next page.
pub trait PagedResponse: DeserializeOwned {
    type Item;

    fn into_page(self) -> (Vec<Self::Item>, Option<String>);
}

/// The "Pages" descriptor attached to list responses
#[derive(Deserialize, Debug, Default)]
pub struct Pages {
    #[serde(rename = "Total")]
    pub total: Option<u64>,

    #[serde(rename = "Start")]
    pub start: Option<u64>,

    #[serde(rename = "Count")]
    pub count: Option<u64>,

    #[serde(default, rename = "NextPage", deserialize_with = "from_empty_str_to_none")]
    pub next_page: Option<String>,
}

/// How non-success statuses are treated while paging
#[derive(Debug, Clone)]
pub enum ListingPolicy {
    /// Any non-success status fails the listing
    Strict,
    /// 429 is waited out and retried, 403 ends the listing early
    Governed(RateLimitGovernor),
}

/// Every item of a listing, in server order
#[derive(Debug)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub pages: usize,
    /// Set when a 403 cut the listing short
    pub forbidden: bool,
}

/// Follows next-page cursors until the server stops handing them out
#[derive(Debug)]
pub struct PagedFetcher<'a> {
    client: &'a Client,
    policy: ListingPolicy,
    max_pages: usize,
}

impl<'a> PagedFetcher<'a> {
    pub fn new(client: &'a Client, policy: ListingPolicy) -> Self {
        Self {
            client,
            policy,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Streams the listing one page at a time
    pub fn pages<'b, R: PagedResponse>(
        &'b self,
        start: Url,
    ) -> impl Stream<Item = Result<Vec<R::Item>, SmugMugError>> + 'b
    where
        R::Item: 'b,
    {
        try_stream! {
            let mut req_url = start;
            let mut visited = HashSet::new();
            visited.insert(req_url.to_string());
            let mut page_count = 0usize;

            loop {
                let resp = self.client.send_get(&req_url).await?;

                if let ListingPolicy::Governed(governor) = &self.policy {
                    // The same url goes out again, the cursor does not move
                    if governor.govern(resp.status(), resp.headers()).await == Verdict::Retry {
                        continue;
                    }
                    if resp.status() == StatusCode::FORBIDDEN {
                        Err::<(), _>(SmugMugError::AccessForbidden())?;
                    }
                }

                let page = Client::decode::<R>(resp)
                    .await?
                    .ok_or(SmugMugError::ResponseMissing())?;
                let (items, next_page) = page.into_page();
                page_count += 1;
                yield items;

                match next_page {
                    Some(next_page) => {
                        let next_url = self.client.api_url(&next_page, &[])?;
                        if !visited.insert(next_url.to_string()) {
                            Err::<(), _>(SmugMugError::PaginationCycle(format!(
                                "next page {} was already fetched", next_page
                            )))?;
                        }
                        if page_count >= self.max_pages {
                            Err::<(), _>(SmugMugError::PaginationCycle(format!(
                                "more than {} pages", self.max_pages
                            )))?;
                        }
                        req_url = next_url;
                    }
                    None => break,
                }
            }
        }
    }

    /// Collects the whole listing into memory
    pub async fn fetch_all<R: PagedResponse>(
        &self,
        start: Url,
    ) -> Result<Listing<R::Item>, SmugMugError> {
        let pages = self.pages::<R>(start);
        pin_mut!(pages);

        let mut listing = Listing {
            items: Vec::new(),
            pages: 0,
            forbidden: false,
        };
        while let Some(page) = pages.next().await {
            match page {
                Ok(items) => {
                    listing.items.extend(items);
                    listing.pages += 1;
                    log::info!(
                        "Fetched page {}, {} items so far",
                        listing.pages,
                        listing.items.len()
                    );
                }
                Err(SmugMugError::AccessForbidden()) => {
                    log::error!("Access forbidden (403). Your token may be expired or invalid.");
                    log::error!("Please re-authenticate to obtain a new token.");
                    listing.forbidden = true;
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(listing)
    }
}
