/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! Writes resolved media to disk and runs whole albums as a batch.

use crate::config::Config;
use crate::media::{MediaKind, MediaResolver, MediaSource, ResolvedMedia, Unresolved};
use crate::v2::{Album, AlbumImage, Client, RateLimitGovernor, SmugMugError, UNKNOWN_FILE_NAME};
use bytes::Bytes;
use std::fmt;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Where one item lands on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub album_folder: PathBuf,
    pub file_path: PathBuf,
}

/// Makes an album name usable as a single folder name
pub fn sanitize_path_component(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match sanitized.trim() {
        "" => "untitled".to_string(),
        "." | ".." => "_".to_string(),
        trimmed => trimmed.to_string(),
    }
}

// Server file names are used as-is, minus any directory part
fn file_name_component(name: &str) -> &str {
    match name.rsplit(['/', '\\']).next() {
        Some("") | Some(".") | Some("..") | None => UNKNOWN_FILE_NAME,
        Some(file_name) => file_name,
    }
}

/// Result of a single transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Downloaded { path: PathBuf, bytes: u64 },
    /// The file was already there; nothing was fetched
    Skipped { path: PathBuf },
}

/// Streams media to `<root>/<album>/<file name>`, once.
///
/// An existing file is never replaced or checked. A transfer that dies
/// part way leaves the partial file behind and later runs skip it.
#[derive(Debug, Clone)]
pub struct DownloadExecutor {
    client: Client,
    root: PathBuf,
}

impl DownloadExecutor {
    pub fn new(client: Client, root: impl Into<PathBuf>) -> Self {
        Self {
            client,
            root: root.into(),
        }
    }

    pub fn target(&self, album_name: &str, file_name: &str) -> DownloadTarget {
        let album_folder = self.root.join(sanitize_path_component(album_name));
        let file_path = album_folder.join(file_name_component(file_name));
        DownloadTarget {
            album_folder,
            file_path,
        }
    }

    pub async fn download(
        &self,
        media: &ResolvedMedia,
        album_name: &str,
    ) -> Result<Transfer, SmugMugError> {
        let source_url = media
            .source_url()
            .ok_or_else(|| SmugMugError::NoMediaSource(media.file_name.clone()))?;
        let target = self.target(album_name, &media.file_name);

        tokio::fs::create_dir_all(&target.album_folder).await?;
        if tokio::fs::try_exists(&target.file_path).await? {
            log::warn!("Already exists, skipping: {}", target.file_path.display());
            return Ok(Transfer::Skipped {
                path: target.file_path,
            });
        }

        let url = self.client.origin().join(source_url)?;
        let mut resp = self.client.fetch_media(&url).await?;
        if !resp.status().is_success() {
            return Err(SmugMugError::HttpStatus(
                url.to_string(),
                resp.status().as_u16(),
            ));
        }

        let mut file = File::create(&target.file_path).await?;
        let mut bytes: u64 = 0;
        loop {
            let chunk: Option<Bytes> = resp.chunk().await?;
            let Some(chunk) = chunk else {
                break;
            };
            file.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(Transfer::Downloaded {
            path: target.file_path,
            bytes,
        })
    }
}

/// What happened to one album entry
#[derive(Debug)]
pub enum ItemOutcome {
    Downloaded {
        file_name: String,
        kind: MediaKind,
        path: PathBuf,
        bytes: u64,
    },
    Skipped {
        file_name: String,
        path: PathBuf,
    },
    Unresolvable {
        file_name: String,
        kind: MediaKind,
        reason: Unresolved,
    },
    Failed {
        file_name: String,
        error: SmugMugError,
    },
}

impl ItemOutcome {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Downloaded { file_name, .. }
            | Self::Skipped { file_name, .. }
            | Self::Unresolvable { file_name, .. }
            | Self::Failed { file_name, .. } => file_name,
        }
    }
}

/// Per-item results for one album
#[derive(Debug, Default)]
pub struct BatchReport {
    pub album_name: String,
    /// Entries the listing returned
    pub listed: usize,
    /// The listing was cut short by a 403
    pub listing_forbidden: bool,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Downloaded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Skipped { .. }))
    }

    pub fn unresolvable(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Unresolvable { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|&o| pred(o)).count()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} listed, {} downloaded, {} skipped, {} unresolvable, {} failed",
            self.album_name,
            self.listed,
            self.downloaded(),
            self.skipped(),
            self.unresolvable(),
            self.failed()
        )?;
        if self.listing_forbidden {
            write!(f, " (listing stopped early: access forbidden)")?;
        }
        Ok(())
    }
}

/// Lists an album and pushes every entry through resolve and download, one at a time
#[derive(Debug, Clone)]
pub struct AlbumDownloader {
    client: Client,
    resolver: MediaResolver,
    executor: DownloadExecutor,
    governor: RateLimitGovernor,
    images_per_request: u32,
    max_pages: usize,
}

impl AlbumDownloader {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            resolver: MediaResolver::new(client.clone()),
            executor: DownloadExecutor::new(client.clone(), config.download_root.clone()),
            governor: RateLimitGovernor::new(config.retry_wait),
            images_per_request: config.images_per_request,
            max_pages: config.max_pages,
            client,
        }
    }

    /// Downloads every entry of the album.
    ///
    /// Only a failed listing is an error; item failures land in the report.
    pub async fn download_album(&self, album: &Album) -> Result<BatchReport, SmugMugError> {
        let listing = album
            .images(
                &self.client,
                self.images_per_request,
                self.governor.clone(),
                self.max_pages,
            )
            .await?;
        log::info!("Found {} images", listing.items.len());

        let mut report = BatchReport {
            album_name: album.name.clone(),
            listed: listing.items.len(),
            listing_forbidden: listing.forbidden,
            outcomes: Vec::with_capacity(listing.items.len()),
        };
        for item in &listing.items {
            report
                .outcomes
                .push(self.process_item(item, &album.name).await);
        }
        Ok(report)
    }

    /// Resolves and downloads one entry. Never fails; problems become outcomes.
    pub async fn process_item(&self, item: &AlbumImage, album_name: &str) -> ItemOutcome {
        let media = match self.resolver.resolve(item).await {
            Ok(media) => media,
            Err(error) => {
                log::error!("Error downloading image/video {}: {}", item.file_name(), error);
                return ItemOutcome::Failed {
                    file_name: item.file_name().to_string(),
                    error,
                };
            }
        };

        if let MediaSource::Missing(reason) = &media.source {
            log::warn!("{} for {}", reason, media.file_name);
            return ItemOutcome::Unresolvable {
                file_name: media.file_name,
                kind: media.kind,
                reason: reason.clone(),
            };
        }

        match self.executor.download(&media, album_name).await {
            Ok(Transfer::Downloaded { path, bytes }) => {
                log::info!("Downloaded {}: {}", media.kind, path.display());
                ItemOutcome::Downloaded {
                    file_name: media.file_name,
                    kind: media.kind,
                    path,
                    bytes,
                }
            }
            Ok(Transfer::Skipped { path }) => ItemOutcome::Skipped {
                file_name: media.file_name,
                path,
            },
            Err(error) => {
                log::error!("Error downloading image/video {}: {}", media.file_name, error);
                ItemOutcome::Failed {
                    file_name: media.file_name,
                    error,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v2::Creds;

    #[test]
    fn album_names_become_single_folders() {
        assert_eq!(sanitize_path_component("Summer 2024"), "Summer 2024");
        assert_eq!(sanitize_path_component("a/b\\c:d"), "a_b_c_d");
        assert_eq!(sanitize_path_component("  "), "untitled");
        assert_eq!(sanitize_path_component(".."), "_");
        assert_eq!(sanitize_path_component("tab\there"), "tab_here");
    }

    #[test]
    fn file_names_lose_directories() {
        assert_eq!(file_name_component("IMG_0001.JPG"), "IMG_0001.JPG");
        assert_eq!(file_name_component("nested/dir/IMG.JPG"), "IMG.JPG");
        assert_eq!(file_name_component("..\\evil.exe"), "evil.exe");
        assert_eq!(file_name_component(".."), UNKNOWN_FILE_NAME);
        assert_eq!(file_name_component("dir/"), UNKNOWN_FILE_NAME);
    }

    #[test]
    fn target_is_deterministic() {
        let client = Client::new(Creds::default()).unwrap();
        let executor = DownloadExecutor::new(client, "/downloads");
        let target = executor.target("Trip: Day 1", "IMG.JPG");
        assert_eq!(target.album_folder, PathBuf::from("/downloads/Trip_ Day 1"));
        assert_eq!(target.file_path, PathBuf::from("/downloads/Trip_ Day 1/IMG.JPG"));
        assert_eq!(executor.target("Trip: Day 1", "IMG.JPG"), target);
    }

    #[test]
    fn report_counts_and_summary() {
        let report = BatchReport {
            album_name: "Trip".into(),
            listed: 3,
            listing_forbidden: true,
            outcomes: vec![
                ItemOutcome::Skipped {
                    file_name: "a.jpg".into(),
                    path: PathBuf::from("a.jpg"),
                },
                ItemOutcome::Unresolvable {
                    file_name: "b.mov".into(),
                    kind: MediaKind::Video,
                    reason: Unresolved::MissingLargestVideo,
                },
                ItemOutcome::Failed {
                    file_name: "c.jpg".into(),
                    error: SmugMugError::ResponseMissing(),
                },
            ],
        };
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.unresolvable(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.downloaded(), 0);
        assert_eq!(report.outcomes[1].file_name(), "b.mov");
        assert_eq!(
            report.to_string(),
            "Trip: 3 listed, 0 downloaded, 1 skipped, 1 unresolvable, 1 failed \
             (listing stopped early: access forbidden)"
        );
    }
}
