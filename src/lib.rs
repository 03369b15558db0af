/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! # SmugMug album downloader
//!
//! Signs in to the SmugMug APIv2 interface, lists the user's albums and
//! downloads the photos and videos of a chosen album into
//! `<download root>/<album name>/`, skipping files that are already there.
//!
//! For further details on the Rest API refer to the [SmugMug API Docs](https://api.smugmug.com/api/v2/doc/index.html)
//!
//! ## Pieces
//!
//! - [`v2`]: OAuth1 signing and handshake, the API entities, cursor paging and
//!   the rate limit governor
//! - [`media`]: decides image or video and picks the best rendition
//! - [`download`]: writes renditions to disk once and reports per item
//! - [`selection`]: album menu paging with no I/O
//! - [`session`]: the interactive flow tying it together
//!
//! ## Usage
//!
//! ```no_run
//! use smugmug_dl::config::Config;
//! use smugmug_dl::download::AlbumDownloader;
//! use smugmug_dl::v2::{Client, Creds, User};
//!
//! async fn download_everything(creds: Creds) -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let client = Client::with_origin(creds, config.api_origin.clone());
//!     let user = User::authenticated_user_info(&client).await?;
//!     let albums = user
//!         .albums(&client, config.albums_per_request, config.max_pages)
//!         .await?;
//!
//!     let downloader = AlbumDownloader::new(client, &config);
//!     for album in &albums {
//!         let report = downloader.download_album(album).await?;
//!         println!("{}", report);
//!     }
//!     Ok(())
//! }
//! ```
pub mod config;
pub mod download;
pub mod media;
pub mod selection;
pub mod session;
pub mod v2;
