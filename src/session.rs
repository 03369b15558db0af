/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

//! The interactive flow: sign in, list albums, let the user pick, download.
//!
//! Input and output are plain line streams so the whole flow can run
//! against scripted input.

use crate::config::Config;
use crate::download::{AlbumDownloader, ItemOutcome};
use crate::selection::{AlbumPager, Command, Effect, parse_confirm};
use crate::v2::{Album, Client, Creds, OAuthHandshake, SmugMugError, TokenPair, User};
use std::io::{BufRead, Write};

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>, SmugMugError> {
    let mut line = String::new();
    let read = input.read_line(&mut line)?;
    Ok((read > 0).then_some(line))
}

/// Produces signed credentials, from the token cache when there is one and
/// through the PIN handshake otherwise.
pub async fn sign_in<R: BufRead, W: Write>(
    config: &Config,
    consumer: Creds,
    input: &mut R,
    output: &mut W,
) -> Result<Creds, SmugMugError> {
    let handshake = OAuthHandshake::new(consumer, config.api_origin.clone());

    if let Some(cache) = config.auth_cache.as_deref().filter(|p| p.exists()) {
        match TokenPair::load(cache) {
            Ok(tokens) => {
                log::info!("Using cached access token from {}", cache.display());
                return Ok(handshake.access_creds(&tokens));
            }
            Err(err) => log::warn!("Ignoring unreadable token cache {}: {}", cache.display(), err),
        }
    }

    writeln!(output, "Starting OAuth session...")?;
    let request_token = handshake.request_token().await?;
    writeln!(output, "Got request token.")?;
    writeln!(
        output,
        "\nVisit this URL to authorize the app:\n{}",
        handshake.authorize_url(&request_token)?
    )?;
    write!(output, "\nEnter the PIN from SmugMug: ")?;
    output.flush()?;

    let verifier = read_line(input)?
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| SmugMugError::Auth("No PIN entered".into()))?;
    let access_token = handshake.access_token(&request_token, &verifier).await?;
    writeln!(output, "Access token obtained.")?;

    if let Some(cache) = &config.auth_cache {
        match access_token.save(cache) {
            Ok(()) => log::info!("Saved access token to {}", cache.display()),
            Err(err) => log::warn!("Could not save token cache {}: {}", cache.display(), err),
        }
    }
    Ok(handshake.access_creds(&access_token))
}

/// One run of the album browser
#[derive(Debug)]
pub struct Session<R, W> {
    client: Client,
    config: Config,
    downloader: AlbumDownloader,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(client: Client, config: Config, input: R, output: W) -> Self {
        Self {
            downloader: AlbumDownloader::new(client.clone(), &config),
            client,
            config,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Looks up the signed in user, fetches their albums and hands over to the menu
    pub async fn run(&mut self) -> Result<(), SmugMugError> {
        let user = User::authenticated_user_info(&self.client).await?;
        writeln!(self.output, "Authenticated as: {}", user.nick_name)?;

        let albums = user
            .albums(
                &self.client,
                self.config.albums_per_request,
                self.config.max_pages,
            )
            .await?;
        writeln!(self.output, "Total albums fetched: {}", albums.len())?;
        self.browse(&albums).await
    }

    /// The album menu. Returns when the user quits or input runs out.
    pub async fn browse(&mut self, albums: &[Album]) -> Result<(), SmugMugError> {
        if albums.is_empty() {
            writeln!(self.output, "No albums found.")?;
            return Ok(());
        }

        let mut pager = AlbumPager::new(albums.len(), self.config.album_page_size);
        loop {
            self.show_page(&pager, albums)?;
            writeln!(
                self.output,
                "\nEnter album number to download, 'n' for next page, \
                 'p' for previous page, or 'q' to quit."
            )?;
            write!(self.output, "Choice: ")?;
            self.output.flush()?;

            let Some(line) = read_line(&mut self.input)? else {
                writeln!(self.output, "Exiting.")?;
                return Ok(());
            };

            match pager.apply(&Command::parse(&line)) {
                Effect::Quit => {
                    writeln!(self.output, "Exiting.")?;
                    return Ok(());
                }
                Effect::Redraw => (),
                Effect::LastPage => writeln!(self.output, "You are on the last page.")?,
                Effect::FirstPage => writeln!(self.output, "You are on the first page.")?,
                Effect::OutOfRange(_) => writeln!(self.output, "Number out of range. Try again.")?,
                Effect::Invalid => writeln!(
                    self.output,
                    "Invalid input. Please enter a number, 'n', 'p', or 'q'."
                )?,
                Effect::Download(index) => {
                    self.download(&albums[index]).await?;

                    write!(self.output, "\nDownload another album? (y/n): ")?;
                    self.output.flush()?;
                    let another = read_line(&mut self.input)?.is_some_and(|a| parse_confirm(&a));
                    if !another {
                        writeln!(self.output, "Exiting.")?;
                        return Ok(());
                    }
                }
            }
        }
    }

    fn show_page(&mut self, pager: &AlbumPager, albums: &[Album]) -> Result<(), SmugMugError> {
        let visible = pager.visible();
        writeln!(
            self.output,
            "\nShowing albums {} to {} of {}\n",
            visible.start + 1,
            visible.end,
            pager.total()
        )?;
        for index in visible {
            writeln!(self.output, "{}. {}", index + 1, albums[index].name)?;
        }
        Ok(())
    }

    // Listing failures are reported here and do not end the session
    async fn download(&mut self, album: &Album) -> Result<(), SmugMugError> {
        writeln!(self.output, "\nDownloading album: {}", album.name)?;
        match self.downloader.download_album(album).await {
            Ok(report) => {
                writeln!(self.output, "Found {} images", report.listed)?;
                for outcome in &report.outcomes {
                    match outcome {
                        ItemOutcome::Unresolvable { file_name, reason, .. } => {
                            writeln!(self.output, "  {}: {}", file_name, reason)?
                        }
                        ItemOutcome::Failed { file_name, error } => {
                            writeln!(self.output, "  {}: {}", file_name, error)?
                        }
                        _ => (),
                    }
                }
                writeln!(self.output, "{}", report)?;
            }
            Err(err) => {
                log::error!("Listing images of {} failed: {}", album.name, err);
                writeln!(self.output, "Could not list images for {}: {}", album.name, err)?;
            }
        }
        Ok(())
    }
}
