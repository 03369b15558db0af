/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use anyhow::Result;
use dotenvy::dotenv;
use smugmug_dl::config::{Config, consumer_creds_from_env};
use smugmug_dl::session::{Session, sign_in};
use smugmug_dl::v2::Client;

// main
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // The API key/secret is obtained from your SmugMug account.
    // The Access Token/Secret comes from the token cache or the PIN handshake.
    let config = Config::from_env()?;
    println!("Downloading to folder: {}", config.download_root.display());

    let mut input = std::io::stdin().lock();
    let mut output = std::io::stdout().lock();

    let consumer = consumer_creds_from_env()?;
    let creds = match sign_in(&config, consumer, &mut input, &mut output).await {
        Ok(creds) => creds,
        Err(err) => {
            eprintln!("Authentication failed. Exiting.");
            return Err(err.into());
        }
    };

    let client = Client::with_origin(creds, config.api_origin.clone());
    let mut session = Session::new(client, config, input, output);
    session.run().await?;
    Ok(())
}
