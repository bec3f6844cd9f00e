use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

mod agent;
mod client;
mod config;
mod error;
mod models;
mod mood;

use crate::agent::MoodAnalyst;
use crate::client::{Grant, SpotifyClient};
use crate::config::load_config;

#[derive(Parser)]
#[command(name = "mood-analyst")]
#[command(about = "Spotify recommendations for the mood you describe")]
#[command(version)]
struct Args {
    /// Task to run, e.g. `mood_analyzer I feel calm`. Tasks are read from stdin when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    task: Vec<String>,

    /// Do not create a playlist on the user's account
    #[arg(long = "no-playlist")]
    no_playlist: bool,

    /// Per-request timeout in seconds, overrides MOOD_ANALYST_TIMEOUT_SECS
    #[arg(short = 't', long = "timeout", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries replies only
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mood_analyst=info"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let mut config = load_config()?;
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }

    let mut client = SpotifyClient::new(config);
    client
        .authenticate()
        .context("Failed to authenticate with Spotify")?;
    info!("Successfully authenticated with Spotify");

    if !args.no_playlist && client.grant() == &Grant::ClientCredentials {
        warn!("No SPOTIFY_REFRESH_TOKEN set; playlist creation will be rejected by Spotify");
    }

    let mut analyst = MoodAnalyst::new(client).with_playlists(!args.no_playlist);

    if !args.task.is_empty() {
        println!("{}", analyst.process_task(&args.task.join(" ")));
        return Ok(());
    }

    info!("Reading tasks from stdin...");
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read task from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        if let Err(e) = analyst.client_mut().ensure_fresh() {
            error!("Token refresh failed: {e}");
            println!("Sorry, I can't reach Spotify right now. Try again later!");
            continue;
        }

        println!("{}", analyst.process_task(&line));
    }

    Ok(())
}
