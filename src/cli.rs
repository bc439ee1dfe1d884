#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]

use std::future::Future;

use clap::{Parser, Subcommand};
use log::warn;
use serde::Serialize;

use crate::config::Config;
use crate::entities::{PlayStyleRawResponse, PlayStyleResponse};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    #[clap(subcommand)]
    subcommand: Option<SubCommand>,
}

#[derive(Debug, Subcommand)]
pub enum SubCommand {
    #[clap(about = "Launch the GUI")]
    Start {
        #[arg(long, help = "Replay to open right away")]
        replay: Option<String>,
    },
    #[clap(about = "Print a player's play style as JSON")]
    PlayStyle {
        player: String,
        #[arg(long)]
        rank: Option<u32>,
        #[arg(long)]
        playlist: Option<u32>,
        #[arg(long, help = "Per-stat averages instead of charts")]
        raw: bool,
    },
    #[clap(about = "Show or update the stored configuration")]
    Config {
        #[arg(long)]
        api_base: Option<String>,
        #[arg(long)]
        session: Option<String>,
        #[arg(long)]
        mock: Option<bool>,
    },
}

#[derive(Clone, Debug, Default)]
pub struct LaunchOptions {
    pub replay_id: Option<String>,
}

impl CliArgs {
    pub fn run(self) -> Option<LaunchOptions> {
        //! Returns None if a CLI command was handled and the GUI should not start.
        let result = match self.subcommand {
            None => return Some(LaunchOptions::default()),
            Some(SubCommand::Start { replay }) => {
                return Some(LaunchOptions { replay_id: replay })
            }
            Some(SubCommand::PlayStyle {
                player,
                rank,
                playlist,
                raw,
            }) => block_on(play_style(&player, rank, playlist, raw)),
            Some(SubCommand::Config {
                api_base,
                session,
                mock,
            }) => block_on(update_config(api_base, session, mock)),
        };
        match result {
            Ok(output) => println!("{output}"),
            Err(err) => eprintln!("{err}"),
        }
        None
    }
}

fn block_on(
    command: impl Future<Output = Result<String, String>>,
) -> Result<String, String> {
    tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start async runtime: {e}."))?
        .block_on(command)
}

fn to_json(value: &impl Serialize) -> Result<String, String> {
    let formatted = if atty::is(atty::Stream::Stdout) {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    formatted.map_err(|e| e.to_string())
}

async fn play_style(
    player: &str,
    rank: Option<u32>,
    playlist: Option<u32>,
    raw: bool,
) -> Result<String, String> {
    let config = Config::load().await.map_err(|e| e.to_string())?;
    let client = config.client().map_err(|e| e.to_string())?;
    if raw {
        if rank.is_some() {
            warn!("--rank is ignored together with --raw.");
        }
        let data = PlayStyleRawResponse::load(&client, player, playlist)
            .await
            .map_err(|e| format!("Failed to fetch play style: {e}."))?;
        to_json(&data)
    } else {
        let data = PlayStyleResponse::load(&client, player, rank, playlist)
            .await
            .map_err(|e| format!("Failed to fetch play style: {e}."))?;
        to_json(&data)
    }
}

async fn update_config(
    api_base: Option<String>,
    session: Option<String>,
    mock: Option<bool>,
) -> Result<String, String> {
    let stored = Config::load_file().await.map_err(|e| e.to_string())?;
    let updated = Config {
        api_base: api_base.unwrap_or_else(|| stored.api_base.clone()),
        session_token: session
            .map(|s| Some(s).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| stored.session_token.clone()),
        use_mock_data: mock.unwrap_or(stored.use_mock_data),
    };
    updated.client().map_err(|e| e.to_string())?;
    if updated != stored {
        updated.clone().save().await.map_err(|e| e.to_string())?;
    }
    let shown = Config {
        session_token: updated.session_token.as_ref().map(|_| "***".to_owned()),
        ..updated
    };
    Ok(format!("{}\n{}", Config::path().display(), to_json(&shown)?))
}
