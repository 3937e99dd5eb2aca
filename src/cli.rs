mod direction;

use crate::duration::parse_duration;
use crate::parser::Direction as RecordDirection;
use crate::search::SearchOptions;
use anyhow::Context;
use chrono::Duration;
use clap::{Parser, ValueEnum};
pub use direction::Direction;
use std::path::{Path, PathBuf};

/// History directory relative to the home directory
pub const DEFAULT_HISTORY_DIR: &str = ".mcabber/history";

/// Search mcabber chat history by channel and filter
///
/// Filters are regular expressions matched case-insensitively, in order,
/// anywhere in a message (including its continuation lines).
#[derive(Parser, Debug)]
#[command(name = "mcabber-history", author, version, about)]
pub struct Cli {
    /// Search the channel whose history file names start with CHANNEL
    #[arg(short = 'S', long = "search", value_name = "CHANNEL")]
    pub channel: String,

    /// Regular expressions the message must contain, in order
    #[arg(value_name = "FILTER")]
    pub filters: Vec<String>,

    /// Path to history files directory [default: ~/.mcabber/history]
    #[arg(long, value_name = "DIR", env = "MCABBER_HISTORY_PATH")]
    pub path: Option<PathBuf>,

    /// Skip history files whose names start with any of these prefixes
    #[arg(long, value_name = "CHANNELS", value_delimiter = ',')]
    pub ignore_channels: Vec<String>,

    /// Only show messages newer than this (e.g. 30m, 24h, 1h30m, 7d)
    #[arg(long, value_name = "DURATION", default_value = "24h", value_parser = parse_duration)]
    pub since: Duration,

    /// Search the whole history, ignoring --since
    #[arg(long)]
    pub all_time: bool,

    /// Only show messages of these directions [default: incoming,outgoing]
    #[arg(
        short,
        long = "direction",
        value_name = "DIRECTION",
        value_enum,
        value_delimiter = ','
    )]
    pub directions: Vec<Direction>,

    /// When to use terminal colors
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Print diagnostics to stderr (-vv for per-file details)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl Cli {
    /// History directory with `~` expanded, falling back to the default location
    pub fn history_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(expand_home(path)),
            None => dirs::home_dir()
                .map(|home| home.join(DEFAULT_HISTORY_DIR))
                .context("can't determine home directory, pass --path explicitly"),
        }
    }

    pub fn search_options(&self) -> anyhow::Result<SearchOptions> {
        let mut options = SearchOptions::new(self.history_dir()?, self.channel.clone());
        options.filters = self.filters.clone();
        options.ignored_channels = self.ignore_channels.clone();
        options.since = (!self.all_time).then_some(self.since);
        if !self.directions.is_empty() {
            options.directions = Some(
                self.directions
                    .iter()
                    .copied()
                    .map(RecordDirection::from)
                    .collect(),
            );
        }
        Ok(options)
    }
}

fn expand_home(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
