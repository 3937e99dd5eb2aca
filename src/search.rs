use crate::display::MessagePrinter;
use crate::filter::{FilterError, MessageFilter, Verdict};
use crate::parser::{Direction, MessageReader, ParseError};
use crate::selector::select_history_files;
use chrono::Duration;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("bad glob pattern {pattern:?}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("can't obtain files list for {pattern:?}")]
    GlobEntry {
        pattern: String,
        #[source]
        source: glob::GlobError,
    },

    #[error("no history files found in {dir:?} ({channel:?})")]
    NoFilesFound { dir: PathBuf, channel: String },

    #[error("can't open history file {path:?}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("can't parse history file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("can't write output")]
    Output(#[source] std::io::Error),
}

/// What to search and how to filter it
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub history_dir: PathBuf,
    /// Channel name, used as a file name prefix
    pub channel: String,
    /// Regular expression terms, matched in order
    pub filters: Vec<String>,
    /// File name prefixes that are never opened
    pub ignored_channels: Vec<String>,
    /// Recency threshold; `None` searches the whole history
    pub since: Option<Duration>,
    /// Directions to show; `None` shows all of them
    pub directions: Option<Vec<Direction>>,
}

impl SearchOptions {
    pub fn new(history_dir: impl Into<PathBuf>, channel: impl Into<String>) -> Self {
        Self {
            history_dir: history_dir.into(),
            channel: channel.into(),
            filters: Vec::new(),
            ignored_channels: Vec::new(),
            since: None,
            directions: Some(crate::filter::matcher::DEFAULT_DIRECTIONS.to_vec()),
        }
    }

    pub fn filter(&self) -> Result<MessageFilter, FilterError> {
        Ok(MessageFilter::new(&self.filters)?
            .with_since(self.since)
            .with_directions(self.directions.clone()))
    }
}

/// Counters collected over one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSummary {
    /// Files scanned to the end, in order
    pub files_scanned: Vec<PathBuf>,
    /// Files skipped by an ignored channel prefix
    pub files_ignored: Vec<PathBuf>,
    pub messages_read: usize,
    pub messages_printed: usize,
    pub too_old: usize,
    pub direction_excluded: usize,
}

/// Scans every selected history file and prints matching messages.
///
/// Stops at the first error; messages printed before it stay printed.
pub fn search<W: Write>(
    options: &SearchOptions,
    printer: &mut MessagePrinter<W>,
) -> Result<SearchSummary, SearchError> {
    search_with_filter(options, &options.filter()?, printer)
}

/// Same as [`search`] with a prepared filter
pub fn search_with_filter<W: Write>(
    options: &SearchOptions,
    filter: &MessageFilter,
    printer: &mut MessagePrinter<W>,
) -> Result<SearchSummary, SearchError> {
    let selection = select_history_files(
        &options.history_dir,
        &options.channel,
        &options.ignored_channels,
    )?;

    let mut summary = SearchSummary {
        files_ignored: selection.ignored,
        ..Default::default()
    };

    for path in selection.files {
        let file = File::open(&path).map_err(|source| SearchError::FileOpen {
            path: path.clone(),
            source,
        })?;
        let reader = MessageReader::new(BufReader::new(file));

        for message in reader {
            let message = message.map_err(|source| SearchError::Parse {
                path: path.clone(),
                source,
            })?;
            summary.messages_read += 1;

            match filter.verdict(&message) {
                Verdict::Accepted => {
                    printer.print(&message).map_err(SearchError::Output)?;
                    summary.messages_printed += 1;
                }
                Verdict::TooOld => summary.too_old += 1,
                Verdict::DirectionExcluded => summary.direction_excluded += 1,
                Verdict::NoMatch => {}
            }
        }

        summary.files_scanned.push(path);
    }

    printer.flush().map_err(SearchError::Output)?;
    Ok(summary)
}
