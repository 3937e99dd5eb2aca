pub mod cli;
pub mod display;
pub mod duration;
pub mod filter;
pub mod parser;
pub mod search;
pub mod selector;

use anyhow::Context;
pub use cli::{Cli, ColorMode, cli_parse};
pub use display::MessagePrinter;
pub use filter::{MessageFilter, Verdict};
pub use parser::{Direction, Header, Message, MessageReader, parse_header, parse_history_file};
pub use search::{SearchError, SearchOptions, SearchSummary, search};

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    let verbose = cli.verbose;

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }

    let options = cli.search_options()?;
    let filter = options.filter().context("Invalid filter terms")?;

    if verbose > 0 {
        eprintln!("History directory: {}", options.history_dir.display());
        eprintln!("Channel: {}", options.channel);
        eprintln!("Pattern: {}", filter.pattern());
        match filter.since() {
            Some(since) => eprintln!("Since: {} minutes ago", since.num_minutes()),
            None => eprintln!("Since: all time"),
        }
        if let Some(directions) = &options.directions {
            let names: Vec<String> = directions.iter().map(|d| d.to_string()).collect();
            eprintln!("Directions: {}", names.join(", "));
        }
        if !options.ignored_channels.is_empty() {
            eprintln!("Ignored channels: {}", options.ignored_channels.join(", "));
        }
    }

    let stdout = std::io::stdout();
    let mut printer = MessagePrinter::new(stdout.lock());
    let summary = search::search_with_filter(&options, &filter, &mut printer)
        .with_context(|| format!("Search in channel '{}' failed", options.channel))?;

    if verbose > 1 {
        for path in &summary.files_ignored {
            eprintln!("Ignored: {}", path.display());
        }
        for path in &summary.files_scanned {
            eprintln!("Scanned: {}", path.display());
        }
    }
    if verbose > 0 {
        eprintln!(
            "Printed {} of {} messages from {} file(s) ({} too old, {} hidden by direction, {} file(s) ignored)",
            summary.messages_printed,
            summary.messages_read,
            summary.files_scanned.len(),
            summary.too_old,
            summary.direction_excluded,
            summary.files_ignored.len(),
        );
    }

    Ok(())
}
