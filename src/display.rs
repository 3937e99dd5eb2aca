use crate::parser::{Direction, Message};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

/// ANSI-C style, e.g. `Tue Mar  5 15:07:09 2024`
pub const DISPLAY_TIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

fn direction_marker(direction: Direction) -> ColoredString {
    match direction {
        Direction::Received => ">>>".green().bold(),
        Direction::Sent => "<<<".yellow().bold(),
        Direction::Info => "---".dimmed(),
    }
}

/// Renders a message: colored marker and timestamp, first line, then the
/// continuation lines unmodified.
pub fn format_message(message: &Message) -> String {
    let mut out = format!(
        "{} {} {}",
        direction_marker(message.direction()),
        message
            .timestamp()
            .format(DISPLAY_TIME_FORMAT)
            .to_string()
            .blue(),
        message.header.first_line
    );
    for line in message.continuation() {
        out.push('\n');
        out.push_str(line);
    }
    out
}

/// Writes messages separated by single blank lines.
///
/// The separator state lives as long as the printer, so one printer should be
/// shared by every file of a run.
pub struct MessagePrinter<W: Write> {
    out: W,
    printed: usize,
}

impl<W: Write> MessagePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, printed: 0 }
    }

    pub fn print(&mut self, message: &Message) -> io::Result<()> {
        if self.printed > 0 {
            writeln!(self.out)?;
        }
        writeln!(self.out, "{}", format_message(message))?;
        self.printed += 1;
        Ok(())
    }

    /// Number of messages written so far
    pub fn printed(&self) -> usize {
        self.printed
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
