use super::HeaderError;
use chrono::{DateTime, Local};
use std::fmt;
use std::str::FromStr;

/// Who a history record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Written by the local user (`MS`)
    Sent,
    /// Written by a peer (`MR`)
    Received,
    /// Informational/system record (`MI`)
    Info,
}

impl Direction {
    /// The two-character code used in history files
    pub fn code(&self) -> &'static str {
        match self {
            Direction::Sent => "MS",
            Direction::Received => "MR",
            Direction::Info => "MI",
        }
    }
}

impl FromStr for Direction {
    type Err = HeaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MS" => Ok(Direction::Sent),
            "MR" => Ok(Direction::Received),
            "MI" => Ok(Direction::Info),
            _ => Err(HeaderError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Sent => write!(f, "Sent"),
            Direction::Received => write!(f, "Received"),
            Direction::Info => write!(f, "Info"),
        }
    }
}

/// First line of a history record
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub direction: Direction,
    /// Record time, converted from the file's UTC stamp to local time
    pub timestamp: DateTime<Local>,
    /// Number of raw lines following the header that belong to the same message
    pub continuation_lines: usize,
    /// Remainder of the header line after the first three fields
    pub first_line: String,
}

/// A header together with its continuation lines
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub header: Header,
    /// Continuation lines, verbatim
    pub body: Vec<String>,
    /// 1-based line number of the header within its file
    pub line_number: usize,
}

impl Message {
    /// Full message text: first line and continuation lines joined with `\n`
    pub fn text(&self) -> String {
        let mut text = self.header.first_line.clone();
        for line in &self.body {
            text.push('\n');
            text.push_str(line);
        }
        text
    }

    pub fn continuation(&self) -> &[String] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.header.direction
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.header.timestamp
    }
}
