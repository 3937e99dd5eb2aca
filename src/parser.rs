use chrono::{Local, NaiveDateTime};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

mod entities;

pub use entities::{Direction, Header, Message};

/// Timestamp layout used by history files, always UTC
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H:%M:%SZ";

/// Reasons a single header line is rejected
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("at least 4 fields should be present")]
    MalformedLine,

    #[error("unknown direction code {0:?}, expected one of MS, MR, MI")]
    UnknownDirection(String),

    #[error("can't parse timestamp {0:?}")]
    BadTimestamp(String),

    #[error("can't parse length {0:?}")]
    BadLength(String),
}

/// Errors raised while reading a stream of history records
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line_number} malformed: {line:?}")]
    Header {
        line_number: usize,
        line: String,
        #[source]
        source: HeaderError,
    },

    #[error(
        "not enough lines in message starting at line {line_number}: expected {expected}, found {found}"
    )]
    TruncatedMessage {
        line_number: usize,
        expected: usize,
        found: usize,
    },

    #[error("can't read line {line_number} of history stream")]
    Io {
        line_number: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("can't open history file")]
    Open(#[from] std::io::Error),
}

/// Parses one header line: `<direction> <timestamp> <count> <first line>`
pub fn parse_header(line: &str) -> Result<Header, HeaderError> {
    let fields: Vec<&str> = line.splitn(4, ' ').collect();
    if fields.len() < 4 {
        return Err(HeaderError::MalformedLine);
    }

    let direction: Direction = fields[0].parse()?;

    let timestamp = NaiveDateTime::parse_from_str(fields[1], TIMESTAMP_FORMAT)
        .map_err(|_| HeaderError::BadTimestamp(fields[1].to_string()))?
        .and_utc()
        .with_timezone(&Local);

    let continuation_lines = fields[2]
        .parse::<usize>()
        .map_err(|_| HeaderError::BadLength(fields[2].to_string()))?;

    Ok(Header {
        direction,
        timestamp,
        continuation_lines,
        first_line: fields[3].to_string(),
    })
}

/// Iterates over the messages of a history stream.
///
/// Every yielded message consumes exactly `continuation_lines + 1` lines, so
/// the caller may drop messages without losing alignment. Lines are read as
/// raw bytes and decoded lossily, so stray non-UTF-8 bytes never stop a scan.
/// After an error the reader is exhausted.
pub struct MessageReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
    failed: bool,
}

impl<R: BufRead> MessageReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
            failed: false,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    fn next_line(&mut self) -> Option<Result<String, ParseError>> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(source) => Some(Err(ParseError::Io {
                line_number: self.line_number + 1,
                source,
            })),
        }
    }

    fn read_message(&mut self, header_line: String) -> Result<Message, ParseError> {
        let line_number = self.line_number;
        let header = parse_header(&header_line).map_err(|source| ParseError::Header {
            line_number,
            line: header_line.clone(),
            source,
        })?;

        let mut body = Vec::with_capacity(header.continuation_lines);
        while body.len() < header.continuation_lines {
            match self.next_line() {
                Some(line) => body.push(line?),
                None => {
                    return Err(ParseError::TruncatedMessage {
                        line_number,
                        expected: header.continuation_lines,
                        found: body.len(),
                    });
                }
            }
        }

        Ok(Message {
            header,
            body,
            line_number,
        })
    }
}

impl<R: BufRead> Iterator for MessageReader<R> {
    type Item = Result<Message, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let result = self.next_line()?.and_then(|line| self.read_message(line));
        self.failed = result.is_err();
        Some(result)
    }
}

/// Reads every message of a history file
pub fn parse_history_file(path: impl AsRef<Path>) -> Result<Vec<Message>, ParseError> {
    let file = File::open(path)?;
    MessageReader::new(BufReader::new(file)).collect()
}
