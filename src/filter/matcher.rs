use super::error::FilterError;
use super::pattern::compile_pattern;
use crate::parser::{Direction, Message};
use chrono::{DateTime, Duration, Local};
use regex::Regex;

/// Outcome of running a message through the filter stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// Older than the recency threshold
    TooOld,
    /// Direction not selected for display
    DirectionExcluded,
    /// Text did not match the content pattern
    NoMatch,
}

/// Directions shown when the caller does not pick any
pub const DEFAULT_DIRECTIONS: [Direction; 2] = [Direction::Sent, Direction::Received];

/// Combined recency, direction and content filter
#[derive(Debug, Clone)]
pub struct MessageFilter {
    pattern: Regex,
    since: Option<Duration>,
    directions: Option<Vec<Direction>>,
    now: DateTime<Local>,
}

impl MessageFilter {
    /// Content-only filter; recency is off and every direction but Info is shown
    pub fn new<S: AsRef<str>>(terms: &[S]) -> Result<Self, FilterError> {
        Ok(Self {
            pattern: compile_pattern(terms)?,
            since: None,
            directions: Some(DEFAULT_DIRECTIONS.to_vec()),
            now: Local::now(),
        })
    }

    /// Drop messages older than `since`; `None` disables the stage
    pub fn with_since(mut self, since: Option<Duration>) -> Self {
        self.since = since;
        self
    }

    /// Restrict to the given directions; `None` disables the stage
    pub fn with_directions(mut self, directions: Option<Vec<Direction>>) -> Self {
        self.directions = directions;
        self
    }

    /// Fix the reference time the recency stage measures against
    pub fn with_now(mut self, now: DateTime<Local>) -> Self {
        self.now = now;
        self
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn since(&self) -> Option<Duration> {
        self.since
    }

    pub fn verdict(&self, message: &Message) -> Verdict {
        if let Some(since) = self.since
            && self.now.signed_duration_since(message.timestamp()) > since
        {
            return Verdict::TooOld;
        }

        if let Some(directions) = &self.directions
            && !directions.contains(&message.direction())
        {
            return Verdict::DirectionExcluded;
        }

        if !self.pattern.is_match(&message.text()) {
            return Verdict::NoMatch;
        }

        Verdict::Accepted
    }

    pub fn matches(&self, message: &Message) -> bool {
        self.verdict(message) == Verdict::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Header;

    fn message(direction: Direction, age: Duration, first: &str, body: &[&str]) -> Message {
        Message {
            header: Header {
                direction,
                timestamp: now() - age,
                continuation_lines: body.len(),
                first_line: first.to_string(),
            },
            body: body.iter().map(|l| l.to_string()).collect(),
            line_number: 1,
        }
    }

    fn now() -> DateTime<Local> {
        DateTime::parse_from_rfc3339("2026-01-02T12:00:00Z")
            .unwrap()
            .with_timezone(&Local)
    }

    #[test]
    fn test_recency_is_checked_first() {
        let filter = MessageFilter::new(&["nothing-matches-this"])
            .unwrap()
            .with_since(Some(Duration::hours(24)))
            .with_now(now());

        let old = message(Direction::Info, Duration::hours(25), "x", &[]);
        assert_eq!(filter.verdict(&old), Verdict::TooOld);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let filter = MessageFilter::new::<&str>(&[])
            .unwrap()
            .with_since(Some(Duration::hours(24)))
            .with_now(now());

        let edge = message(Direction::Sent, Duration::hours(24), "x", &[]);
        assert!(filter.matches(&edge));
    }

    #[test]
    fn test_since_reports_configured_threshold() {
        let filter = MessageFilter::new::<&str>(&[]).unwrap();
        assert_eq!(filter.since(), None);

        let filter = filter.with_since(Some(Duration::minutes(30)));
        assert_eq!(filter.since(), Some(Duration::minutes(30)));
    }

    #[test]
    fn test_info_hidden_by_default() {
        let filter = MessageFilter::new::<&str>(&[]).unwrap().with_now(now());
        let info = message(Direction::Info, Duration::zero(), "joined", &[]);
        assert_eq!(filter.verdict(&info), Verdict::DirectionExcluded);

        let all = filter.with_directions(None);
        assert!(all.matches(&info));
    }

    #[test]
    fn test_content_matches_across_lines() {
        let filter = MessageFilter::new(&["foo", "bar"]).unwrap().with_now(now());
        let msg = message(Direction::Received, Duration::zero(), "say FOO", &["and bar"]);
        assert!(filter.matches(&msg));

        let miss = message(Direction::Received, Duration::zero(), "bar", &["foo"]);
        assert_eq!(filter.verdict(&miss), Verdict::NoMatch);
    }
}
