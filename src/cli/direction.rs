use crate::parser::Direction as RecordDirection;
use clap::ValueEnum;

/// Message direction as selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    /// Messages from peers (MR)
    #[value(aliases = ["in", "received"])]
    Incoming,
    /// Messages you sent (MS)
    #[value(aliases = ["out", "sent"])]
    Outgoing,
    /// Informational records (MI)
    Info,
}

impl From<Direction> for RecordDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Incoming => RecordDirection::Received,
            Direction::Outgoing => RecordDirection::Sent,
            Direction::Info => RecordDirection::Info,
        }
    }
}
