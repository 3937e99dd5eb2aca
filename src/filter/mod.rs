//! Message filtering
//!
//! A message is shown when it passes every enabled stage:
//!
//! ```text
//! recency     now - timestamp must not exceed --since (disabled by --all-time)
//! direction   the message direction must be selected (Info is hidden by default)
//! content     the message text must match (?si)term1.*term2.*...
//! ```
//!
//! The content pattern is matched against the full message, first line and
//! continuation lines joined with newlines, so terms may be found on
//! different lines. Terms are regular expressions in their own right.

pub mod error;
pub mod matcher;
pub mod pattern;

pub use error::FilterError;
pub use matcher::{MessageFilter, Verdict};
pub use pattern::{build_pattern, compile_pattern};
