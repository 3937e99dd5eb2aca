use thiserror::Error;

/// Errors that can occur when building a message filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("can't compile regexp {pattern:?}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
