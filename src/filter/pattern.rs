use super::error::FilterError;
use regex::Regex;

/// Joins filter terms into one case-insensitive, dot-matches-newline pattern
pub fn build_pattern<S: AsRef<str>>(terms: &[S]) -> String {
    let joined: Vec<&str> = terms.iter().map(|t| t.as_ref()).collect();
    format!("(?si){}", joined.join(".*"))
}

/// Builds and compiles the content pattern for the given terms
pub fn compile_pattern<S: AsRef<str>>(terms: &[S]) -> Result<Regex, FilterError> {
    let pattern = build_pattern(terms);
    Regex::new(&pattern).map_err(|source| FilterError::InvalidRegex { pattern, source })
}
