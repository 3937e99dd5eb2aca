use crate::search::SearchError;
use std::path::{Path, PathBuf};

/// History files picked for a channel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Files to scan, in glob order
    pub files: Vec<PathBuf>,
    /// Files skipped because of an ignored channel prefix
    pub ignored: Vec<PathBuf>,
}

/// Expands `<dir>/<channel>*` and sets aside files whose base name starts with
/// any of the `ignored` prefixes.
///
/// Only regular files count; directories such as `room.old/` are skipped.
/// Fails with [`SearchError::NoFilesFound`] when no file matches at all, even
/// if every match would have been ignored anyway.
pub fn select_history_files<S: AsRef<str>>(
    dir: &Path,
    channel: &str,
    ignored: &[S],
) -> Result<Selection, SearchError> {
    let pattern = format!(
        "{}/{}*",
        glob::Pattern::escape(&dir.to_string_lossy()),
        channel
    );
    let paths = glob::glob(&pattern).map_err(|source| SearchError::Glob {
        pattern: pattern.clone(),
        source,
    })?;

    let mut matched = Vec::new();
    for entry in paths {
        let path = entry.map_err(|source| SearchError::GlobEntry {
            pattern: pattern.clone(),
            source,
        })?;
        if path.is_file() {
            matched.push(path);
        }
    }

    if matched.is_empty() {
        return Err(SearchError::NoFilesFound {
            dir: dir.to_path_buf(),
            channel: channel.to_string(),
        });
    }

    let prefixes: Vec<&str> = ignored
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty())
        .collect();

    let (ignored, files): (Vec<PathBuf>, Vec<PathBuf>) = matched
        .into_iter()
        .partition(|path| is_ignored(path, &prefixes));

    Ok(Selection { files, ignored })
}

fn is_ignored(path: &Path, prefixes: &[&str]) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let name = name.to_string_lossy();
    prefixes.iter().any(|prefix| name.starts_with(prefix))
}
