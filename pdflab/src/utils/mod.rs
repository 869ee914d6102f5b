//! Input path expansion.

use crate::error::{PdfLabError, Result};
use std::path::PathBuf;

/// Expand multiple glob patterns into filesystem paths, in argument order.
///
/// Accepts anything iterable with items that convert to `&str`, e.g.:
/// `&[&str]`, `Vec<String>`, or `Vec<&str>`. Matches of one pattern are
/// sorted. A plain path without glob metacharacters is kept as-is even if
/// it does not exist, so the read that follows reports it missing.
///
/// # Errors
///
/// - Propagates `glob` parse errors.
/// - Propagates filesystem errors from the glob iterator.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        resolved_paths.extend(collect_paths_for_pattern(pattern.as_ref())?);
    }

    Ok(resolved_paths)
}

/// Expand a single glob pattern into filesystem paths.
///
/// Pattern examples:
/// - `"chapters/*.pdf"`
/// - `"./scans/2024-??.pdf"`
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    if !is_glob(pattern) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let paths = glob::glob(pattern).map_err(|err| {
        PdfLabError::invalid_config(format!("invalid pattern '{pattern}': {err}"))
    })?;

    let mut resolved_paths = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| PdfLabError::other(err.to_string()))?;
        resolved_paths.push(path);
    }

    resolved_paths.sort();
    Ok(resolved_paths)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
