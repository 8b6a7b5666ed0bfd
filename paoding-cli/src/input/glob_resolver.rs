//! File pattern resolution using glob

use anyhow::{Context, Result};
use glob::glob;
use std::path::{Path, PathBuf};

use crate::CliError;

/// Resolve file patterns to actual file paths
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let is_literal = !pattern.contains(['*', '?', '[']);
        if is_literal && !Path::new(pattern).exists() {
            return Err(CliError::FileNotFound(pattern.clone()).into());
        }

        let paths = glob(pattern)
            .map_err(|e| CliError::InvalidPattern(format!("{pattern} ({e})")))?;

        for path_result in paths {
            let path =
                path_result.with_context(|| format!("Error resolving pattern: {}", pattern))?;

            if path.is_file() {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        anyhow::bail!("No files found matching the provided patterns");
    }

    // Remove duplicates and sort
    files.sort();
    files.dedup();

    Ok(files)
}
