//! Filesystem boundary: read a file fully, resolve it, write it back

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use similar::TextDiff;

use crate::core::markers::MarkerSet;
use crate::core::resolver::{resolve, ResolveStats};

/// Context lines around each hunk in a unified diff
pub const DIFF_CONTEXT_LINES: usize = 3;

/// Whether resolved content is written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Truncate and overwrite the file, even when nothing changed
    #[default]
    InPlace,
    /// Leave the file alone
    DryRun,
}

/// Options for a single file rewrite
#[derive(Debug, Clone, Default)]
pub struct RewriteOptions {
    pub mode: WriteMode,
    /// Produce a unified diff of the change
    pub with_diff: bool,
}

/// What happened to one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub stats: ResolveStats,
    /// Resolved content differs from the input
    pub changed: bool,
    /// File was rewritten on disk
    pub written: bool,
    /// Input ended while the incoming side was being dropped
    pub unterminated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

/// Resolve conflict markers in the file at `path`.
///
/// The whole file is read before anything is written, so a read failure
/// leaves it untouched. The write is a plain truncate-and-write with no
/// backup; a failure part way through can leave the file truncated.
pub fn resolve_file(
    path: &Path,
    markers: &MarkerSet,
    options: &RewriteOptions,
) -> Result<FileReport> {
    let original = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let resolution = resolve(&original, markers);
    let changed = !resolution.is_unchanged();
    let resolved = resolution.content();

    let diff = if options.with_diff && changed {
        Some(unified_diff(path, &original, &resolved))
    } else {
        None
    };

    let written = options.mode == WriteMode::InPlace;
    if written {
        fs::write(path, &resolved)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    tracing::debug!(
        path = %path.display(),
        lines_in = resolution.stats.lines_in,
        lines_kept = resolution.stats.lines_kept,
        regions = resolution.stats.regions_closed,
        written,
        "resolved file"
    );

    if resolution.is_unterminated() {
        tracing::warn!(
            "{}: reached end of file while dropping incoming lines; no '{}' marker closed the last region",
            path.display(),
            markers.end
        );
    }

    Ok(FileReport {
        path: path.to_path_buf(),
        stats: resolution.stats,
        changed,
        written,
        unterminated: resolution.is_unterminated(),
        diff,
    })
}

/// Unified diff between the original and resolved content
pub fn unified_diff(path: &Path, original: &str, resolved: &str) -> String {
    let name = path.display().to_string();
    let diff = TextDiff::from_lines(original, resolved);
    let mut unified = diff.unified_diff();
    unified
        .context_radius(DIFF_CONTEXT_LINES)
        .header(&format!("a/{}", name), &format!("b/{}", name));
    unified.to_string()
}
