//! Conflict marker literals and line classification

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Marker that opens a conflict region (HEAD side follows)
pub const DEFAULT_START: &str = "<<<<<<< HEAD";

/// Marker between the HEAD side and the incoming side
pub const DEFAULT_SEPARATOR: &str = "=======";

/// Marker that closes a conflict region
pub const DEFAULT_END: &str = ">>>>>>> origin/main";

/// The three marker prefixes recognized at the start of a line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSet {
    pub start: String,
    pub separator: String,
    pub end: String,
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            start: DEFAULT_START.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            end: DEFAULT_END.to_string(),
        }
    }
}

/// What a single line is, relative to a marker set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Start,
    Separator,
    End,
    Content,
}

impl LineKind {
    pub fn is_marker(&self) -> bool {
        !matches!(self, LineKind::Content)
    }
}

impl MarkerSet {
    /// Classify a line by exact, case-sensitive prefix match.
    ///
    /// Checked in order start, separator, end; the first match wins.
    pub fn classify(&self, line: &str) -> LineKind {
        if line.starts_with(&self.start) {
            LineKind::Start
        } else if line.starts_with(&self.separator) {
            LineKind::Separator
        } else if line.starts_with(&self.end) {
            LineKind::End
        } else {
            LineKind::Content
        }
    }

    /// Names of markers that are empty (an empty prefix matches every line)
    pub fn empty_markers(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        if self.start.is_empty() {
            empty.push("start");
        }
        if self.separator.is_empty() {
            empty.push("separator");
        }
        if self.end.is_empty() {
            empty.push("end");
        }
        empty
    }

    /// Reject marker sets that would match every line
    pub fn validate(&self) -> Result<()> {
        let empty = self.empty_markers();
        if !empty.is_empty() {
            anyhow::bail!("Marker(s) must not be empty: {}", empty.join(", "));
        }
        Ok(())
    }
}
