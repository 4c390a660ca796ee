//! Single-pass conflict resolution that keeps the HEAD side
//!
//! The scan is a two-state machine. Marker lines are always dropped; the
//! separator switches to [`ScanState::Suppressed`] and the end marker
//! switches back to [`ScanState::Copying`]. Nothing tracks whether a
//! region was actually opened, so a separator on its own still starts
//! suppression and an end marker with another branch label never stops it.

use serde::Serialize;

use crate::core::markers::{LineKind, MarkerSet};

/// Whether content lines are currently being kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanState {
    #[default]
    Copying,
    Suppressed,
}

impl ScanState {
    /// State after seeing a line of the given kind
    pub fn next(self, kind: LineKind) -> Self {
        match kind {
            LineKind::Start | LineKind::Content => self,
            LineKind::Separator => ScanState::Suppressed,
            LineKind::End => ScanState::Copying,
        }
    }
}

/// Counts gathered during one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResolveStats {
    /// Lines in the input
    pub lines_in: usize,
    /// Lines written to the output
    pub lines_kept: usize,
    /// Marker lines dropped
    pub markers_removed: usize,
    /// Content lines dropped while suppressing (the incoming side)
    pub lines_suppressed: usize,
    /// End markers that switched suppression off
    pub regions_closed: usize,
}

/// Output of a scan: the kept lines plus what happened along the way
#[derive(Debug, Clone)]
pub struct Resolution<'a> {
    pub lines: Vec<&'a str>,
    pub stats: ResolveStats,
    pub final_state: ScanState,
}

impl Resolution<'_> {
    /// Concatenate the kept lines back into file content
    pub fn content(&self) -> String {
        self.lines.concat()
    }

    /// True when no line was dropped
    pub fn is_unchanged(&self) -> bool {
        self.stats.lines_kept == self.stats.lines_in
    }

    /// True when input ended inside the incoming side of a region
    pub fn is_unterminated(&self) -> bool {
        self.final_state == ScanState::Suppressed
    }
}

/// Resolve conflict regions in `input`, keeping each line's terminator.
pub fn resolve<'a>(input: &'a str, markers: &MarkerSet) -> Resolution<'a> {
    resolve_lines(input.split_inclusive('\n'), markers)
}

/// Resolve an already-split sequence of lines.
pub fn resolve_lines<'a, I>(lines: I, markers: &MarkerSet) -> Resolution<'a>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut state = ScanState::default();
    let mut stats = ResolveStats::default();
    let mut kept = Vec::new();

    for line in lines {
        stats.lines_in += 1;
        let kind = markers.classify(line);

        if kind.is_marker() {
            stats.markers_removed += 1;
            if kind == LineKind::End && state == ScanState::Suppressed {
                stats.regions_closed += 1;
            }
        } else if state == ScanState::Copying {
            kept.push(line);
        } else {
            stats.lines_suppressed += 1;
        }

        state = state.next(kind);
    }

    stats.lines_kept = kept.len();

    Resolution {
        lines: kept,
        stats,
        final_state: state,
    }
}
