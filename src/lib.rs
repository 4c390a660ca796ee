pub mod cli;
pub mod config;
pub mod core;
pub mod rewrite;

pub use crate::config::TakeheadConfig;
pub use crate::core::markers::{LineKind, MarkerSet};
pub use crate::core::resolver::{resolve, resolve_lines, Resolution, ResolveStats, ScanState};
pub use crate::rewrite::{resolve_file, FileReport, RewriteOptions, WriteMode};
