use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;

use crate::rewrite::FileReport;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable terminal output with colors
    #[default]
    Pretty,
    /// JSON output for machine consumption
    Json,
}

/// Format rewrite reports for display
pub fn format_reports(reports: &[FileReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(format_reports_pretty(reports)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
    }
}

fn format_reports_pretty(reports: &[FileReport]) -> String {
    let mut output = String::new();

    for report in reports {
        output.push_str(&format_report_pretty(report));
    }

    if reports.len() > 1 {
        let changed = reports.iter().filter(|r| r.changed).count();
        output.push_str(&format!(
            "{}\n",
            format!("{} of {} files had conflicts", changed, reports.len()).dimmed()
        ));
    }

    output
}

fn format_report_pretty(report: &FileReport) -> String {
    let mut output = String::new();
    let path = report.path.display().to_string();
    let stats = &report.stats;

    if !report.changed {
        output.push_str(&format!("{} {}\n", "clean".green(), path));
        return output;
    }

    let verb = if report.written {
        "resolved".green().bold()
    } else {
        "would resolve".yellow().bold()
    };

    output.push_str(&format!(
        "{} {}: {} {}, {} incoming {} dropped, {} {} removed\n",
        verb,
        path.bold(),
        stats.regions_closed,
        plural(stats.regions_closed, "region", "regions"),
        stats.lines_suppressed,
        plural(stats.lines_suppressed, "line", "lines"),
        stats.markers_removed,
        plural(stats.markers_removed, "marker", "markers"),
    ));
    output.push_str(&format!(
        "  {}\n",
        format!("{} -> {} lines", stats.lines_in, stats.lines_kept).dimmed()
    ));

    if report.unterminated {
        output.push_str(&format!(
            "  {} file ended inside a conflict region; everything after the last separator was dropped\n",
            "warning:".yellow().bold()
        ));
    }

    if let Some(diff) = &report.diff {
        output.push('\n');
        output.push_str(&colorize_diff(diff));
        output.push('\n');
    }

    output
}

fn colorize_diff(diff: &str) -> String {
    diff.lines()
        .map(|line| {
            if line.starts_with("---") || line.starts_with("+++") {
                line.bold().to_string()
            } else if line.starts_with("@@") {
                line.cyan().to_string()
            } else if line.starts_with('-') {
                line.red().to_string()
            } else if line.starts_with('+') {
                line.green().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}
