//! Output formatting for loopcheck results.
//!
//! Two formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption (same camelCase
//!   shape the analysis server speaks)

use colored::*;
use serde::Serialize;

use crate::detect::AnalysisResult;

/// One analyzed file, for CLI output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub file: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// Write results in JSON format.
pub fn write_json(reports: &[FileReport]) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(reports)?);
    Ok(())
}

/// Write results as colored terminal output.
pub fn write_pretty(reports: &[FileReport]) {
    let mut dangerous_total = 0;
    let mut skipped = 0;

    for report in reports {
        let result = &report.result;
        if !result.has_verdict {
            skipped += 1;
            println!(
                "  {} {} (not analyzable: incomplete or invalid source)",
                "?".yellow(),
                report.file
            );
            continue;
        }

        if result.is_safe() {
            println!(
                "  {} {} ({} loops examined, {:.1}ms)",
                "✓".green(),
                report.file,
                result.loops_examined,
                result.total_duration_ms
            );
            continue;
        }

        dangerous_total += result.dangerous_loops.len();
        println!(
            "  {} {} ({} loops examined)",
            "✗".red(),
            report.file,
            result.loops_examined
        );
        for diag in &result.dangerous_loops {
            println!(
                "      {}:{}: {} [{}]",
                diag.line + 1,
                diag.column + 1,
                diag.message,
                diag.code.dimmed()
            );
        }
    }

    println!();
    if dangerous_total > 0 {
        println!(
            "  {} {} runaway loop(s) in {} file(s)",
            "FAIL".red().bold(),
            dangerous_total,
            reports.len()
        );
    } else {
        println!("  {} {} file(s) clean", "PASS".green().bold(), reports.len());
    }
    if skipped > 0 {
        println!("  {} file(s) skipped as unparseable", skipped);
    }
}
