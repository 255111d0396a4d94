//! Analysis entry point tying parsing and loop classification together.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::analysis::{get_analyzer, LanguageAnalyzer, ParsedSource};

use super::loops::{examine_loops, LoopFinding};
use super::types::{AnalysisResult, AnalyzeError, Diagnostic, RULE_CODE};

/// Message attached to every flagged loop.
pub const DANGER_MESSAGE: &str =
    "Infinite loop: condition is always true and the body has no break, return, or sleep call.";

/// Analyze one buffer of source text in the given language.
///
/// A structural parse error - the normal state while the user is mid-edit -
/// yields `has_verdict = false` with no diagnostics. An unknown or missing
/// language tag is a caller bug and comes back as an error instead.
///
/// Each call is independent and stateless; concurrent calls need no
/// coordination.
pub fn analyze(source: &str, language: &str) -> Result<AnalysisResult, AnalyzeError> {
    if language.trim().is_empty() {
        return Err(AnalyzeError::MissingLanguage);
    }
    let analyzer = get_analyzer(language)
        .ok_or_else(|| AnalyzeError::UnsupportedLanguage(language.to_string()))?;
    Ok(analyze_with(analyzer, source))
}

/// Analyze with an explicit analyzer, skipping the registry lookup.
pub fn analyze_with(analyzer: &dyn LanguageAnalyzer, source: &str) -> AnalysisResult {
    let started = Instant::now();

    let parsed = match analyzer.parse(source.as_bytes()) {
        Ok(p) => p,
        Err(_) => return neutral(started, 0.0),
    };
    let parse_ms = elapsed_ms(started);

    if parsed.has_structural_error() {
        return neutral(started, parse_ms);
    }

    // The detector must never take down its caller: an unexpected tree shape
    // degrades to the neutral no-verdict result.
    match catch_unwind(AssertUnwindSafe(|| classify(&parsed, analyzer))) {
        Ok((dangerous_loops, loops_examined)) => AnalysisResult {
            has_verdict: true,
            dangerous_loops,
            loops_examined,
            parse_duration_ms: parse_ms,
            total_duration_ms: elapsed_ms(started),
        },
        Err(_) => neutral(started, parse_ms),
    }
}

fn classify(parsed: &ParsedSource, analyzer: &dyn LanguageAnalyzer) -> (Vec<Diagnostic>, usize) {
    let findings = examine_loops(parsed, analyzer.grammar());
    let loops_examined = findings.len();
    let diagnostics = findings
        .iter()
        .filter(|f| f.is_dangerous())
        .map(|f| Diagnostic {
            line: f.start_line,
            column: f.start_column,
            end_column: header_end_column(parsed, f),
            message: DANGER_MESSAGE.to_string(),
            code: RULE_CODE.to_string(),
        })
        .collect();
    (diagnostics, loops_examined)
}

/// End of the marked range: the trimmed end of the loop header line.
fn header_end_column(parsed: &ParsedSource, finding: &LoopFinding) -> usize {
    match parsed.line(finding.start_line) {
        Some(line) => line.trim_end().len(),
        None => finding.end_column,
    }
}

/// The neutral "safe, no verdict" result.
fn neutral(started: Instant, parse_ms: f64) -> AnalysisResult {
    AnalysisResult {
        has_verdict: false,
        dangerous_loops: Vec::new(),
        loops_examined: 0,
        parse_duration_ms: parse_ms,
        total_duration_ms: elapsed_ms(started),
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
