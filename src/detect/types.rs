//! Core types crossing the analyzer's output boundary.

use serde::{Deserialize, Serialize};

/// Rule code attached to every diagnostic.
pub const RULE_CODE: &str = "infinite-loop";

/// A single flagged loop, positioned at its header.
///
/// Serialized camelCase because this is the wire shape the editor
/// integration consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// 0-based line of the loop header.
    pub line: usize,
    /// 0-based column of the loop keyword.
    pub column: usize,
    /// End of the marked range: the trimmed end of the header line, so the
    /// editor underlines a readable span instead of the loop's full
    /// multi-line extent.
    pub end_column: usize,
    pub message: String,
    pub code: String,
}

/// Result of analyzing one buffer of source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// False when the source had structural parse errors or the classifier
    /// faulted; `dangerous_loops` is always empty in that case.
    pub has_verdict: bool,
    /// Flagged loops in document order.
    pub dangerous_loops: Vec<Diagnostic>,
    /// Number of condition-controlled loops inspected.
    pub loops_examined: usize,
    /// Time spent parsing, in milliseconds.
    pub parse_duration_ms: f64,
    /// Total analysis time, in milliseconds.
    pub total_duration_ms: f64,
}

impl AnalysisResult {
    /// Whether nothing dangerous was found (including the no-verdict case).
    pub fn is_safe(&self) -> bool {
        self.dangerous_loops.is_empty()
    }
}

/// Caller protocol violations.
///
/// Anything stemming from the source text being mid-edit is absorbed into a
/// no-verdict `AnalysisResult` instead; these errors indicate a bug in the
/// integration layer and are surfaced explicitly.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("no language tag supplied")]
    MissingLanguage,
    #[error("unsupported language: {0:?}")]
    UnsupportedLanguage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_wire_shape() {
        let diag = Diagnostic {
            line: 3,
            column: 4,
            end_column: 15,
            message: "msg".to_string(),
            code: RULE_CODE.to_string(),
        };
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["line"], 3);
        assert_eq!(json["endColumn"], 15);
        assert_eq!(json["code"], "infinite-loop");
    }

    #[test]
    fn test_is_safe() {
        let mut result = AnalysisResult {
            has_verdict: true,
            dangerous_loops: vec![],
            loops_examined: 1,
            parse_duration_ms: 0.1,
            total_duration_ms: 0.2,
        };
        assert!(result.is_safe());

        result.dangerous_loops.push(Diagnostic {
            line: 0,
            column: 0,
            end_column: 11,
            message: "msg".to_string(),
            code: RULE_CODE.to_string(),
        });
        assert!(!result.is_safe());
    }

    #[test]
    fn test_result_wire_shape() {
        let result = AnalysisResult {
            has_verdict: true,
            dangerous_loops: vec![],
            loops_examined: 2,
            parse_duration_ms: 0.5,
            total_duration_ms: 1.0,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["hasVerdict"], true);
        assert_eq!(json["loopsExamined"], 2);
        assert!(json["dangerousLoops"].as_array().unwrap().is_empty());
    }
}
