//! Integration tests for the full analysis pipeline.
//!
//! These exercise the public `analyze` entry point against the testdata
//! fixtures and the documented output contract.

use std::path::PathBuf;

use loopcheck::detect::{analyze, AnalyzeError, RULE_CODE};

fn testdata(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join(name);
    std::fs::read_to_string(path).expect("should read fixture")
}

fn setup() {
    loopcheck::init();
}

#[test]
fn test_runaway_loop_is_reported() {
    setup();
    let result = analyze(&testdata("runaway.py"), "python").unwrap();

    assert!(result.has_verdict);
    assert_eq!(result.loops_examined, 1);
    assert_eq!(result.dangerous_loops.len(), 1);

    let diag = &result.dangerous_loops[0];
    // The marker spans the loop header line only, not the loop body.
    assert_eq!(diag.line, 4);
    assert_eq!(diag.column, 4);
    assert_eq!(diag.end_column, "    while True:".len());
    assert_eq!(diag.code, RULE_CODE);
    assert!(!diag.message.is_empty());
}

#[test]
fn test_safe_loops_produce_no_diagnostics() {
    setup();
    let result = analyze(&testdata("safe.py"), "python").unwrap();

    assert!(result.has_verdict);
    assert_eq!(result.loops_examined, 2);
    assert!(result.dangerous_loops.is_empty());
}

#[test]
fn test_nested_counting_loop_break_does_not_rescue() {
    setup();
    let result = analyze(&testdata("nested.py"), "python").unwrap();

    // The break belongs to the inner for loop; the outer while True has no
    // exit of its own.
    assert_eq!(result.dangerous_loops.len(), 1);
    assert_eq!(result.dangerous_loops[0].line, 1);
}

#[test]
fn test_javascript_fixture() {
    setup();
    let result = analyze(&testdata("spin.js"), "javascript").unwrap();

    assert!(result.has_verdict);
    assert_eq!(result.loops_examined, 2);
    assert_eq!(result.dangerous_loops.len(), 1);
    assert_eq!(result.dangerous_loops[0].line, 1);
}

#[test]
fn test_incomplete_source_has_no_verdict() {
    setup();
    let result = analyze(&testdata("incomplete.py"), "python").unwrap();

    assert!(!result.has_verdict);
    assert!(result.dangerous_loops.is_empty());
    assert_eq!(result.loops_examined, 0);
}

#[test]
fn test_unknown_language_is_a_caller_error() {
    setup();
    let err = analyze("while True:\n    pass\n", "ruby").unwrap_err();
    assert!(matches!(err, AnalyzeError::UnsupportedLanguage(_)));
}

#[test]
fn test_repeated_analysis_is_deterministic() {
    setup();
    let source = testdata("runaway.py");
    let first = analyze(&source, "python").unwrap();
    let second = analyze(&source, "python").unwrap();

    assert_eq!(first.dangerous_loops, second.dangerous_loops);
    assert_eq!(first.loops_examined, second.loops_examined);
}

#[test]
fn test_timing_counters_are_populated() {
    setup();
    let result = analyze(&testdata("runaway.py"), "python").unwrap();

    assert!(result.parse_duration_ms >= 0.0);
    assert!(result.total_duration_ms >= result.parse_duration_ms);
}
