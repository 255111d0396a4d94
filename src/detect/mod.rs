//! Loop detection rules that consume parsed trees.

mod loops;
mod runner;
mod types;

pub use loops::{
    classify_condition, collect_exit_evidence, examine_loops, find_condition_loops,
    ConditionVerdict, ExitEvidence, LoopFinding,
};
pub use runner::{analyze, analyze_with, DANGER_MESSAGE};
pub use types::{AnalysisResult, AnalyzeError, Diagnostic, RULE_CODE};
