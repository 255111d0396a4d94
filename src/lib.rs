//! Loopcheck - editor-side infinite loop detection.
//!
//! Loopcheck flags a narrow, high-confidence anti-pattern: a `while` loop
//! whose condition is statically always true and whose body contains no
//! construct that can ever transfer control out of it. It runs on every
//! edit, so analysis is a single linear pass over a tree-sitter parse tree.
//!
//! # Architecture
//!
//! - `analysis`: tree-sitter parsers per language plus the static
//!   `LoopGrammar` node-kind tables
//! - `detect`: the loop finder and classifier, and the `analyze` entry point
//! - `config`: optional YAML configuration (enabled languages, server port)
//! - `report`: output formatting (pretty, JSON)
//! - `server`: line-delimited JSON-over-TCP transport for editor clients
//! - `cli`: the `check` and `serve` commands
//!
//! # Adding a New Language
//!
//! See `src/analysis/languages/`. Fill in a `LoopGrammar` table, implement
//! `LanguageAnalyzer`, and register it in `languages/mod.rs`.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod detect;
pub mod report;
pub mod server;

pub use analysis::{
    analyzer_for_extension, get_analyzer, register_analyzers, LanguageAnalyzer, LoopGrammar,
    ParsedSource,
};
pub use config::Config;
pub use detect::{
    analyze, AnalysisResult, AnalyzeError, ConditionVerdict, Diagnostic, ExitEvidence,
};
pub use server::Server;

/// Initialize all subsystems.
///
/// Call this once at startup. Analyzer lookup also self-registers lazily, so
/// this is a convenience rather than a requirement.
pub fn init() {
    analysis::register_analyzers();
}
