//! Language and parsing layer.
//!
//! This module owns everything language-specific: tree-sitter parsers
//! wrapped per language, and the static `LoopGrammar` tables naming the node
//! kinds the detector in `crate::detect` walks with.
//!
//! # Adding a New Language
//!
//! 1. Create a new module in `src/analysis/languages/` (e.g., `ruby.rs`)
//! 2. Fill in a static `LoopGrammar` with that grammar's node kinds
//! 3. Implement `LanguageAnalyzer`
//! 4. Register the analyzer in `languages/mod.rs`
//!
//! See `languages/python.rs` for a reference implementation.

mod grammar;
mod languages;
mod traits;

pub use grammar::LoopGrammar;
pub use languages::{
    analyzer_for_extension, get_analyzer, register_analyzers, registered_languages,
    JavaScriptAnalyzer, PythonAnalyzer,
};
pub use traits::{LanguageAnalyzer, ParsedSource};
