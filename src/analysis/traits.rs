//! Core traits for language support.

use tree_sitter::Node;

use super::LoopGrammar;

/// Holds a parsed tree-sitter tree and the source it was parsed from.
///
/// Built for a single analysis pass and discarded afterwards; nothing is
/// cached between calls.
pub struct ParsedSource {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source bytes (kept for node text extraction).
    pub source: Vec<u8>,
}

impl ParsedSource {
    /// Root node of the tree.
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Whether the parse contains structural errors.
    ///
    /// This is the normal state while the user is mid-edit, not an
    /// exceptional condition.
    pub fn has_structural_error(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Get the source code as a string slice.
    pub fn source_str(&self) -> &str {
        std::str::from_utf8(&self.source).unwrap_or("")
    }

    /// The source line at `row` (0-indexed), if present.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.source_str().lines().nth(row)
    }
}

/// Language-specific analyzer trait.
///
/// Each supported language implements this to expose a tree-sitter parser
/// plus the grammar table the loop detector walks with.
///
/// # Thread Safety
///
/// tree_sitter::Parser is not Sync, so implementations create a parser per
/// call; parser construction is cheap next to parsing itself.
pub trait LanguageAnalyzer: Send + Sync {
    /// Returns the language identifier (e.g., "python", "javascript").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyzer handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Node-kind and field-name table for this language.
    fn grammar(&self) -> &'static LoopGrammar;

    /// Parse source code into a tree.
    ///
    /// A tree containing ERROR nodes is still returned as Ok; the caller
    /// checks `has_structural_error` and short-circuits.
    fn parse(&self, source: &[u8]) -> anyhow::Result<ParsedSource>;

    /// Check if this analyzer handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
