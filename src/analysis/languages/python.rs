//! Python language analyzer using tree-sitter.

use tree_sitter::{Language, Parser};

use crate::analysis::{LanguageAnalyzer, LoopGrammar, ParsedSource};

/// Node kinds from tree-sitter-python.
///
/// Current grammar revisions parse `True` as a `true` node, but older ones
/// surfaced it as a bare identifier; both spellings are recognized.
static PYTHON_GRAMMAR: LoopGrammar = LoopGrammar {
    while_kind: "while_statement",
    loop_kinds: &["while_statement", "for_statement"],
    condition_field: "condition",
    body_field: "body",
    condition_wrappers: &[],
    true_kind: "true",
    truthy_identifiers: &["True"],
    integer_kind: "integer",
    identifier_kind: "identifier",
    break_kind: "break_statement",
    return_kind: "return_statement",
    call_kind: "call",
    function_field: "function",
    attribute_kind: "attribute",
    attribute_field: "attribute",
    blocking_calls: &["sleep"],
};

pub struct PythonAnalyzer {
    language: Language,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for PythonAnalyzer {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn grammar(&self) -> &'static LoopGrammar {
        &PYTHON_GRAMMAR
    }

    fn parse(&self, source: &[u8]) -> anyhow::Result<ParsedSource> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Python source"))?;

        Ok(ParsedSource {
            tree,
            source: source.to_vec(),
        })
    }
}
