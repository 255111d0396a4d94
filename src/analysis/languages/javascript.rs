//! JavaScript language analyzer using tree-sitter.

use tree_sitter::{Language, Parser};

use crate::analysis::{LanguageAnalyzer, LoopGrammar, ParsedSource};

/// Node kinds from tree-sitter-javascript.
///
/// The while condition arrives wrapped in a `parenthesized_expression`, so
/// the classifier peels that before looking at the kind. There is no legacy
/// identifier spelling of `true`, so the truthy-identifier list is empty.
static JAVASCRIPT_GRAMMAR: LoopGrammar = LoopGrammar {
    while_kind: "while_statement",
    loop_kinds: &[
        "while_statement",
        "for_statement",
        "for_in_statement",
        "do_statement",
    ],
    condition_field: "condition",
    body_field: "body",
    condition_wrappers: &["parenthesized_expression"],
    true_kind: "true",
    truthy_identifiers: &[],
    integer_kind: "number",
    identifier_kind: "identifier",
    break_kind: "break_statement",
    return_kind: "return_statement",
    call_kind: "call_expression",
    function_field: "function",
    attribute_kind: "member_expression",
    attribute_field: "property",
    blocking_calls: &["sleep"],
};

pub struct JavaScriptAnalyzer {
    language: Language,
}

impl JavaScriptAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

impl Default for JavaScriptAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageAnalyzer for JavaScriptAnalyzer {
    fn language_id(&self) -> &'static str {
        "javascript"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "mjs", "cjs"]
    }

    fn grammar(&self) -> &'static LoopGrammar {
        &JAVASCRIPT_GRAMMAR
    }

    fn parse(&self, source: &[u8]) -> anyhow::Result<ParsedSource> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse JavaScript source"))?;

        Ok(ParsedSource {
            tree,
            source: source.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_source() {
        let analyzer = JavaScriptAnalyzer::new();
        let parsed = analyzer.parse(b"while (true) { work(); }\n").unwrap();
        assert!(!parsed.has_structural_error());
    }

    #[test]
    fn test_condition_is_parenthesized() {
        let analyzer = JavaScriptAnalyzer::new();
        let parsed = analyzer.parse(b"while (true) {}\n").unwrap();
        let grammar = analyzer.grammar();

        let stmt = parsed.root().named_child(0).unwrap();
        assert_eq!(stmt.kind(), grammar.while_kind);

        let condition = stmt.child_by_field_name(grammar.condition_field).unwrap();
        assert!(grammar.condition_wrappers.contains(&condition.kind()));
        assert_eq!(condition.named_child(0).unwrap().kind(), grammar.true_kind);
    }

    #[test]
    fn test_member_call_kinds() {
        let analyzer = JavaScriptAnalyzer::new();
        let parsed = analyzer
            .parse(b"while (true) { thread.sleep(100); }\n")
            .unwrap();
        let grammar = analyzer.grammar();

        let stmt = parsed.root().named_child(0).unwrap();
        let body = stmt.child_by_field_name(grammar.body_field).unwrap();
        let call = body
            .named_child(0)
            .and_then(|expr| expr.named_child(0))
            .unwrap();
        assert_eq!(call.kind(), grammar.call_kind);

        let callee = call.child_by_field_name(grammar.function_field).unwrap();
        assert_eq!(callee.kind(), grammar.attribute_kind);
        let prop = callee.child_by_field_name(grammar.attribute_field).unwrap();
        assert_eq!(parsed.node_text(prop), "sleep");
    }
}
