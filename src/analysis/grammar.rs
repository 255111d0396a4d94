//! Per-language node-kind tables that drive the loop detector.

/// Names of the node kinds and fields the detector needs from one
/// tree-sitter grammar.
///
/// All entries are raw grammar spellings ("while_statement",
/// "break_statement", ...), so supporting a new language means filling in
/// one static table and registering the analyzer.
#[derive(Debug, Clone, Copy)]
pub struct LoopGrammar {
    /// Kind of the condition-controlled loop this detector targets.
    pub while_kind: &'static str,
    /// Every loop kind, condition-controlled or counting. The body traversal
    /// refuses to descend into subtrees of these kinds.
    pub loop_kinds: &'static [&'static str],
    /// Field name of the condition on `while_kind` nodes.
    pub condition_field: &'static str,
    /// Field name of the loop body.
    pub body_field: &'static str,
    /// Wrapper kinds peeled off the condition before classification
    /// (JavaScript wraps it in a `parenthesized_expression`).
    pub condition_wrappers: &'static [&'static str],
    /// Kind of the boolean true literal.
    pub true_kind: &'static str,
    /// Identifier spellings that are unconditionally truthy when the grammar
    /// surfaces the keyword as a plain identifier (legacy Python `True`).
    pub truthy_identifiers: &'static [&'static str],
    /// Kind of integer literals; textual value `1` counts as always-true.
    pub integer_kind: &'static str,
    /// Kind of a bare identifier.
    pub identifier_kind: &'static str,
    /// Kind of a break statement.
    pub break_kind: &'static str,
    /// Kind of a return statement.
    pub return_kind: &'static str,
    /// Kind of a call expression and the field naming its callee.
    pub call_kind: &'static str,
    pub function_field: &'static str,
    /// Kind of attribute/member access and the field naming the accessed
    /// member (`time.sleep` -> `sleep`).
    pub attribute_kind: &'static str,
    pub attribute_field: &'static str,
    /// Callee names treated as intentional pacing rather than a runaway
    /// loop. Not a logical exit, but in this domain a sleeping loop is slow,
    /// not dangerous.
    pub blocking_calls: &'static [&'static str],
}

impl LoopGrammar {
    /// Whether a node kind is any loop construct.
    pub fn is_loop_kind(&self, kind: &str) -> bool {
        self.loop_kinds.contains(&kind)
    }
}
