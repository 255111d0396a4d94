//! Infinite-loop detection over a parsed tree.
//!
//! A `while` loop is flagged when its condition can never be false and a
//! single walk of its body finds no way out: no `break`, no `return`, and no
//! call to a recognized blocking function such as `time.sleep`.
//!
//! Condition classification is purely syntactic. A condition that is always
//! true for dataflow reasons (`x = True; while x:`) is a deliberate false
//! negative; precision over recall.

use tree_sitter::Node;

use crate::analysis::{LoopGrammar, ParsedSource};

/// Classification of one loop condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionVerdict {
    /// True when the condition is a true literal, a truthy keyword spelled
    /// as an identifier, or the integer literal `1`.
    pub is_unconditionally_true: bool,
    /// The node kind that was observed (telemetry only; never affects
    /// verdicts once `is_unconditionally_true` is false).
    pub observed_kind: String,
}

/// Escape constructs found in one loop body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExitEvidence {
    pub has_break: bool,
    pub break_count: usize,
    pub has_return: bool,
    pub return_count: usize,
    pub has_blocking_call: bool,
    /// Callee spellings of recognized blocking calls, in document order.
    pub blocking_calls: Vec<String>,
}

impl ExitEvidence {
    /// Whether anything in the body can stop or pace the loop.
    pub fn has_any_exit(&self) -> bool {
        self.has_break || self.has_return || self.has_blocking_call
    }
}

/// One examined loop: header position plus verdicts.
#[derive(Debug, Clone)]
pub struct LoopFinding {
    /// 0-based position of the loop header.
    pub start_line: usize,
    pub start_column: usize,
    /// 0-based end position of the whole loop node.
    pub end_line: usize,
    pub end_column: usize,
    pub condition: ConditionVerdict,
    /// Only collected for unconditionally-true conditions.
    pub exits: Option<ExitEvidence>,
}

impl LoopFinding {
    /// A loop is dangerous iff its condition is always true and its body
    /// shows no escape construct.
    pub fn is_dangerous(&self) -> bool {
        self.condition.is_unconditionally_true
            && self.exits.as_ref().map_or(true, |e| !e.has_any_exit())
    }
}

/// Examine every condition-controlled loop in a parsed source, in document
/// order.
pub fn examine_loops(parsed: &ParsedSource, grammar: &LoopGrammar) -> Vec<LoopFinding> {
    find_condition_loops(parsed.root(), grammar)
        .into_iter()
        .map(|node| {
            let condition = classify_condition(node, parsed, grammar);
            let exits = condition
                .is_unconditionally_true
                .then(|| collect_exit_evidence(node, parsed, grammar));
            let start = node.start_position();
            let end = node.end_position();
            LoopFinding {
                start_line: start.row,
                start_column: start.column,
                end_line: end.row,
                end_column: end.column,
                condition,
                exits,
            }
        })
        .collect()
}

/// Collect every condition-controlled loop node in pre-order, which is
/// document order for loop headers.
pub fn find_condition_loops<'t>(root: Node<'t>, grammar: &LoopGrammar) -> Vec<Node<'t>> {
    let mut loops = Vec::new();
    collect_loops(root, grammar, &mut loops);
    loops
}

fn collect_loops<'t>(node: Node<'t>, grammar: &LoopGrammar, out: &mut Vec<Node<'t>>) {
    if node.kind() == grammar.while_kind {
        out.push(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_loops(child, grammar, out);
    }
}

/// Classify the loop condition by structural pattern, without evaluating
/// anything.
pub fn classify_condition(
    loop_node: Node,
    parsed: &ParsedSource,
    grammar: &LoopGrammar,
) -> ConditionVerdict {
    let Some(condition) = loop_node.child_by_field_name(grammar.condition_field) else {
        return ConditionVerdict {
            is_unconditionally_true: false,
            observed_kind: "missing".to_string(),
        };
    };
    let condition = unwrap_condition(condition, grammar);
    let kind = condition.kind();

    let is_unconditionally_true = if kind == grammar.true_kind {
        true
    } else if kind == grammar.identifier_kind {
        grammar
            .truthy_identifiers
            .contains(&parsed.node_text(condition))
    } else if kind == grammar.integer_kind {
        parsed.node_text(condition) == "1"
    } else {
        false
    };

    ConditionVerdict {
        is_unconditionally_true,
        observed_kind: kind.to_string(),
    }
}

/// Peel wrapper nodes (JavaScript parenthesizes while conditions) down to
/// the expression itself.
fn unwrap_condition<'t>(mut node: Node<'t>, grammar: &LoopGrammar) -> Node<'t> {
    while grammar.condition_wrappers.contains(&node.kind()) {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Walk the loop body exactly once, recording escape constructs.
///
/// The walk refuses to enter nested loop subtrees: an inner loop's `break`
/// only exits the inner loop and must never rescue the outer one.
pub fn collect_exit_evidence(
    loop_node: Node,
    parsed: &ParsedSource,
    grammar: &LoopGrammar,
) -> ExitEvidence {
    let mut evidence = ExitEvidence::default();
    let Some(body) = loop_node.child_by_field_name(grammar.body_field) else {
        return evidence;
    };
    walk_body(body, body, parsed, grammar, &mut evidence);
    evidence
}

fn walk_body<'t>(
    node: Node<'t>,
    body_root: Node<'t>,
    parsed: &ParsedSource,
    grammar: &LoopGrammar,
    evidence: &mut ExitEvidence,
) {
    // Do-not-enter rule. The body root itself is exempt.
    if node.id() != body_root.id() && grammar.is_loop_kind(node.kind()) {
        return;
    }

    // TODO: a `return` inside a nested function definition still counts as
    // an exit for the enclosing loop even though it only exits that
    // function. Skipping function-definition subtrees here would close that
    // false negative, but it changes observable verdicts and needs its own
    // fixture pass first.
    let kind = node.kind();
    if kind == grammar.break_kind {
        evidence.has_break = true;
        evidence.break_count += 1;
    } else if kind == grammar.return_kind {
        evidence.has_return = true;
        evidence.return_count += 1;
    } else if kind == grammar.call_kind {
        if let Some(name) = blocking_callee(node, parsed, grammar) {
            evidence.has_blocking_call = true;
            evidence.blocking_calls.push(name);
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk_body(child, body_root, parsed, grammar, evidence);
    }
}

/// Callee spelling when the call is a recognized blocking call (`sleep(..)`
/// or `time.sleep(..)`-style member access).
///
/// A blocking call is a heuristic, not a semantic exit: the loop is "slow"
/// rather than "runaway", which this detector treats as safe.
fn blocking_callee(call: Node, parsed: &ParsedSource, grammar: &LoopGrammar) -> Option<String> {
    let callee = call.child_by_field_name(grammar.function_field)?;
    if callee.kind() == grammar.identifier_kind {
        let name = parsed.node_text(callee);
        if grammar.blocking_calls.contains(&name) {
            return Some(format!("{}()", name));
        }
    } else if callee.kind() == grammar.attribute_kind {
        let attr = callee.child_by_field_name(grammar.attribute_field)?;
        if grammar.blocking_calls.contains(&parsed.node_text(attr)) {
            return Some(format!("{}()", parsed.node_text(callee)));
        }
    }
    None
}
