//! Call expression extraction and callee resolution.

use tree_sitter::Node;

use super::index::{DeclIndex, FunctionDecl};
use super::names::name_parts;
use super::source::SourceFile;
use crate::parsers::types::{CallPair, CursorKind};

/// The function named at a call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CallTarget {
    pub qualifier: Vec<String>,
    pub name: String,
    /// Written as `obj.f()` or `ptr->f()`.
    pub member: bool,
    pub arity: usize,
}

/// What a `call_expression` calls, when it names a function directly.
/// Calls through function pointers, lambdas and other expressions yield `None`.
pub(crate) fn call_target(call: Node, source: &[u8]) -> Option<CallTarget> {
    let mut function = call.child_by_field_name("function")?;
    while function.kind() == "parenthesized_expression" {
        let mut cursor = function.walk();
        let inner = function.named_children(&mut cursor).next();
        function = inner?;
    }

    let (parts, member) = match function.kind() {
        "field_expression" => (name_parts(function.child_by_field_name("field")?, source)?, true),
        _ => (name_parts(function, source)?, false),
    };

    let arity = call
        .child_by_field_name("arguments")
        .map(|args| {
            let mut cursor = args.walk();
            let count = args
                .named_children(&mut cursor)
                .filter(|a| a.kind() != "comment")
                .count();
            count
        })
        .unwrap_or(0);

    Some(CallTarget {
        qualifier: parts.qualifier,
        name: parts.name,
        member,
        arity,
    })
}

impl DeclIndex {
    /// Pick the declaration a call refers to.
    ///
    /// Candidates share the called name; a written qualifier must be a suffix
    /// of the candidate's scope; member syntax only matches members. Among the
    /// rest, the innermost scope enclosing the caller wins, then candidates
    /// accepting the argument count. Ties go to the first declaration seen.
    pub(crate) fn resolve_call(&self, target: &CallTarget, caller: Option<&FunctionDecl>) -> Option<usize> {
        let mut candidates: Vec<usize> = self
            .named(&target.name)
            .iter()
            .copied()
            .filter(|&i| {
                let decl = self.get(i);
                (!target.member || decl.is_member) && decl.scope.ends_with(&target.qualifier)
            })
            .collect();
        if candidates.is_empty() {
            return None;
        }

        if let (Some(caller), true) = (caller, target.qualifier.is_empty() && !target.member) {
            let best = candidates
                .iter()
                .filter(|&&i| caller.scope.starts_with(&self.get(i).scope))
                .map(|&i| self.get(i).scope.len())
                .max();
            if let Some(depth) = best {
                candidates.retain(|&i| {
                    let scope = &self.get(i).scope;
                    scope.len() == depth && caller.scope.starts_with(scope)
                });
            }
        }

        let fitting: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| self.get(i).accepts_arity(target.arity))
            .collect();
        let chosen = fitting.first().or(candidates.first()).copied()?;
        Some(self.preferred(chosen))
    }
}

/// The decl for the nearest `function_definition` enclosing `node`.
pub(crate) fn enclosing_definition(index: &DeclIndex, file: usize, node: Node) -> Option<usize> {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "function_definition" {
            return index.at_node(file, n.start_byte());
        }
        current = n.parent();
    }
    None
}

/// Every call expression in every file of the unit, in file then source order.
pub(crate) fn collect_calls(files: &[SourceFile], index: &DeclIndex) -> Vec<CallPair> {
    let mut pairs = Vec::new();
    for (file_idx, file) in files.iter().enumerate() {
        let source = file.bytes();
        let mut stack = vec![file.root()];
        while let Some(node) = stack.pop() {
            if node.kind() == "call_expression" {
                let caller = enclosing_definition(index, file_idx, node);
                let callee = call_target(node, source).and_then(|target| {
                    index.resolve_call(&target, caller.map(|c| index.get(c)))
                });
                pairs.push(CallPair {
                    caller: caller.map(|c| index.cursor(c, files, CursorKind::Definition)),
                    callee: callee.map(|c| {
                        let kind = if index.get(c).is_definition {
                            CursorKind::Definition
                        } else {
                            CursorKind::Declaration
                        };
                        index.cursor(c, files, kind)
                    }),
                });
            }
            let mut cursor = node.walk();
            let children: Vec<Node> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    pairs
}
