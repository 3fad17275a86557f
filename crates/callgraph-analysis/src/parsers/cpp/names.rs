//! Declarator and name helpers over the tree-sitter-cpp grammar.

use tree_sitter::{Node, Point};

/// Text of `node`, or the empty string when the source is not valid UTF-8 there.
pub(crate) fn text<'s>(node: Node, source: &'s [u8]) -> &'s str {
    node.utf8_text(source).unwrap_or("")
}

/// Collapse runs of whitespace to a single space.
pub(crate) fn squash(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A possibly qualified name as written: `a::B::f` → qualifier `[a, B]`, name `f`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NameParts {
    pub qualifier: Vec<String>,
    pub name: String,
    /// Position of the final name component.
    pub start: Point,
}

/// Split a name node into qualifier and final name.
///
/// Handles plain identifiers, qualified identifiers (nested to any depth),
/// template functions, destructors and operators. Returns `None` for anything
/// that is not a name, such as a parenthesized function-pointer declarator.
pub(crate) fn name_parts(node: Node, source: &[u8]) -> Option<NameParts> {
    let mut qualifier = Vec::new();
    let mut current = node;
    loop {
        match current.kind() {
            "qualified_identifier" => {
                if let Some(scope) = current.child_by_field_name("scope") {
                    qualifier.extend(scope_components(scope, source));
                }
                current = current.child_by_field_name("name")?;
            }
            "template_function" | "template_method" => {
                current = current.child_by_field_name("name")?;
            }
            "identifier" | "field_identifier" | "type_identifier" | "destructor_name"
            | "operator_name" => {
                let name = squash(text(current, source));
                if name.is_empty() {
                    return None;
                }
                return Some(NameParts {
                    qualifier,
                    name,
                    start: current.start_position(),
                });
            }
            _ => return None,
        }
    }
}

/// Components named by a scope node (`ns`, `Cls<T>`, `a::b`).
pub(crate) fn scope_components(node: Node, source: &[u8]) -> Vec<String> {
    match node.kind() {
        "template_type" => node
            .child_by_field_name("name")
            .map(|n| vec![text(n, source).to_string()])
            .unwrap_or_default(),
        "nested_namespace_specifier" | "qualified_identifier" => text(node, source)
            .split("::")
            .map(squash)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => {
            let t = squash(text(node, source));
            if t.is_empty() {
                Vec::new()
            } else {
                vec![t]
            }
        }
    }
}

/// Unwrap pointer/reference/attribute wrappers around a declarator until a
/// `function_declarator` is found. `int *f(void)` is a function returning a
/// pointer; `int (*fp)(void)` is a variable and yields `None`.
pub(crate) fn function_declarator(declarator: Node) -> Option<Node> {
    let mut current = declarator;
    loop {
        match current.kind() {
            "function_declarator" => {
                let inner = current.child_by_field_name("declarator")?;
                return (inner.kind() != "parenthesized_declarator").then_some(current);
            }
            "pointer_declarator" | "reference_declarator" | "attributed_declarator" => {
                current = inner_declarator(current)?;
            }
            _ => return None,
        }
    }
}

/// The declarator nested inside a wrapper declarator. `reference_declarator`
/// carries no field name, so fall back to its last named child.
fn inner_declarator(node: Node) -> Option<Node> {
    if let Some(inner) = node.child_by_field_name("declarator") {
        return Some(inner);
    }
    let mut cursor = node.walk();
    let last = node.named_children(&mut cursor).last();
    last
}

/// Normalized parameter types of a `function_declarator`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Params {
    pub types: Vec<String>,
    /// Number of parameters without a default value.
    pub required: usize,
    pub variadic: bool,
}

/// Collect parameter types: `(const char *s, int n = 0, ...)` →
/// `["const char*", "int"]`, required 1, variadic. `(void)` is empty.
pub(crate) fn params(function_declarator: Node, source: &[u8]) -> Params {
    let mut out = Params::default();
    let Some(list) = function_declarator.child_by_field_name("parameters") else {
        return out;
    };

    let mut cursor = list.walk();
    for param in list.named_children(&mut cursor) {
        match param.kind() {
            "parameter_declaration" => {
                out.types.push(param_type(param, source));
                out.required += 1;
            }
            "optional_parameter_declaration" => out.types.push(param_type(param, source)),
            "variadic_parameter_declaration" => {
                out.types.push(format!("{}...", param_type(param, source)));
                out.variadic = true;
            }
            "variadic_parameter" => out.variadic = true,
            _ => {}
        }
    }

    if out.types.len() == 1 && out.types[0] == "void" {
        out.types.clear();
        out.required = 0;
    }
    out
}

/// The type of one parameter with its name stripped.
fn param_type(param: Node, source: &[u8]) -> String {
    let mut ty = String::new();
    let mut cursor = param.walk();
    for child in param.named_children(&mut cursor) {
        if child.kind() == "type_qualifier" {
            ty.push_str(text(child, source));
            ty.push(' ');
        }
    }
    if let Some(base) = param.child_by_field_name("type") {
        ty.push_str(&squash(text(base, source)));
    }

    let mut declarator = param.child_by_field_name("declarator");
    while let Some(d) = declarator {
        match d.kind() {
            "pointer_declarator" | "abstract_pointer_declarator" => ty.push('*'),
            "reference_declarator" | "abstract_reference_declarator" => {
                ty.push_str(if text(d, source).starts_with("&&") { "&&" } else { "&" });
            }
            "array_declarator" | "abstract_array_declarator" => ty.push_str("[]"),
            "function_declarator" | "abstract_function_declarator" => ty.push_str("()"),
            "parenthesized_declarator" | "abstract_parenthesized_declarator" => {}
            _ => break,
        }
        declarator = inner_declarator(d);
    }
    ty
}

/// True when the node carries a `static` storage class specifier.
pub(crate) fn is_static(node: Node, source: &[u8]) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|c| c.kind() == "storage_class_specifier" && text(c, source) == "static");
    found
}
