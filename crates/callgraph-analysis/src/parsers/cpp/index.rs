//! Per-unit index of every function definition and declaration the unit can see.

use callgraph_core::types::collections::SmallVec8;
use callgraph_core::types::{FxHashMap, FxHashSet, SymbolId};
use tree_sitter::Node;

use super::names::{function_declarator, is_static, name_parts, params, scope_components, text};
use super::source::SourceFile;
use crate::parsers::types::{Cursor, CursorKind};
use crate::parsers::Language;

const ANONYMOUS_NAMESPACE: &str = "(anonymous namespace)";

/// One function definition or declaration.
#[derive(Debug, Clone)]
pub(crate) struct FunctionDecl {
    pub name: String,
    /// Enclosing namespaces and classes plus any written qualifier.
    pub scope: Vec<String>,
    pub params: Vec<String>,
    pub required: usize,
    pub variadic: bool,
    pub is_definition: bool,
    pub is_member: bool,
    pub file_local: bool,
    pub c_linkage: bool,
    pub file: usize,
    /// 1-based position of the function name.
    pub line: u32,
    pub column: u32,
    /// Start byte of the defining or declaring node.
    pub node_start: usize,
    pub symbol_id: SymbolId,
}

impl FunctionDecl {
    pub fn qualified_name(&self) -> String {
        if self.scope.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.scope.join("::"), self.name)
        }
    }

    /// `name(type, type)`.
    pub fn display(&self) -> String {
        format!("{}({})", self.name, self.params.join(", "))
    }

    pub fn accepts_arity(&self, arity: usize) -> bool {
        arity >= self.required && (self.variadic || arity <= self.params.len())
    }

    fn compute_symbol_id(&self, language: Language, file_path: &str) -> SymbolId {
        let mut id = String::from("c:");
        if self.file_local {
            id.push_str(file_path);
            id.push('@');
        }
        id.push_str(&self.qualified_name());
        let c_style = language == Language::C
            || (self.c_linkage && self.scope.is_empty() && !self.is_member);
        if !c_style {
            id.push('#');
            id.push_str(&self.params.join(","));
        }
        SymbolId::from(id)
    }
}

/// Function declarations across all files of one unit.
#[derive(Debug, Default)]
pub(crate) struct DeclIndex {
    decls: Vec<FunctionDecl>,
    by_name: FxHashMap<String, SmallVec8<usize>>,
    by_symbol: FxHashMap<SymbolId, SmallVec8<usize>>,
    by_node: FxHashMap<(usize, usize), usize>,
}

#[derive(Debug, Clone, Default)]
struct Scope {
    path: Vec<String>,
    in_class: bool,
    anonymous: bool,
    c_linkage: bool,
}

impl DeclIndex {
    /// Index every file of a unit.
    pub fn build(files: &[SourceFile], language: Language) -> Self {
        let mut builder = IndexBuilder {
            decls: Vec::new(),
            classes: FxHashSet::default(),
        };
        for (file_idx, file) in files.iter().enumerate() {
            builder.walk(file.root(), file.bytes(), file_idx, &Scope::default());
        }
        builder.finish(files, language)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn get(&self, idx: usize) -> &FunctionDecl {
        &self.decls[idx]
    }

    pub fn named(&self, name: &str) -> &[usize] {
        self.by_name.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// The decl indexed for the node starting at `start_byte` in `file`.
    pub fn at_node(&self, file: usize, start_byte: usize) -> Option<usize> {
        self.by_node.get(&(file, start_byte)).copied()
    }

    /// Definition of `symbol` if the unit has one.
    pub fn definition(&self, symbol: &SymbolId) -> Option<usize> {
        self.by_symbol
            .get(symbol)?
            .iter()
            .copied()
            .find(|&i| self.decls[i].is_definition)
    }

    /// The decl a reference to `idx` should point at: its definition when
    /// visible, otherwise the first declaration of the same symbol.
    pub fn preferred(&self, idx: usize) -> usize {
        let symbol = &self.decls[idx].symbol_id;
        self.definition(symbol)
            .or_else(|| self.by_symbol.get(symbol).and_then(|v| v.first().copied()))
            .unwrap_or(idx)
    }

    pub fn cursor(&self, idx: usize, files: &[SourceFile], kind: CursorKind) -> Cursor {
        let decl = &self.decls[idx];
        Cursor {
            symbol_id: decl.symbol_id.clone(),
            name: decl.display(),
            file: files[decl.file].path.clone(),
            line: decl.line,
            column: decl.column,
            kind,
        }
    }
}

struct IndexBuilder {
    decls: Vec<FunctionDecl>,
    classes: FxHashSet<String>,
}

impl IndexBuilder {
    fn walk(&mut self, node: Node, source: &[u8], file: usize, scope: &Scope) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            match child.kind() {
                "function_definition" => {
                    if let Some(declarator) = child.child_by_field_name("declarator") {
                        self.record(child, declarator, true, source, file, scope);
                    }
                    // A class defined in the return type still declares members.
                    if let Some(ty) = child.child_by_field_name("type") {
                        self.class_like(ty, source, file, scope);
                    }
                }
                "declaration" | "field_declaration" => {
                    let mut dc = child.walk();
                    let declarators: Vec<Node> =
                        child.children_by_field_name("declarator", &mut dc).collect();
                    for declarator in declarators {
                        self.record(child, declarator, false, source, file, scope);
                    }
                    if let Some(ty) = child.child_by_field_name("type") {
                        self.class_like(ty, source, file, scope);
                    }
                }
                "namespace_definition" => {
                    let mut inner = scope.clone();
                    match child.child_by_field_name("name") {
                        Some(name) => inner.path.extend(scope_components(name, source)),
                        None => {
                            inner.path.push(ANONYMOUS_NAMESPACE.to_string());
                            inner.anonymous = true;
                        }
                    }
                    inner.in_class = false;
                    if let Some(body) = child.child_by_field_name("body") {
                        self.walk(body, source, file, &inner);
                    }
                }
                "class_specifier" | "struct_specifier" | "union_specifier" => {
                    self.class_like(child, source, file, scope);
                }
                "linkage_specification" => {
                    let mut inner = scope.clone();
                    inner.c_linkage = child
                        .child_by_field_name("value")
                        .is_some_and(|v| text(v, source).trim_matches('"') == "C");
                    if let Some(body) = child.child_by_field_name("body") {
                        if body.kind() == "declaration_list" {
                            self.walk(body, source, file, &inner);
                        } else {
                            self.walk(child, source, file, &inner);
                        }
                    }
                }
                "template_declaration" | "declaration_list" | "field_declaration_list"
                | "ERROR" => self.walk(child, source, file, scope),
                kind if kind.starts_with("preproc_") => self.walk(child, source, file, scope),
                _ => {}
            }
        }
    }

    /// Descend into a class/struct/union body, if it has one.
    fn class_like(&mut self, node: Node, source: &[u8], file: usize, scope: &Scope) {
        if !matches!(node.kind(), "class_specifier" | "struct_specifier" | "union_specifier") {
            return;
        }
        let (Some(name), Some(body)) =
            (node.child_by_field_name("name"), node.child_by_field_name("body"))
        else {
            return;
        };
        let mut inner = scope.clone();
        inner.path.extend(scope_components(name, source));
        inner.in_class = true;
        self.classes.insert(inner.path.join("::"));
        self.walk(body, source, file, &inner);
    }

    fn record(
        &mut self,
        node: Node,
        declarator: Node,
        is_definition: bool,
        source: &[u8],
        file: usize,
        scope: &Scope,
    ) {
        let Some(fd) = function_declarator(declarator) else {
            return;
        };
        let Some(name_node) = fd.child_by_field_name("declarator") else {
            return;
        };
        let Some(parts) = name_parts(name_node, source) else {
            return;
        };

        let p = params(fd, source);
        let mut path = scope.path.clone();
        path.extend(parts.qualifier);
        let statik = is_static(node, source);

        self.decls.push(FunctionDecl {
            name: parts.name,
            scope: path,
            params: p.types,
            required: p.required,
            variadic: p.variadic,
            is_definition,
            is_member: scope.in_class,
            file_local: scope.anonymous || (statik && !scope.in_class),
            c_linkage: scope.c_linkage,
            file,
            line: parts.start.row as u32 + 1,
            column: parts.start.column as u32 + 1,
            node_start: node.start_byte(),
            symbol_id: SymbolId::new(""),
        });
    }

    fn finish(mut self, files: &[SourceFile], language: Language) -> DeclIndex {
        // Out-of-line member definitions: `void Cls::f() {}`.
        for decl in &mut self.decls {
            if !decl.is_member && !decl.scope.is_empty() {
                decl.is_member = self.classes.contains(&decl.scope.join("::"));
            }
        }

        // `static void f(void);` followed by `void f(void) {}` in the same file
        // still names one file-local function.
        let locals: FxHashSet<(usize, String, Vec<String>)> = self
            .decls
            .iter()
            .filter(|d| d.file_local)
            .map(|d| (d.file, d.qualified_name(), d.params.clone()))
            .collect();
        for decl in &mut self.decls {
            if !decl.file_local
                && locals.contains(&(decl.file, decl.qualified_name(), decl.params.clone()))
            {
                decl.file_local = true;
            }
        }

        let mut index = DeclIndex::default();
        for (i, decl) in self.decls.iter_mut().enumerate() {
            decl.symbol_id = decl.compute_symbol_id(language, &files[decl.file].path);
            index.by_name.entry(decl.name.clone()).or_default().push(i);
            index
                .by_symbol
                .entry(decl.symbol_id.clone())
                .or_default()
                .push(i);
            index.by_node.entry((decl.file, decl.node_start)).or_insert(i);
        }
        index.decls = self.decls;
        index
    }
}
