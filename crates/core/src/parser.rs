use crate::models::ImportSet;
use thiserror::Error;
use tree_sitter::{Node, Parser, Point};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to initialize parser: {0}")]
    Init(String),
    #[error("invalid syntax at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}

/// Extracts top-level imported module names from Python source text.
pub struct PythonImportParser {
    parser: Parser,
}

impl PythonImportParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| ParseError::Init(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source text and collect the first dotted segment of every
    /// imported module name.
    ///
    /// Fails on syntactically invalid source; no partial recovery is
    /// attempted. Relative imports with no named module (`from . import x`)
    /// contribute nothing.
    pub fn extract_imports(&mut self, source: &str) -> Result<ImportSet, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParseError::Init("tree-sitter produced no syntax tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            let position = Self::first_error(&root).unwrap_or_else(|| root.start_position());
            return Err(ParseError::Syntax {
                line: position.row + 1,
                column: position.column,
            });
        }

        let mut imports = ImportSet::new();
        Self::collect_imports(&root, source, &mut imports);
        Ok(imports)
    }

    /// Locate the first error or missing node in the tree
    fn first_error(node: &Node) -> Option<Point> {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position());
        }
        if !node.has_error() {
            return None;
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if let Some(position) = Self::first_error(&child) {
                return Some(position);
            }
        }
        Some(node.start_position())
    }

    fn collect_imports(node: &Node, source: &str, imports: &mut ImportSet) {
        match node.kind() {
            "import_statement" => Self::collect_plain_import(node, source, imports),
            "import_from_statement" => Self::collect_from_import(node, source, imports),
            _ => {
                // Recurse so imports nested in functions or conditionals are found
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    Self::collect_imports(&child, source, imports);
                }
            }
        }
    }

    /// `import x, y.z` or `import x as alias`
    fn collect_plain_import(node: &Node, source: &str, imports: &mut ImportSet) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "dotted_name" => Self::push_top_segment(&child, source, imports),
                "aliased_import" => {
                    let mut inner = child.walk();
                    for part in child.children(&mut inner) {
                        if part.kind() == "dotted_name" {
                            Self::push_top_segment(&part, source, imports);
                            break;
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// `from x.y import z`, `from ..pkg import z` or `from . import z`
    ///
    /// The source module is the first `dotted_name` or `relative_import`
    /// child; everything after the `import` keyword names items, not
    /// modules.
    fn collect_from_import(node: &Node, source: &str, imports: &mut ImportSet) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "dotted_name" => {
                    Self::push_top_segment(&child, source, imports);
                    return;
                }
                "relative_import" => {
                    // `from ..pkg import x` names a module; a bare `from .`
                    // references the local package only
                    if let Some(name) = Self::named_module(&child) {
                        Self::push_top_segment(&name, source, imports);
                    }
                    return;
                }
                _ => {}
            }
        }
    }

    fn named_module<'tree>(relative: &Node<'tree>) -> Option<Node<'tree>> {
        let mut cursor = relative.walk();
        let found = relative
            .children(&mut cursor)
            .find(|child| child.kind() == "dotted_name");
        found
    }

    fn push_top_segment(node: &Node, source: &str, imports: &mut ImportSet) {
        let dotted = &source[node.byte_range()];
        if let Some(top) = dotted.split('.').next() {
            if !top.is_empty() {
                imports.insert(top.to_string());
            }
        }
    }
}
