use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Unique top-level module names discovered across a scan.
///
/// Only the first dotted segment of an import path is ever stored here
/// (`import a.b.c` contributes `a`).
pub type ImportSet = BTreeSet<String>;

/// Directory name -> Python file names found directly inside it.
///
/// Rebuilt from scratch on every scan. Directories without any matching
/// files still get an empty entry.
pub type FileIndex = BTreeMap<String, Vec<String>>;

/// Project metadata for the `[tool.poetry]` table of the generated manifest.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectMetadata {
    /// Package name
    pub name: String,
    /// Package version
    pub version: String,
    /// One-line description
    pub description: String,
    /// README filename; `None` (or empty) omits the line entirely
    pub readme: Option<String>,
    /// Package include directives, one packaging root each
    pub package_includes: Vec<String>,
    /// Python version constraint (e.g. `^3.10`)
    pub python: String,
}

impl ProjectMetadata {
    pub fn new(name: String) -> Self {
        Self {
            name,
            version: "0.1.0".to_string(),
            description: String::new(),
            readme: Some("README.md".to_string()),
            package_includes: vec![],
            python: "^3.10".to_string(),
        }
    }

    pub fn with_version(mut self, version: String) -> Self {
        self.version = version;
        self
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_readme(mut self, readme: Option<String>) -> Self {
        self.readme = readme;
        self
    }

    pub fn with_package_includes(mut self, includes: Vec<String>) -> Self {
        self.package_includes = includes;
        self
    }

    pub fn with_python(mut self, python: String) -> Self {
        self.python = python;
        self
    }
}

/// Machine-readable summary of one scan invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Project root that was scanned
    pub root: PathBuf,
    /// Directory name -> Python files found in it
    pub file_index: FileIndex,
    /// Every top-level module name imported anywhere in the tree
    pub imports: ImportSet,
    /// Imports left after subtracting the standard library
    pub third_party: ImportSet,
}
