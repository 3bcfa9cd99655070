//! pyreqs core library
//!
//! Scans a Python project tree for import statements, separates
//! third-party packages from the standard library, and generates a
//! Poetry-compatible `pyproject.toml`.
//!
//! # Features
//!
//! - Parse Python imports (`import`, `from ... import`) with tree-sitter
//! - Prune virtual-env and cache folders during the walk
//! - Filter discovered names against a pinned standard-library enumeration
//! - Deterministically serialize project metadata and dependencies to TOML
//!
//! # Example
//!
//! ```no_run
//! use pyreqs_core::{
//!     filter_third_party, generate_manifest, ImportScanner, ProjectMetadata, ScanConfig,
//! };
//! use std::path::PathBuf;
//!
//! let config = ScanConfig::new(PathBuf::from("."));
//! let mut scanner = ImportScanner::new(config).unwrap();
//! let imports = scanner.scan().unwrap();
//!
//! let dependencies: Vec<(String, String)> = filter_third_party(&imports)
//!     .into_iter()
//!     .map(|name| (name, "*".to_string()))
//!     .collect();
//!
//! let metadata = ProjectMetadata::new("demo".to_string());
//! let manifest = generate_manifest(&metadata, &dependencies, &[]);
//! println!("{}", manifest);
//! ```

pub mod config;
pub mod manifest;
pub mod models;
pub mod parser;
pub mod scanner;
pub mod stdlib;

// Re-exports for convenience
pub use config::{ConfigError, ScanConfig, DEFAULT_EXCLUDES};
pub use manifest::{generate_manifest, write_manifest, ManifestError};
pub use models::{FileIndex, ImportSet, ProjectMetadata, ScanReport};
pub use parser::{ParseError, PythonImportParser};
pub use scanner::{ImportScanner, ScanError};
pub use stdlib::filter_third_party;
