use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to build exclude pattern: {0}")]
    Glob(#[from] globset::Error),
}

/// Directory names pruned from the walk unless default excludes are disabled.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    ".venv",
    "venv",
    "__pycache__",
    ".mypy_cache",
    ".pytest_cache",
    ".ruff_cache",
    ".tox",
    ".nox",
    ".eggs",
    "*.egg-info",
    "node_modules",
    "dist",
    "build",
    ".idea",
    ".vscode",
];

/// Configuration for one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Root directory to scan
    pub root: PathBuf,
    /// Additional folder-name patterns to skip (glob style)
    pub exclude_patterns: Vec<String>,
    /// Apply the built-in denylist of virtual-env and cache folders
    pub use_default_excludes: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            exclude_patterns: vec![],
            use_default_excludes: true,
        }
    }
}

impl ScanConfig {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ..Default::default()
        }
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_default_excludes(mut self, enabled: bool) -> Self {
        self.use_default_excludes = enabled;
        self
    }
}

/// Denylist of folder names, consulted once per directory during the walk.
///
/// Patterns match the bare directory name, never the full path.
pub struct ExcludeFilter {
    globs: GlobSet,
}

impl ExcludeFilter {
    pub fn new(config: &ScanConfig) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        if config.use_default_excludes {
            for pattern in DEFAULT_EXCLUDES {
                builder.add(Glob::new(pattern)?);
            }
        }
        for pattern in &config.exclude_patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Self {
            globs: builder.build()?,
        })
    }

    /// Whether the walk should descend into a directory with this name
    pub fn should_descend(&self, dir_name: &str) -> bool {
        !self.globs.is_match(dir_name)
    }
}
