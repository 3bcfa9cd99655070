use crate::config::{ConfigError, ExcludeFilter, ScanConfig};
use crate::models::{FileIndex, ImportSet};
use crate::parser::{ParseError, PythonImportParser};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// File extension recognized as Python source
pub const PYTHON_EXTENSION: &str = "py";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Walk(#[from] walkdir::Error),
    #[error("error parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Parser(#[from] ParseError),
}

/// Walks a project tree and accumulates imported module names.
///
/// All mutable scan state (file index, parser) is owned by the instance,
/// so independent scanners never interfere with each other.
pub struct ImportScanner {
    config: ScanConfig,
    exclude: ExcludeFilter,
    parser: PythonImportParser,
    file_index: FileIndex,
}

impl ImportScanner {
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let exclude = ExcludeFilter::new(&config)?;
        let parser = PythonImportParser::new()?;
        Ok(Self {
            config,
            exclude,
            parser,
            file_index: FileIndex::new(),
        })
    }

    /// Recursively scan the configured root and return the union of every
    /// file's imports.
    ///
    /// The file index is rebuilt from scratch on each call; scanning an
    /// unchanged tree twice yields the identical set. Unreadable or
    /// non-UTF-8 files and syntax errors abort the whole scan.
    pub fn scan(&mut self) -> Result<ImportSet, ScanError> {
        let Self {
            config,
            exclude,
            parser,
            file_index,
        } = self;

        file_index.clear();
        let mut imports = ImportSet::new();

        let walker = WalkDir::new(&config.root).into_iter().filter_entry(|entry| {
            // The root itself is never pruned, whatever it is called
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || exclude.should_descend(&entry.file_name().to_string_lossy())
        });

        for entry in walker {
            let entry = entry?;

            if entry.file_type().is_dir() {
                file_index.entry(dir_key(entry.path())).or_default();
                continue;
            }

            let path = entry.path();
            if path
                .extension()
                .map_or(false, |ext| ext == PYTHON_EXTENSION)
            {
                let contents = fs::read_to_string(path).map_err(|source| ScanError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                let file_imports =
                    parser
                        .extract_imports(&contents)
                        .map_err(|source| ScanError::Parse {
                            path: path.to_path_buf(),
                            source,
                        })?;
                imports.extend(file_imports);

                let parent = path.parent().unwrap_or(Path::new(""));
                file_index
                    .entry(dir_key(parent))
                    .or_default()
                    .push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(imports)
    }

    /// Directory name -> Python files discovered during the last scan
    pub fn file_index(&self) -> &FileIndex {
        &self.file_index
    }
}

/// Last path component, falling back to the path itself (covers `.`)
fn dir_key(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
