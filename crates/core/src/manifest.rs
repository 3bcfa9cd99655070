use crate::models::ProjectMetadata;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Escape a string for embedding in a double-quoted TOML value.
///
/// Backslash and double quote are the only characters this format subset
/// needs escaped.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Minimal emitter for the pyproject subset this tool writes.
///
/// All escaping and table layout lives here, so swapping in a
/// standards-compliant TOML writer later touches nothing else.
struct TomlWriter {
    buf: String,
}

impl TomlWriter {
    fn new() -> Self {
        Self { buf: String::new() }
    }

    fn table(&mut self, header: &str) {
        if !self.buf.is_empty() {
            self.buf.push('\n');
        }
        self.buf.push('[');
        self.buf.push_str(header);
        self.buf.push_str("]\n");
    }

    fn string_entry(&mut self, key: &str, value: &str) {
        self.buf.push_str(key);
        self.buf.push_str(" = \"");
        self.buf.push_str(&escape(value));
        self.buf.push_str("\"\n");
    }

    fn string_array_entry(&mut self, key: &str, values: &[&str]) {
        let quoted: Vec<String> = values
            .iter()
            .map(|value| format!("\"{}\"", escape(value)))
            .collect();
        self.buf
            .push_str(&format!("{} = [{}]\n", key, quoted.join(", ")));
    }

    /// `key = [` / one `{ include = "…" },` line per entry / `]`
    fn include_array_entry(&mut self, key: &str, includes: &[String]) {
        self.buf.push_str(key);
        self.buf.push_str(" = [\n");
        for include in includes {
            self.buf
                .push_str(&format!("    {{ include = \"{}\" }},\n", escape(include)));
        }
        self.buf.push_str("]\n");
    }

    fn finish(self) -> String {
        self.buf
    }
}

/// Generate a Poetry-compatible pyproject.toml document.
///
/// Pure function of its inputs; dependency entries are emitted in the
/// order given, so callers wanting reproducible files must pass a sorted
/// sequence.
pub fn generate_manifest(
    metadata: &ProjectMetadata,
    dependencies: &[(String, String)],
    dev_dependencies: &[(String, String)],
) -> String {
    let mut writer = TomlWriter::new();

    writer.table("tool.poetry");
    writer.string_entry("name", &metadata.name);
    writer.string_entry("version", &metadata.version);
    writer.string_entry("description", &metadata.description);
    if let Some(readme) = metadata.readme.as_deref().filter(|r| !r.is_empty()) {
        writer.string_entry("readme", readme);
    }
    if !metadata.package_includes.is_empty() {
        writer.include_array_entry("packages", &metadata.package_includes);
    }

    writer.table("tool.poetry.dependencies");
    writer.string_entry("python", &metadata.python);
    for (name, constraint) in dependencies {
        writer.string_entry(name, constraint);
    }

    if !dev_dependencies.is_empty() {
        writer.table("tool.poetry.group.dev.dependencies");
        for (name, constraint) in dev_dependencies {
            writer.string_entry(name, constraint);
        }
    }

    writer.table("build-system");
    writer.string_array_entry("requires", &["poetry-core"]);
    writer.string_entry("build-backend", "poetry.core.masonry.api");

    writer.finish()
}

/// Serialize and write the manifest, overwriting any existing file.
pub fn write_manifest(
    path: &Path,
    metadata: &ProjectMetadata,
    dependencies: &[(String, String)],
    dev_dependencies: &[(String, String)],
) -> Result<(), ManifestError> {
    let document = generate_manifest(metadata, dependencies, dev_dependencies);
    fs::write(path, document).map_err(|source| ManifestError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deps(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(name, constraint)| (name.to_string(), constraint.to_string()))
            .collect()
    }

    #[test]
    fn test_full_document_layout() {
        let metadata = ProjectMetadata::new("demo".to_string())
            .with_package_includes(vec!["demo".to_string()]);
        let document = generate_manifest(
            &metadata,
            &deps(&[("requests", "*")]),
            &deps(&[("pytest", "^8.3.0")]),
        );

        let expected = "\
[tool.poetry]
name = \"demo\"
version = \"0.1.0\"
description = \"\"
readme = \"README.md\"
packages = [
    { include = \"demo\" },
]

[tool.poetry.dependencies]
python = \"^3.10\"
requests = \"*\"

[tool.poetry.group.dev.dependencies]
pytest = \"^8.3.0\"

[build-system]
requires = [\"poetry-core\"]
build-backend = \"poetry.core.masonry.api\"
";
        assert_eq!(document, expected);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let metadata = ProjectMetadata::new("demo".to_string());
        let dependencies = deps(&[("flask", "*"), ("requests", "*")]);
        let first = generate_manifest(&metadata, &dependencies, &[]);
        let second = generate_manifest(&metadata, &dependencies, &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_caller_order_is_preserved() {
        let metadata = ProjectMetadata::new("demo".to_string());
        let dependencies = deps(&[("zope", "*"), ("attrs", "*")]);
        let document = generate_manifest(&metadata, &dependencies, &[]);

        let zope = document.find("zope = ").unwrap();
        let attrs = document.find("attrs = ").unwrap();
        assert!(zope < attrs);
    }

    #[test]
    fn test_readme_omitted_when_absent() {
        let metadata = ProjectMetadata::new("demo".to_string()).with_readme(None);
        let document = generate_manifest(&metadata, &[], &[]);
        assert!(!document.contains("readme"));

        let metadata = ProjectMetadata::new("demo".to_string())
            .with_readme(Some(String::new()));
        let document = generate_manifest(&metadata, &[], &[]);
        assert!(!document.contains("readme"));
    }

    #[test]
    fn test_packages_block_omitted_when_empty() {
        let metadata = ProjectMetadata::new("demo".to_string());
        let document = generate_manifest(&metadata, &[], &[]);
        assert!(!document.contains("packages"));
    }

    #[test]
    fn test_dev_block_omitted_when_empty() {
        let metadata = ProjectMetadata::new("demo".to_string());
        let document = generate_manifest(&metadata, &deps(&[("requests", "*")]), &[]);
        assert!(!document.contains("group.dev"));
    }

    #[test]
    fn test_empty_dependency_map_still_emits_python_line() {
        let metadata = ProjectMetadata::new("demo".to_string());
        let document = generate_manifest(&metadata, &[], &[]);
        assert!(document.contains("[tool.poetry.dependencies]\npython = \"^3.10\"\n"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape(r"back\slash"), r"back\\slash");

        let metadata = ProjectMetadata::new("demo".to_string())
            .with_description(r#"a "quoted" \ description"#.to_string());
        let document = generate_manifest(&metadata, &[], &[]);
        assert!(document.contains(r#"description = "a \"quoted\" \\ description""#));
    }

    #[test]
    fn test_write_failure_carries_path() {
        let metadata = ProjectMetadata::new("demo".to_string());
        let bogus = Path::new("/nonexistent-dir/pyproject.toml");
        let err = write_manifest(bogus, &metadata, &[], &[]);
        assert!(matches!(err, Err(ManifestError::Write { .. })));
    }
}
