use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pyreqs_core::{
    filter_third_party, write_manifest, ImportScanner, ProjectMetadata, ScanConfig, ScanReport,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "pyreqs")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan a Python project for imports and generate a Poetry-compatible pyproject.toml")]
#[command(long_about = "Walks the project tree, parses every .py file, filters out standard-library \
    modules and writes the remaining imports as wildcard dependencies to a Poetry-compatible \
    pyproject.toml. Virtual-env and cache folders are skipped by default.\n\n\
    No package index is consulted: version constraints are left to the resolver.")]
pub struct Args {
    /// Project root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Project name for [tool.poetry]. Defaults to the root directory's name
    #[arg(long)]
    pub name: Option<String>,

    /// Project version
    #[arg(long, default_value = "0.1.0")]
    pub project_version: String,

    /// Project description
    #[arg(long, default_value = "")]
    pub description: String,

    /// README filename to include. Use an empty string to omit
    #[arg(long, default_value = "README.md")]
    pub readme: String,

    /// Add a package include (can be given multiple times)
    #[arg(long = "include", action = clap::ArgAction::Append)]
    pub package_includes: Vec<String>,

    /// Python version constraint (e.g. ^3.10)
    #[arg(long, default_value = "^3.10")]
    pub python: String,

    /// Output file path for the generated pyproject.toml
    #[arg(short, long, default_value = "pyproject.toml")]
    pub output: PathBuf,

    /// Additional folder names to skip (glob style, can be given multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Also scan folders skipped by default (.venv, __pycache__, ...)
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Write a JSON scan report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Show verbose progress
    #[arg(short, long)]
    pub verbose: bool,
}

/// Base name of the resolved root, the same default the directory would
/// get as a package name
fn default_project_name(root: &Path) -> String {
    let resolved = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string())
}

fn join_names(names: &pyreqs_core::ImportSet) -> String {
    if names.is_empty() {
        "<none>".to_string()
    } else {
        names.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let name = args
        .name
        .clone()
        .unwrap_or_else(|| default_project_name(&args.path));

    let config = ScanConfig::new(args.path.clone())
        .with_exclude_patterns(args.exclude.clone())
        .with_default_excludes(!args.no_default_excludes);

    let spinner = if args.verbose {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Scanning project for Python imports...");
        Some(pb)
    } else {
        None
    };

    let mut scanner = ImportScanner::new(config)?;
    let imports = scanner.scan()?;
    let third_party = filter_third_party(&imports);

    if let Some(ref pb) = spinner {
        pb.finish_with_message(format!(
            "Scanned {} directories, found {} imports",
            scanner.file_index().len(),
            imports.len()
        ));
    }

    if args.verbose {
        eprintln!("Discovered imports: {}", join_names(&imports));
        if third_party.is_empty() {
            eprintln!("No third-party imports found. Generating minimal pyproject.toml");
        } else {
            eprintln!("Found third-party packages: {}", join_names(&third_party));
        }
    }

    // BTreeSet iteration is sorted, which keeps the manifest reproducible.
    // Wildcard constraints leave version resolution to Poetry.
    let dependencies: Vec<(String, String)> = third_party
        .iter()
        .map(|name| (name.clone(), "*".to_string()))
        .collect();

    let metadata = ProjectMetadata::new(name)
        .with_version(args.project_version.clone())
        .with_description(args.description.clone())
        .with_readme((!args.readme.is_empty()).then(|| args.readme.clone()))
        .with_package_includes(args.package_includes.clone())
        .with_python(args.python.clone());

    write_manifest(&args.output, &metadata, &dependencies, &[])?;

    if let Some(ref report_path) = args.report {
        let report = ScanReport {
            root: args.path.clone(),
            file_index: scanner.file_index().clone(),
            imports,
            third_party,
        };
        fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
    }

    if args.verbose {
        eprintln!("Wrote {}", args.output.display());
    }

    Ok(())
}
