//! fixcheck - workspace validation and diffing for rule-test fixtures.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use fixcheck_diagnostics::ActualFinding;
use fixcheck_verify::differ;
use fixcheck_workspace::{
    Document, HarnessConfig, JavaWorkspaceBuilder, ProjectDescriptor, Workspace, WorkspaceBuilder,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "fixcheck")]
#[command(about = "Validate and diff rule-test workspaces", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Syntax-validate Java files and project descriptors
    Validate {
        /// Files or directories to validate
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to fixcheck.toml config
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Compare an expected source tree against an actual one
    Diff {
        /// Expected file or directory
        expected: PathBuf,

        /// Actual file or directory
        actual: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { paths, config } => run_validate(&paths, config.as_deref()),
        Commands::Diff { expected, actual } => run_diff(&expected, &actual),
    }
}

/// Run the validate command.
fn run_validate(paths: &[PathBuf], config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let builder = JavaWorkspaceBuilder::with_config(config);

    let java_files = collect_java_files(paths);
    let descriptors = collect_descriptors(paths);

    let mut findings: Vec<ActualFinding> = java_files
        .par_iter()
        .map(|path| validate_file(&builder, path))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    for path in &descriptors {
        findings.extend(validate_descriptor(&builder, path)?);
    }

    for finding in &findings {
        println!(
            "{}:{}: {} {}",
            finding.path,
            finding.position,
            format!("[{}]", finding.rule_id).blue(),
            finding.message
        );
    }

    if findings.is_empty() {
        println!("{}", "No syntax errors found".green());
        Ok(())
    } else {
        println!("\nFound {} error(s)", findings.len().to_string().red());
        std::process::exit(1);
    }
}

/// Validate a single Java file.
fn validate_file(builder: &JavaWorkspaceBuilder, path: &Path) -> Result<Vec<ActualFinding>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let workspace = Workspace::from_documents(vec![Document::new(path.display().to_string(), source)]);
    Ok(builder.compile_findings(&workspace))
}

/// Validate every source a project descriptor names.
fn validate_descriptor(builder: &JavaWorkspaceBuilder, path: &Path) -> Result<Vec<ActualFinding>> {
    let descriptor = ProjectDescriptor::from_file(path)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    let base = path.parent().unwrap_or(Path::new("."));
    let project = descriptor
        .load(base)
        .with_context(|| format!("Failed to load sources of {}", path.display()))?;
    let workspace = builder
        .build(vec![project])
        .with_context(|| format!("Failed to build project from {}", path.display()))?;

    eprintln!(
        "Validating project '{}' ({} document(s))",
        descriptor.name,
        workspace.document_count()
    );
    Ok(builder.compile_findings(&workspace))
}

/// Run the diff command.
fn run_diff(expected: &Path, actual: &Path) -> Result<()> {
    let expected_docs = load_documents(expected)?;
    let actual_docs = load_documents(actual)?;

    match differ::diff_documents(&expected_docs, &actual_docs) {
        None => {
            println!("{}", "No differences".green());
            Ok(())
        }
        Some(report) => {
            println!("{report}");
            std::process::exit(1);
        }
    }
}

/// Load one file, or every `.java` file under a directory, with paths
/// relative to the root so two trees pair up by path.
fn load_documents(root: &Path) -> Result<Vec<Document>> {
    if root.is_file() {
        let text = std::fs::read_to_string(root)
            .with_context(|| format!("Failed to read {}", root.display()))?;
        let name = root
            .file_name()
            .map_or_else(|| root.display().to_string(), |n| n.to_string_lossy().into_owned());
        return Ok(vec![Document::new(name, text)]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "java"))
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for file in files {
        let text = std::fs::read_to_string(&file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let relative = file.strip_prefix(root).unwrap_or(&file);
        documents.push(Document::new(relative.display().to_string(), text));
    }
    Ok(documents)
}

/// Load fixcheck.toml from an explicit path or a common location.
fn load_config(config_path: Option<&Path>) -> Result<HarnessConfig> {
    if let Some(path) = config_path {
        let config = HarnessConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        eprintln!("Loaded config from: {}", path.display());
        return Ok(config);
    }

    let candidates = ["fixcheck.toml", ".fixcheck.toml", "config/fixcheck.toml"];
    for candidate in candidates {
        let path = Path::new(candidate);
        if path.exists()
            && let Ok(config) = HarnessConfig::from_file(path)
        {
            eprintln!("Loaded config from: {candidate}");
            return Ok(config);
        }
    }
    Ok(HarnessConfig::default())
}

fn collect_java_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() && path.extension().is_some_and(|e| e == "java") {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "java"))
            {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files
}

fn collect_descriptors(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|path| path.is_file() && path.extension().is_some_and(|e| e == "xml"))
        .cloned()
        .collect()
}
