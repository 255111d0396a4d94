//! Command-line interface for loopcheck.

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analysis;
use crate::config::Config;
use crate::detect;
use crate::report::{self, FileReport};
use crate::server::Server;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FOUND: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Editor-side infinite loop detector.
///
/// Loopcheck parses source files with tree-sitter and flags `while` loops
/// whose condition is always true and whose body contains no break, return,
/// or recognized blocking call.
#[derive(Parser)]
#[command(name = "loopcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze files or a directory for runaway loops
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// Run the analysis server the editor integration talks to
    Serve(ServeArgs),
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the serve command.
#[derive(Parser)]
pub struct ServeArgs {
    /// Port to listen on (default: from config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

fn load_config(path: &Option<PathBuf>) -> anyhow::Result<Config> {
    match path {
        Some(p) => Config::parse_file(p),
        None => Config::discover(),
    }
}

/// Collect analyzable files under root for the enabled languages.
fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            // The walk root is always scanned, even when its own name is
            // dot-prefixed; only directories below it get filtered.
            if e.depth() == 0 {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            if e.file_type().is_dir()
                && (name.starts_with('.')
                    || name == "node_modules"
                    || name == "__pycache__"
                    || name == "venv"
                    || name == "target")
            {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if let Some(analyzer) = analysis::analyzer_for_extension(ext) {
            if config.language_enabled(analyzer.language_id()) {
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config = load_config(&args.config)?;

    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let files = if abs_path.is_dir() {
        collect_files(&abs_path, &config)?
    } else {
        vec![abs_path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to scan");
        return Ok(EXIT_SUCCESS);
    }

    // Every analysis call is independent and stateless, so files fan out
    // across threads without coordination.
    let reports: Vec<FileReport> = files
        .par_iter()
        .map(|path| -> anyhow::Result<FileReport> {
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            let analyzer = analysis::analyzer_for_extension(ext)
                .ok_or_else(|| anyhow::anyhow!("unsupported file type: {}", path.display()))?;
            let source = std::fs::read_to_string(path)?;
            Ok(FileReport {
                file: path.display().to_string(),
                result: detect::analyze_with(analyzer, &source),
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    match args.format.as_str() {
        "json" => report::write_json(&reports)?,
        _ => report::write_pretty(&reports),
    }

    let found = reports.iter().any(|r| !r.result.is_safe());
    if found {
        Ok(EXIT_FOUND)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the serve command. Blocks until killed.
pub fn run_serve(args: &ServeArgs) -> anyhow::Result<i32> {
    let config = load_config(&args.config)?;
    let port = args.port.unwrap_or(config.port);
    let server = Server::bind(port)?;
    server.run()?;
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_files_filters_by_language() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("b.js"), "let x = 1;\n").unwrap();
        std::fs::write(dir.path().join("c.go"), "package main\n").unwrap();

        let config = Config::default();
        let files = collect_files(dir.path(), &config).unwrap();
        assert_eq!(files.len(), 2);

        let python_only = Config {
            languages: vec!["python".to_string()],
            ..Config::default()
        };
        let files = collect_files(dir.path(), &python_only).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].to_string_lossy().ends_with("a.py"));
    }

    #[test]
    fn test_collect_files_scans_dot_named_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join(".workdir");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("main.py"), "x = 1\n").unwrap();

        let files = collect_files(&root, &Config::default()).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_collect_files_skips_hidden_and_vendor_dirs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join("node_modules/dep.js"), "x\n").unwrap();
        std::fs::write(dir.path().join(".git/hook.py"), "x\n").unwrap();
        std::fs::write(dir.path().join("main.py"), "x = 1\n").unwrap();

        let files = collect_files(dir.path(), &Config::default()).unwrap();
        assert_eq!(files.len(), 1);
    }
}
