//! gxdoc: generate documentation from GeneXus export packages.
//!
//! `gxdoc -o docs/ exports/*.xpz` reads every procedure, resolves its
//! parameter signature, parses its `/** ... */` annotation comment and
//! writes Markdown (or JSON) pages.

use anyhow::{Context, Result};
use clap::Parser;
use gxdoc::{kinds, logging, render, xpz, Config};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "gxdoc",
    version,
    about = "Generate documentation from GeneXus export packages (.xpz / .xml)"
)]
struct Cli {
    /// Input files (glob patterns and directories supported)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Output directory
    #[arg(short = 'o', long, default_value = "docs")]
    output: PathBuf,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,

    /// Extra object kind mapping, GUID=Label. Can be specified multiple times.
    /// A label of "Folder" marks a container kind.
    #[arg(long = "kind", value_name = "GUID=LABEL", value_parser = kinds::parse_mapping)]
    kinds: Vec<(String, String)>,

    /// Log every object resolution
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level(cli.verbose, cli.quiet))?;

    let config = build_config(&cli.kinds);
    let renderer = render::create_renderer(&cli.format)?;

    let inputs = expand_globs(&cli.inputs)?;
    if inputs.is_empty() {
        anyhow::bail!("no input files found");
    }

    let mut written = 0;
    for input in &inputs {
        let extraction = xpz::extract_path(input, &config)
            .with_context(|| format!("failed to extract {}", input.display()))?;

        for advisory in &extraction.advisories {
            tracing::debug!("{}: {}", advisory.subject, advisory.message);
        }
        if !extraction.advisories.is_empty() {
            tracing::warn!(
                "{}: {} advisory(ies) raised during extraction",
                input.display(),
                extraction.advisories.len()
            );
        }

        let out_dir = output_dir_for(&cli.output, input, inputs.len() > 1);
        fs::create_dir_all(&out_dir).with_context(|| {
            format!("failed to create output directory: {}", out_dir.display())
        })?;

        for file in renderer.render(&extraction) {
            let out_path = out_dir.join(&file.name);
            fs::write(&out_path, &file.contents)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            written += 1;
        }
    }

    tracing::info!(
        "wrote {} files for {} input(s) to {}",
        written,
        inputs.len(),
        cli.output.display()
    );
    Ok(())
}

fn build_config(mappings: &[(String, String)]) -> Config {
    let mut config = Config::default();
    for (guid, label) in mappings {
        config.kinds.register(guid, label);
    }
    config
}

/// Where the pages of one input go. Several inputs each get a subdirectory
/// named after the file stem.
fn output_dir_for(output: &Path, input: &Path, multiple: bool) -> PathBuf {
    if !multiple {
        return output.to_path_buf();
    }
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    output.join(render::sanitize_file_name(&stem))
}

/// Export file extensions picked up when a directory is given.
const EXPORT_EXTENSIONS: &[&str] = &["xpz", "xml"];

fn is_export_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                EXPORT_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
}

/// Resolve every input argument to export files, sorted and deduplicated.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();
    for pattern in patterns {
        let matched = resolve_input(pattern)?;
        if matched.is_empty() {
            tracing::warn!("no files matched: {}", pattern);
        }
        files.extend(matched);
    }
    Ok(files.into_iter().collect())
}

/// One argument: a file is taken as is, a directory contributes its export
/// files (non-recursive), anything else is a glob pattern.
fn resolve_input(pattern: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(pattern);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if path.is_dir() {
        let entries = fs::read_dir(path)
            .with_context(|| format!("failed to read directory: {}", path.display()))?;
        return Ok(entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|p| is_export_file(p))
            .collect());
    }
    Ok(glob::glob(pattern)
        .with_context(|| format!("invalid glob pattern: {}", pattern))?
        .filter_map(|r| r.ok())
        .filter(|p| p.is_file())
        .collect())
}
