//! doxjson — extract Doxygen compound XML into a normalized JSON document.
//!
//! Supports two modes:
//!
//! - **single mode**: `doxjson [file.xml]` writes one document to stdout. With
//!   no argument the compound at `$DOXJSON_INPUT` (or `docs/xml/compound.xml`)
//!   is read.
//! - **batch mode**: `doxjson -o docs/json docs/xml/` writes one `<stem>.json`
//!   per input. Nothing is written unless every input extracts cleanly and
//!   no two inputs share a file stem.

mod error;
mod extract;
mod flatten;
mod model;
mod render;
mod tree;

use anyhow::{bail, Context, Result};
use clap::Parser;
use render::Renderer;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Compound read when no input is named.
const DEFAULT_INPUT: &str = "docs/xml/compound.xml";

#[derive(Parser)]
#[command(
    name = "doxjson",
    version,
    about = "Extract Doxygen compound XML into a normalized JSON document"
)]
struct Cli {
    /// Compound XML files, directories or glob patterns.
    #[arg(env = "DOXJSON_INPUT", default_value = DEFAULT_INPUT)]
    files: Vec<String>,

    /// Output directory. Required when more than one input is given.
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: json (default), json-compact
    #[arg(short = 'f', long, default_value = "json")]
    format: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let renderer = render::create_renderer(&cli.format)?;

    match cli.output.as_deref() {
        Some(output_dir) => batch_mode(&cli.files, output_dir, renderer.as_ref()),
        None => single_mode(&cli.files, renderer.as_ref()),
    }
}

/// Logs go to stderr; stdout carries only the document.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// single mode: one compound in, one document on stdout.
fn single_mode(patterns: &[String], renderer: &dyn Renderer) -> Result<()> {
    let inputs = expand_inputs(patterns)?;
    let path = match inputs.as_slice() {
        [path] => path,
        [] => bail!("no input files found"),
        _ => bail!("--output is required when more than one input is given"),
    };

    let doc = extract_file(path)?;
    let rendered = renderer.render(&doc)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(rendered.as_bytes())
        .and_then(|()| stdout.flush())
        .context("failed to write stdout")?;
    Ok(())
}

/// batch mode: extract every input first, then write them all.
fn batch_mode(patterns: &[String], output_dir: &Path, renderer: &dyn Renderer) -> Result<()> {
    let inputs = expand_inputs(patterns)?;
    if inputs.is_empty() {
        bail!("no input files found");
    }

    let mut rendered = Vec::with_capacity(inputs.len());
    for (path, out_path) in plan_outputs(&inputs, output_dir, renderer.file_extension())? {
        let doc = extract_file(path)?;
        rendered.push((out_path, renderer.render(&doc)?));
    }

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    for (out_path, content) in rendered {
        fs::write(&out_path, content)
            .with_context(|| format!("failed to write {}", out_path.display()))?;
        info!(path = %out_path.display(), "wrote document");
    }
    Ok(())
}

/// Pair each input with its output file. Two inputs with the same stem
/// (e.g. `a/x.xml` and `b/x.xml`) would overwrite each other, so that fails.
fn plan_outputs<'p>(
    inputs: &'p [PathBuf],
    output_dir: &Path,
    extension: &str,
) -> Result<Vec<(&'p Path, PathBuf)>> {
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::with_capacity(inputs.len());
    let mut plan = Vec::with_capacity(inputs.len());
    for path in inputs {
        let out_path = output_dir.join(format!("{}.{}", derive_output_name(path), extension));
        if let Some(previous) = claimed.insert(out_path.clone(), path.as_path()) {
            bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                path.display(),
                out_path.display()
            );
        }
        plan.push((path.as_path(), out_path));
    }
    Ok(plan)
}

fn extract_file(path: &Path) -> Result<model::Document> {
    let content = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = content.len(), "loaded compound");
    extract::extract_bytes(&content)
        .with_context(|| format!("failed to extract {}", path.display()))
}

/// Doxygen's own listing file, not a compound.
const INDEX_FILE: &str = "index.xml";

/// Expand inputs into a sorted list of files.
///
/// Directories are scanned (non-recursively) for `*.xml` compounds. A plain
/// path that doesn't exist is kept so the read reports it.
fn expand_inputs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                let is_xml = p.extension().and_then(|e| e.to_str()) == Some("xml");
                let is_index = p.file_name().and_then(|n| n.to_str()) == Some(INDEX_FILE);
                if p.is_file() && is_xml && !is_index {
                    files.push(p);
                }
            }
            continue;
        }
        if !pattern.contains(['*', '?', '[']) {
            files.push(path.to_path_buf());
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// "docs/xml/class_world.xml" → "class_world"
fn derive_output_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string())
}
