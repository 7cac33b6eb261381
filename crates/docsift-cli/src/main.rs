//! docsift CLI - ingest a container file and print the uniform JSON result.
//!
//! Reads an email message (EML/MSG), office document, PDF or image, runs
//! the converter, and writes the result to stdout or a file. Form-layout
//! analysis (tables and checkboxes in PDFs/images) is enabled by pointing
//! the tool at an analysis service endpoint.

use anyhow::{Context, Result};
use clap::Parser;
use docsift_analysis::FormApiClient;
use docsift_backend::{BackendOptions, DocumentConverter};
use std::path::PathBuf;
use std::sync::Arc;

/// Ingest a document and emit the normalized JSON result
#[derive(Debug, Parser)]
#[command(name = "docsift", version, about)]
struct Cli {
    /// Input file (.eml, .msg, .pdf, .docx, .doc, .txt, .csv, .xlsx,
    /// .html, .jpg, .png)
    input: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Drop checkboxes whose label was already used by an earlier checkbox
    #[arg(long)]
    dedupe_checkboxes: bool,

    /// Maximum attachment size in bytes; larger attachments are skipped
    #[arg(long)]
    max_attachment_bytes: Option<usize>,

    /// Form-layout analysis service endpoint
    #[arg(long, env = "DOCSIFT_ANALYSIS_ENDPOINT")]
    analysis_endpoint: Option<String>,

    /// Form-layout analysis service key
    #[arg(long, env = "DOCSIFT_ANALYSIS_KEY", hide_env_values = true)]
    analysis_key: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let options = BackendOptions::default()
        .with_dedupe_checkbox_labels(cli.dedupe_checkboxes)
        .with_max_attachment_bytes(cli.max_attachment_bytes);

    let mut converter = DocumentConverter::new().with_options(options);

    match (&cli.analysis_endpoint, &cli.analysis_key) {
        (Some(endpoint), Some(key)) => {
            let client = FormApiClient::new(endpoint.clone(), key.clone())
                .context("failed to build the analysis client")?;
            converter = converter.with_analyzer(Arc::new(client));
        }
        (Some(_), None) | (None, Some(_)) => {
            anyhow::bail!(
                "analysis endpoint and key must be provided together \
                 (--analysis-endpoint / --analysis-key)"
            );
        }
        (None, None) => {
            log::info!("no analysis service configured; PDFs yield native text only");
        }
    }

    let result = converter
        .convert_path(&cli.input)
        .with_context(|| format!("failed to ingest {}", cli.input.display()))?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("wrote result to {}", path.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}
