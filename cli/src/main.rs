use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use serde::Deserialize;
use walkdir::WalkDir;

/// Bulk-import lab content into a running labsite instance.
///
/// Walks a directory of JSON files, each declaring a resource kind and
/// a list of records, and posts every record to the REST API.
#[derive(Debug, Parser)]
#[command(name = "labsite-import", version)]
struct Args {
    /// Directory containing import files (*.json)
    dir: PathBuf,

    /// Base URL of the labsite instance
    #[arg(long, default_value = "http://127.0.0.1:3000")]
    server: String,

    /// Bearer token for the admin API
    #[arg(long, env = "LABSITE_TOKEN")]
    token: String,

    /// Parse and report without posting anything
    #[arg(long)]
    dry_run: bool,
}

/// One import file: a kind plus the raw records to create.
#[derive(Debug, Deserialize)]
struct ImportFile {
    /// Kebab-case resource kind (e.g. `journal`, `graduate-student`).
    kind: String,
    records: Vec<serde_json::Value>,
}

/// All *.json files under `dir`, sorted for deterministic import order.
fn discover_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

fn parse_import_file(path: &Path) -> anyhow::Result<ImportFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: ImportFile = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(file)
}

async fn import_records(
    client: &reqwest::Client,
    args: &Args,
    file: &ImportFile,
) -> (usize, usize) {
    let url = format!("{}/api/resources/{}", args.server, file.kind);
    let mut imported = 0;
    let mut failed = 0;

    for record in &file.records {
        let result = client
            .post(&url)
            .bearer_auth(&args.token)
            .json(record)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => imported += 1,
            Ok(response) => {
                failed += 1;
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                eprintln!("  {} record rejected ({}): {}", file.kind, status, body);
            }
            Err(e) => {
                failed += 1;
                eprintln!("  {} record failed: {}", file.kind, e);
            }
        }
    }

    (imported, failed)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let files = discover_files(&args.dir);
    if files.is_empty() {
        bail!("no .json import files found under {}", args.dir.display());
    }

    let client = reqwest::Client::new();
    let mut total_imported = 0;
    let mut total_failed = 0;

    for path in files {
        let file = parse_import_file(&path)?;
        println!(
            "{}: {} {} record(s)",
            path.display(),
            if args.dry_run { "would import" } else { "importing" },
            file.records.len()
        );

        if args.dry_run {
            continue;
        }

        let (imported, failed) = import_records(&client, &args, &file).await;
        total_imported += imported;
        total_failed += failed;
    }

    if !args.dry_run {
        println!("imported {} record(s), {} failed", total_imported, total_failed);
    }
    if total_failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
