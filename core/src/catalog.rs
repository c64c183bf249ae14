//! Loading course catalogs from JSON, JSONL, or a directory of either.

use crate::document::Document;
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Load every record under `path`, in file order then record order.
/// Fails on unreadable files, malformed records, or a repeated `id`.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let mut docs = Vec::new();
    for file in catalog_files(path)? {
        let before = docs.len();
        let read = if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)
        } else {
            read_json(&file, &mut docs)
        };
        read.with_context(|| format!("reading catalog file {}", file.display()))?;
        tracing::debug!(file = %file.display(), records = docs.len() - before, "loaded catalog file");
    }

    let mut seen = HashSet::new();
    for doc in &docs {
        if !seen.insert(doc.id.as_str()) {
            bail!("duplicate document id {:?} in {}", doc.id, path.display());
        }
    }
    tracing::info!(path = %path.display(), documents = docs.len(), "catalog loaded");
    Ok(docs)
}

fn catalog_files(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        bail!("catalog path {} does not exist", path.display());
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file())
        .filter(|p| matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")))
        .collect();
    files.sort();
    Ok(files)
}

fn read_jsonl(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let doc: Document = serde_json::from_str(&line).with_context(|| format!("line {}", n + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<Document>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        other => bail!("expected an array or object of records, found {other}"),
    }
    Ok(())
}
