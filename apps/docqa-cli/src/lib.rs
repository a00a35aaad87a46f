//! Shared plumbing for the `docqa` binaries: chunk collection loading and
//! the prompt block handed to an LLM. Document chunking itself happens
//! upstream; the CLI only deserializes what the chunker produced.

use anyhow::{Context, Result};
use docqa_core::types::{Chunk, RankedResult};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Read a chunk collection from one JSON file or from every `*.json` file
/// under a directory, in sorted path order.
pub fn load_chunks(path: &Path) -> Result<Vec<Chunk>> {
    if path.is_file() {
        return read_chunk_file(path);
    }

    let mut files: Vec<_> = WalkDir::new(path)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "json")
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();

    let bar = ProgressBar::new(files.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let mut chunks = Vec::new();
    for file in files {
        bar.set_message(file.display().to_string());
        chunks.extend(read_chunk_file(&file)?);
        bar.inc(1);
    }
    bar.finish_and_clear();
    Ok(chunks)
}

fn read_chunk_file(path: &Path) -> Result<Vec<Chunk>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading chunk file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing chunk file {}", path.display()))
}

/// The numbered-source prompt block the caller feeds to an LLM alongside
/// the question. Pure string assembly; calling the model is not our job.
#[must_use]
pub fn format_context(question: &str, results: &[RankedResult]) -> String {
    if results.is_empty() {
        return String::new();
    }

    let mut out = String::from(
        "Answer the question using only the numbered sources below. \
         Cite sources by number.\n\n",
    );
    for (position, hit) in results.iter().enumerate() {
        let states: Vec<&str> = hit
            .chunk
            .metadata
            .states
            .iter()
            .map(String::as_str)
            .collect();
        let _ = writeln!(
            out,
            "[Source {}] (score {:.2}{})",
            position + 1,
            hit.score,
            if states.is_empty() {
                String::new()
            } else {
                format!(", states: {}", states.join(", "))
            }
        );
        out.push_str(&hit.chunk.text);
        out.push('\n');
        for image in &hit.chunk.images {
            let _ = writeln!(out, "  [attached image: {} ({})]", image.filename, image.label);
        }
        out.push('\n');
    }
    let _ = write!(out, "Question: {question}");
    out
}
