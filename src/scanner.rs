//! Corpus scanner.
//!
//! Walks the corpus root, applies the include/exclude rules, reads each
//! remaining Markdown file and hands its content to the core extractor.
//!
//! Only the root itself is fatal: a missing or unreadable root aborts the
//! run. Anything that goes wrong below it (an unreadable file, a file that
//! is not valid UTF-8, a directory the walker cannot enter) becomes a
//! [`ScanWarning`] and the scan continues.

use anyhow::{bail, Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use wiki_audit_core::extract::extract_document;
use wiki_audit_core::models::DocumentRecord;

use crate::config::ScanConfig;
use crate::progress::{ScanProgressEvent, ScanProgressReporter};

/// Parse progress is reported every this many files, and once at the end.
const PROGRESS_EVERY: usize = 50;

/// A file that was skipped, and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanWarning {
    pub path: String,
    pub message: String,
}

/// Result of one scan: the record set plus any per-file warnings.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub root: PathBuf,
    /// Sorted by path.
    pub documents: Vec<DocumentRecord>,
    pub warnings: Vec<ScanWarning>,
}

pub fn scan_corpus(
    root: &Path,
    config: &ScanConfig,
    progress: &dyn ScanProgressReporter,
) -> Result<Corpus> {
    let metadata = std::fs::metadata(root)
        .with_context(|| format!("Cannot access corpus root: {}", root.display()))?;
    if !metadata.is_dir() {
        bail!("Corpus root is not a directory: {}", root.display());
    }
    std::fs::read_dir(root)
        .with_context(|| format!("Cannot read corpus root: {}", root.display()))?;

    progress.report(ScanProgressEvent::Discovering {
        root: root.display().to_string(),
    });

    let include_set = build_globset(&config.include_globs)?;

    let mut default_excludes = vec![
        "**/.git/**".to_string(),
        "**/node_modules/**".to_string(),
    ];
    default_excludes.extend(config.exclude_globs.clone());
    let exclude_set = build_globset(&default_excludes)?;

    let mut warnings = Vec::new();
    let mut candidates: Vec<(PathBuf, String)> = Vec::new();

    let walker = WalkDir::new(root).follow_links(config.follow_symlinks);
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(err)
                    .with_context(|| format!("Cannot read corpus root: {}", root.display()));
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| rel_posix(root, p))
                    .unwrap_or_else(|| root.display().to_string());
                let message = err.to_string();
                tracing::warn!(path = %path, error = %message, "skipping unreadable entry");
                progress.report(ScanProgressEvent::Skipped {
                    path: path.clone(),
                    reason: message.clone(),
                });
                warnings.push(ScanWarning { path, message });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let rel_str = rel_posix(root, entry.path());

        // Apply exclude patterns
        if exclude_set.is_match(&rel_str) {
            continue;
        }

        // Apply include patterns
        if !include_set.is_match(&rel_str) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !is_corpus_file(&file_name, config) {
            tracing::debug!(path = %rel_str, "excluded by name rule");
            continue;
        }

        candidates.push((entry.into_path(), rel_str));
    }

    // Sort for deterministic ordering
    candidates.sort_by(|a, b| a.1.cmp(&b.1));

    let total = candidates.len();
    let mut documents = Vec::with_capacity(total);
    for (i, (path, rel_str)) in candidates.into_iter().enumerate() {
        match std::fs::read_to_string(&path) {
            Ok(content) => documents.push(extract_document(&rel_str, &content)),
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(path = %rel_str, error = %message, "skipping unreadable file");
                progress.report(ScanProgressEvent::Skipped {
                    path: rel_str.clone(),
                    reason: message.clone(),
                });
                warnings.push(ScanWarning {
                    path: rel_str,
                    message,
                });
            }
        }

        let n = i + 1;
        if n % PROGRESS_EVERY == 0 || n == total {
            progress.report(ScanProgressEvent::Parsing {
                n: n as u64,
                total: total as u64,
            });
        }
    }

    tracing::debug!(
        documents = documents.len(),
        warnings = warnings.len(),
        "scan complete"
    );

    Ok(Corpus {
        root: root.to_path_buf(),
        documents,
        warnings,
    })
}

/// Name rules: not a denylisted system document, not an `_`-prefixed
/// template, not a backup copy.
pub fn is_corpus_file(file_name: &str, config: &ScanConfig) -> bool {
    if config.excluded_names.iter().any(|name| name == file_name) {
        return false;
    }
    if file_name.starts_with('_') {
        return false;
    }
    if !config.backup_marker.is_empty() && file_name.contains(&config.backup_marker) {
        return false;
    }
    true
}

/// Corpus-relative path with `/` separators on every platform.
fn rel_posix(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::CurDir => Some(".".to_string()),
            Component::ParentDir => Some("..".to_string()),
            Component::RootDir | Component::Prefix(_) => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(
            Glob::new(pattern).with_context(|| format!("Invalid glob pattern: '{}'", pattern))?,
        );
    }
    Ok(builder.build()?)
}
