//! Internal link graph over a corpus snapshot.
//!
//! Nodes are document paths; edges are internal links resolved against the
//! linking document's directory. The graph is rebuilt from the records on
//! every run and holds no state of its own beyond what it derives.
//!
//! Existence is checked against the scanned record set, not the
//! filesystem: a link into an excluded file (a backup, a `_template.md`)
//! is broken because that file is not part of the navigable corpus.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::extract::is_external_target;
use crate::models::DocumentRecord;

/// One resolved internal link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Path of the linking document.
    pub source: String,
    /// Target exactly as written in the Markdown.
    pub target: String,
    /// Normalized corpus-relative path the target points at.
    pub resolved: String,
}

/// Derived view of all internal links in a snapshot.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    nodes: BTreeSet<String>,
    edges: Vec<Edge>,
}

impl LinkGraph {
    /// Resolve every internal link of every record.
    pub fn build(records: &[DocumentRecord]) -> Self {
        let nodes = records.iter().map(|r| r.path.clone()).collect();
        let edges = records
            .iter()
            .flat_map(|record| {
                record.internal_links().filter_map(move |link| {
                    resolve_target(&record.path, &link.target).map(|resolved| Edge {
                        source: record.path.clone(),
                        target: link.target.clone(),
                        resolved,
                    })
                })
            })
            .collect();
        Self { nodes, edges }
    }

    /// Edges whose resolved path is not a scanned document, in link order.
    pub fn broken_links(&self) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|edge| !self.nodes.contains(&edge.resolved))
            .collect()
    }

    /// Documents with no incoming link from another document.
    ///
    /// Self-links do not count. `entry` is never reported.
    pub fn orphans(&self, entry: &str) -> Vec<String> {
        let linked: HashSet<&str> = self
            .edges
            .iter()
            .filter(|edge| edge.resolved != edge.source)
            .map(|edge| edge.resolved.as_str())
            .collect();

        self.nodes
            .iter()
            .filter(|path| path.as_str() != entry && !linked.contains(path.as_str()))
            .cloned()
            .collect()
    }

    /// Number of distinct other documents linking to `path`.
    pub fn in_degree(&self, path: &str) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.resolved == path && edge.source != path)
            .map(|edge| edge.source.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// In-degree for every node, including zeros.
    pub fn in_degrees(&self) -> HashMap<&str, usize> {
        let mut sources: HashMap<&str, HashSet<&str>> = self
            .nodes
            .iter()
            .map(|n| (n.as_str(), HashSet::new()))
            .collect();
        for edge in &self.edges {
            if edge.source == edge.resolved {
                continue;
            }
            if let Some(set) = sources.get_mut(edge.resolved.as_str()) {
                set.insert(edge.source.as_str());
            }
        }
        sources.into_iter().map(|(k, v)| (k, v.len())).collect()
    }
}

/// Resolve a link target written in `source_path` to a corpus-relative path.
///
/// `#fragment` and `?query` suffixes are dropped; a target that is empty
/// afterwards points back at the source document. Targets starting with
/// `/` are taken relative to the corpus root. Climbing above the root keeps
/// the leading `..` segments, so such a path never names a document.
///
/// Returns `None` for external targets.
pub fn resolve_target(source_path: &str, target: &str) -> Option<String> {
    if is_external_target(target) {
        return None;
    }

    let path_part = target
        .split(|c: char| c == '#' || c == '?')
        .next()
        .unwrap_or_default();

    if path_part.is_empty() {
        return Some(normalize(source_path.split('/')));
    }

    if let Some(rooted) = path_part.strip_prefix('/') {
        return Some(normalize(rooted.split('/')));
    }

    let directory = match source_path.rfind('/') {
        Some(idx) => &source_path[..idx],
        None => "",
    };
    Some(normalize(directory.split('/').chain(path_part.split('/'))))
}

fn normalize<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    let mut out: Vec<&str> = Vec::new();
    for segment in segments {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(out.last(), Some(last) if *last != "..") {
                    out.pop();
                } else {
                    out.push("..");
                }
            }
            other => out.push(other),
        }
    }
    out.join("/")
}
