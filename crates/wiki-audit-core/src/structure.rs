//! Link structure report: link totals, broken links and orphan documents.

use serde::Serialize;

use crate::graph::{Edge, LinkGraph};
use crate::models::DocumentRecord;
use crate::thresholds::Thresholds;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    pub internal_links: usize,
    pub external_links: usize,
    pub broken_links: Vec<Edge>,
    /// Sorted by path. Never contains the entry document.
    pub orphans: Vec<String>,
    /// Documents with at least one incoming link, most linked first.
    pub most_linked: Vec<LinkedDocument>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedDocument {
    pub path: String,
    /// Distinct other documents linking here.
    pub incoming: usize,
}

impl StructureReport {
    pub fn compute(records: &[DocumentRecord], thresholds: &Thresholds) -> Self {
        let graph = LinkGraph::build(records);
        let (internal_links, external_links) =
            records
                .iter()
                .flat_map(|r| &r.links)
                .fold((0, 0), |(i, e), link| {
                    if link.is_internal {
                        (i + 1, e)
                    } else {
                        (i, e + 1)
                    }
                });

        Self {
            internal_links,
            external_links,
            broken_links: graph.broken_links().into_iter().cloned().collect(),
            orphans: graph.orphans(&thresholds.entry_document),
            most_linked: most_linked(&graph),
        }
    }
}

fn most_linked(graph: &LinkGraph) -> Vec<LinkedDocument> {
    let mut linked: Vec<LinkedDocument> = graph
        .in_degrees()
        .into_iter()
        .filter(|(_, incoming)| *incoming > 0)
        .map(|(path, incoming)| LinkedDocument {
            path: path.to_string(),
            incoming,
        })
        .collect();
    linked.sort_by(|a, b| b.incoming.cmp(&a.incoming).then_with(|| a.path.cmp(&b.path)));
    linked
}
