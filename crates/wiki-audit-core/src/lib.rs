//! # wiki-audit core
//!
//! Pure analysis logic for wiki-audit: the document model, metadata
//! extraction, link graph, and the report facets computed over a corpus
//! snapshot.
//!
//! This crate performs no filesystem I/O. Callers hand it file contents
//! and corpus-relative paths; everything else is derived in memory.
//!
//! Each facet is a pure function of `&[DocumentRecord]` plus an explicit
//! [`Thresholds`](thresholds::Thresholds) value, so facets can be computed
//! in any order and none depends on another's output.

pub mod extract;
pub mod graph;
pub mod models;
pub mod quality;
pub mod seo;
pub mod stats;
pub mod structure;
pub mod style;
pub mod thresholds;
