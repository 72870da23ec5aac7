//! # wiki-audit
//!
//! Structure, quality, SEO and link analysis for a Markdown wiki.
//!
//! wiki-audit walks a directory tree of Markdown documents with YAML front
//! matter, turns each file into an immutable record, and reports over the
//! complete record set.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌──────────────────┐   ┌──────────┐
//! │   Scanner   │──▶│  Extractor   │──▶│  Report facets   │──▶│  Render  │
//! │ walk + glob │   │ front matter │   │ stats / quality  │   │ text or  │
//! │  + rules    │   │ headings ... │   │ seo / links / .. │   │  JSON    │
//! └─────────────┘   └──────────────┘   └──────────────────┘   └──────────┘
//! ```
//!
//! The extractor, link graph and report facets live in the I/O-free
//! `wiki-audit-core` crate; this crate adds the filesystem, configuration,
//! progress reporting and the CLI.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and validation |
//! | [`scanner`] | Corpus walk, exclusion rules, per-file warnings |
//! | [`audit`] | Run orchestration and the combined report |
//! | [`render`] | Text and JSON output |
//! | [`progress`] | Scan progress on stderr |

pub mod audit;
pub mod config;
pub mod progress;
pub mod render;
pub mod scanner;
