//! Report rendering: human-readable text or a single JSON document.
//!
//! Text output follows the section order stats → quality → SEO → links
//! (→ style). Per-document lists honour the list limit; JSON output is
//! never truncated.

use anyhow::Result;
use std::fmt::{Display, Write};

use wiki_audit_core::models::DocumentFlags;
use wiki_audit_core::quality::QualityReport;
use wiki_audit_core::seo::SeoReport;
use wiki_audit_core::stats::CorpusStats;
use wiki_audit_core::structure::StructureReport;
use wiki_audit_core::style::StyleReport;

use crate::audit::AuditReport;

/// Longest style sample printed before it is cut with an ellipsis.
const SAMPLE_CHARS: usize = 50;

#[derive(Clone, Copy, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render_json(report: &AuditReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Render every section present in `report`. `limit` of 0 means unlimited.
pub fn render_text(report: &AuditReport, limit: usize) -> String {
    let mut out = String::new();
    let title = format!("Wiki Audit — {}", report.root);
    // writeln! into a String cannot fail.
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    let _ = writeln!(out);
    let _ = writeln!(out, "  Documents:   {}", report.documents);
    if !report.warnings.is_empty() {
        let _ = writeln!(out, "  Skipped:     {}", report.warnings.len());
        for warning in &report.warnings {
            let _ = writeln!(out, "    - {}: {}", warning.path, warning.message);
        }
    }

    if let Some(stats) = &report.stats {
        write_stats(&mut out, stats);
    }
    if let Some(quality) = &report.quality {
        write_quality(&mut out, quality, limit);
    }
    if let Some(seo) = &report.seo {
        write_seo(&mut out, seo, limit);
    }
    if let Some(structure) = &report.structure {
        write_structure(&mut out, structure, limit);
    }
    if let Some(style) = &report.style {
        write_style(&mut out, style, limit);
    }

    out
}

fn section_header(out: &mut String, name: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", name);
    let _ = writeln!(out, "{}", "-".repeat(name.chars().count()));
}

fn write_stats(out: &mut String, stats: &CorpusStats) {
    section_header(out, "Statistics");

    if !stats.by_directory.is_empty() {
        let _ = writeln!(out, "  {:<32} {:>6}", "DIRECTORY", "DOCS");
        let _ = writeln!(out, "  {}", "-".repeat(39));
        for dir in &stats.by_directory {
            let _ = writeln!(out, "  {:<32} {:>6}", dir.directory, dir.documents);
        }
        let _ = writeln!(out);
    }

    match &stats.size {
        Some(size) => {
            let _ = writeln!(out, "  Size (non-whitespace characters):");
            let _ = writeln!(out, "    mean:      {}", size.mean.round() as u64);
            let _ = writeln!(out, "    largest:   {}", size.max);
            let _ = writeln!(out, "    smallest:  {}", size.min);
        }
        None => {
            let _ = writeln!(out, "  No documents found.");
        }
    }
    if let Some(mean_headings) = stats.mean_headings {
        let _ = writeln!(out, "  Headings per document: {:.1}", mean_headings);
    }
    let _ = writeln!(out, "  Images: {}", stats.total_images);
}

fn write_quality(out: &mut String, quality: &QualityReport, limit: usize) {
    section_header(out, "Quality");
    if quality.flagged.is_empty() {
        let _ = writeln!(out, "  All {} documents pass quality checks.", quality.checked);
        return;
    }
    let _ = writeln!(
        out,
        "  {} clean, {} with issues",
        quality.clean,
        quality.flagged.len()
    );
    write_flag_list(out, &quality.flagged, limit);
}

fn write_seo(out: &mut String, seo: &SeoReport, limit: usize) {
    section_header(out, "SEO");
    if seo.flagged.is_empty() {
        let _ = writeln!(out, "  All {} documents pass SEO checks.", seo.checked);
        return;
    }
    let _ = writeln!(
        out,
        "  {} clean, {} need SEO work",
        seo.clean,
        seo.flagged.len()
    );
    write_flag_list(out, &seo.flagged, limit);
}

fn write_flag_list<F: Display>(out: &mut String, docs: &[DocumentFlags<F>], limit: usize) {
    let (shown, hidden) = limited(docs, limit);
    for doc in shown {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", doc.path);
        for flag in &doc.flags {
            let _ = writeln!(out, "    - {}", flag);
        }
    }
    write_more(out, hidden, "documents");
}

fn write_structure(out: &mut String, structure: &StructureReport, limit: usize) {
    section_header(out, "Links");
    let _ = writeln!(out, "  Internal links: {}", structure.internal_links);
    let _ = writeln!(out, "  External links: {}", structure.external_links);

    let _ = writeln!(out);
    if structure.broken_links.is_empty() {
        let _ = writeln!(out, "  No broken links.");
    } else {
        let _ = writeln!(out, "  Broken links ({}):", structure.broken_links.len());
        let (shown, hidden) = limited(&structure.broken_links, limit);
        for edge in shown {
            if edge.target == edge.resolved {
                let _ = writeln!(out, "    {} -> {}", edge.source, edge.target);
            } else {
                let _ = writeln!(
                    out,
                    "    {} -> {} (resolved {})",
                    edge.source, edge.target, edge.resolved
                );
            }
        }
        write_more(out, hidden, "broken links");
    }

    let _ = writeln!(out);
    if structure.orphans.is_empty() {
        let _ = writeln!(out, "  No orphan documents.");
    } else {
        let _ = writeln!(out, "  Orphan documents ({}):", structure.orphans.len());
        let (shown, hidden) = limited(&structure.orphans, limit);
        for path in shown {
            let _ = writeln!(out, "    {}", path);
        }
        write_more(out, hidden, "orphan documents");
    }

    if !structure.most_linked.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Most linked documents:");
        let (shown, hidden) = limited(&structure.most_linked, limit);
        for doc in shown {
            let _ = writeln!(out, "    {:>4}  {}", doc.incoming, doc.path);
        }
        write_more(out, hidden, "linked documents");
    }
}

fn write_style(out: &mut String, style: &StyleReport, limit: usize) {
    section_header(out, "Style");
    if style.flagged.is_empty() {
        let _ = writeln!(
            out,
            "  No stock phrasing found in {} documents.",
            style.checked
        );
        return;
    }
    let _ = writeln!(
        out,
        "  {} findings in {} of {} documents",
        style.total_findings,
        style.flagged.len(),
        style.checked
    );

    let (shown, hidden) = limited(&style.flagged, limit);
    for doc in shown {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", doc.path);
        for finding in &doc.flags {
            let _ = writeln!(
                out,
                "    - [{}] {} ({}x)",
                finding.category, finding.pattern, finding.count
            );
            for sample in &finding.samples {
                let _ = writeln!(out, "        \"{}\"", truncate(sample, SAMPLE_CHARS));
            }
        }
    }
    write_more(out, hidden, "documents");
}

fn limited<T>(items: &[T], limit: usize) -> (&[T], usize) {
    if limit == 0 || items.len() <= limit {
        (items, 0)
    } else {
        (&items[..limit], items.len() - limit)
    }
}

fn write_more(out: &mut String, hidden: usize, what: &str) {
    if hidden > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "  ... and {} more {}", hidden, what);
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
