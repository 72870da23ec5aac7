//! Audit orchestration.
//!
//! Coordinates one run: scan the corpus → compute the requested report
//! sections over the complete record set → render to stdout. Sections are
//! computed independently from the same records; none reads another's
//! output.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use wiki_audit_core::quality::QualityReport;
use wiki_audit_core::seo::SeoReport;
use wiki_audit_core::stats::CorpusStats;
use wiki_audit_core::structure::StructureReport;
use wiki_audit_core::style::StyleReport;

use crate::config::Config;
use crate::progress::ScanProgressReporter;
use crate::render::{self, OutputFormat};
use crate::scanner::{self, Corpus, ScanWarning};

/// One report facet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Stats,
    Quality,
    Seo,
    Links,
    Style,
}

impl Section {
    /// The four core facets, in report order.
    pub const CORE: [Section; 4] = [
        Section::Stats,
        Section::Quality,
        Section::Seo,
        Section::Links,
    ];
}

/// Everything one run produced. `None` sections were not requested.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub generated_at: String,
    pub root: String,
    pub documents: usize,
    pub warnings: Vec<ScanWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<CorpusStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<QualityReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo: Option<SeoReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleReport>,
}

/// Compute the requested sections for an already-scanned corpus.
pub fn build_report(corpus: &Corpus, config: &Config, sections: &[Section]) -> Result<AuditReport> {
    let records = &corpus.documents;
    let thresholds = &config.thresholds;
    let wants = |s: Section| sections.contains(&s);

    let style = if wants(Section::Style) {
        let detector = config.style.detector()?;
        Some(StyleReport::compute(records, &detector))
    } else {
        None
    };

    Ok(AuditReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        root: corpus.root.display().to_string(),
        documents: records.len(),
        warnings: corpus.warnings.clone(),
        stats: wants(Section::Stats).then(|| CorpusStats::compute(records)),
        quality: wants(Section::Quality).then(|| QualityReport::compute(records, thresholds)),
        seo: wants(Section::Seo).then(|| SeoReport::compute(records, thresholds)),
        structure: wants(Section::Links).then(|| StructureReport::compute(records, thresholds)),
        style,
    })
}

/// Output options shared by every report command.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub format: OutputFormat,
    /// Overrides `report.list_limit` when set.
    pub limit: Option<usize>,
}

/// Run the audit command: scan `root`, build the sections, print them.
///
/// Findings never fail the run; only an inaccessible root or a render
/// error does.
pub fn run_audit(
    root: &Path,
    config: &Config,
    sections: &[Section],
    output: OutputOptions,
    progress: &dyn ScanProgressReporter,
) -> Result<()> {
    let corpus = scanner::scan_corpus(root, &config.scan, progress)?;
    let report = build_report(&corpus, config, sections)?;

    let rendered = match output.format {
        OutputFormat::Text => {
            let limit = output.limit.unwrap_or(config.report.list_limit);
            render::render_text(&report, limit)
        }
        OutputFormat::Json => render::render_json(&report)?,
    };
    println!("{}", rendered);
    Ok(())
}
