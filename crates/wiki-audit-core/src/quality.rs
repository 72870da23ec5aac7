//! Editorial quality checks.
//!
//! Every check is independent: a document can carry any combination of
//! flags, and one missing field never implies another.

use std::fmt;

use serde::Serialize;

use crate::models::{DocumentFlags, DocumentRecord};
use crate::thresholds::Thresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityFlag {
    MissingFrontMatter,
    MissingTitle,
    MissingDescription,
    MissingKeywords,
    ContentTooShort,
    NoHeadings,
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            QualityFlag::MissingFrontMatter => "missing YAML front matter",
            QualityFlag::MissingTitle => "missing title",
            QualityFlag::MissingDescription => "missing description",
            QualityFlag::MissingKeywords => "missing keywords",
            QualityFlag::ContentTooShort => "content too short",
            QualityFlag::NoHeadings => "no heading structure",
        };
        f.write_str(msg)
    }
}

/// Quality flags for a single document, in a fixed order.
pub fn quality_flags(record: &DocumentRecord, thresholds: &Thresholds) -> Vec<QualityFlag> {
    let fm = &record.front_matter;
    let mut flags = Vec::new();
    if !fm.has_front_matter {
        flags.push(QualityFlag::MissingFrontMatter);
    }
    if fm.title.is_none() {
        flags.push(QualityFlag::MissingTitle);
    }
    if fm.description.is_none() {
        flags.push(QualityFlag::MissingDescription);
    }
    if fm.keywords.is_empty() {
        flags.push(QualityFlag::MissingKeywords);
    }
    if record.stripped_length < thresholds.min_content_length {
        flags.push(QualityFlag::ContentTooShort);
    }
    if record.headings.is_empty() {
        flags.push(QualityFlag::NoHeadings);
    }
    flags
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub checked: usize,
    pub clean: usize,
    pub flagged: Vec<DocumentFlags<QualityFlag>>,
}

impl QualityReport {
    pub fn compute(records: &[DocumentRecord], thresholds: &Thresholds) -> Self {
        let flagged: Vec<_> = records
            .iter()
            .filter_map(|record| {
                let flags = quality_flags(record, thresholds);
                (!flags.is_empty()).then(|| DocumentFlags {
                    path: record.path.clone(),
                    flags,
                })
            })
            .collect();
        Self {
            checked: records.len(),
            clean: records.len() - flagged.len(),
            flagged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_document;

    fn long_body() -> String {
        format!("# Heading\n\n{}", "word ".repeat(200))
    }

    #[test]
    fn test_clean_document() {
        let content = format!(
            "---\ntitle: Clean\ndescription: Fine\nkeywords: [a]\n---\n{}",
            long_body()
        );
        let record = extract_document("clean.md", &content);
        assert!(quality_flags(&record, &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_title_without_description_flags_only_description() {
        let content = format!("---\ntitle: Has Title\nkeywords: [a]\n---\n{}", long_body());
        let record = extract_document("a.md", &content);
        assert_eq!(
            quality_flags(&record, &Thresholds::default()),
            vec![QualityFlag::MissingDescription]
        );
    }

    #[test]
    fn test_bare_short_document_gets_every_flag() {
        let record = extract_document("bare.md", "tiny");
        assert_eq!(
            quality_flags(&record, &Thresholds::default()),
            vec![
                QualityFlag::MissingFrontMatter,
                QualityFlag::MissingTitle,
                QualityFlag::MissingDescription,
                QualityFlag::MissingKeywords,
                QualityFlag::ContentTooShort,
                QualityFlag::NoHeadings,
            ]
        );
    }

    #[test]
    fn test_content_length_threshold_is_configurable() {
        let record = extract_document("short.md", "# Short\n\nabcdefghij");
        let thresholds = Thresholds {
            min_content_length: 5,
            ..Thresholds::default()
        };
        assert!(!quality_flags(&record, &thresholds).contains(&QualityFlag::ContentTooShort));
        assert!(quality_flags(&record, &Thresholds::default()).contains(&QualityFlag::ContentTooShort));
    }

    #[test]
    fn test_report_counts() {
        let content = format!(
            "---\ntitle: Clean\ndescription: Fine\nkeywords: [a]\n---\n{}",
            long_body()
        );
        let records = vec![
            extract_document("clean.md", &content),
            extract_document("bad.md", "nothing"),
        ];
        let report = QualityReport::compute(&records, &Thresholds::default());
        assert_eq!(report.checked, 2);
        assert_eq!(report.clean, 1);
        assert_eq!(report.flagged.len(), 1);
        assert_eq!(report.flagged[0].path, "bad.md");
    }
}
