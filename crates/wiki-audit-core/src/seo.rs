//! SEO checks against the configured [`Thresholds`].
//!
//! Title and description lengths are only judged when the field exists;
//! a missing field is a quality finding, not an SEO one.

use std::fmt;

use serde::Serialize;

use crate::models::{DocumentFlags, DocumentRecord};
use crate::thresholds::{Bounds, Thresholds};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SeoFlag {
    TitleLength { length: usize, expected: Bounds },
    DescriptionLength { length: usize, expected: Bounds },
    KeywordCount { count: usize, expected: Bounds },
    H1Count { count: usize },
    FewInternalLinks { count: usize, minimum: usize },
}

impl fmt::Display for SeoFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeoFlag::TitleLength { length, expected } => {
                write!(f, "title length {} (recommended {} characters)", length, expected)
            }
            SeoFlag::DescriptionLength { length, expected } => write!(
                f,
                "description length {} (recommended {} characters)",
                length, expected
            ),
            SeoFlag::KeywordCount { count, expected } => {
                write!(f, "{} keywords (recommended {})", count, expected)
            }
            SeoFlag::H1Count { count } => {
                write!(f, "{} H1 headings (exactly one expected)", count)
            }
            SeoFlag::FewInternalLinks { count, minimum } => {
                write!(f, "{} internal links (at least {} recommended)", count, minimum)
            }
        }
    }
}

/// SEO flags for a single document, in a fixed order.
pub fn seo_flags(record: &DocumentRecord, thresholds: &Thresholds) -> Vec<SeoFlag> {
    let fm = &record.front_matter;
    let mut flags = Vec::new();

    if let Some(title) = &fm.title {
        let length = title.chars().count();
        if !thresholds.title_length.contains(length) {
            flags.push(SeoFlag::TitleLength {
                length,
                expected: thresholds.title_length,
            });
        }
    }

    if let Some(description) = &fm.description {
        let length = description.chars().count();
        if !thresholds.description_length.contains(length) {
            flags.push(SeoFlag::DescriptionLength {
                length,
                expected: thresholds.description_length,
            });
        }
    }

    let keywords = fm.keywords.len();
    if !thresholds.keyword_count.contains(keywords) {
        flags.push(SeoFlag::KeywordCount {
            count: keywords,
            expected: thresholds.keyword_count,
        });
    }

    let h1 = record.h1_count();
    if h1 != 1 {
        flags.push(SeoFlag::H1Count { count: h1 });
    }

    let internal = record.internal_links().count();
    if internal < thresholds.min_internal_links {
        flags.push(SeoFlag::FewInternalLinks {
            count: internal,
            minimum: thresholds.min_internal_links,
        });
    }

    flags
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeoReport {
    pub checked: usize,
    pub clean: usize,
    pub flagged: Vec<DocumentFlags<SeoFlag>>,
}

impl SeoReport {
    pub fn compute(records: &[DocumentRecord], thresholds: &Thresholds) -> Self {
        let flagged: Vec<_> = records
            .iter()
            .filter_map(|record| {
                let flags = seo_flags(record, thresholds);
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
    use indoc::indoc;

    const OPTIMIZED: &str = indoc! {"
        ---
        title: The Ten Gods of Bazi
        description: An introduction to the ten gods, how they are derived, and how they shape a chart reading.
        keywords: [bazi, ten gods, chart]
        ---
        # The Ten Gods

        See [intro](./intro.md) and [stars](../ziwei/stars.md).
    "};

    fn h1_flagged(content: &str) -> bool {
        let record = extract_document("doc.md", content);
        seo_flags(&record, &Thresholds::default())
            .iter()
            .any(|f| matches!(f, SeoFlag::H1Count { .. }))
    }

    #[test]
    fn test_optimized_document_is_clean() {
        let record = extract_document("bazi/ten-gods.md", OPTIMIZED);
        assert!(seo_flags(&record, &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_h1_count_must_be_exactly_one() {
        assert!(!h1_flagged("# One\n## Two"));
        assert!(h1_flagged("## Only subsections"));
        assert!(h1_flagged("# One\n# Two"));
    }

    #[test]
    fn test_missing_title_is_not_an_seo_flag() {
        let record = extract_document("doc.md", "# Heading");
        let flags = seo_flags(&record, &Thresholds::default());
        assert!(!flags
            .iter()
            .any(|f| matches!(f, SeoFlag::TitleLength { .. } | SeoFlag::DescriptionLength { .. })));
        assert!(flags.contains(&SeoFlag::KeywordCount {
            count: 0,
            expected: Bounds::new(3, 10)
        }));
        assert!(flags.contains(&SeoFlag::FewInternalLinks { count: 0, minimum: 2 }));
    }

    #[test]
    fn test_length_bounds_count_characters() {
        // Nine CJK characters: too short even though it is 27 bytes.
        let content = "---\ntitle: 八字命理入门教程啊\n---\n";
        let record = extract_document("doc.md", content);
        let flags = seo_flags(&record, &Thresholds::default());
        assert!(flags.contains(&SeoFlag::TitleLength {
            length: 9,
            expected: Bounds::new(10, 60)
        }));
    }

    #[test]
    fn test_external_links_do_not_count() {
        let record = extract_document(
            "doc.md",
            "# T\n[a](https://a.example) [b](https://b.example) [c](./c.md)",
        );
        let flags = seo_flags(&record, &Thresholds::default());
        assert!(flags.contains(&SeoFlag::FewInternalLinks { count: 1, minimum: 2 }));
    }

    #[test]
    fn test_report_counts() {
        let records = vec![
            extract_document("good.md", OPTIMIZED),
            extract_document("bad.md", "text"),
        ];
        let report = SeoReport::compute(&records, &Thresholds::default());
        assert_eq!(report.checked, 2);
        assert_eq!(report.clean, 1);
        assert_eq!(report.flagged[0].path, "bad.md");
    }
}
