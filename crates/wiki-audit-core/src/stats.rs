//! Corpus-wide statistics.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::DocumentRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryCount {
    pub directory: String,
    pub documents: usize,
}

/// Size figures over `stripped_length`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeStats {
    pub mean: f64,
    pub min: usize,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusStats {
    pub total_documents: usize,
    /// Largest directory first; ties broken by name.
    pub by_directory: Vec<DirectoryCount>,
    /// `None` for an empty corpus.
    pub size: Option<SizeStats>,
    pub mean_headings: Option<f64>,
    pub total_images: usize,
}

impl CorpusStats {
    pub fn compute(records: &[DocumentRecord]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            *counts.entry(record.directory()).or_default() += 1;
        }
        let mut by_directory: Vec<DirectoryCount> = counts
            .into_iter()
            .map(|(directory, documents)| DirectoryCount {
                directory: directory.to_string(),
                documents,
            })
            .collect();
        by_directory.sort_by(|a, b| {
            b.documents
                .cmp(&a.documents)
                .then_with(|| a.directory.cmp(&b.directory))
        });

        let size = if records.is_empty() {
            None
        } else {
            let lengths = records.iter().map(|r| r.stripped_length);
            Some(SizeStats {
                mean: mean(lengths.clone()),
                min: lengths.clone().min().unwrap_or(0),
                max: lengths.max().unwrap_or(0),
            })
        };

        let mean_headings = if records.is_empty() {
            None
        } else {
            Some(mean(records.iter().map(|r| r.headings.len())))
        };

        Self {
            total_documents: records.len(),
            by_directory,
            size,
            mean_headings,
            total_images: records.iter().map(|r| r.images.len()).sum(),
        }
    }
}

fn mean(values: impl Iterator<Item = usize>) -> f64 {
    let (sum, count) = values.fold((0usize, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_document;

    #[test]
    fn test_empty_corpus() {
        let stats = CorpusStats::compute(&[]);
        assert_eq!(stats.total_documents, 0);
        assert!(stats.by_directory.is_empty());
        assert!(stats.size.is_none());
        assert!(stats.mean_headings.is_none());
    }

    #[test]
    fn test_directory_counts_and_sizes() {
        let records = vec![
            extract_document("index.md", "# Home\n\nabcd"),
            extract_document("bazi/a.md", "# A\n## B\nxy"),
            extract_document("bazi/b.md", "ab"),
            extract_document("ziwei/c.md", "# C ![x](c.png)"),
        ];
        let stats = CorpusStats::compute(&records);
        assert_eq!(stats.total_documents, 4);
        assert_eq!(
            stats.by_directory,
            vec![
                DirectoryCount { directory: "bazi".into(), documents: 2 },
                DirectoryCount { directory: ".".into(), documents: 1 },
                DirectoryCount { directory: "ziwei".into(), documents: 1 },
            ]
        );

        let size = stats.size.unwrap();
        // "#Homeabcd" = 9, "#A##Bxy" = 7, "ab" = 2, "#C![x](c.png)" = 13
        assert_eq!(size.min, 2);
        assert_eq!(size.max, 13);
        assert!((size.mean - 31.0 / 4.0).abs() < 1e-9);

        assert!((stats.mean_headings.unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(stats.total_images, 1);
    }
}
