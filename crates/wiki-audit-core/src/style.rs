//! Stock-phrase and uniformity detection for machine-drafted prose.
//!
//! Flags text that reads as generated: formulaic openings and conclusions,
//! stacked transitions, clichés, and sections or paragraphs that are all
//! suspiciously close to the same length. Detection only; documents are
//! never rewritten.
//!
//! The default phrase list targets the Chinese-language wiki this tool was
//! written for. Categories can be replaced or extended through
//! [`PatternCategory`] values (the `[style]` config table).

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{DocumentFlags, DocumentRecord};

/// Category name used for the length-uniformity checks.
pub const STRUCTURE_CATEGORY: &str = "structure";

const MAX_SAMPLES: usize = 2;

static SECTION_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{2,3}[ \t]+.+$").expect("valid section heading regex"));

/// A named group of regular expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCategory {
    pub name: String,
    pub patterns: Vec<String>,
}

impl PatternCategory {
    fn new(name: &str, patterns: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Built-in categories.
pub fn default_categories() -> Vec<PatternCategory> {
    vec![
        PatternCategory::new(
            "openings",
            &[
                "在当今社会",
                "随着.*的发展",
                "众所周知",
                "本文将详细介绍",
                "让我们深入探讨",
                "首先.*让我们",
            ],
        ),
        PatternCategory::new(
            "transitions",
            &[
                "首先.*其次.*最后",
                "首先.*然后.*接着.*最后",
                "一方面.*另一方面",
                "不仅.*而且",
                "既.*又",
            ],
        ),
        PatternCategory::new(
            "conclusions",
            &[
                "总的来说",
                "综上所述",
                "通过以上分析.*可以看出",
                "综合考虑各方面因素",
                "希望本文能够为您提供帮助",
                "相信通过.*您一定能够",
            ],
        ),
        PatternCategory::new(
            "cliches",
            &[
                "具有重要意义",
                "发挥着关键作用",
                "是.*的重要组成部分",
                "需要我们高度重视",
                "具有以下特点",
                "具体来说",
                "从.*角度来看",
                "值得注意的是",
            ],
        ),
        PatternCategory::new(
            "academic",
            &[
                "根据研究表明",
                "数据显示",
                "经过分析发现",
                "从理论角度",
                "在实践中我们发现",
            ],
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleFinding {
    pub category: String,
    pub pattern: String,
    pub count: usize,
    pub samples: Vec<String>,
}

struct CompiledCategory {
    name: String,
    patterns: Vec<(String, Regex)>,
}

/// Compiled phrase patterns plus the structural checks.
pub struct StyleDetector {
    categories: Vec<CompiledCategory>,
}

impl StyleDetector {
    pub fn new(categories: &[PatternCategory]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(categories.len());
        for category in categories {
            let mut patterns = Vec::with_capacity(category.patterns.len());
            for pattern in &category.patterns {
                let re = Regex::new(pattern).with_context(|| {
                    format!(
                        "Invalid style pattern '{}' in category '{}'",
                        pattern, category.name
                    )
                })?;
                patterns.push((pattern.clone(), re));
            }
            compiled.push(CompiledCategory {
                name: category.name.clone(),
                patterns,
            });
        }
        Ok(Self {
            categories: compiled,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(&default_categories())
    }

    /// All findings for one document's content.
    pub fn detect(&self, content: &str) -> Vec<StyleFinding> {
        let mut findings = Vec::new();

        for category in &self.categories {
            for (pattern, re) in &category.patterns {
                let matches: Vec<&str> = re.find_iter(content).map(|m| m.as_str()).collect();
                if matches.is_empty() {
                    continue;
                }
                findings.push(StyleFinding {
                    category: category.name.clone(),
                    pattern: pattern.clone(),
                    count: matches.len(),
                    samples: matches
                        .iter()
                        .take(MAX_SAMPLES)
                        .map(|s| s.to_string())
                        .collect(),
                });
            }
        }

        if let Some(count) = uniform_section_headings(content) {
            findings.push(StyleFinding {
                category: STRUCTURE_CATEGORY.to_string(),
                pattern: "uniform section heading lengths".to_string(),
                count,
                samples: Vec::new(),
            });
        }
        if let Some(count) = uniform_paragraphs(content) {
            findings.push(StyleFinding {
                category: STRUCTURE_CATEGORY.to_string(),
                pattern: "uniform paragraph lengths".to_string(),
                count,
                samples: Vec::new(),
            });
        }

        findings
    }
}

/// More than five `##`/`###` headings, every one within five characters
/// of the mean length. Returns the heading count when flagged.
fn uniform_section_headings(content: &str) -> Option<usize> {
    let lengths: Vec<f64> = SECTION_HEADING_RE
        .find_iter(content)
        .map(|m| m.as_str().trim_end_matches('\r').chars().count() as f64)
        .collect();
    if lengths.len() <= 5 {
        return None;
    }
    let avg = lengths.iter().sum::<f64>() / lengths.len() as f64;
    lengths
        .iter()
        .all(|l| (l - avg).abs() < 5.0)
        .then_some(lengths.len())
}

/// More than five substantial paragraphs, over 80% of them within 100
/// characters of the mean length. Returns the paragraph count when flagged.
fn uniform_paragraphs(content: &str) -> Option<usize> {
    let lengths: Vec<f64> = content
        .split("\n\n")
        .filter(|p| p.trim().chars().count() > 50)
        .map(|p| p.chars().count() as f64)
        .collect();
    if lengths.len() <= 5 {
        return None;
    }
    let avg = lengths.iter().sum::<f64>() / lengths.len() as f64;
    let uniform = lengths.iter().filter(|l| (*l - avg).abs() < 100.0).count();
    (uniform as f64 / lengths.len() as f64 > 0.8).then_some(lengths.len())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleReport {
    pub checked: usize,
    pub total_findings: usize,
    pub flagged: Vec<DocumentFlags<StyleFinding>>,
}

impl StyleReport {
    /// Index pages are navigation, not prose, and are skipped.
    pub fn compute(records: &[DocumentRecord], detector: &StyleDetector) -> Self {
        let mut checked = 0;
        let mut flagged = Vec::new();
        for record in records.iter().filter(|r| r.file_name() != "index.md") {
            checked += 1;
            let flags = detector.detect(&record.content);
            if !flags.is_empty() {
                flagged.push(DocumentFlags {
                    path: record.path.clone(),
                    flags,
                });
            }
        }
        Self {
            checked,
            total_findings: flagged.iter().map(|d| d.flags.len()).sum(),
            flagged,
        }
    }
}
