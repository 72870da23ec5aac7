//! Fixed limits used by the quality, SEO and structure views.
//!
//! One immutable [`Thresholds`] value is passed explicitly into every report
//! function. The defaults are the wiki's editorial rules; the CLI may
//! override them from the `[thresholds]` table of a config file.

use serde::{Deserialize, Serialize};

/// Inclusive `[min, max]` range. Written as a two-element array in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Bounds {
    pub min: usize,
    pub max: usize,
}

impl Bounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }
}

impl From<(usize, usize)> for Bounds {
    fn from((min, max): (usize, usize)) -> Self {
        Self { min, max }
    }
}

impl From<Bounds> for (usize, usize) {
    fn from(b: Bounds) -> Self {
        (b.min, b.max)
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum non-whitespace character count before content is "too short".
    pub min_content_length: usize,
    pub title_length: Bounds,
    pub description_length: Bounds,
    pub keyword_count: Bounds,
    pub min_internal_links: usize,
    /// Corpus root index; never reported as an orphan.
    pub entry_document: String,
}

pub const DEFAULT_MIN_CONTENT_LENGTH: usize = 500;
pub const DEFAULT_TITLE_LENGTH: Bounds = Bounds::new(10, 60);
pub const DEFAULT_DESCRIPTION_LENGTH: Bounds = Bounds::new(50, 160);
pub const DEFAULT_KEYWORD_COUNT: Bounds = Bounds::new(3, 10);
pub const DEFAULT_MIN_INTERNAL_LINKS: usize = 2;
pub const DEFAULT_ENTRY_DOCUMENT: &str = "index.md";

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_content_length: DEFAULT_MIN_CONTENT_LENGTH,
            title_length: DEFAULT_TITLE_LENGTH,
            description_length: DEFAULT_DESCRIPTION_LENGTH,
            keyword_count: DEFAULT_KEYWORD_COUNT,
            min_internal_links: DEFAULT_MIN_INTERNAL_LINKS,
            entry_document: DEFAULT_ENTRY_DOCUMENT.to_string(),
        }
    }
}
