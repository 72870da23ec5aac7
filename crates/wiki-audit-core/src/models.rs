//! Core data models used throughout wiki-audit.
//!
//! A [`DocumentRecord`] is built once per Markdown file by
//! [`extract_document`](crate::extract::extract_document) and never mutated
//! afterwards. Every report facet reads the same slice of records.

use serde::Serialize;

/// Metadata taken from a document's YAML front matter.
///
/// When the block is absent or malformed every field holds its empty
/// default and `has_front_matter` is `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    pub has_front_matter: bool,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    pub breadcrumbs: Vec<String>,
}

/// A Markdown ATX heading (`#` through `######`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// An inline `[text](target)` link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub text: String,
    pub target: String,
    /// Set once at extraction time from the target string.
    pub is_internal: bool,
}

/// An inline `![alt](source)` image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub alt_text: String,
    pub source: String,
}

/// Parsed representation of one Markdown file in the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRecord {
    /// Corpus-relative path using `/` separators. Unique within a snapshot.
    pub path: String,
    /// Character count of the whole file.
    pub raw_length: usize,
    /// Character count with all whitespace removed.
    pub stripped_length: usize,
    pub front_matter: FrontMatter,
    pub headings: Vec<Heading>,
    pub links: Vec<Link>,
    pub images: Vec<Image>,
    #[serde(skip)]
    pub content: String,
}

impl DocumentRecord {
    /// Directory part of [`path`](Self::path); `.` for documents at the root.
    pub fn directory(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => ".",
        }
    }

    /// File name part of [`path`](Self::path).
    pub fn file_name(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[idx + 1..],
            None => &self.path,
        }
    }

    pub fn internal_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.is_internal)
    }

    pub fn h1_count(&self) -> usize {
        self.headings.iter().filter(|h| h.level == 1).count()
    }
}

/// Findings attached to one document by a report facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFlags<F> {
    pub path: String,
    pub flags: Vec<F>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &str) -> DocumentRecord {
        DocumentRecord {
            path: path.to_string(),
            raw_length: 0,
            stripped_length: 0,
            front_matter: FrontMatter::default(),
            headings: Vec::new(),
            links: Vec::new(),
            images: Vec::new(),
            content: String::new(),
        }
    }

    #[test]
    fn test_directory_of_root_document() {
        assert_eq!(record("index.md").directory(), ".");
        assert_eq!(record("index.md").file_name(), "index.md");
    }

    #[test]
    fn test_directory_of_nested_document() {
        let doc = record("bazi/ten-gods/intro.md");
        assert_eq!(doc.directory(), "bazi/ten-gods");
        assert_eq!(doc.file_name(), "intro.md");
    }
}
