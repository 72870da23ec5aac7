//! Metadata extraction from raw Markdown text.
//!
//! Turns one file's content into a [`DocumentRecord`]. Four token classes
//! are recognised and nothing else: the front-matter block, ATX headings,
//! inline links and inline images. There is no Markdown AST; code fences
//! are not special.
//!
//! Extraction never fails. A malformed or unterminated front-matter block
//! degrades to [`FrontMatter::default`] so that one bad file cannot abort
//! a corpus-wide run.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::{Mapping, Value};

use crate::models::{DocumentRecord, FrontMatter, Heading, Image, Link};

/// Marker line that opens and closes a front-matter block.
pub const FRONT_MATTER_DELIMITER: &str = "---";

static HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,6})[ \t]+(.+)$").expect("valid heading regex"));

/// Links and images share one scanner so a match is classified exactly once.
///
/// Link text holds no brackets except whole images, so a linked badge
/// `[![alt](src)](target)` is one link whose text wraps one image.
static INLINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(!?)\[((?:[^\[\]]|!\[[^\[\]]*\]\([^)]*\))*)\]\(([^)]+)\)")
        .expect("valid inline link regex")
});

/// Outcome of looking for a front-matter block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterParse {
    /// A terminated block whose YAML parsed to a mapping.
    Parsed(FrontMatter),
    /// The content does not open with a delimiter line.
    Absent,
    /// Opened but unterminated, invalid YAML, or not a mapping.
    Malformed(String),
}

impl FrontMatterParse {
    /// Collapse into the record field. Anything but `Parsed` yields defaults.
    pub fn into_front_matter(self) -> FrontMatter {
        match self {
            FrontMatterParse::Parsed(fm) => fm,
            FrontMatterParse::Absent | FrontMatterParse::Malformed(_) => FrontMatter::default(),
        }
    }
}

/// Build the record for one document.
///
/// `path` must already be corpus-relative with `/` separators.
pub fn extract_document(path: &str, content: &str) -> DocumentRecord {
    DocumentRecord {
        path: path.to_string(),
        raw_length: content.chars().count(),
        stripped_length: content.chars().filter(|c| !c.is_whitespace()).count(),
        front_matter: parse_front_matter(content).into_front_matter(),
        headings: extract_headings(content),
        links: extract_links(content),
        images: extract_images(content),
        content: content.to_string(),
    }
}

/// Locate and parse the leading front-matter block.
pub fn parse_front_matter(content: &str) -> FrontMatterParse {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return FrontMatterParse::Absent;
    };
    if first.trim_end() != FRONT_MATTER_DELIMITER {
        return FrontMatterParse::Absent;
    }

    let start = first.len();
    let mut offset = start;
    let mut end = None;
    for line in lines {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            end = Some(offset);
            break;
        }
        offset += line.len();
    }

    let Some(end) = end else {
        return FrontMatterParse::Malformed("unterminated front matter block".to_string());
    };

    match serde_yaml::from_str::<Value>(&content[start..end]) {
        Ok(Value::Mapping(map)) => FrontMatterParse::Parsed(front_matter_from_mapping(&map)),
        Ok(_) => FrontMatterParse::Malformed("front matter is not a key-value mapping".to_string()),
        Err(err) => FrontMatterParse::Malformed(format!("invalid YAML: {}", err)),
    }
}

fn front_matter_from_mapping(map: &Mapping) -> FrontMatter {
    FrontMatter {
        has_front_matter: true,
        title: map.get("title").and_then(scalar_text),
        description: map.get("description").and_then(scalar_text),
        keywords: map.get("keywords").map(string_list).unwrap_or_default(),
        breadcrumbs: map.get("breadcrumbs").map(string_list).unwrap_or_default(),
    }
}

/// Scalar values are stringified; blank strings count as missing.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A YAML sequence of scalars, or a single comma-separated string.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Every line of the form `#{1,6} text`, in document order.
pub fn extract_headings(content: &str) -> Vec<Heading> {
    content
        .lines()
        .filter_map(|line| {
            let caps = HEADING_RE.captures(line)?;
            let text = caps[2].trim();
            if text.is_empty() {
                return None;
            }
            Some(Heading {
                level: caps[1].len() as u8,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Inline `[text](target)` links, excluding images.
pub fn extract_links(content: &str) -> Vec<Link> {
    INLINE_RE
        .captures_iter(content)
        .filter(|caps| caps[1].is_empty() && !caps[2].is_empty())
        .map(|caps| {
            let target = clean_target(&caps[3]);
            Link {
                text: caps[2].to_string(),
                is_internal: !is_external_target(&target),
                target,
            }
        })
        .collect()
}

/// Inline `![alt](source)` images, including those wrapped in link text.
pub fn extract_images(content: &str) -> Vec<Image> {
    let mut images = Vec::new();
    for caps in INLINE_RE.captures_iter(content) {
        if caps[1].is_empty() {
            images.extend(extract_images(&caps[2]));
        } else {
            images.push(Image {
                alt_text: caps[2].to_string(),
                source: clean_target(&caps[3]),
            });
        }
    }
    images
}

/// Drop surrounding whitespace, `<...>` wrapping and a trailing `"title"`.
fn clean_target(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some(inner) = trimmed.strip_prefix('<') {
        if let Some(end) = inner.find('>') {
            return inner[..end].to_string();
        }
    }
    trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_string()
}

/// True when the target carries a URI scheme (`https:`, `mailto:`) or is a
/// network path (`//host/...`).
pub fn is_external_target(target: &str) -> bool {
    target.starts_with("//") || has_uri_scheme(target)
}

fn has_uri_scheme(target: &str) -> bool {
    let Some((scheme, _)) = target.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_ascii_alphabetic() {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}
