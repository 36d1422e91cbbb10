//! Frontmatter metadata
//!
//! Posts start with a `---` fenced YAML block. Only `title` and `slug` are
//! read.

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

fn block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\A\u{feff}?---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
            .expect("hardcoded frontmatter pattern is valid")
    })
}

fn non_slug_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("hardcoded slug pattern is valid"))
}

/// Metadata fields of a post's frontmatter; other keys are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    slug: Option<String>,
}

impl Frontmatter {
    /// Parse the leading frontmatter block, if any
    ///
    /// A block that is not valid YAML, or whose `title`/`slug` are not
    /// strings, is treated as absent.
    pub fn parse(content: &str) -> Option<Self> {
        let caps = block_re().captures(content)?;
        let block = caps.get(1).map_or("", |m| m.as_str());
        if block.trim().is_empty() {
            return Some(Self::default());
        }

        match serde_yaml::from_str(block) {
            Ok(fm) => Some(fm),
            Err(e) => {
                tracing::warn!("ignoring unreadable frontmatter: {e}");
                None
            }
        }
    }

    /// `title` field
    pub fn title(&self) -> Option<&str> {
        non_empty(self.title.as_deref())
    }

    /// `slug` field
    pub fn slug(&self) -> Option<&str> {
        non_empty(self.slug.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// URL-friendly slug: lowercase ASCII alphanumerics joined by `-`
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    non_slug_re()
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}
