//! Data model: title entries, normalized chapter labels, chapter sets, and releases.

use crate::natural::natural_cmp;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::btree_set;
use std::collections::BTreeSet;
use std::fmt;

/// Separator between aliases on one line of the title list.
pub const ALIAS_SEPARATOR: &str = "$$";

/// One series from the title list. The first alias is canonical and is used
/// for persisted-listing filenames and for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleEntry {
    aliases: Vec<String>,
}

impl TitleEntry {
    /// Parse one title-list line. Aliases are trimmed and empty ones dropped;
    /// returns None when nothing is left.
    pub fn parse(line: &str) -> Option<Self> {
        let aliases: Vec<String> = line
            .split(ALIAS_SEPARATOR)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(String::from)
            .collect();
        if aliases.is_empty() {
            None
        } else {
            Some(Self { aliases })
        }
    }

    pub fn canonical(&self) -> &str {
        &self.aliases[0]
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }
}

/// Title-case: the first letter of every alphabetic run upper-case, the rest lower-case.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// A normalized chapter label (trimmed, title-cased).
///
/// Equality is equality of the normalized text; ordering is natural order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ChapterLabel(String);

impl ChapterLabel {
    /// Normalize a label. Returns None for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(title_case(trimmed)))
    }

    /// Label for a scraped chapter entry: only the last whitespace-delimited
    /// token is kept ("Bleach Chapter 624" -> "624").
    pub fn from_entry_text(text: &str) -> Option<Self> {
        text.split_whitespace().last().and_then(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for ChapterLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(&self.0, &other.0)
    }
}

impl PartialOrd for ChapterLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl AsRef<str> for ChapterLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChapterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deduplicated set of chapter labels, iterated in natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterSet {
    labels: BTreeSet<ChapterLabel>,
}

impl ChapterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label; returns false if an equal label was already present.
    pub fn insert(&mut self, label: ChapterLabel) -> bool {
        self.labels.insert(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, ChapterLabel> {
        self.labels.iter()
    }

    /// Labels in `self` that are not in `other`, in natural order.
    pub fn difference<'a>(
        &'a self,
        other: &'a ChapterSet,
    ) -> impl Iterator<Item = &'a ChapterLabel> {
        self.labels.difference(&other.labels)
    }

    /// Add every label of `other`.
    pub fn merge(&mut self, other: ChapterSet) {
        self.labels.extend(other.labels);
    }
}

impl FromIterator<ChapterLabel> for ChapterSet {
    fn from_iter<I: IntoIterator<Item = ChapterLabel>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ChapterSet {
    type Item = &'a ChapterLabel;
    type IntoIter = btree_set::Iter<'a, ChapterLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

/// A newly detected chapter for one title. Displays as "<Title> <chapter>".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub title: String,
    pub chapter: ChapterLabel,
}

impl fmt::Display for Release {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.title, self.chapter)
    }
}
