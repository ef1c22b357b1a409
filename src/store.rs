//! Title list reader and per-title persisted listings.
//!
//! Listings live at `<dir>/<slug>-<hash>.txt`, one chapter label per line. The slug keeps
//! the file recognizable; the hash of the exact canonical title keeps distinct titles apart.

use crate::model::{ChapterLabel, ChapterSet, TitleEntry};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Cannot read title list {path}: {source}")]
    ReadTitles {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot read listing {path}: {source}")]
    ReadListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write listing {path}: {source}")]
    WriteListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse a title list: one entry per line, `$$`-separated aliases.
/// Blank lines and lines starting with `#` are skipped. A leading byte order mark is dropped.
pub fn parse_titles(text: &str) -> Vec<TitleEntry> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(TitleEntry::parse)
        .collect()
}

/// Read the title list fresh from disk.
pub fn read_titles(path: &Path) -> Result<Vec<TitleEntry>, StoreError> {
    let text = std::fs::read_to_string(path).map_err(|e| StoreError::ReadTitles {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_titles(&text))
}

const MAX_SLUG_CHARS: usize = 64;

/// Sanitize a title to a readable slug: lowercase letters and digits (any script),
/// runs of other characters become `-`. Not unique; see [`listing_stem`].
pub fn sanitize_title(title: &str) -> String {
    let mut s = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_alphanumeric() {
            s.extend(c.to_lowercase());
        } else if !s.ends_with('-') {
            s.push('-');
        }
    }
    let s: String = s
        .trim_matches('-')
        .chars()
        .take(MAX_SLUG_CHARS)
        .collect();
    let s = s.trim_end_matches('-');
    if s.is_empty() {
        "title".to_string()
    } else {
        s.to_string()
    }
}

/// Filename stem for a title's listing: slug plus the first 8 bytes of the title's SHA-256.
pub fn listing_stem(title: &str) -> String {
    let digest = Sha256::digest(title.as_bytes());
    format!("{}-{}", sanitize_title(title), hex::encode(&digest[..8]))
}

/// Directory of persisted listings, one file per canonical title.
#[derive(Debug, Clone)]
pub struct ListingStore {
    dir: PathBuf,
}

impl ListingStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", listing_stem(title)))
    }

    /// Load the last listing for a title. A title never checked before has an empty listing.
    pub fn load(&self, title: &str) -> Result<ChapterSet, StoreError> {
        let path = self.path_for(title);
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text.lines().filter_map(ChapterLabel::new).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ChapterSet::new()),
            Err(e) => Err(StoreError::ReadListing { path, source: e }),
        }
    }

    /// Replace the title's listing with `chapters`, one per line in natural order.
    pub fn save(&self, title: &str, chapters: &ChapterSet) -> Result<(), StoreError> {
        let path = self.path_for(title);
        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::WriteListing {
            path: path.clone(),
            source: e,
        })?;
        let mut text = String::new();
        for label in chapters {
            text.push_str(label.as_str());
            text.push('\n');
        }
        std::fs::write(&path, text).map_err(|e| StoreError::WriteListing { path, source: e })
    }
}
