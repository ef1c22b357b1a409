//! Listing differ: which chapters are new since the last persisted listing.

use crate::model::{ChapterLabel, ChapterSet, Release};

/// Labels present in `new` but not in `old`, in natural order.
///
/// An empty `old` (first check of a title) reports all of `new`.
pub fn diff_listings(old: &ChapterSet, new: &ChapterSet) -> Vec<ChapterLabel> {
    // ChapterLabel orders naturally, so set iteration is already sorted.
    new.difference(old).cloned().collect()
}

/// [diff_listings], qualified with the title for reporting ("Bleach 624").
pub fn new_releases(title: &str, old: &ChapterSet, new: &ChapterSet) -> Vec<Release> {
    diff_listings(old, new)
        .into_iter()
        .map(|chapter| Release {
            title: title.to_string(),
            chapter,
        })
        .collect()
}
