//! Chapter extractor: drives the scanner with one site's rules and collects chapter labels.

use crate::model::{ChapterLabel, ChapterSet};
use crate::scraper::scanner::{scan, Tag, TagHandler};
use crate::scraper::{FetchOutcome, SiteAdapter};

/// Per-extraction state. Never outlives one [extract_chapters] call.
///
/// `in_chapter` implies `in_listing`: leaving the listing clears it.
#[derive(Debug, Default)]
struct ScanState {
    in_listing: bool,
    in_chapter: bool,
    chapters: ChapterSet,
}

struct Extraction<'a> {
    adapter: &'a SiteAdapter,
    state: ScanState,
}

impl Extraction<'_> {
    fn toggle_listing(&mut self, tag: &Tag) {
        if self.state.in_listing {
            if (self.adapter.listing_ended)(tag) {
                self.state.in_listing = false;
                self.state.in_chapter = false;
            }
        } else if (self.adapter.listing_started)(tag) {
            self.state.in_listing = true;
        }
    }
}

impl TagHandler for Extraction<'_> {
    fn start_tag(&mut self, tag: &Tag) {
        if self.state.in_listing && (self.adapter.chapter_started)(tag) {
            self.state.in_chapter = true;
        }
        self.toggle_listing(tag);
    }

    fn end_tag(&mut self, tag: &Tag) {
        if self.state.in_listing && (self.adapter.chapter_ended)(&tag.name) {
            self.state.in_chapter = false;
        }
        self.toggle_listing(tag);
    }

    fn text(&mut self, data: &str) {
        if !self.state.in_chapter {
            return;
        }
        if let Some(label) = ChapterLabel::from_entry_text(data) {
            self.state.chapters.insert(label);
        }
    }
}

/// Extract the chapter set from one listing page.
///
/// Only text inside a chapter entry inside the listing region counts, and
/// only its last whitespace-delimited token is kept.
pub fn extract_chapters(adapter: &SiteAdapter, markup: &str) -> ChapterSet {
    let mut extraction = Extraction {
        adapter,
        state: ScanState::default(),
    };
    scan(markup, &mut extraction);
    tracing::debug!(
        site = adapter.name,
        chapters = extraction.state.chapters.len(),
        "extracted chapter listing"
    );
    extraction.state.chapters
}

/// Like [extract_chapters], but a page that could not be fetched yields an empty set.
pub fn extract_outcome(adapter: &SiteAdapter, outcome: &FetchOutcome) -> ChapterSet {
    match outcome {
        FetchOutcome::Markup(markup) => extract_chapters(adapter, markup),
        FetchOutcome::NotFound | FetchOutcome::Failed(_) => ChapterSet::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::{ScraperError, Site};

    fn labels(set: &ChapterSet) -> Vec<&str> {
        set.iter().map(ChapterLabel::as_str).collect()
    }

    #[test]
    fn table_listing_yields_trailing_token() {
        let set = extract_chapters(
            Site::MangaReader.adapter(),
            r#"<table id="listing"><a>Bleach Chapter 624</a></table>"#,
        );
        assert_eq!(labels(&set), vec!["624"]);
    }

    #[test]
    fn links_before_listing_are_ignored() {
        let set = extract_chapters(
            Site::MangaReader.adapter(),
            r#"<a>Bleach 1</a><p>no listing here</p>"#,
        );
        assert!(set.is_empty());
    }

    #[test]
    fn links_after_listing_closes_are_ignored() {
        let set = extract_chapters(
            Site::MangaReader.adapter(),
            r#"<table id="listing"><a>Bleach 1</a></table><a>Bleach 2</a>"#,
        );
        assert_eq!(labels(&set), vec!["1"]);
    }

    #[test]
    fn duplicate_trailing_tokens_collapse() {
        let set = extract_chapters(
            Site::MangaReader.adapter(),
            r#"<table id="listing">
<tr><td><a href="/bleach/5">Bleach 5</a></td></tr>
<tr><td><span><a class="alt" href="/bleach/5-alt">Chapter 5</a></span></td></tr>
</table>"#,
        );
        assert_eq!(labels(&set), vec!["5"]);
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = r#"<table id="listing"><a>Bleach 2</a><a>Bleach 10</a><a>Bleach 1</a></table>"#;
        let adapter = Site::MangaReader.adapter();
        let first = extract_chapters(adapter, html);
        let second = extract_chapters(adapter, html);
        assert_eq!(first, second);
        assert_eq!(labels(&first), vec!["1", "2", "10"]);
    }

    #[test]
    fn text_between_entries_is_not_collected() {
        let set = extract_chapters(
            Site::MangaReader.adapter(),
            r#"<table id="listing"><td><a>Bleach 3</a> : The Title</td><td>07/01/2009</td></table>"#,
        );
        assert_eq!(labels(&set), vec!["3"]);
    }

    #[test]
    fn second_listing_start_inside_region_does_not_nest() {
        // The inner table's close ends the region; the outer remainder is outside.
        let set = extract_chapters(
            Site::MangaReader.adapter(),
            r#"<table id="listing"><table id="listing"><a>X 1</a></table><a>X 2</a></table>"#,
        );
        assert_eq!(labels(&set), vec!["1"]);
    }

    #[test]
    fn region_closing_mid_entry_drops_chapter_state() {
        let set = extract_chapters(
            Site::MangaPanda.adapter(),
            r#"<div id="chapterlist"><a>Naruto 700<div class="clear"></div> stray 9</a>"#,
        );
        assert_eq!(labels(&set), vec!["700"]);
    }

    #[test]
    fn unclosed_markup_is_best_effort() {
        let set = extract_chapters(
            Site::MangaReader.adapter(),
            r#"<table id="listing"><a>Bleach 1<a>Bleach 2"#,
        );
        assert_eq!(labels(&set), vec!["1", "2"]);
    }

    #[test]
    fn failed_or_missing_fetch_is_empty() {
        let adapter = Site::MangaHere.adapter();
        assert!(extract_outcome(adapter, &FetchOutcome::NotFound).is_empty());
        let failed = FetchOutcome::Failed(ScraperError::HttpStatus {
            status: 503,
            url: "http://www.mangahere.co/manga/bleach".to_string(),
        });
        assert!(extract_outcome(adapter, &failed).is_empty());
        let found = FetchOutcome::Markup(
            r#"<div class="detail_list"><ul><a class="color_0077">Bleach 7</a></ul></div>"#
                .to_string(),
        );
        assert_eq!(labels(&extract_outcome(adapter, &found)), vec!["7"]);
    }
}
