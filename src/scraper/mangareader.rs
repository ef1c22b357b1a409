//! MangaReader adapter. Chapters are links inside `<table id="listing">`; the table's own close ends the region.

use crate::scraper::{SiteAdapter, Tag};

pub(crate) static ADAPTER: SiteAdapter = SiteAdapter {
    name: "mangareader",
    base_url: "https://www.mangareader.net/",
    separator: "-",
    listing_started,
    listing_ended,
    chapter_started,
    chapter_ended,
};

fn listing_started(tag: &Tag) -> bool {
    tag.is_start("table") && tag.attr("id") == Some("listing")
}

fn listing_ended(tag: &Tag) -> bool {
    tag.is_end("table")
}

fn chapter_started(tag: &Tag) -> bool {
    tag.is_start("a")
}

fn chapter_ended(name: &str) -> bool {
    name == "a"
}
