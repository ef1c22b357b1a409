//! MangaPanda adapter. The listing is `<div id="chapterlist">` and runs until the next `<div class="clear">`.

use crate::scraper::{SiteAdapter, Tag};

pub(crate) static ADAPTER: SiteAdapter = SiteAdapter {
    name: "mangapanda",
    base_url: "http://www.mangapanda.com/",
    separator: "-",
    listing_started,
    listing_ended,
    chapter_started,
    chapter_ended,
};

fn listing_started(tag: &Tag) -> bool {
    tag.is_start("div") && tag.attr("id") == Some("chapterlist")
}

// The chapter list div nests other divs, so its own close is not usable.
fn listing_ended(tag: &Tag) -> bool {
    tag.is_start("div") && tag.has_class("clear")
}

fn chapter_started(tag: &Tag) -> bool {
    tag.is_start("a")
}

fn chapter_ended(name: &str) -> bool {
    name == "a"
}
