//! MangaHere adapter. Only links marked `color_0077` inside `div.detail_list` are chapters.

use crate::scraper::{SiteAdapter, Tag};

const CHAPTER_CLASS: &str = "color_0077";

pub(crate) static ADAPTER: SiteAdapter = SiteAdapter {
    name: "mangahere",
    base_url: "http://www.mangahere.co/manga/",
    separator: "_",
    listing_started,
    listing_ended,
    chapter_started,
    chapter_ended,
};

fn listing_started(tag: &Tag) -> bool {
    tag.is_start("div") && tag.has_class("detail_list")
}

fn listing_ended(tag: &Tag) -> bool {
    tag.is_end("ul")
}

fn chapter_started(tag: &Tag) -> bool {
    tag.is_start("a") && tag.has_class(CHAPTER_CLASS)
}

fn chapter_ended(name: &str) -> bool {
    name == "a"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::extract_chapters;

    #[test]
    fn chapter_requires_class_marker() {
        assert!(chapter_started(&Tag::start("a", &[("class", "color_0077")])));
        assert!(!chapter_started(&Tag::start("a", &[("class", "color_0088")])));
        assert!(!chapter_started(&Tag::start("a", &[])));
        assert!(listing_started(&Tag::start("div", &[("class", "detail_list")])));
        assert!(listing_ended(&Tag::end("ul")));
        assert!(!listing_ended(&Tag::end("div")));
    }

    #[test]
    fn listing_page() {
        let html = r#"<div class="detail_list">
<span class="left">Bleach</span>
<ul>
<li><span class="left"><a class="color_0077" href="//www.mangahere.co/manga/bleach/v74/c686/">
Bleach 686
</a><span class="mr6">Vol 74</span></span></li>
<li><span class="left"><a class="color_0077" href="//www.mangahere.co/manga/bleach/v74/c685/">
Bleach 685
</a></span><a class="newchapter" href="/new">NEW 999</a></li>
</ul>
</div>
<ul><li><a class="color_0077" href="/other">Other 1</a></li></ul>"#;
        let chapters = extract_chapters(&ADAPTER, html);
        let got: Vec<&str> = chapters.iter().map(|c| c.as_str()).collect();
        assert_eq!(got, vec!["685", "686"]);
    }
}
