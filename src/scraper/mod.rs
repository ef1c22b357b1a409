//! Site adapters and extraction. Site registry, fetch interface, scanner, and extractor.

mod client;
mod error;

pub mod extract;
pub mod mangahere;
pub mod mangapanda;
pub mod mangareader;
pub mod scanner;

pub use client::{HttpFetcher, HttpFetcherBuilder};
pub use error::ScraperError;
pub use extract::{extract_chapters, extract_outcome};
pub use scanner::{scan, Tag, TagHandler, TagKind};

use reqwest::Url;
use std::fmt;

/// Supported chapter-listing site. Used for dispatch and for --site selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    MangaReader,
    MangaPanda,
    MangaHere,
}

impl Site {
    /// Every registered site, in the order a run checks them.
    pub const ALL: [Site; 3] = [Site::MangaReader, Site::MangaPanda, Site::MangaHere];

    pub fn name(self) -> &'static str {
        self.adapter().name
    }

    /// Matching rules and URL convention for this site.
    pub fn adapter(self) -> &'static SiteAdapter {
        match self {
            Site::MangaReader => &mangareader::ADAPTER,
            Site::MangaPanda => &mangapanda::ADAPTER,
            Site::MangaHere => &mangahere::ADAPTER,
        }
    }
}

/// Look up a site by name (case-insensitive) or short alias.
pub fn resolve_site(name: &str) -> Result<Site, ScraperError> {
    match name.trim().to_lowercase().as_str() {
        "mangareader" | "mr" => Ok(Site::MangaReader),
        "mangapanda" | "mp" => Ok(Site::MangaPanda),
        "mangahere" | "mh" => Ok(Site::MangaHere),
        _ => Err(ScraperError::UnknownSite {
            name: name.to_string(),
        }),
    }
}

/// One site's markup convention: where the chapter listing starts and ends,
/// what a chapter entry looks like, and how title URLs are built.
///
/// `listing_started` and `chapter_started` see start tags only; `listing_ended`
/// sees both start and end tags, so a region may close on a sibling start tag
/// or on the container's own end tag.
pub struct SiteAdapter {
    pub name: &'static str,
    /// Prefix every title URL is resolved against. Ends with '/'.
    pub base_url: &'static str,
    /// Joins the words of a title in its URL slug.
    pub separator: &'static str,
    pub listing_started: fn(&Tag) -> bool,
    pub listing_ended: fn(&Tag) -> bool,
    pub chapter_started: fn(&Tag) -> bool,
    pub chapter_ended: fn(&str) -> bool,
}

impl SiteAdapter {
    /// URL of a title's chapter listing: lower-cased words joined by the separator.
    pub fn title_url(&self, title: &str) -> Result<String, ScraperError> {
        let slug = title
            .split_whitespace()
            .map(str::to_lowercase)
            .collect::<Vec<_>>()
            .join(self.separator);
        let base = Url::parse(self.base_url).map_err(|e| ScraperError::InvalidUrl {
            input: self.base_url.to_string(),
            reason: e.to_string(),
        })?;
        base.join(&slug)
            .map(|u| u.to_string())
            .map_err(|e| ScraperError::InvalidUrl {
                input: slug,
                reason: e.to_string(),
            })
    }
}

impl fmt::Debug for SiteAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteAdapter")
            .field("name", &self.name)
            .field("base_url", &self.base_url)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

/// Result of fetching one listing page. Only `Markup` carries chapters; the
/// other two degrade to an empty chapter set.
#[derive(Debug)]
pub enum FetchOutcome {
    Markup(String),
    NotFound,
    Failed(ScraperError),
}

/// Source of listing markup. Implemented by [HttpFetcher]; tests supply their own.
pub trait Fetch {
    fn fetch(&mut self, url: &str) -> FetchOutcome;
}
