//! mangacheck: detect newly released manga chapters by diffing scraped chapter listings.

pub mod check;
pub mod cli;
pub mod config;
pub mod diff;
pub mod model;
pub mod natural;
pub mod scraper;
pub mod store;

// Re-exports for CLI and consumers.
pub use check::{check_titles, CheckOptions, CheckReport, Unavailable};
pub use diff::{diff_listings, new_releases};
pub use model::{ChapterLabel, ChapterSet, Release, TitleEntry};
pub use natural::{natural_cmp, sort_natural};
pub use scraper::{
    extract_chapters, extract_outcome, resolve_site, Fetch, FetchOutcome, HttpFetcher,
    HttpFetcherBuilder, ScraperError, Site, SiteAdapter,
};
pub use store::{parse_titles, read_titles, ListingStore, StoreError};
