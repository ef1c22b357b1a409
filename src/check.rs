//! One checking run: every title on every selected site, diffed against the persisted listings.

use crate::diff::new_releases;
use crate::model::{ChapterSet, Release, TitleEntry};
use crate::scraper::{extract_outcome, Fetch, FetchOutcome, Site};
use crate::store::ListingStore;

/// Options for a run: which sites, whether to persist, and a progress callback.
pub struct CheckOptions<'a> {
    pub sites: &'a [Site],
    /// Report only; leave persisted listings untouched.
    pub dry_run: bool,
    /// Called with (done, total) after each (title, site) pair.
    pub progress: Option<&'a dyn Fn(u32, u32)>,
}

/// A (title, site) pair for which no alias produced a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unavailable {
    pub title: String,
    pub site: Site,
}

/// Result of a run: new releases in title-list order, plus the pairs that could not be fetched.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub releases: Vec<Release>,
    pub unavailable: Vec<Unavailable>,
}

/// Fetch one title from one site, trying each alias until a page is found.
/// Returns None when no alias produced markup.
fn check_site(entry: &TitleEntry, site: Site, fetcher: &mut dyn Fetch) -> Option<ChapterSet> {
    let adapter = site.adapter();
    for alias in entry.aliases() {
        let url = match adapter.title_url(alias) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(site = site.name(), alias = %alias, "{}", e);
                continue;
            }
        };
        let outcome = fetcher.fetch(&url);
        match &outcome {
            FetchOutcome::Markup(_) => {
                tracing::debug!(site = site.name(), %url, "fetched listing");
                return Some(extract_outcome(adapter, &outcome));
            }
            FetchOutcome::NotFound => {
                tracing::debug!(site = site.name(), %url, "title not found");
            }
            FetchOutcome::Failed(e) => {
                tracing::warn!(site = site.name(), %url, "fetch failed: {}", e);
            }
        }
    }
    None
}

/// Check every title on every site and report chapters not seen in the last run.
///
/// Fetch failures never abort the run: the pair contributes no chapters and is
/// listed in [CheckReport::unavailable]. When any site was unavailable for a
/// title, its persisted listing keeps every previously known chapter, so a
/// site coming back does not re-report them.
pub fn check_titles(
    titles: &[TitleEntry],
    store: &ListingStore,
    fetcher: &mut dyn Fetch,
    options: &CheckOptions<'_>,
) -> CheckReport {
    let mut report = CheckReport::default();
    let total = u32::try_from(titles.len().saturating_mul(options.sites.len()))
        .unwrap_or(u32::MAX);
    let mut done = 0u32;

    for entry in titles {
        let title = entry.canonical();
        let old = store.load(title).unwrap_or_else(|e| {
            tracing::warn!("{}; treating as a first check", e);
            ChapterSet::new()
        });

        let mut fresh = ChapterSet::new();
        let mut any_found = false;
        let mut any_unavailable = false;
        for &site in options.sites {
            match check_site(entry, site, fetcher) {
                Some(chapters) => {
                    any_found = true;
                    fresh.merge(chapters);
                }
                None => {
                    any_unavailable = true;
                    report.unavailable.push(Unavailable {
                        title: title.to_string(),
                        site,
                    });
                }
            }
            done = done.saturating_add(1);
            if let Some(p) = options.progress {
                p(done, total);
            }
        }

        let releases = new_releases(title, &old, &fresh);
        tracing::info!(
            title,
            known = old.len(),
            listed = fresh.len(),
            new = releases.len(),
            "checked title"
        );
        report.releases.extend(releases);

        if !any_found {
            tracing::warn!(title, "no site returned a listing; keeping previous record");
            continue;
        }
        if options.dry_run {
            continue;
        }
        let record = if any_unavailable {
            tracing::debug!(title, "partial listing; keeping previously known chapters");
            let mut record = fresh;
            record.merge(old);
            record
        } else {
            fresh
        };
        if let Err(e) = store.save(title, &record) {
            tracing::warn!("{}", e);
        }
    }

    report
}
