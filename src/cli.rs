//! CLI parsing and orchestration. Parses args, runs a check, prints new releases. Maps errors to exit codes.

use crate::check::{check_titles, CheckOptions, CheckReport};
use crate::config::{self, Config};
use crate::scraper::{resolve_site, HttpFetcher, ScraperError, Site};
use crate::store::{read_titles, ListingStore, StoreError};
use clap::Parser;
use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TITLES_FILE: &str = "titles.txt";
const DEFAULT_LISTING_DIR: &str = "listings";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// CLI error carrying exit code and message.
#[derive(Debug, Error)]
pub enum CliRunError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Scraper(#[from] ScraperError),

    #[error("{0}")]
    Store(#[from] StoreError),
}

impl CliRunError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliRunError::InvalidInput(_) => 1,
            CliRunError::Scraper(_) => 2,
            CliRunError::Store(_) => 3,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mangacheck")]
#[command(about = "Check MangaReader, MangaPanda, and MangaHere for new chapters of the titles you follow")]
#[command(
    after_help = "Config file keys (titles_file, listing_dir, sites, user_agent, timeout_secs) are read from ./mangacheck.toml or ~/.config/mangacheck/config.toml. CLI flags override config."
)]
pub struct Args {
    /// Title list: one series per line, alternate spellings separated by `$$`. Default: ./titles.txt.
    pub titles: Option<PathBuf>,

    /// Directory holding the last listing of each title. Default: ./listings.
    #[arg(long)]
    pub listing_dir: Option<PathBuf>,

    /// Site to check (mangareader, mangapanda, mangahere). Repeat for several; default all.
    #[arg(long = "site", value_parser = parse_site)]
    pub sites: Vec<Site>,

    /// Report new chapters without updating the stored listings.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the report as a JSON array of {title, chapter}.
    #[arg(long)]
    pub json: bool,

    /// Suppress progress and the unavailable-site summary.
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging and the full error chain.
    #[arg(long)]
    pub verbose: bool,

    /// HTTP User-Agent (overrides config).
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Request timeout in seconds (overrides config; default 30).
    #[arg(long)]
    pub timeout: Option<u64>,
}

fn parse_site(s: &str) -> Result<Site, String> {
    resolve_site(s).map_err(|e| e.to_string())
}

/// Sites from --site, else from config, else all. Config names are validated here.
fn effective_sites(args: &Args, config: Option<&Config>) -> Result<Vec<Site>, CliRunError> {
    if !args.sites.is_empty() {
        return Ok(dedup_sites(args.sites.clone()));
    }
    match config.and_then(|c| c.sites.as_ref()) {
        Some(names) if !names.is_empty() => {
            let sites = names
                .iter()
                .map(|n| resolve_site(n))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CliRunError::InvalidInput(format!("Invalid config: {}", e)))?;
            Ok(dedup_sites(sites))
        }
        _ => Ok(Site::ALL.to_vec()),
    }
}

fn dedup_sites(sites: Vec<Site>) -> Vec<Site> {
    let mut out: Vec<Site> = Vec::with_capacity(sites.len());
    for site in sites {
        if !out.contains(&site) {
            out.push(site);
        }
    }
    out
}

fn print_report(report: &CheckReport, json: bool) -> Result<(), CliRunError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = if json {
        serde_json::to_writer_pretty(&mut out, &report.releases)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(out))
    } else {
        report
            .releases
            .iter()
            .try_for_each(|r| writeln!(out, "{}", r))
    };
    written.map_err(|e| CliRunError::InvalidInput(format!("Failed to write report: {}", e)))
}

/// Entry point for the CLI. Returns Ok(()) on success; Err with exit code and message on failure.
pub fn run(args: &Args) -> Result<(), CliRunError> {
    let config = config::load_config().map_err(CliRunError::InvalidInput)?;

    let titles_path = args
        .titles
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.titles_file.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TITLES_FILE));
    let listing_dir = args
        .listing_dir
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.listing_dir.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LISTING_DIR));
    let timeout_secs = args
        .timeout
        .or_else(|| config.as_ref().and_then(|c| c.timeout_secs))
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    let user_agent = args
        .user_agent
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.user_agent.clone()));
    let sites = effective_sites(args, config.as_ref())?;

    let titles = read_titles(&titles_path)?;
    if titles.is_empty() {
        return Err(CliRunError::InvalidInput(format!(
            "No titles in {}. Add one series per line.",
            titles_path.display()
        )));
    }

    let mut builder = HttpFetcher::builder().timeout_secs(timeout_secs);
    if let Some(ua) = user_agent {
        builder = builder.user_agent(ua);
    }
    let mut fetcher = builder.build()?;
    let store = ListingStore::new(listing_dir);

    let progress_state: RefCell<Option<indicatif::ProgressBar>> = RefCell::new(None);
    let progress_cb = |n: u32, total: u32| {
        if total == 0 {
            return;
        }
        let mut state = progress_state.borrow_mut();
        let pb = state.get_or_insert_with(|| {
            let bar = indicatif::ProgressBar::new(total as u64);
            if let Ok(style) = indicatif::ProgressStyle::default_bar()
                .template("{spinner} {msg} [{bar:40}] {pos}/{len} ({elapsed})")
            {
                bar.set_style(
                    style
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                        .progress_chars("█▉▊▋▌▍▎▏ "),
                );
            }
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        });
        pb.set_position(n as u64);
        pb.set_message(format!("Checked {}/{}", n, total));
    };
    let progress: Option<&dyn Fn(u32, u32)> = if args.quiet { None } else { Some(&progress_cb) };

    let options = CheckOptions {
        sites: &sites,
        dry_run: args.dry_run,
        progress,
    };
    let report = check_titles(&titles, &store, &mut fetcher, &options);

    if let Some(pb) = progress_state.borrow_mut().take() {
        pb.disable_steady_tick();
        pb.finish_and_clear();
    }

    print_report(&report, args.json)?;

    if !args.quiet {
        for miss in &report.unavailable {
            eprintln!("Unavailable: {} on {}", miss.title, miss.site.name());
        }
        eprintln!(
            "{} new chapter(s) across {} title(s).",
            report.releases.len(),
            titles.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        let mut full = vec!["mangacheck"];
        full.extend_from_slice(argv);
        Args::parse_from(full)
    }

    #[test]
    fn parse_site_accepts_names_and_aliases() {
        assert_eq!(parse_site("mangareader").unwrap(), Site::MangaReader);
        assert_eq!(parse_site("MP").unwrap(), Site::MangaPanda);
        assert!(parse_site("other").is_err());
    }

    #[test]
    fn args_defaults() {
        let a = args(&[]);
        assert!(a.titles.is_none());
        assert!(a.sites.is_empty());
        assert!(!a.dry_run);
        assert!(!a.json);
    }

    #[test]
    fn args_repeated_sites() {
        let a = args(&["manga.txt", "--site", "mh", "--site", "mangareader", "--dry-run"]);
        assert_eq!(a.titles, Some(PathBuf::from("manga.txt")));
        assert_eq!(a.sites, vec![Site::MangaHere, Site::MangaReader]);
        assert!(a.dry_run);
    }

    #[test]
    fn args_reject_unknown_site() {
        let full = ["mangacheck", "--site", "batoto"];
        assert!(Args::try_parse_from(full).is_err());
    }

    #[test]
    fn effective_sites_prefers_flags_then_config() -> Result<(), CliRunError> {
        let config = Config {
            sites: Some(vec!["mangapanda".to_string()]),
            ..Config::default()
        };
        let flagged = args(&["--site", "mh", "--site", "mh"]);
        assert_eq!(
            effective_sites(&flagged, Some(&config))?,
            vec![Site::MangaHere]
        );
        assert_eq!(
            effective_sites(&args(&[]), Some(&config))?,
            vec![Site::MangaPanda]
        );
        assert_eq!(effective_sites(&args(&[]), None)?, Site::ALL.to_vec());
        Ok(())
    }

    #[test]
    fn effective_sites_rejects_unknown_config_site() {
        let config = Config {
            sites: Some(vec!["batoto".to_string()]),
            ..Config::default()
        };
        match effective_sites(&args(&[]), Some(&config)) {
            Err(CliRunError::InvalidInput(msg)) => assert!(msg.contains("batoto")),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn cli_run_error_exit_codes() {
        assert_eq!(CliRunError::InvalidInput("x".into()).exit_code(), 1);
        assert_eq!(
            CliRunError::Scraper(ScraperError::UnknownSite { name: "x".into() }).exit_code(),
            2
        );
        assert_eq!(
            CliRunError::Store(StoreError::ReadTitles {
                path: PathBuf::from("titles.txt"),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
            .exit_code(),
            3
        );
    }
}
