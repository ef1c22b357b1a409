//! Optional config file loading. Search order: ./mangacheck.toml, then
//! $XDG_CONFIG_HOME/mangacheck/config.toml (or ~/.config/mangacheck/config.toml).

use serde::Deserialize;
use std::path::PathBuf;

/// Config file contents. All fields optional; only present keys override defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Title list, one series per line. Paths are relative to CWD.
    pub titles_file: Option<PathBuf>,
    /// Directory of persisted chapter listings.
    pub listing_dir: Option<PathBuf>,
    /// Sites to check, by name (mangareader, mangapanda, mangahere). Default: all.
    pub sites: Option<Vec<String>>,
    /// HTTP User-Agent header.
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Search order: (1) ./mangacheck.toml, (2) $XDG_CONFIG_HOME/mangacheck/config.toml.
/// Missing file returns Ok(None). Invalid TOML or I/O error reading a present file returns Err.
pub fn load_config() -> Result<Option<Config>, String> {
    let cwd = std::env::current_dir()
        .map_err(|e| format!("Cannot determine current directory: {}", e))?;
    let mut paths = vec![cwd.join("mangacheck.toml")];
    if let Some(d) = dirs::config_dir() {
        paths.push(d.join("mangacheck").join("config.toml"));
    }
    for path in &paths {
        if path.exists() {
            let s = std::fs::read_to_string(path)
                .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
            let config: Config = toml::from_str(&s)
                .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
            return Ok(Some(config));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_config() {
        let c: Config = toml::from_str("").unwrap();
        assert!(c.titles_file.is_none());
        assert!(c.listing_dir.is_none());
        assert!(c.sites.is_none());
        assert!(c.user_agent.is_none());
        assert!(c.timeout_secs.is_none());
    }

    #[test]
    fn parse_full_config() {
        let s = r#"
            titles_file = "manga.txt"
            listing_dir = "logs"
            sites = ["mangapanda", "mangahere"]
            user_agent = "Custom/1.0"
            timeout_secs = 10
        "#;
        let c: Config = toml::from_str(s).unwrap();
        assert_eq!(
            c.titles_file.as_deref(),
            Some(std::path::Path::new("manga.txt"))
        );
        assert_eq!(c.listing_dir.as_deref(), Some(std::path::Path::new("logs")));
        assert_eq!(
            c.sites,
            Some(vec!["mangapanda".to_string(), "mangahere".to_string()])
        );
        assert_eq!(c.user_agent.as_deref(), Some("Custom/1.0"));
        assert_eq!(c.timeout_secs, Some(10));
    }

    #[test]
    fn parse_partial_config() {
        let c: Config = toml::from_str("timeout_secs = 5").unwrap();
        assert!(c.titles_file.is_none());
        assert!(c.sites.is_none());
        assert_eq!(c.timeout_secs, Some(5));
    }

    #[test]
    fn invalid_toml_errors() {
        assert!(toml::from_str::<Config>("sites = [").is_err());
        assert!(toml::from_str::<Config>("timeout_secs = \"soon\"").is_err());
    }
}
