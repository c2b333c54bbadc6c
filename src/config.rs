//! Configuration loading for jobscout.
//!
//! Settings come from an optional TOML file (explicit `--config` path, then
//! `./jobscout.toml`, then `~/.config/jobscout/config.toml`), with
//! environment variables applied on top.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm::LlmConfig;
use crate::scrapers::{BrowserLaunchConfig, ScrapeConfig};

/// Locations the job board search supports, as offered in the location
/// picker. Sorted, with "Remote" as a pseudo-location.
pub const SUPPORTED_LOCATIONS: &[&str] = &[
    "Australia",
    "Belgium",
    "Brazil",
    "Canada",
    "Denmark",
    "Finland",
    "France",
    "Germany",
    "India",
    "Ireland",
    "Italy",
    "Japan",
    "Mexico",
    "Netherlands",
    "New Zealand",
    "Norway",
    "Remote",
    "Singapore",
    "South Africa",
    "South Korea",
    "Spain",
    "Sweden",
    "Switzerland",
    "United Arab Emirates",
    "United Kingdom",
    "United States",
];

/// Resolve a user-supplied location to its canonical casing.
pub fn canonical_location(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    SUPPORTED_LOCATIONS
        .iter()
        .find(|loc| loc.eq_ignore_ascii_case(trimmed))
        .copied()
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Language model client settings.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Browser launch settings.
    #[serde(default)]
    pub browser: BrowserLaunchConfig,

    /// Scrape timing and diagnostics settings.
    #[serde(default)]
    pub scrape: ScrapeConfig,
}

impl Config {
    /// Load configuration, preferring an explicit path over auto-discovery.
    ///
    /// A missing discovered file is not an error; an unreadable or invalid
    /// explicit file is.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(explicit) => Self::from_file(explicit)?,
            None => match Self::discover() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        // Environment always wins over file contents.
        config.llm = config.llm.with_env_overrides();
        Ok(config)
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        debug!("loading config from {}", path.display());
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from("jobscout.toml");
        if local.exists() {
            return Some(local);
        }
        let global = dirs::config_dir()?.join("jobscout").join("config.toml");
        global.exists().then_some(global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_are_sorted_and_include_remote() {
        let mut sorted = SUPPORTED_LOCATIONS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, SUPPORTED_LOCATIONS);
        assert!(SUPPORTED_LOCATIONS.contains(&"Remote"));
    }

    #[test]
    fn canonical_location_is_case_insensitive() {
        assert_eq!(canonical_location("remote"), Some("Remote"));
        assert_eq!(canonical_location("  united states "), Some("United States"));
        assert_eq!(canonical_location("Atlantis"), None);
    }

    #[test]
    fn config_parses_partial_toml() {
        let config: Config = toml::from_str(
            r#"
            [llm]
            model = "gpt-4o-mini"

            [scrape]
            card_wait_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.scrape.card_wait_secs, 10);
        // Untouched sections keep their defaults.
        assert_eq!(config.scrape.login_poll_secs, 2);
    }
}
