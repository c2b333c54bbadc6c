//! Scrape timing and browser launch configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing, timeout, and diagnostics settings for one scrape invocation.
///
/// The fixed settles paper over transitions the page exposes no readiness
/// signal for; the card wait is a bounded condition poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Seconds between login-page polls.
    #[serde(default = "default_login_poll_secs")]
    pub login_poll_secs: u64,

    /// Bound on the manual-login wait. None waits forever (the wait is
    /// gated on human action).
    #[serde(default)]
    pub login_timeout_secs: Option<u64>,

    /// Settle after navigating to the search results and scrolling.
    #[serde(default = "default_search_settle_secs")]
    pub search_settle_secs: u64,

    /// Bound on the wait for the first job card to appear.
    #[serde(default = "default_card_wait_secs")]
    pub card_wait_secs: u64,

    /// Settle after cards appear, before enumerating them.
    #[serde(default = "default_card_settle_secs")]
    pub card_settle_secs: u64,

    /// Pause after scrolling a card into view.
    #[serde(default = "default_scroll_pause_secs")]
    pub scroll_pause_secs: u64,

    /// Pause after clicking a card, while the detail pane loads.
    #[serde(default = "default_click_pause_secs")]
    pub click_pause_secs: u64,

    /// Directory receiving per-item error page dumps.
    #[serde(default = "default_diagnostics_dir")]
    pub diagnostics_dir: PathBuf,
}

fn default_login_poll_secs() -> u64 {
    2
}

fn default_search_settle_secs() -> u64 {
    5
}

fn default_card_wait_secs() -> u64 {
    60
}

fn default_card_settle_secs() -> u64 {
    3
}

fn default_scroll_pause_secs() -> u64 {
    1
}

fn default_click_pause_secs() -> u64 {
    2
}

fn default_diagnostics_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            login_poll_secs: default_login_poll_secs(),
            login_timeout_secs: None,
            search_settle_secs: default_search_settle_secs(),
            card_wait_secs: default_card_wait_secs(),
            card_settle_secs: default_card_settle_secs(),
            scroll_pause_secs: default_scroll_pause_secs(),
            click_pause_secs: default_click_pause_secs(),
            diagnostics_dir: default_diagnostics_dir(),
        }
    }
}

impl ScrapeConfig {
    pub fn login_poll(&self) -> Duration {
        Duration::from_secs(self.login_poll_secs)
    }

    pub fn login_timeout(&self) -> Option<Duration> {
        self.login_timeout_secs.map(Duration::from_secs)
    }

    pub fn search_settle(&self) -> Duration {
        Duration::from_secs(self.search_settle_secs)
    }

    pub fn card_wait(&self) -> Duration {
        Duration::from_secs(self.card_wait_secs)
    }

    pub fn card_settle(&self) -> Duration {
        Duration::from_secs(self.card_settle_secs)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_secs(self.scroll_pause_secs)
    }

    pub fn click_pause(&self) -> Duration {
        Duration::from_secs(self.click_pause_secs)
    }
}

/// Browser launch settings.
///
/// Headed by default: the user has to see the window to complete the login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserLaunchConfig {
    /// Run without a visible window. Only useful when the profile already
    /// carries a valid session.
    #[serde(default)]
    pub headless: bool,

    /// Chrome executable path; discovered automatically when unset.
    #[serde(default)]
    pub executable: Option<PathBuf>,

    /// Additional Chrome arguments.
    #[serde(default)]
    pub chrome_args: Vec<String>,
}
