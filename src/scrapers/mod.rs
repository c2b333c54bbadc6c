//! Job board scraping.
//!
//! The scrape flow is a state machine over one browser session: wait for
//! manual login, run the search, collect job cards, extract each card with
//! per-item failure containment, aggregate. The session seam is the
//! [`BoardSession`] trait so the flow is testable without a browser.

pub mod board;
#[cfg(feature = "browser")]
pub mod browser;
pub mod config;
pub mod jobs;

pub use board::BoardSession;
#[cfg(feature = "browser")]
pub use browser::BrowserSession;
pub use config::{BrowserLaunchConfig, ScrapeConfig};
pub use jobs::{JobQuery, JobScraper, ScrapeError};
