//! The job-board scrape flow.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::board::BoardSession;
use super::config::ScrapeConfig;
use crate::models::{is_job_view_url, JobPosting, JobTable};

/// Login page for the board; the session parks here until the human signs in.
pub const LOGIN_URL: &str = "https://www.linkedin.com/login";

/// URL fragment that identifies the login page during the wait poll.
const LOGIN_MARKER: &str = "login";

/// Search results, newest first.
const SEARCH_URL: &str = "https://www.linkedin.com/jobs/search/";

/// Selector for one posting on the results page.
pub const CARD_SELECTOR: &str = "div.job-card-container";

/// Default number of postings to collect when the caller does not say.
pub const DEFAULT_JOB_LIMIT: usize = 10;

/// Errors that abort a whole scrape invocation.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("timed out waiting for manual login")]
    LoginTimeout,

    #[error("timed out waiting for job cards to appear")]
    CardTimeout,

    #[error(transparent)]
    Session(#[from] anyhow::Error),
}

/// One scrape request.
#[derive(Debug, Clone)]
pub struct JobQuery {
    /// Job title to search for.
    pub role: String,
    /// Location filter (canonical casing).
    pub location: String,
    /// Resume summary carried along for future matching; not consulted by
    /// navigation, filtering, or ranking.
    pub context_summary: String,
    /// Maximum postings to extract.
    pub limit: usize,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self {
            role: "Data Scientist".to_string(),
            location: "Remote".to_string(),
            context_summary: String::new(),
            limit: DEFAULT_JOB_LIMIT,
        }
    }
}

/// Drives one scrape invocation over a [`BoardSession`].
pub struct JobScraper {
    config: ScrapeConfig,
}

impl JobScraper {
    pub fn new(config: ScrapeConfig) -> Self {
        Self { config }
    }

    /// Run the scrape. The session is closed exactly once before this
    /// returns, on the success path and on every failure path alike.
    pub async fn scrape<S: BoardSession>(
        &self,
        session: &mut S,
        query: &JobQuery,
    ) -> Result<JobTable, ScrapeError> {
        let result = self.run(session, query).await;
        session.close().await;
        result
    }

    async fn run<S: BoardSession>(
        &self,
        session: &mut S,
        query: &JobQuery,
    ) -> Result<JobTable, ScrapeError> {
        if !query.context_summary.is_empty() {
            debug!(
                "carrying resume context ({} chars), not used for ranking",
                query.context_summary.len()
            );
        }

        session.goto(LOGIN_URL).await?;
        self.await_login(session).await?;

        info!("searching for '{}' in '{}'", query.role, query.location);
        let search_url = format!(
            "{}?keywords={}&location={}&sortBy=DD",
            SEARCH_URL,
            urlencoding::encode(&query.role),
            urlencoding::encode(&query.location)
        );
        session.goto(&search_url).await?;
        session.scroll_to_bottom().await?;
        tokio::time::sleep(self.config.search_settle()).await;

        let cards_found = self.wait_for_cards(session).await?;
        tokio::time::sleep(self.config.card_settle()).await;

        let to_scrape = query.limit.min(cards_found);
        info!("found {} job cards, extracting {}", cards_found, to_scrape);

        let mut table = JobTable::new();
        for index in 0..to_scrape {
            match self.extract_item(session, index).await {
                Ok(Some(posting)) => table.push(posting),
                Ok(None) => {}
                Err(e) => {
                    error!("error scraping job {}: {:#}", index + 1, e);
                    self.persist_diagnostics(session, index).await;
                }
            }
        }

        if table.is_empty() {
            warn!("no job data collected");
        }
        Ok(table)
    }

    /// Poll the page location until it no longer looks like the login page.
    ///
    /// Unbounded unless the config supplies a timeout; the wait is gated on
    /// a human completing the sign-in.
    async fn await_login<S: BoardSession>(&self, session: &mut S) -> Result<(), ScrapeError> {
        let started = Instant::now();
        loop {
            let url = session.current_url().await?;
            if !url.contains(LOGIN_MARKER) {
                info!("login detected, continuing");
                return Ok(());
            }
            if let Some(limit) = self.config.login_timeout() {
                if started.elapsed() >= limit {
                    return Err(ScrapeError::LoginTimeout);
                }
            }
            debug!("still on login page, waiting for manual sign-in");
            tokio::time::sleep(self.config.login_poll()).await;
        }
    }

    /// Bounded condition wait for at least one job card, with backoff.
    async fn wait_for_cards<S: BoardSession>(&self, session: &mut S) -> Result<usize, ScrapeError> {
        let deadline = Instant::now() + self.config.card_wait();
        let mut backoff = Duration::from_millis(500);
        loop {
            let count = session.collect_cards().await?;
            if count > 0 {
                return Ok(count);
            }
            let now = Instant::now();
            if now >= deadline {
                return Err(ScrapeError::CardTimeout);
            }
            tokio::time::sleep(backoff.min(deadline - now)).await;
            backoff = (backoff * 2).min(Duration::from_secs(5));
        }
    }

    /// Extract one card. Ok(None) drops the item (invalid or missing URL);
    /// Err is a contained per-item failure the caller logs and skips.
    async fn extract_item<S: BoardSession>(
        &self,
        session: &mut S,
        index: usize,
    ) -> anyhow::Result<Option<JobPosting>> {
        session.scroll_card_into_view(index).await?;
        tokio::time::sleep(self.config.scroll_pause()).await;

        session.click_card(index).await?;
        tokio::time::sleep(self.config.click_pause()).await;

        let url = match session.card_link(index).await? {
            Some(url) => url,
            None => "URL not found".to_string(),
        };

        if is_job_view_url(&url) {
            Ok(Some(JobPosting::new(url)))
        } else {
            warn!("job {} does not have a valid job view URL", index + 1);
            Ok(None)
        }
    }

    /// Dump the rendered page for one failed item, named by 1-based index.
    async fn persist_diagnostics<S: BoardSession>(&self, session: &mut S, index: usize) {
        let markup = match session.page_html().await {
            Ok(markup) => markup,
            Err(e) => {
                warn!("could not capture page markup for job {}: {}", index + 1, e);
                return;
            }
        };

        let path = self
            .config
            .diagnostics_dir
            .join(format!("job_error_{}.html", index + 1));
        if let Err(e) = std::fs::create_dir_all(&self.config.diagnostics_dir)
            .and_then(|_| std::fs::write(&path, &markup))
        {
            warn!("could not write diagnostic {}: {}", path.display(), e);
        } else {
            info!("wrote diagnostic page dump to {}", path.display());
        }
    }
}
