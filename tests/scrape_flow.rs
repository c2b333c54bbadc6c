//! Scrape flow tests against a scripted mock session.
//!
//! Covers iteration bounds, URL validation, per-item failure containment,
//! diagnostics, login-wait bounds, and the close-exactly-once guarantee.

use anyhow::Result;
use async_trait::async_trait;

use jobscout::models::JobPosting;
use jobscout::scrapers::{BoardSession, JobQuery, JobScraper, ScrapeConfig, ScrapeError};

const LOGIN_URL: &str = "https://www.linkedin.com/login";
const FEED_URL: &str = "https://www.linkedin.com/feed/";

/// Scripted board session recording every interaction.
struct MockSession {
    /// How many times current_url still reports the login page.
    login_polls_remaining: usize,
    /// Number of job cards the results page exposes.
    cards: usize,
    /// Per-card anchor href; None simulates an unreadable URL.
    links: Vec<Option<String>>,
    /// Card index whose click fails.
    fail_click_at: Option<usize>,

    url_calls: usize,
    navigations: Vec<String>,
    scrolled: Vec<usize>,
    clicked: Vec<usize>,
    close_calls: usize,
}

impl MockSession {
    fn new(cards: usize, links: Vec<Option<String>>) -> Self {
        Self {
            login_polls_remaining: 0,
            cards,
            links,
            fail_click_at: None,
            url_calls: 0,
            navigations: Vec::new(),
            scrolled: Vec::new(),
            clicked: Vec::new(),
            close_calls: 0,
        }
    }

    fn with_login_polls(mut self, polls: usize) -> Self {
        self.login_polls_remaining = polls;
        self
    }

    fn with_click_failure(mut self, index: usize) -> Self {
        self.fail_click_at = Some(index);
        self
    }
}

#[async_trait]
impl BoardSession for MockSession {
    async fn current_url(&mut self) -> Result<String> {
        self.url_calls += 1;
        if self.login_polls_remaining > 0 {
            self.login_polls_remaining -= 1;
            Ok(LOGIN_URL.to_string())
        } else {
            Ok(FEED_URL.to_string())
        }
    }

    async fn goto(&mut self, url: &str) -> Result<()> {
        self.navigations.push(url.to_string());
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        Ok(())
    }

    async fn collect_cards(&mut self) -> Result<usize> {
        Ok(self.cards)
    }

    async fn scroll_card_into_view(&mut self, index: usize) -> Result<()> {
        self.scrolled.push(index);
        Ok(())
    }

    async fn click_card(&mut self, index: usize) -> Result<()> {
        if self.fail_click_at == Some(index) {
            anyhow::bail!("stale element reference");
        }
        self.clicked.push(index);
        Ok(())
    }

    async fn card_link(&mut self, index: usize) -> Result<Option<String>> {
        Ok(self.links.get(index).cloned().flatten())
    }

    async fn page_html(&mut self) -> Result<String> {
        Ok("<html><body>results page</body></html>".to_string())
    }

    async fn close(&mut self) {
        self.close_calls += 1;
    }
}

fn view_url(id: u32) -> String {
    format!("https://www.linkedin.com/jobs/view/{}", id)
}

/// Config with every pause zeroed so tests run instantly.
fn fast_config(diagnostics_dir: &std::path::Path) -> ScrapeConfig {
    ScrapeConfig {
        login_poll_secs: 0,
        login_timeout_secs: None,
        search_settle_secs: 0,
        card_wait_secs: 0,
        card_settle_secs: 0,
        scroll_pause_secs: 0,
        click_pause_secs: 0,
        diagnostics_dir: diagnostics_dir.to_path_buf(),
    }
}

fn query(limit: usize) -> JobQuery {
    JobQuery {
        role: "Data Scientist".to_string(),
        location: "Remote".to_string(),
        context_summary: String::new(),
        limit,
    }
}

#[tokio::test]
async fn extracts_at_most_the_requested_count() {
    let dir = tempfile::tempdir().unwrap();
    let links = (0..12).map(|i| Some(view_url(i))).collect();
    let mut session = MockSession::new(12, links);

    let scraper = JobScraper::new(fast_config(dir.path()));
    let table = scraper.scrape(&mut session, &query(10)).await.unwrap();

    assert_eq!(table.len(), 10);
    // Exactly ten extraction iterations, in order.
    assert_eq!(session.clicked, (0..10).collect::<Vec<_>>());
    assert_eq!(session.scrolled, (0..10).collect::<Vec<_>>());
    assert_eq!(session.close_calls, 1);
}

#[tokio::test]
async fn fewer_cards_than_requested_scrapes_them_all() {
    let dir = tempfile::tempdir().unwrap();
    let links = (0..4).map(|i| Some(view_url(i))).collect();
    let mut session = MockSession::new(4, links);

    let scraper = JobScraper::new(fast_config(dir.path()));
    let table = scraper.scrape(&mut session, &query(10)).await.unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(session.clicked.len(), 4);
}

#[tokio::test]
async fn invalid_and_unreadable_urls_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let links = vec![
        Some(view_url(1)),
        Some("https://www.linkedin.com/jobs/search/?x=1".to_string()),
        None,
        Some(view_url(2)),
    ];
    let mut session = MockSession::new(4, links);

    let scraper = JobScraper::new(fast_config(dir.path()));
    let table = scraper.scrape(&mut session, &query(10)).await.unwrap();

    let urls: Vec<&str> = table.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(urls, vec![view_url(1).as_str(), view_url(2).as_str()]);
    // Dropped items were still visited.
    assert_eq!(session.clicked.len(), 4);
    assert_eq!(session.close_calls, 1);
}

#[tokio::test]
async fn card_timeout_fails_scrape_but_closes_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = MockSession::new(0, Vec::new());

    let scraper = JobScraper::new(fast_config(dir.path()));
    let err = scraper.scrape(&mut session, &query(10)).await.unwrap_err();

    assert!(matches!(err, ScrapeError::CardTimeout));
    assert_eq!(session.close_calls, 1);
}

#[tokio::test]
async fn item_failure_is_contained_and_dumps_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let links = (0..3).map(|i| Some(view_url(i))).collect();
    let mut session = MockSession::new(3, links).with_click_failure(1);

    let scraper = JobScraper::new(fast_config(dir.path()));
    let table = scraper.scrape(&mut session, &query(10)).await.unwrap();

    // The failing item is skipped, its neighbors survive.
    assert_eq!(table.len(), 2);
    assert_eq!(session.clicked, vec![0, 2]);
    assert_eq!(session.close_calls, 1);

    // Diagnostic artifact named by 1-based item index.
    let dump = dir.path().join("job_error_2.html");
    let markup = std::fs::read_to_string(dump).unwrap();
    assert!(markup.contains("results page"));
}

#[tokio::test]
async fn login_wait_polls_until_the_login_page_is_left() {
    let dir = tempfile::tempdir().unwrap();
    let links = vec![Some(view_url(1))];
    let mut session = MockSession::new(1, links).with_login_polls(3);

    let scraper = JobScraper::new(fast_config(dir.path()));
    let table = scraper.scrape(&mut session, &query(10)).await.unwrap();

    assert_eq!(table.len(), 1);
    // Three polls on the login page plus the one that saw it left.
    assert_eq!(session.url_calls, 4);
    // First navigation is the login page, second the encoded search.
    assert!(session.navigations[0].contains("/login"));
    assert!(session.navigations[1].contains("keywords=Data%20Scientist"));
    assert!(session.navigations[1].contains("location=Remote"));
}

#[tokio::test]
async fn bounded_login_wait_times_out_and_closes_session() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fast_config(dir.path());
    config.login_timeout_secs = Some(0);
    let mut session = MockSession::new(1, vec![Some(view_url(1))]).with_login_polls(usize::MAX);

    let scraper = JobScraper::new(config);
    let err = scraper.scrape(&mut session, &query(10)).await.unwrap_err();

    assert!(matches!(err, ScrapeError::LoginTimeout));
    assert_eq!(session.close_calls, 1);
    // Never reached the search.
    assert_eq!(session.navigations.len(), 1);
}

#[tokio::test]
async fn empty_result_set_is_ok_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // Cards exist but none carries a valid job-view link.
    let links = vec![None, Some("https://example.com/ad".to_string())];
    let mut session = MockSession::new(2, links);

    let scraper = JobScraper::new(fast_config(dir.path()));
    let table = scraper.scrape(&mut session, &query(10)).await.unwrap();

    assert!(table.is_empty());
    assert_eq!(session.close_calls, 1);
}

#[tokio::test]
async fn context_summary_does_not_alter_navigation() {
    let dir = tempfile::tempdir().unwrap();
    let links = vec![Some(view_url(1))];

    let mut plain = MockSession::new(1, links.clone());
    let mut seeded = MockSession::new(1, links);

    let scraper = JobScraper::new(fast_config(dir.path()));
    let without = query(10);
    let mut with = query(10);
    with.context_summary = "Ten years of data engineering".to_string();

    let a = scraper.scrape(&mut plain, &without).await.unwrap();
    let b = scraper.scrape(&mut seeded, &with).await.unwrap();

    assert_eq!(plain.navigations, seeded.navigations);
    assert_eq!(
        a.iter().collect::<Vec<&JobPosting>>(),
        b.iter().collect::<Vec<&JobPosting>>()
    );
}
