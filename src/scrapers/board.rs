//! Session seam between the scrape flow and the browser.

use anyhow::Result;
use async_trait::async_trait;

/// One live job-board session.
///
/// The production implementation drives Chrome over CDP; tests substitute a
/// mock. The scrape flow owns the session exclusively for one invocation
/// and guarantees [`close`](Self::close) is invoked exactly once on every
/// exit path.
#[async_trait]
pub trait BoardSession: Send {
    /// Current page URL (used to detect when the login page was left).
    async fn current_url(&mut self) -> Result<String>;

    /// Navigate to a URL.
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// Scroll the page to the bottom to trigger lazy rendering.
    async fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Enumerate the job cards currently visible and return their count.
    async fn collect_cards(&mut self) -> Result<usize>;

    /// Scroll the i-th collected card into view.
    async fn scroll_card_into_view(&mut self, index: usize) -> Result<()>;

    /// Pointer move-and-click on the i-th collected card.
    async fn click_card(&mut self, index: usize) -> Result<()>;

    /// Destination URL of the i-th card's anchor, if readable.
    async fn card_link(&mut self, index: usize) -> Result<Option<String>>;

    /// Full rendered page markup, for diagnostics.
    async fn page_html(&mut self) -> Result<String>;

    /// Tear the session down. Must be safe to call once per session.
    async fn close(&mut self);
}
