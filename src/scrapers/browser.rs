//! Chromium-backed board session.
//!
//! Drives Chrome over CDP via chromiumoxide. Launched headed by default so
//! the user can complete the login in the visible window.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use tracing::{debug, info, warn};

use super::board::BoardSession;
use super::config::BrowserLaunchConfig;
use super::jobs::CARD_SELECTOR;

/// Board session backed by a live Chrome instance.
pub struct BrowserSession {
    browser: Browser,
    page: Page,
    cards: Vec<Element>,
    closed: bool,
}

impl BrowserSession {
    /// Common Chrome executable paths to check.
    const CHROME_PATHS: &'static [&'static str] = &[
        // Linux
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/snap/bin/chromium",
        // macOS
        "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
        "/Applications/Chromium.app/Contents/MacOS/Chromium",
        // Common install locations
        "/opt/google/chrome/google-chrome",
    ];

    /// Launch a browser and open a blank page.
    pub async fn launch(config: &BrowserLaunchConfig) -> Result<Self> {
        let chrome_path = match &config.executable {
            Some(path) => path.clone(),
            None => Self::find_chrome()?,
        };

        info!("launching browser (headless={})", config.headless);

        let mut builder = BrowserConfig::builder().chrome_executable(chrome_path);

        // with_head means NOT headless, confusingly
        if !config.headless {
            builder = builder.with_head();
        }

        builder = builder
            .arg("--start-maximized")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-infobars")
            .arg("--no-first-run")
            .arg("--no-default-browser-check")
            .arg("--disable-background-networking");

        for arg in &config.chrome_args {
            builder = builder.arg(arg);
        }

        let browser_config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build browser config: {}", e))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("Failed to launch browser")?;

        // Spawn handler task
        tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("Failed to open page")?;

        Ok(Self {
            browser,
            page,
            cards: Vec::new(),
            closed: false,
        })
    }

    /// Find a Chrome executable.
    fn find_chrome() -> Result<std::path::PathBuf> {
        // First, check common paths
        for path in Self::CHROME_PATHS {
            let p = std::path::Path::new(path);
            if p.exists() {
                info!("Found Chrome at: {}", path);
                return Ok(p.to_path_buf());
            }
        }

        // Check if in PATH via `which`
        for cmd in &[
            "google-chrome",
            "google-chrome-stable",
            "chromium",
            "chromium-browser",
        ] {
            if let Ok(output) = std::process::Command::new("which").arg(cmd).output() {
                if output.status.success() {
                    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                    if !path.is_empty() {
                        info!("Found Chrome in PATH: {}", path);
                        return Ok(std::path::PathBuf::from(path));
                    }
                }
            }
        }

        Err(anyhow::anyhow!(
            "Chrome/Chromium not found. Please install it:\n\
             - Arch/Manjaro: sudo pacman -S chromium\n\
             - Ubuntu/Debian: sudo apt install chromium-browser\n\
             - Fedora: sudo dnf install chromium\n\
             - Or download from: https://www.google.com/chrome/"
        ))
    }

    fn card(&self, index: usize) -> Result<&Element> {
        self.cards
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("job card {} is no longer available", index + 1))
    }
}

#[async_trait]
impl BoardSession for BrowserSession {
    async fn current_url(&mut self) -> Result<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn goto(&mut self, url: &str) -> Result<()> {
        debug!("navigating to {}", url);
        self.page.goto(url).await.context("navigation failed")?;
        Ok(())
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight);".to_string())
            .await?;
        Ok(())
    }

    async fn collect_cards(&mut self) -> Result<usize> {
        self.cards = self.page.find_elements(CARD_SELECTOR).await?;
        Ok(self.cards.len())
    }

    async fn scroll_card_into_view(&mut self, index: usize) -> Result<()> {
        self.card(index)?.scroll_into_view().await?;
        Ok(())
    }

    async fn click_card(&mut self, index: usize) -> Result<()> {
        // click() moves the pointer to the element center before pressing
        self.card(index)?.click().await?;
        Ok(())
    }

    async fn card_link(&mut self, index: usize) -> Result<Option<String>> {
        let card = self.card(index)?;

        // Primary path: the card's anchor element via CDP.
        if let Ok(anchor) = card.find_element("a").await {
            if let Ok(Some(href)) = anchor.attribute("href").await {
                return Ok(Some(href));
            }
        }

        // Fallback: parse the card markup for an anchor.
        let script = format!(
            "document.querySelectorAll('{}')[{}].outerHTML",
            CARD_SELECTOR, index
        );
        let markup: Option<String> = self
            .page
            .evaluate(script)
            .await
            .ok()
            .and_then(|v| v.into_value().ok());
        match markup {
            Some(fragment) => Ok(first_anchor_href(&fragment)),
            None => {
                warn!("could not read markup for card {}", index + 1);
                Ok(None)
            }
        }
    }

    async fn page_html(&mut self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.cards.clear();
        if let Err(e) = self.browser.close().await {
            warn!("browser close failed: {}", e);
        }
    }
}

/// First anchor href in an HTML fragment.
fn first_anchor_href(fragment: &str) -> Option<String> {
    let document = scraper::Html::parse_fragment(fragment);
    let selector = scraper::Selector::parse("a[href]").ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_href_is_parsed_from_fragment() {
        let fragment = r#"<div class="job-card-container">
            <span>Senior Engineer</span>
            <a class="job-card-list__title" href="https://www.linkedin.com/jobs/view/42">Details</a>
        </div>"#;
        assert_eq!(
            first_anchor_href(fragment),
            Some("https://www.linkedin.com/jobs/view/42".to_string())
        );
    }

    #[test]
    fn fragment_without_anchor_yields_none() {
        assert_eq!(first_anchor_href("<div><span>no link</span></div>"), None);
        assert_eq!(first_anchor_href(""), None);
    }
}
