//! jobscout - AI resume assessment and LinkedIn job scraper.
//!
//! Analyzes a resume (PDF or DOCX) with a language model and scrapes
//! matching job postings from LinkedIn through a manually authenticated
//! browser session.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if jobscout::cli::is_verbose() {
        "jobscout=info"
    } else {
        "jobscout=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    jobscout::cli::run().await
}
