//! Job search commands (browser-backed).

use std::path::Path;

use anyhow::Context as _;
use console::style;

use super::analyze::analyze_file;
use super::super::helpers::render_assessment;
use crate::analysis::AssessmentEngine;
use crate::config::{canonical_location, Config};
use crate::extract;
use crate::llm::LlmClient;
use crate::models::JobTable;
use crate::scrapers::{BrowserSession, JobQuery, JobScraper, ScrapeError};

/// Search the job board, optionally seeding context from a resume summary.
pub async fn cmd_jobs(
    config: Config,
    role: &str,
    location: &str,
    count: usize,
    resume: Option<&Path>,
    output: &Path,
) -> anyhow::Result<()> {
    let location = validate_location(location)?;

    let context_summary = match resume {
        Some(path) => {
            let resume_text = extract::extract_resume(path)
                .with_context(|| format!("could not extract {}", path.display()))?;
            let engine = AssessmentEngine::new(LlmClient::new(config.llm.clone()));
            println!("Summarizing {} for search context...", resume_text.file_name);
            engine
                .summarize(&resume_text.chunks)
                .await
                .context("resume summarization failed")?
        }
        None => {
            println!(
                "{}",
                style("No resume given; search results will not be resume-aware.").yellow()
            );
            String::new()
        }
    };

    let query = JobQuery {
        role: role.to_string(),
        location: location.to_string(),
        context_summary,
        limit: count,
    };
    scrape_and_export(&config, &query, output).await
}

/// Analyze a resume, render the assessment, then search the job board.
pub async fn cmd_match(
    config: Config,
    file: &Path,
    role: &str,
    location: &str,
    count: usize,
    output: &Path,
) -> anyhow::Result<()> {
    let location = validate_location(location)?;

    let engine = AssessmentEngine::new(LlmClient::new(config.llm.clone()));
    let (name, assessment) = analyze_file(&engine, file).await?;
    render_assessment(&name, &assessment);

    let query = JobQuery {
        role: role.to_string(),
        location: location.to_string(),
        context_summary: assessment.summary.clone(),
        limit: count,
    };
    scrape_and_export(&config, &query, output).await
}

fn validate_location(location: &str) -> anyhow::Result<&'static str> {
    canonical_location(location).ok_or_else(|| {
        anyhow::anyhow!(
            "unsupported location '{}' (run `jobscout locations` for the list)",
            location
        )
    })
}

/// Run one scrape invocation and write the results.
async fn scrape_and_export(config: &Config, query: &JobQuery, output: &Path) -> anyhow::Result<()> {
    println!(
        "{}",
        style("Opening LinkedIn - please log in manually in the browser window.").cyan()
    );
    println!("Waiting for login; scraping starts once you are signed in.");

    let mut session = BrowserSession::launch(&config.browser)
        .await
        .context("failed to launch browser")?;
    let scraper = JobScraper::new(config.scrape.clone());

    let table = match scraper.scrape(&mut session, query).await {
        Ok(table) => table,
        Err(e @ ScrapeError::CardTimeout) => {
            eprintln!("{} {}", style("error:").red().bold(), e);
            JobTable::new()
        }
        Err(e) => return Err(e.into()),
    };

    if table.is_empty() {
        println!(
            "{}",
            style("No job data collected. Try a different role or location.").yellow()
        );
        return Ok(());
    }

    println!("\n{}", style("Job URL").bold());
    for posting in table.iter() {
        println!("  {}", posting.url);
    }

    let file = std::fs::File::create(output)
        .with_context(|| format!("could not create {}", output.display()))?;
    table.write_csv(file).context("CSV export failed")?;

    println!(
        "\n{} Scraped {} job URLs -> {}",
        style("ok:").green().bold(),
        table.len(),
        output.display()
    );
    Ok(())
}
