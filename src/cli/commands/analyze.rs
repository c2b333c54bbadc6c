//! Resume analysis command.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use super::super::helpers::{render_assessment, styled_label};
use crate::analysis::AssessmentEngine;
use crate::config::Config;
use crate::context::AppContext;
use crate::extract;
use crate::llm::LlmClient;
use crate::models::ResumeAssessment;

/// Analyze one or more resume files and render the assessments.
pub async fn cmd_analyze(config: Config, files: &[PathBuf], json: bool) -> anyhow::Result<()> {
    if files.is_empty() {
        anyhow::bail!("no resume files given (expected PDF or DOCX paths)");
    }

    let engine = AssessmentEngine::new(LlmClient::new(config.llm.clone()));
    let mut ctx = AppContext::new(config);

    for file in files {
        match analyze_file(&engine, file).await {
            Ok((name, assessment)) => ctx.remember(&name, assessment),
            Err(e) => {
                eprintln!(
                    "{} {}: {:#}",
                    style("error:").red().bold(),
                    file.display(),
                    e
                );
            }
        }
    }

    if ctx.is_empty() {
        anyhow::bail!("no resumes could be analyzed");
    }

    if json {
        let mut report = serde_json::Map::new();
        for (name, assessment) in ctx.iter() {
            report.insert(name.to_string(), serde_json::to_value(assessment)?);
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Multiple resumes get a score comparison up front.
    if ctx.len() > 1 {
        println!("\n{}", style("Score Comparison").bold());
        println!("{}", "-".repeat(50));
        for (name, assessment) in ctx.iter() {
            println!(
                "  {:<30} {:>3}  {}",
                name,
                assessment.score,
                styled_label(assessment.label)
            );
        }
    }

    for (name, assessment) in ctx.iter() {
        render_assessment(name, assessment);
    }
    Ok(())
}

/// Extract and assess a single file.
pub(super) async fn analyze_file(
    engine: &AssessmentEngine,
    path: &Path,
) -> anyhow::Result<(String, ResumeAssessment)> {
    let resume = extract::extract_resume(path)
        .with_context(|| format!("could not extract {}", path.display()))?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").expect("valid progress template"),
    );
    spinner.set_message(format!("Analyzing {}...", resume.file_name));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = engine.assess(&resume.chunks).await;
    spinner.finish_and_clear();

    let assessment = result.with_context(|| format!("assessment failed for {}", resume.file_name))?;
    Ok((resume.file_name, assessment))
}
