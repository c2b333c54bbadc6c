//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific
//! modules.

mod analyze;
#[cfg(feature = "browser")]
mod jobs;
mod locations;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "jobscout")]
#[command(about = "AI resume assessment and LinkedIn job search from the terminal")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one or more resumes (PDF or DOCX)
    Analyze {
        /// Resume files to analyze
        files: Vec<PathBuf>,
        /// LLM API endpoint (e.g. https://api.openai.com)
        #[arg(long)]
        endpoint: Option<String>,
        /// LLM model name
        #[arg(long)]
        model: Option<String>,
        /// Output assessments as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Search the job board for postings (opens a browser for manual login)
    #[cfg(feature = "browser")]
    Jobs {
        /// Job title to search for
        #[arg(short, long, default_value = "Data Scientist")]
        role: String,
        /// Job location (see `jobscout locations`)
        #[arg(short, long, default_value = "Remote")]
        location: String,
        /// Maximum number of postings to collect
        #[arg(short = 'n', long, default_value = "25")]
        count: usize,
        /// Resume to summarize as search context
        #[arg(long)]
        resume: Option<PathBuf>,
        /// CSV output path
        #[arg(short, long, default_value = "linkedin_job_urls.csv")]
        output: PathBuf,
        /// Give up on the login wait after this many seconds (default: wait forever)
        #[arg(long)]
        login_timeout: Option<u64>,
        /// Run the browser headless (requires an already signed-in profile)
        #[arg(long)]
        headless: bool,
        /// Directory for per-item error page dumps
        #[arg(long)]
        diagnostics_dir: Option<PathBuf>,
    },

    /// Analyze a resume, then search the job board in one run
    #[cfg(feature = "browser")]
    Match {
        /// Resume file (PDF or DOCX)
        file: PathBuf,
        /// Job title to search for
        #[arg(short, long, default_value = "Data Scientist")]
        role: String,
        /// Job location (see `jobscout locations`)
        #[arg(short, long, default_value = "Remote")]
        location: String,
        /// Maximum number of postings to collect
        #[arg(short = 'n', long, default_value = "25")]
        count: usize,
        /// CSV output path
        #[arg(short, long, default_value = "linkedin_job_urls.csv")]
        output: PathBuf,
        /// Give up on the login wait after this many seconds (default: wait forever)
        #[arg(long)]
        login_timeout: Option<u64>,
    },

    /// List supported job locations
    Locations,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            files,
            endpoint,
            model,
            json,
        } => {
            let mut config = config;
            if let Some(endpoint) = endpoint {
                config.llm = config.llm.with_endpoint(&endpoint);
            }
            if let Some(model) = model {
                config.llm = config.llm.with_model(&model);
            }
            analyze::cmd_analyze(config, &files, json).await
        }

        #[cfg(feature = "browser")]
        Commands::Jobs {
            role,
            location,
            count,
            resume,
            output,
            login_timeout,
            headless,
            diagnostics_dir,
        } => {
            let mut config = config;
            if let Some(secs) = login_timeout {
                config.scrape.login_timeout_secs = Some(secs);
            }
            if let Some(dir) = diagnostics_dir {
                config.scrape.diagnostics_dir = dir;
            }
            if headless {
                config.browser.headless = true;
            }
            jobs::cmd_jobs(config, &role, &location, count, resume.as_deref(), &output).await
        }

        #[cfg(feature = "browser")]
        Commands::Match {
            file,
            role,
            location,
            count,
            output,
            login_timeout,
        } => {
            let mut config = config;
            if let Some(secs) = login_timeout {
                config.scrape.login_timeout_secs = Some(secs);
            }
            jobs::cmd_match(config, &file, &role, &location, count, &output).await
        }

        Commands::Locations => locations::cmd_locations(),
    }
}
