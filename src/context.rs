//! Session context shared across CLI commands.

use crate::config::Config;
use crate::models::ResumeAssessment;

/// Explicit per-invocation state: configuration plus the assessments
/// produced so far, keyed by file name in analysis order.
///
/// Passed through entry points rather than living in ambient globals; all
/// access is from the single control thread.
pub struct AppContext {
    pub config: Config,
    assessments: Vec<(String, ResumeAssessment)>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            assessments: Vec::new(),
        }
    }

    /// Cache an assessment under its file name, replacing any previous one.
    pub fn remember(&mut self, file_name: &str, assessment: ResumeAssessment) {
        if let Some(entry) = self
            .assessments
            .iter_mut()
            .find(|(name, _)| name == file_name)
        {
            entry.1 = assessment;
        } else {
            self.assessments.push((file_name.to_string(), assessment));
        }
    }

    pub fn assessment(&self, file_name: &str) -> Option<&ResumeAssessment> {
        self.assessments
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, a)| a)
    }

    /// Summary of the first analyzed resume, used as scraper context.
    pub fn first_summary(&self) -> Option<&str> {
        self.assessments.first().map(|(_, a)| a.summary.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResumeAssessment)> {
        self.assessments.iter().map(|(n, a)| (n.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueCategory, ScoreLabel};
    use chrono::Utc;

    fn sample(score: u8, summary: &str) -> ResumeAssessment {
        ResumeAssessment {
            score,
            label: ScoreLabel::classify(score),
            explanation: String::new(),
            summary: summary.to_string(),
            strengths: String::new(),
            weaknesses: String::new(),
            suggested_roles: String::new(),
            issues: IssueCategory::fallback_set(),
            analyzed_at: Utc::now(),
        }
    }

    #[test]
    fn first_summary_follows_analysis_order() {
        let mut ctx = AppContext::new(Config::default());
        assert!(ctx.first_summary().is_none());

        ctx.remember("a.pdf", sample(80, "first"));
        ctx.remember("b.pdf", sample(90, "second"));
        assert_eq!(ctx.first_summary(), Some("first"));
    }

    #[test]
    fn remember_replaces_by_file_name() {
        let mut ctx = AppContext::new(Config::default());
        ctx.remember("a.pdf", sample(60, "old"));
        ctx.remember("a.pdf", sample(95, "new"));

        assert_eq!(ctx.len(), 1);
        assert_eq!(ctx.assessment("a.pdf").unwrap().score, 95);
        assert_eq!(ctx.first_summary(), Some("new"));
    }
}
