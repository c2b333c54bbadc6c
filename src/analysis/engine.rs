//! Assessment orchestration over the LLM adapter.

use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::prompts;
use crate::llm::{LlmClient, LlmError};
use crate::models::{
    IssueCategory, IssueExample, IssueKind, ResumeAssessment, ScoreLabel, FALLBACK_SCORE,
};

/// Engine producing a [`ResumeAssessment`] from chunked resume text.
///
/// Each operation issues one adapter query with no retries. The narrative
/// queries propagate failures; scoring, explanation, and issue detection
/// recover locally so the assessment always has renderable content.
pub struct AssessmentEngine {
    llm: LlmClient,
}

/// Issue entry as the model emits it.
#[derive(Debug, Deserialize)]
struct RawIssue {
    issue: String,
    score: i64,
    #[serde(default)]
    details: Vec<RawDetail>,
}

#[derive(Debug, Deserialize)]
struct RawDetail {
    word: String,
    #[serde(default)]
    suggestion: String,
}

impl AssessmentEngine {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Run the full assessment for one resume.
    pub async fn assess(&self, chunks: &[String]) -> Result<ResumeAssessment, LlmError> {
        info!("assessing resume ({} chunks)", chunks.len());

        let summary = self.summarize(chunks).await?;
        let strengths = self.strengths(chunks).await?;
        let weaknesses = self.weaknesses(chunks).await?;
        let suggested_roles = self.suggested_roles(chunks).await?;

        let score = self.score(chunks).await;
        let label = ScoreLabel::classify(score);
        let explanation = self.explain(&summary, label).await;
        let issues = self.detect_issues(chunks).await;

        Ok(ResumeAssessment {
            score,
            label,
            explanation,
            summary,
            strengths,
            weaknesses,
            suggested_roles,
            issues,
            analyzed_at: Utc::now(),
        })
    }

    pub async fn summarize(&self, chunks: &[String]) -> Result<String, LlmError> {
        self.llm.query(chunks, prompts::SUMMARY).await
    }

    pub async fn strengths(&self, chunks: &[String]) -> Result<String, LlmError> {
        self.llm.query(chunks, prompts::STRENGTHS).await
    }

    pub async fn weaknesses(&self, chunks: &[String]) -> Result<String, LlmError> {
        self.llm.query(chunks, prompts::WEAKNESSES).await
    }

    pub async fn suggested_roles(&self, chunks: &[String]) -> Result<String, LlmError> {
        self.llm.query(chunks, prompts::SUGGESTED_ROLES).await
    }

    /// Rubric score in [0, 100]. Never fails: any query or parse problem
    /// yields [`FALLBACK_SCORE`] so scoring cannot block the assessment.
    pub async fn score(&self, chunks: &[String]) -> u8 {
        match self.llm.query(chunks, prompts::RUBRIC).await {
            Ok(reply) => parse_score(&reply).unwrap_or_else(|| {
                warn!("unparsable score reply {:?}, using fallback", reply);
                FALLBACK_SCORE
            }),
            Err(e) => {
                warn!("score query failed ({}), using fallback", e);
                FALLBACK_SCORE
            }
        }
    }

    /// Short narrative for the label, generated from the summary alone so
    /// the model does not repeat content the caller already has.
    pub async fn explain(&self, summary: &str, label: ScoreLabel) -> String {
        let context = [summary.to_string()];
        match self.llm.query(&context, prompts::explanation(label)).await {
            Ok(text) => text,
            Err(e) => {
                warn!("explanation query failed ({}), using fallback", e);
                prompts::EXPLANATION_FALLBACK.to_string()
            }
        }
    }

    /// The four issue categories in fixed order. Never fails: a reply that
    /// does not validate against the schema is replaced wholesale by the
    /// fallback set, never partially merged.
    pub async fn detect_issues(&self, chunks: &[String]) -> Vec<IssueCategory> {
        match self.llm.query(chunks, prompts::ISSUES).await {
            Ok(reply) => parse_issue_reply(&reply).unwrap_or_else(|| {
                warn!("issue reply failed schema validation, using fallback set");
                IssueCategory::fallback_set()
            }),
            Err(e) => {
                warn!("issue query failed ({}), using fallback set", e);
                IssueCategory::fallback_set()
            }
        }
    }
}

/// Extract all digit characters from a model reply, parse, and clamp to
/// [0, 100]. None when there is nothing parsable.
pub(crate) fn parse_score(reply: &str) -> Option<u8> {
    let digits: String = reply.chars().filter(|c| c.is_ascii_digit()).collect();
    let value: i64 = digits.parse().ok()?;
    Some(value.clamp(0, 100) as u8)
}

/// Validate a model reply against the 4-category schema.
///
/// Accepts only a JSON array with exactly the four known categories in
/// report order; severity is clamped into [1, 10]. Anything else is None.
pub(crate) fn parse_issue_reply(reply: &str) -> Option<Vec<IssueCategory>> {
    // Models wrap JSON in prose or code fences; take the array span.
    let start = reply.find('[')?;
    let end = reply.rfind(']')?;
    if end < start {
        return None;
    }
    let raw: Vec<RawIssue> = serde_json::from_str(&reply[start..=end]).ok()?;

    if raw.len() != IssueKind::ALL.len() {
        debug!("issue reply had {} categories, expected 4", raw.len());
        return None;
    }

    let mut issues = Vec::with_capacity(raw.len());
    for (entry, expected) in raw.into_iter().zip(IssueKind::ALL) {
        let kind = IssueKind::from_name(&entry.issue)?;
        if kind != expected {
            debug!("issue reply out of order: got {}, expected {}", kind, expected);
            return None;
        }
        issues.push(IssueCategory {
            kind,
            severity: entry.score.clamp(1, 10) as u8,
            examples: entry
                .details
                .into_iter()
                .map(|d| IssueExample {
                    token: d.word,
                    suggestion: d.suggestion,
                })
                .collect(),
        });
    }
    Some(issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_parses_bare_numbers() {
        assert_eq!(parse_score("85"), Some(85));
        assert_eq!(parse_score(" 85 \n"), Some(85));
        assert_eq!(parse_score("Score: 88."), Some(88));
        // All digits are concatenated before parsing: "85/100" -> 85100 -> 100.
        assert_eq!(parse_score("85/100"), Some(100));
    }

    #[test]
    fn score_clamps_out_of_range_values() {
        assert_eq!(parse_score("150"), Some(100));
        assert_eq!(parse_score("-5"), Some(5));
        assert_eq!(parse_score("0"), Some(0));
    }

    #[test]
    fn score_without_digits_is_none() {
        assert_eq!(parse_score("excellent resume!"), None);
        assert_eq!(parse_score(""), None);
        // The caller substitutes the fixed fallback in that case.
        assert_eq!(parse_score("no rating").unwrap_or(FALLBACK_SCORE), 70);
    }

    #[test]
    fn score_with_absurd_digit_runs_is_none() {
        // Overflows i64; treated as unparsable, caller falls back to 70.
        assert_eq!(parse_score(&"9".repeat(40)), None);
    }

    const WELL_FORMED: &str = r#"[
        {"issue": "Weak Verbs", "score": 6, "details": [{"word": "helped with", "suggestion": "Replace with 'led'"}]},
        {"issue": "Buzzwords", "score": 3, "details": []},
        {"issue": "Filler Words", "score": 12, "details": [{"word": "very"}]},
        {"issue": "Consistency", "score": 5, "details": []}
    ]"#;

    #[test]
    fn well_formed_issue_reply_is_accepted() {
        let issues = parse_issue_reply(WELL_FORMED).unwrap();
        let kinds: Vec<IssueKind> = issues.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, IssueKind::ALL);
        assert_eq!(issues[0].examples[0].token, "helped with");
        // Severity clamped into [1, 10].
        assert_eq!(issues[2].severity, 10);
        // Missing suggestion defaults to empty.
        assert_eq!(issues[2].examples[0].suggestion, "");
    }

    #[test]
    fn fenced_issue_reply_is_accepted() {
        let fenced = format!("Here you go:\n```json\n{}\n```", WELL_FORMED);
        assert!(parse_issue_reply(&fenced).is_some());
    }

    #[test]
    fn wrong_category_count_is_rejected() {
        let three = r#"[
            {"issue": "Weak Verbs", "score": 6},
            {"issue": "Buzzwords", "score": 3},
            {"issue": "Consistency", "score": 5}
        ]"#;
        assert!(parse_issue_reply(three).is_none());
    }

    #[test]
    fn out_of_order_categories_are_rejected() {
        let shuffled = r#"[
            {"issue": "Buzzwords", "score": 3},
            {"issue": "Weak Verbs", "score": 6},
            {"issue": "Filler Words", "score": 2},
            {"issue": "Consistency", "score": 5}
        ]"#;
        assert!(parse_issue_reply(shuffled).is_none());
    }

    #[test]
    fn non_json_reply_is_rejected() {
        assert!(parse_issue_reply("I couldn't find any issues.").is_none());
        assert!(parse_issue_reply("[not json]").is_none());
    }
}
