//! Resume assessment types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Score used whenever the model's rating cannot be parsed.
pub const FALLBACK_SCORE: u8 = 70;

/// Qualitative bucket for a resume score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    Excellent,
    Great,
    Good,
    NeedsImprovement,
}

impl ScoreLabel {
    /// Bucket a score. Boundaries are inclusive on the upper side:
    /// 90 is Excellent, 89 is Great, 60 is Good, 59 is NeedsImprovement.
    pub fn classify(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::Excellent,
            75..=89 => Self::Great,
            60..=74 => Self::Good,
            _ => Self::NeedsImprovement,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Great => "Great",
            Self::Good => "Good",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl std::fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four fixed writing-issue categories, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    WeakVerbs,
    Buzzwords,
    FillerWords,
    Consistency,
}

impl IssueKind {
    /// All kinds in the fixed report order.
    pub const ALL: [IssueKind; 4] = [
        Self::WeakVerbs,
        Self::Buzzwords,
        Self::FillerWords,
        Self::Consistency,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WeakVerbs => "Weak Verbs",
            Self::Buzzwords => "Buzzwords",
            Self::FillerWords => "Filler Words",
            Self::Consistency => "Consistency",
        }
    }

    /// Parse the name as the model emits it ("Weak Verbs", case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "weak verbs" => Some(Self::WeakVerbs),
            "buzzwords" => Some(Self::Buzzwords),
            "filler words" => Some(Self::FillerWords),
            "consistency" => Some(Self::Consistency),
            _ => None,
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A flagged token with its suggested replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueExample {
    pub token: String,
    pub suggestion: String,
}

impl IssueExample {
    pub fn new(token: &str, suggestion: &str) -> Self {
        Self {
            token: token.to_string(),
            suggestion: suggestion.to_string(),
        }
    }
}

/// One writing-issue category with severity and examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCategory {
    pub kind: IssueKind,
    /// Severity in [1, 10].
    pub severity: u8,
    pub examples: Vec<IssueExample>,
}

impl IssueCategory {
    /// The fixed fallback set used whenever the model output cannot be
    /// validated. Always the four kinds in report order, two examples each.
    pub fn fallback_set() -> Vec<IssueCategory> {
        vec![
            IssueCategory {
                kind: IssueKind::WeakVerbs,
                severity: 7,
                examples: vec![
                    IssueExample::new(
                        "worked on",
                        "Replace with 'developed', 'implemented', or 'executed'",
                    ),
                    IssueExample::new(
                        "helped with",
                        "Replace with 'led', 'coordinated', or 'orchestrated'",
                    ),
                ],
            },
            IssueCategory {
                kind: IssueKind::Buzzwords,
                severity: 5,
                examples: vec![
                    IssueExample::new("synergy", "Replace with specific collaborative achievements"),
                    IssueExample::new(
                        "results-driven",
                        "Include actual metrics and outcomes instead",
                    ),
                ],
            },
            IssueCategory {
                kind: IssueKind::FillerWords,
                severity: 4,
                examples: vec![
                    IssueExample::new("very", "Remove or replace with specific descriptors"),
                    IssueExample::new("in order to", "Replace with 'to' for conciseness"),
                ],
            },
            IssueCategory {
                kind: IssueKind::Consistency,
                severity: 6,
                examples: vec![
                    IssueExample::new(
                        "Mixed tenses",
                        "Use past tense for previous roles and present for current roles",
                    ),
                    IssueExample::new(
                        "Inconsistent formatting",
                        "Standardize bullet points, dates, and section headers",
                    ),
                ],
            },
        ]
    }
}

/// Complete assessment of one resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAssessment {
    /// Rubric score, clamped to [0, 100].
    pub score: u8,
    pub label: ScoreLabel,
    /// Short narrative explaining the label.
    pub explanation: String,
    pub summary: String,
    pub strengths: String,
    pub weaknesses: String,
    pub suggested_roles: String,
    /// Always exactly the four kinds in report order.
    pub issues: Vec<IssueCategory>,
    pub analyzed_at: DateTime<Utc>,
}
