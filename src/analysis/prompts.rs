//! Prompt text for the assessment queries.

use crate::models::ScoreLabel;

pub const SUMMARY: &str = "Summarize this resume.";

pub const STRENGTHS: &str = "What are the strengths in this resume?";

pub const WEAKNESSES: &str = "What are the weaknesses in this resume?";

pub const SUGGESTED_ROLES: &str = "Based on this resume, what job roles are suitable?";

/// Rubric prompt constraining the model to a bare 0-100 number.
pub const RUBRIC: &str = "You are a resume reviewer. Please rate the resume on a scale from 0 to 100 using the rubric below:\n\n\
    - 90-100: Outstanding resume: excellent technical skills, clear formatting, metrics-backed experience, highly relevant to target jobs.\n\
    - 75-89: Strong resume: good clarity, relevant skills and roles, some quantification, minor improvements needed.\n\
    - 60-74: Average: acceptable formatting and content but lacks metrics, specificity, or strong action verbs.\n\
    - 40-59: Weak: lacks structure, missing key sections, vague or generic experience.\n\
    - 0-39: Very poor: not a professional resume.\n\n\
    Based on this rubric, provide only a number between 0 and 100. Do not explain or include any other text.";

/// Issue-detection prompt requesting JSON in the fixed 4-category schema.
pub const ISSUES: &str = "Analyze the resume and return a JSON list of exactly these 4 standard improvement categories: \
    Weak Verbs, Buzzwords, Filler Words, Consistency. \
    For each, provide: issue name, severity score (1-10), examples with suggestions. \
    For Weak Verbs: identify generic verbs that could be replaced with stronger action verbs. \
    For Buzzwords: identify overused industry jargon or trendy terms. \
    For Filler Words: identify unnecessary words that add no value. \
    For Consistency: identify any inconsistencies in formatting, tense, or style. \
    Format: [{\"issue\": \"Weak Verbs\", \"score\": 6, \"details\": [{\"word\": \"helped with\", \"suggestion\": \"Replace with 'spearheaded' or 'led'\"}]}]";

/// Narrative shown when the explanation query itself fails.
pub const EXPLANATION_FALLBACK: &str =
    "This resume can be improved by aligning more closely with job-specific skills and metrics.";

/// Per-label explanation prompt, fed only the summary text.
pub fn explanation(label: ScoreLabel) -> &'static str {
    match label {
        ScoreLabel::Excellent => {
            "In 2-3 sentences, explain why this resume is excellent without repeating the summary. \
             Focus on technical skills, education, and experience."
        }
        ScoreLabel::Great => {
            "In 2-3 sentences, explain why this resume is great. \
             Focus on technical skills, education, and core strengths only."
        }
        ScoreLabel::Good => {
            "Briefly explain why this resume is decent but can be improved, in a positive tone. \
             Focus on education and technical skills."
        }
        ScoreLabel::NeedsImprovement => {
            "Write 2-3 sentences on why this resume needs improvement, without repeating the summary."
        }
    }
}
