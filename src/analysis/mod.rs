//! Resume assessment engine.
//!
//! Orchestrates the language-model adapter into a full [`ResumeAssessment`]:
//! narrative queries, rubric scoring with a deterministic fallback, and
//! schema-validated issue detection.

mod engine;
mod prompts;

pub use engine::AssessmentEngine;
