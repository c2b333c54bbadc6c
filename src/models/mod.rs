//! Data models for jobscout.

mod assessment;
mod job;

pub use assessment::{
    IssueCategory, IssueExample, IssueKind, ResumeAssessment, ScoreLabel, FALLBACK_SCORE,
};
pub use job::{is_job_view_url, JobPosting, JobTable, JOB_VIEW_MARKER};
