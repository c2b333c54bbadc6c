//! Shared rendering helpers for CLI commands.

use console::{style, StyledObject};

use crate::models::{IssueCategory, ResumeAssessment, ScoreLabel};

/// Style a score label with the bucket's color.
pub fn styled_label(label: ScoreLabel) -> StyledObject<&'static str> {
    match label {
        ScoreLabel::Excellent => style(label.as_str()).green().bold(),
        ScoreLabel::Great => style(label.as_str()).cyan().bold(),
        ScoreLabel::Good => style(label.as_str()).yellow().bold(),
        ScoreLabel::NeedsImprovement => style(label.as_str()).red().bold(),
    }
}

/// Style an issue severity: red from 7, yellow from 4, green below.
pub fn styled_severity(severity: u8) -> StyledObject<String> {
    let text = format!("{}/10", severity);
    match severity {
        7..=u8::MAX => style(text).red().bold(),
        4..=6 => style(text).yellow().bold(),
        _ => style(text).green().bold(),
    }
}

/// Print one assessment in the standard report layout.
pub fn render_assessment(file_name: &str, assessment: &ResumeAssessment) {
    println!("\n{}", style(file_name).bold());
    println!("{}", "-".repeat(50));

    println!(
        "\n  {}  {}",
        style(format!("{:>3}", assessment.score)).bold(),
        styled_label(assessment.label)
    );
    println!("  {}\n", assessment.explanation);

    println!("{}", style("Top Fixes").bold());
    for issue in &assessment.issues {
        render_issue(issue);
    }

    render_section("Summary", &assessment.summary);
    render_section("Strengths", &assessment.strengths);
    render_section("Weaknesses", &assessment.weaknesses);
    render_section("Suggested Roles", &assessment.suggested_roles);
}

fn render_issue(issue: &IssueCategory) {
    println!(
        "  {:<14} {}",
        issue.kind.display_name(),
        styled_severity(issue.severity)
    );
    for example in &issue.examples {
        println!(
            "    {} {}",
            style(&example.token).bold(),
            style(format!("- {}", example.suggestion)).dim()
        );
    }
}

fn render_section(title: &str, body: &str) {
    println!("\n{}", style(title).bold());
    for line in body.lines() {
        println!("  {}", line);
    }
}
