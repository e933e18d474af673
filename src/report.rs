use std::collections::HashMap;
use std::fmt::Write;

use chrono::NaiveDate;

use crate::analysis::{self, AnalysisError};
use crate::models::{IssueCount, LevelSummary, RiskAssessment, RiskLevel, StudentRecord};
use crate::summary;

pub fn rank_by_score(assessments: &[RiskAssessment]) -> Vec<&RiskAssessment> {
    let mut ranked: Vec<&RiskAssessment> = assessments.iter().collect();
    ranked.sort_by(|a, b| {
        b.risk_score
            .partial_cmp(&a.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

pub fn summarize_by_level(assessments: &[RiskAssessment]) -> Vec<LevelSummary> {
    let mut map: HashMap<RiskLevel, (usize, f64)> = HashMap::new();

    for assessment in assessments {
        let entry = map.entry(assessment.risk_level).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += assessment.risk_score;
    }

    [RiskLevel::High, RiskLevel::Moderate, RiskLevel::Low]
        .into_iter()
        .filter_map(|level| {
            map.get(&level).map(|&(count, total_score)| LevelSummary {
                level,
                count,
                avg_score: total_score / count as f64,
            })
        })
        .collect()
}

pub fn count_issues(students: &[StudentRecord]) -> Vec<IssueCount> {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();

    for student in students {
        for issue in summary::issues(student) {
            *counts.entry(issue).or_insert(0) += 1;
        }
    }

    summary::known_issues()
        .into_iter()
        .filter_map(|issue| {
            counts
                .get(issue)
                .map(|&count| IssueCount { issue, count })
        })
        .collect()
}

pub fn build_report(
    source: &str,
    generated_date: NaiveDate,
    students: &[StudentRecord],
) -> Result<String, AnalysisError> {
    let assessments = analysis::assess_batch(students, generated_date)?;
    let levels = summarize_by_level(&assessments);
    let issues = count_issues(students);

    let mut output = String::new();

    let _ = writeln!(output, "# Student Risk Report");
    let _ = writeln!(
        output,
        "Generated on {} from {} ({} students)",
        generated_date,
        source,
        students.len()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Risk Level Mix");

    if levels.is_empty() {
        let _ = writeln!(output, "No students to assess.");
    } else {
        for summary in levels.iter() {
            let _ = writeln!(
                output,
                "- {}: {} students (avg score {:.2})",
                summary.level, summary.count, summary.avg_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Highest Risk Students");

    if assessments.is_empty() {
        let _ = writeln!(output, "No students to assess.");
    } else {
        for assessment in rank_by_score(&assessments).into_iter().take(10) {
            let _ = writeln!(
                output,
                "- {} score {:.2} ({}): {}",
                assessment.student_id,
                assessment.risk_score,
                assessment.risk_level,
                assessment.summary
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Flagged Issues");

    if issues.is_empty() {
        let _ = writeln!(output, "No students to assess.");
    } else {
        for issue in issues.iter() {
            let _ = writeln!(output, "- {}: {} students", issue.issue, issue.count);
        }
    }

    Ok(output)
}
