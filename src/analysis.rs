use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::models::{RiskAssessment, StudentRecord};
use crate::risk;
use crate::summary;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("risk score for student {student_id} is not a finite number")]
    NonFiniteScore { student_id: String },
}

pub fn assess(
    student: &StudentRecord,
    generated_date: NaiveDate,
) -> Result<RiskAssessment, AnalysisError> {
    let (score, level) = risk::compute_risk(student);
    if !score.is_finite() {
        return Err(AnalysisError::NonFiniteScore {
            student_id: student.student_id.clone(),
        });
    }

    let terms = risk::breakdown(student);
    debug!(
        student_id = %student.student_id,
        attendance_risk = terms.attendance,
        academic_risk = terms.academic,
        teacher_risk = terms.teacher_load,
        score,
        %level,
        "assessed student"
    );

    Ok(RiskAssessment {
        student_id: student.student_id.clone(),
        risk_score: score,
        risk_level: level,
        summary: summary::generate_summary(student, level),
        generated_date,
    })
}

/// Assesses students in input order, stopping at the first failure.
pub fn assess_batch(
    students: &[StudentRecord],
    generated_date: NaiveDate,
) -> Result<Vec<RiskAssessment>, AnalysisError> {
    students
        .iter()
        .map(|student| assess(student, generated_date))
        .collect()
}
