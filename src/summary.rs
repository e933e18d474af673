use crate::models::{RiskLevel, StudentRecord};
use crate::risk;

pub const LOW_ATTENDANCE_PERCENT: f64 = 75.0;
pub const WEAK_ACADEMIC_AVERAGE: f64 = 60.0;
pub const TEACHER_OVERLOAD_INDEX: f64 = 1.2;

pub const STABLE_PERFORMANCE: &str = "stable performance";

struct Rule {
    phrase: &'static str,
    triggered: fn(&StudentRecord) -> bool,
}

// Evaluated top to bottom; the summary lists phrases in this order.
const RULES: [Rule; 3] = [
    Rule {
        phrase: "low attendance",
        triggered: low_attendance,
    },
    Rule {
        phrase: "weak academic performance",
        triggered: weak_academics,
    },
    Rule {
        phrase: "teacher overload",
        triggered: teacher_overload,
    },
];

fn low_attendance(student: &StudentRecord) -> bool {
    student.attendance_percent < LOW_ATTENDANCE_PERCENT
}

fn weak_academics(student: &StudentRecord) -> bool {
    risk::academic_average(student) < WEAK_ACADEMIC_AVERAGE
}

fn teacher_overload(student: &StudentRecord) -> bool {
    student.teacher_load_index > TEACHER_OVERLOAD_INDEX
}

pub fn known_issues() -> Vec<&'static str> {
    RULES
        .iter()
        .map(|rule| rule.phrase)
        .chain(std::iter::once(STABLE_PERFORMANCE))
        .collect()
}

pub fn issues(student: &StudentRecord) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = RULES
        .iter()
        .filter(|rule| (rule.triggered)(student))
        .map(|rule| rule.phrase)
        .collect();

    if found.is_empty() {
        found.push(STABLE_PERFORMANCE);
    }

    found
}

pub fn generate_summary(student: &StudentRecord, level: RiskLevel) -> String {
    format!(
        "Student {} shows {} risk due to {}. Recommended monitoring and academic support.",
        student.student_id,
        level,
        issues(student).join(", ")
    )
}
