use crate::models::{RiskLevel, StudentRecord};

pub const ATTENDANCE_WEIGHT: f64 = 0.4;
pub const ACADEMIC_WEIGHT: f64 = 0.4;
pub const TEACHER_LOAD_WEIGHT: f64 = 0.2;

pub const HIGH_RISK_THRESHOLD: f64 = 70.0;
pub const MODERATE_RISK_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskBreakdown {
    pub attendance: f64,
    pub academic: f64,
    pub teacher_load: f64,
    pub total: f64,
}

pub fn academic_average(student: &StudentRecord) -> f64 {
    (student.math + student.english + student.science) / 3.0
}

pub fn teacher_load_risk(teacher_load_index: f64) -> f64 {
    (teacher_load_index * 100.0).min(100.0)
}

pub fn breakdown(student: &StudentRecord) -> RiskBreakdown {
    let attendance = 100.0 - student.attendance_percent;
    let academic = 100.0 - academic_average(student);
    let teacher_load = teacher_load_risk(student.teacher_load_index);
    let total = attendance * ATTENDANCE_WEIGHT
        + academic * ACADEMIC_WEIGHT
        + teacher_load * TEACHER_LOAD_WEIGHT;

    RiskBreakdown {
        attendance,
        academic,
        teacher_load,
        total,
    }
}

// Above 2^52 / 100 every f64 is already a whole number of hundredths.
const EXACT_HUNDREDTHS_LIMIT: f64 = 4_503_599_627_370_496.0 / 100.0;

/// Rounds to two decimals, half away from zero on the value scaled by 100.
/// Magnitudes too large to carry hundredths are returned unchanged.
pub fn round_score(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() || value.abs() >= EXACT_HUNDREDTHS_LIMIT {
        return value;
    }
    scaled.round() / 100.0
}

/// Bands a published (already rounded) score. Lower bounds are inclusive.
pub fn classify(score: f64) -> RiskLevel {
    if score >= HIGH_RISK_THRESHOLD {
        RiskLevel::High
    } else if score >= MODERATE_RISK_THRESHOLD {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

pub fn compute_risk(student: &StudentRecord) -> (f64, RiskLevel) {
    let score = round_score(breakdown(student).total);
    (score, classify(score))
}

#[cfg(test)]
pub(crate) fn sample_student(
    id: &str,
    attendance_percent: f64,
    grade: f64,
    teacher_load_index: f64,
) -> StudentRecord {
    StudentRecord {
        student_id: id.to_string(),
        attendance_percent,
        math: grade,
        english: grade,
        science: grade,
        teacher_load_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example_scores_low() {
        let student = StudentRecord {
            student_id: "S1".to_string(),
            attendance_percent: 80.0,
            math: 70.0,
            english: 65.0,
            science: 75.0,
            teacher_load_index: 0.9,
        };

        let terms = breakdown(&student);
        assert_eq!(academic_average(&student), 70.0);
        assert_eq!(terms.attendance, 20.0);
        assert_eq!(terms.academic, 30.0);
        assert!((terms.teacher_load - 90.0).abs() < 1e-9);

        assert_eq!(compute_risk(&student), (38.0, RiskLevel::Low));
    }

    #[test]
    fn levels_include_their_lower_bound() {
        assert_eq!(classify(70.0), RiskLevel::High);
        assert_eq!(classify(69.99), RiskLevel::Moderate);
        assert_eq!(classify(40.0), RiskLevel::Moderate);
        assert_eq!(classify(39.99), RiskLevel::Low);
        assert_eq!(classify(100.0), RiskLevel::High);
        assert_eq!(classify(0.0), RiskLevel::Low);
    }

    #[test]
    fn teacher_load_caps_from_nominal_load() {
        assert_eq!(teacher_load_risk(1.0), 100.0);
        assert_eq!(teacher_load_risk(5.0), 100.0);
        assert_eq!(teacher_load_risk(0.5), 50.0);
        assert!(teacher_load_risk(0.99) < 100.0);

        let nominal = compute_risk(&sample_student("a", 60.0, 60.0, 1.0));
        let overloaded = compute_risk(&sample_student("b", 60.0, 60.0, 5.0));
        assert_eq!(nominal, overloaded);
    }

    #[test]
    fn rounding_ties_go_away_from_zero() {
        assert_eq!(round_score(12.125), 12.13);
        assert_eq!(round_score(-12.125), -12.13);
        assert_eq!(round_score(0.125), 0.13);
        assert_eq!(round_score(38.0), 38.0);
        assert_eq!(round_score(12.1249), 12.12);
    }

    #[test]
    fn rounding_leaves_huge_values_finite() {
        assert_eq!(round_score(1e307), 1e307);
        assert_eq!(round_score(-1e307), -1e307);
        assert_eq!(round_score(f64::MAX), f64::MAX);
        assert!(round_score(f64::INFINITY).is_infinite());

        let student = sample_student("big", -2.5e307, 100.0, 0.0);
        let total = breakdown(&student).total;
        let (score, level) = compute_risk(&student);
        assert!(score.is_finite());
        assert_eq!(score, total);
        assert_eq!(level, RiskLevel::High);
    }

    #[test]
    fn level_follows_the_rounded_score() {
        let just_below_high = sample_student("h", -74.99, 100.0, 0.0);
        assert!(breakdown(&just_below_high).total < HIGH_RISK_THRESHOLD);
        assert_eq!(compute_risk(&just_below_high), (70.0, RiskLevel::High));

        let just_below_moderate = sample_student("m", 0.01, 100.0, 0.0);
        assert!(breakdown(&just_below_moderate).total < MODERATE_RISK_THRESHOLD);
        assert_eq!(
            compute_risk(&just_below_moderate),
            (40.0, RiskLevel::Moderate)
        );
    }

    #[test]
    fn bands_follow_the_weighted_total() {
        assert_eq!(
            compute_risk(&sample_student("h", 20.0, 20.0, 1.5)),
            (84.0, RiskLevel::High)
        );
        assert_eq!(
            compute_risk(&sample_student("m", 50.0, 50.0, 1.5)),
            (60.0, RiskLevel::Moderate)
        );
        assert_eq!(
            compute_risk(&sample_student("l", 100.0, 100.0, 0.5)),
            (10.0, RiskLevel::Low)
        );
    }

    #[test]
    fn same_inputs_give_same_score() {
        let student = sample_student("S9", 73.4, 58.25, 1.17);
        assert_eq!(compute_risk(&student), compute_risk(&student.clone()));
    }

    #[test]
    fn out_of_range_inputs_are_not_clamped() {
        let student = sample_student("S2", 150.0, 100.0, 0.0);
        assert_eq!(compute_risk(&student), (-20.0, RiskLevel::Low));

        let negative_load = sample_student("S3", 100.0, 100.0, -1.0);
        assert_eq!(breakdown(&negative_load).teacher_load, -100.0);
        assert_eq!(compute_risk(&negative_load), (-20.0, RiskLevel::Low));
    }
}
