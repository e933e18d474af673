use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(rename = "Student_ID")]
    pub student_id: String,
    #[serde(rename = "Attendance_percent")]
    pub attendance_percent: f64,
    #[serde(rename = "Math")]
    pub math: f64,
    #[serde(rename = "English")]
    pub english: f64,
    #[serde(rename = "Science")]
    pub science: f64,
    #[serde(rename = "Teacher_Load_Index")]
    pub teacher_load_index: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(rename = "Student_ID")]
    pub student_id: String,
    #[serde(rename = "Risk_Score")]
    pub risk_score: f64,
    #[serde(rename = "Risk_Level")]
    pub risk_level: RiskLevel,
    #[serde(rename = "Summary")]
    pub summary: String,
    #[serde(rename = "Generated_Date")]
    pub generated_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    pub students: Vec<StudentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub results: Vec<RiskAssessment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug, Clone)]
pub struct LevelSummary {
    pub level: RiskLevel,
    pub count: usize,
    pub avg_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IssueCount {
    pub issue: &'static str,
    pub count: usize,
}
