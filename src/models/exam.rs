use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An exam record (lab panel, imaging, ...) with its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    pub id: i64,
    pub patient_id: i64,
    pub type_id: i64,
    pub type_name: String,
    pub subject: Option<String>,
    pub exam_date: NaiveDate,
    pub result: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExam {
    pub patient_id: i64,
    pub type_id: i64,
    pub subject: Option<String>,
    pub exam_date: Option<NaiveDate>,
    pub result: Option<String>,
    pub notes: Option<String>,
}
