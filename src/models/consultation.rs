use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A consultation record. Carries a structured diagnosis + treatment pair
/// (the legacy single free-text notes shape was retired with the v1 schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consultation {
    pub id: i64,
    pub patient_id: i64,
    pub type_id: i64,
    pub type_name: String,
    pub consultation_date: NaiveDate,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewConsultation {
    pub patient_id: i64,
    pub type_id: i64,
    pub consultation_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
}
