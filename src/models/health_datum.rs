use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single free-text measurement (blood group, weight, ...) tied to one
/// patient and one datum type. `type_name` is joined in on every read path
/// since the detail screens always display it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDatum {
    pub id: i64,
    pub patient_id: i64,
    pub type_id: i64,
    pub type_name: String,
    pub value: String,
    pub recorded_date: NaiveDate,
}

/// Form payload for creating or updating a health datum.
/// `recorded_date: None` lets the schema default to today.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHealthDatum {
    pub patient_id: i64,
    pub type_id: i64,
    pub value: String,
    pub recorded_date: Option<NaiveDate>,
}
