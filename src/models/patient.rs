use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A registered patient. Fact rows (health data, consultations, exams)
/// cascade away when the patient is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Form payload for creating or updating a patient. The id and the
/// timestamps are owned by the database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPatient {
    pub last_name: String,
    pub first_name: String,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}
