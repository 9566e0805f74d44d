use rusqlite::Connection;
use serde::Serialize;

use crate::db::DatabaseError;

/// Aggregate counts shown on the home screen.
#[derive(Debug, Clone, Serialize)]
pub struct Stats {
    pub patients: i64,
    pub health_data: i64,
    pub consultations: i64,
    pub exams: i64,
}

pub fn fetch_stats(conn: &Connection) -> Result<Stats, DatabaseError> {
    let patients: i64 =
        conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    let health_data: i64 = conn.query_row("SELECT COUNT(*) FROM donnees_sanitaires", [], |row| {
        row.get(0)
    })?;
    let consultations: i64 =
        conn.query_row("SELECT COUNT(*) FROM consultations", [], |row| row.get(0))?;
    let exams: i64 = conn.query_row("SELECT COUNT(*) FROM examens", [], |row| row.get(0))?;

    Ok(Stats {
        patients,
        health_data,
        consultations,
        exams,
    })
}
