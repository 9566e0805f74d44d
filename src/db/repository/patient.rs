use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::{NewPatient, Patient};

const PATIENT_COLUMNS: &str =
    "patient_id, nom, prenom, date_naissance, sexe, adresse, telephone, created_at, updated_at";

pub fn insert_patient(conn: &Connection, new: &NewPatient) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (nom, prenom, date_naissance, sexe, adresse, telephone)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.last_name,
            new.first_name,
            new.birth_date.map(|d| d.to_string()),
            new.sex,
            new.address,
            new.phone,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_patient(conn: &Connection, id: i64, new: &NewPatient) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients
         SET nom = ?1, prenom = ?2, date_naissance = ?3, sexe = ?4, adresse = ?5,
             telephone = ?6, updated_at = datetime('now')
         WHERE patient_id = ?7",
        params![
            new.last_name,
            new.first_name,
            new.birth_date.map(|d| d.to_string()),
            new.sex,
            new.address,
            new.phone,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "patient".into(),
            id,
        });
    }
    Ok(())
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?1"),
            params![id],
            map_patient,
        )
        .optional()?;
    Ok(patient)
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PATIENT_COLUMNS} FROM patients ORDER BY nom, prenom"
    ))?;
    let rows = stmt.query_map([], map_patient)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Delete a patient. Health data, consultations and exams cascade away
/// with it.
pub fn delete_patient(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM patients WHERE patient_id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "patient".into(),
            id,
        });
    }
    Ok(())
}

fn map_patient(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        last_name: row.get(1)?,
        first_name: row.get(2)?,
        birth_date: row
            .get::<_, Option<String>>(3)?
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        sex: row.get(4)?,
        address: row.get(5)?,
        phone: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
        updated_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap_or_default()
}
