use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::{Consultation, NewConsultation};

pub fn insert_consultation(
    conn: &Connection,
    new: &NewConsultation,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO consultations (patient_id, type_consultation_id, date_consultation,
                                    diagnostic, traitement)
         VALUES (?1, ?2, COALESCE(?3, date('now')), ?4, ?5)",
        params![
            new.patient_id,
            new.type_id,
            new.consultation_date.map(|d| d.to_string()),
            new.diagnosis,
            new.treatment,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_consultation(
    conn: &Connection,
    id: i64,
    new: &NewConsultation,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE consultations
         SET type_consultation_id = ?1,
             date_consultation = COALESCE(?2, date_consultation),
             diagnostic = ?3, traitement = ?4
         WHERE consultation_id = ?5",
        params![
            new.type_id,
            new.consultation_date.map(|d| d.to_string()),
            new.diagnosis,
            new.treatment,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "consultation".into(),
            id,
        });
    }
    Ok(())
}

pub fn delete_consultation(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM consultations WHERE consultation_id = ?1",
        params![id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "consultation".into(),
            id,
        });
    }
    Ok(())
}

/// Single consultation by id (the consultation detail screen's query).
pub fn get_consultation(
    conn: &Connection,
    id: i64,
) -> Result<Option<Consultation>, DatabaseError> {
    let consultation = conn
        .query_row(
            "SELECT co.consultation_id, co.patient_id, co.type_consultation_id, tc.nom_type,
                    co.date_consultation, co.diagnostic, co.traitement
             FROM consultations co
             JOIN types_consultations tc ON tc.type_consultation_id = co.type_consultation_id
             WHERE co.consultation_id = ?1",
            params![id],
            map_consultation,
        )
        .optional()?;
    Ok(consultation)
}

/// All consultations for one patient, newest first, joined with the
/// consultation category name.
pub fn list_consultations_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<Consultation>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT co.consultation_id, co.patient_id, co.type_consultation_id, tc.nom_type,
                co.date_consultation, co.diagnostic, co.traitement
         FROM consultations co
         JOIN types_consultations tc ON tc.type_consultation_id = co.type_consultation_id
         WHERE co.patient_id = ?1
         ORDER BY co.date_consultation DESC, co.consultation_id DESC",
    )?;
    let rows = stmt.query_map(params![patient_id], map_consultation)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn map_consultation(row: &Row<'_>) -> rusqlite::Result<Consultation> {
    Ok(Consultation {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        type_id: row.get(2)?,
        type_name: row.get(3)?,
        consultation_date: NaiveDate::parse_from_str(&row.get::<_, String>(4)?, "%Y-%m-%d")
            .unwrap_or_default(),
        diagnosis: row.get(5)?,
        treatment: row.get(6)?,
    })
}
