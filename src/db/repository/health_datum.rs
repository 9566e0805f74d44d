use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::{HealthDatum, NewHealthDatum};

pub fn insert_health_datum(
    conn: &Connection,
    new: &NewHealthDatum,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO donnees_sanitaires (patient_id, type_donnee_id, valeur, date_enregistrement)
         VALUES (?1, ?2, ?3, COALESCE(?4, date('now')))",
        params![
            new.patient_id,
            new.type_id,
            new.value,
            new.recorded_date.map(|d| d.to_string()),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_health_datum(
    conn: &Connection,
    id: i64,
    new: &NewHealthDatum,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE donnees_sanitaires
         SET type_donnee_id = ?1, valeur = ?2,
             date_enregistrement = COALESCE(?3, date_enregistrement)
         WHERE donnee_id = ?4",
        params![
            new.type_id,
            new.value,
            new.recorded_date.map(|d| d.to_string()),
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "health datum".into(),
            id,
        });
    }
    Ok(())
}

pub fn delete_health_datum(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM donnees_sanitaires WHERE donnee_id = ?1",
        params![id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "health datum".into(),
            id,
        });
    }
    Ok(())
}

/// Single measurement by id (the datum detail screen's query).
pub fn get_health_datum(
    conn: &Connection,
    id: i64,
) -> Result<Option<HealthDatum>, DatabaseError> {
    let datum = conn
        .query_row(
            "SELECT ds.donnee_id, ds.patient_id, ds.type_donnee_id, td.nom_type, ds.valeur,
                    ds.date_enregistrement
             FROM donnees_sanitaires ds
             JOIN types_donnees td ON td.type_donnee_id = ds.type_donnee_id
             WHERE ds.donnee_id = ?1",
            params![id],
            map_health_datum,
        )
        .optional()?;
    Ok(datum)
}

/// All measurements for one patient, newest first, with the category name
/// joined in (the patient detail screen's query).
pub fn list_health_data_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<HealthDatum>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT ds.donnee_id, ds.patient_id, ds.type_donnee_id, td.nom_type, ds.valeur,
                ds.date_enregistrement
         FROM donnees_sanitaires ds
         JOIN types_donnees td ON td.type_donnee_id = ds.type_donnee_id
         WHERE ds.patient_id = ?1
         ORDER BY ds.date_enregistrement DESC, ds.donnee_id DESC",
    )?;
    let rows = stmt.query_map(params![patient_id], map_health_datum)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn map_health_datum(row: &Row<'_>) -> rusqlite::Result<HealthDatum> {
    Ok(HealthDatum {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        type_id: row.get(2)?,
        type_name: row.get(3)?,
        value: row.get(4)?,
        recorded_date: NaiveDate::parse_from_str(&row.get::<_, String>(5)?, "%Y-%m-%d")
            .unwrap_or_default(),
    })
}
