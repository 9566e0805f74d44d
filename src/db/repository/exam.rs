use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::{Exam, NewExam};

pub fn insert_exam(conn: &Connection, new: &NewExam) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO examens (patient_id, type_examen_id, objet_examen, date_examen,
                              resultat, notes)
         VALUES (?1, ?2, ?3, COALESCE(?4, date('now')), ?5, ?6)",
        params![
            new.patient_id,
            new.type_id,
            new.subject,
            new.exam_date.map(|d| d.to_string()),
            new.result,
            new.notes,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_exam(conn: &Connection, id: i64, new: &NewExam) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "UPDATE examens
         SET type_examen_id = ?1, objet_examen = ?2,
             date_examen = COALESCE(?3, date_examen), resultat = ?4, notes = ?5
         WHERE examen_id = ?6",
        params![
            new.type_id,
            new.subject,
            new.exam_date.map(|d| d.to_string()),
            new.result,
            new.notes,
            id,
        ],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "exam".into(),
            id,
        });
    }
    Ok(())
}

pub fn delete_exam(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute("DELETE FROM examens WHERE examen_id = ?1", params![id])?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "exam".into(),
            id,
        });
    }
    Ok(())
}

/// Single exam by id (the exam detail screen's query).
pub fn get_exam(conn: &Connection, id: i64) -> Result<Option<Exam>, DatabaseError> {
    let exam = conn
        .query_row(
            "SELECT ex.examen_id, ex.patient_id, ex.type_examen_id, te.nom_type, ex.objet_examen,
                    ex.date_examen, ex.resultat, ex.notes
             FROM examens ex
             JOIN types_examens te ON te.type_examen_id = ex.type_examen_id
             WHERE ex.examen_id = ?1",
            params![id],
            map_exam,
        )
        .optional()?;
    Ok(exam)
}

/// All exams for one patient, newest first, joined with the exam category
/// name.
pub fn list_exams_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<Exam>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT ex.examen_id, ex.patient_id, ex.type_examen_id, te.nom_type, ex.objet_examen,
                ex.date_examen, ex.resultat, ex.notes
         FROM examens ex
         JOIN types_examens te ON te.type_examen_id = ex.type_examen_id
         WHERE ex.patient_id = ?1
         ORDER BY ex.date_examen DESC, ex.examen_id DESC",
    )?;
    let rows = stmt.query_map(params![patient_id], map_exam)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn map_exam(row: &Row<'_>) -> rusqlite::Result<Exam> {
    Ok(Exam {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        type_id: row.get(2)?,
        type_name: row.get(3)?,
        subject: row.get(4)?,
        exam_date: NaiveDate::parse_from_str(&row.get::<_, String>(5)?, "%Y-%m-%d")
            .unwrap_or_default(),
        result: row.get(6)?,
        notes: row.get(7)?,
    })
}
