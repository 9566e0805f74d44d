use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{Attachment, AttachmentTarget, NewAttachment};

/// Attach a file reference to a fact row.
///
/// The (cible_type, cible_id) pair is not a real foreign key, so the target
/// row's existence is checked here before the insert; a dangling target is
/// rejected as `NotFound`.
pub fn insert_attachment(conn: &Connection, new: &NewAttachment) -> Result<i64, DatabaseError> {
    ensure_target_exists(conn, new.target)?;
    conn.execute(
        "INSERT INTO pieces_jointes (cible_type, cible_id, fichier_url, description)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            new.target.kind_str(),
            new.target.id(),
            new.file_uri,
            new.description,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_attachment(conn: &Connection, id: i64) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        "DELETE FROM pieces_jointes WHERE piece_id = ?1",
        params![id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "attachment".into(),
            id,
        });
    }
    Ok(())
}

/// All attachments of one fact row, newest first.
pub fn list_attachments_for_target(
    conn: &Connection,
    target: AttachmentTarget,
) -> Result<Vec<Attachment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT piece_id, cible_type, cible_id, fichier_url, description, date_ajout
         FROM pieces_jointes
         WHERE cible_type = ?1 AND cible_id = ?2
         ORDER BY date_ajout DESC, piece_id DESC",
    )?;

    let rows = stmt.query_map(params![target.kind_str(), target.id()], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, i64>(2)?,
            row.get::<_, String>(3)?,
            row.get::<_, Option<String>>(4)?,
            row.get::<_, String>(5)?,
        ))
    })?;

    let mut attachments = Vec::new();
    for row in rows {
        let (id, kind, target_id, file_uri, description, added_at) = row?;
        attachments.push(Attachment {
            id,
            target: AttachmentTarget::from_parts(&kind, target_id)?,
            file_uri,
            description,
            added_at: NaiveDateTime::parse_from_str(&added_at, "%Y-%m-%d %H:%M:%S")
                .unwrap_or_default(),
        });
    }
    Ok(attachments)
}

fn ensure_target_exists(conn: &Connection, target: AttachmentTarget) -> Result<(), DatabaseError> {
    let (table, id_column) = match target {
        AttachmentTarget::Datum(_) => ("donnees_sanitaires", "donnee_id"),
        AttachmentTarget::Consultation(_) => ("consultations", "consultation_id"),
        AttachmentTarget::Exam(_) => ("examens", "examen_id"),
    };
    let exists: bool = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE {id_column} = ?1)"),
        params![target.id()],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(DatabaseError::NotFound {
            entity_type: target.kind_str().into(),
            id: target.id(),
        });
    }
    Ok(())
}
