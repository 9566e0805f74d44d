use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{RecordType, TypeKind};

/// List every category of a kind, ordered by name (the settings screen
/// listing).
pub fn list_types(conn: &Connection, kind: TypeKind) -> Result<Vec<RecordType>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {id}, nom_type, description FROM {table} ORDER BY nom_type",
        id = kind.id_column(),
        table = kind.table(),
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(RecordType {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn insert_type(
    conn: &Connection,
    kind: TypeKind,
    name: &str,
    description: Option<&str>,
) -> Result<i64, DatabaseError> {
    conn.execute(
        &format!(
            "INSERT INTO {table} (nom_type, description) VALUES (?1, ?2)",
            table = kind.table(),
        ),
        params![name, description],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_type(
    conn: &Connection,
    kind: TypeKind,
    id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<(), DatabaseError> {
    let changed = conn.execute(
        &format!(
            "UPDATE {table} SET nom_type = ?1, description = ?2 WHERE {id_col} = ?3",
            table = kind.table(),
            id_col = kind.id_column(),
        ),
        params![name, description, id],
    )?;
    if changed == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: format!("type ({})", kind.as_str()),
            id,
        });
    }
    Ok(())
}

/// Delete a category. The fact-table foreign keys RESTRICT, so a kind that
/// still has recorded rows cannot be removed; that case surfaces as
/// `ConstraintViolation` and nothing changes.
pub fn delete_type(conn: &Connection, kind: TypeKind, id: i64) -> Result<(), DatabaseError> {
    let result = conn.execute(
        &format!(
            "DELETE FROM {table} WHERE {id_col} = ?1",
            table = kind.table(),
            id_col = kind.id_column(),
        ),
        params![id],
    );
    match result {
        Ok(0) => Err(DatabaseError::NotFound {
            entity_type: format!("type ({})", kind.as_str()),
            id,
        }),
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(DatabaseError::ConstraintViolation(format!(
                "{} type {id} is still referenced by recorded entries",
                kind.as_str()
            )))
        }
        Err(e) => Err(e.into()),
    }
}
