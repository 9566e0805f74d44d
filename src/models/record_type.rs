use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;

/// Which of the three lookup tables a type row belongs to.
///
/// The three tables share one shape (id, name, description); the kind maps
/// to the concrete table and id column so the repository can address them
/// uniformly. String form matches the persisted discriminator values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Datum,
    Consultation,
    Exam,
}

impl TypeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Datum => "donnee",
            TypeKind::Consultation => "consultation",
            TypeKind::Exam => "examen",
        }
    }

    /// Lookup table holding rows of this kind.
    pub fn table(self) -> &'static str {
        match self {
            TypeKind::Datum => "types_donnees",
            TypeKind::Consultation => "types_consultations",
            TypeKind::Exam => "types_examens",
        }
    }

    /// Primary key column of the lookup table.
    pub fn id_column(self) -> &'static str {
        match self {
            TypeKind::Datum => "type_donnee_id",
            TypeKind::Consultation => "type_consultation_id",
            TypeKind::Exam => "type_examen_id",
        }
    }
}

impl std::str::FromStr for TypeKind {
    type Err = DatabaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "donnee" => Ok(TypeKind::Datum),
            "consultation" => Ok(TypeKind::Consultation),
            "examen" => Ok(TypeKind::Exam),
            _ => Err(DatabaseError::InvalidEnum {
                field: "TypeKind".into(),
                value: s.into(),
            }),
        }
    }
}

/// A user-configurable category row from one of the lookup tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordType {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn kind_str_round_trip() {
        for kind in [TypeKind::Datum, TypeKind::Consultation, TypeKind::Exam] {
            assert_eq!(TypeKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = TypeKind::from_str("ordonnance").unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }
}
