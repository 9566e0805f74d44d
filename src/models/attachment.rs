use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;

/// Which fact row an attachment belongs to.
///
/// The schema stores this as a (cible_type, cible_id) pair rather than a
/// foreign key — SQLite cannot point one column at three possible parent
/// tables. The repository checks the target exists before insert; the
/// schema itself cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum AttachmentTarget {
    Datum(i64),
    Consultation(i64),
    Exam(i64),
}

impl AttachmentTarget {
    /// Persisted discriminator value.
    pub fn kind_str(self) -> &'static str {
        match self {
            AttachmentTarget::Datum(_) => "donnee",
            AttachmentTarget::Consultation(_) => "consultation",
            AttachmentTarget::Exam(_) => "examen",
        }
    }

    pub fn id(self) -> i64 {
        match self {
            AttachmentTarget::Datum(id)
            | AttachmentTarget::Consultation(id)
            | AttachmentTarget::Exam(id) => id,
        }
    }

    /// Rebuild a target from its persisted (cible_type, cible_id) pair.
    pub fn from_parts(kind: &str, id: i64) -> Result<Self, DatabaseError> {
        match kind {
            "donnee" => Ok(AttachmentTarget::Datum(id)),
            "consultation" => Ok(AttachmentTarget::Consultation(id)),
            "examen" => Ok(AttachmentTarget::Exam(id)),
            _ => Err(DatabaseError::InvalidEnum {
                field: "cible_type".into(),
                value: kind.into(),
            }),
        }
    }
}

/// A file attached to a fact row. `file_uri` is an opaque reference from a
/// camera capture or document picker; the store never moves or validates
/// the file it points at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    pub target: AttachmentTarget,
    pub file_uri: String,
    pub description: Option<String>,
    pub added_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAttachment {
    pub target: AttachmentTarget,
    pub file_uri: String,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_parts_round_trip() {
        let targets = [
            AttachmentTarget::Datum(1),
            AttachmentTarget::Consultation(7),
            AttachmentTarget::Exam(42),
        ];
        for target in targets {
            let rebuilt = AttachmentTarget::from_parts(target.kind_str(), target.id()).unwrap();
            assert_eq!(rebuilt, target);
        }
    }

    #[test]
    fn unknown_target_kind_is_rejected() {
        let err = AttachmentTarget::from_parts("dossier", 1).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidEnum { .. }));
    }

    #[test]
    fn target_serializes_with_tag() {
        let json = serde_json::to_string(&AttachmentTarget::Exam(3)).unwrap();
        assert_eq!(json, r#"{"kind":"exam","id":3}"#);
    }
}
