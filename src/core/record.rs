//! Stored checkpoint record envelope.
//!
//! Wraps a [`CheckpointDocument`] with the metadata the store persists: a
//! schema version, a record id, the write timestamp, the retention flag, and
//! a content hash verified on decode.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use ulid::Ulid;

use crate::core::document::CheckpointDocument;
use crate::core::error::BatonError;

pub const RECORD_SCHEMA_VERSION: &str = "1.0.0";

/// Unix-epoch seconds with `Z` suffix (e.g. `1771220592Z`).
fn write_stamp() -> String {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckpointRecord {
    pub schema_version: String,
    pub record_id: String,
    pub written_at: String,
    pub retain: bool,
    pub document_hash: String,
    pub document: CheckpointDocument,
}

impl CheckpointRecord {
    /// Seal a validated document into a record envelope.
    pub fn seal(document: CheckpointDocument, retain: bool) -> Result<Self, BatonError> {
        let document_hash = document.canonical_hash_hex()?;
        Ok(Self {
            schema_version: RECORD_SCHEMA_VERSION.to_string(),
            record_id: Ulid::new().to_string(),
            written_at: write_stamp(),
            retain,
            document_hash,
            document,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, BatonError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Decode stored bytes back into a record.
    ///
    /// Any structural failure is corruption, not absence: unparseable JSON,
    /// a missing required document field, or a content hash that no longer
    /// matches the document all yield `CorruptRecord`, and the caller must
    /// leave the stored bytes in place.
    pub fn decode(bytes: &[u8]) -> Result<Self, BatonError> {
        let record: CheckpointRecord = serde_json::from_slice(bytes)
            .map_err(|e| BatonError::CorruptRecord(format!("unparseable record: {}", e)))?;

        record
            .document
            .validate()
            .map_err(|e| BatonError::CorruptRecord(e.to_string()))?;

        let expected = record.document.canonical_hash_hex()?;
        if record.document_hash != expected {
            return Err(BatonError::CorruptRecord(format!(
                "document hash mismatch: stored {}, computed {}",
                record.document_hash, expected
            )));
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::{RemainingEntry, Scenario};

    fn sample_document() -> CheckpointDocument {
        CheckpointDocument {
            scenario: Scenario::Checkpoint,
            objective: "Stabilize the importer".to_string(),
            architectural_context: Vec::new(),
            work_completed: Vec::new(),
            work_remaining: vec![RemainingEntry::none()],
            lessons_learned: None,
            current_state: "clean tree".to_string(),
            open_questions: Vec::new(),
            resumption_prompt: "Pick up importer stabilization".to_string(),
        }
    }

    #[test]
    fn sealed_envelopes_get_distinct_ids_and_epoch_stamps() {
        let first = CheckpointRecord::seal(sample_document(), false).unwrap();
        let second = CheckpointRecord::seal(sample_document(), false).unwrap();
        assert_ne!(first.record_id, second.record_id);
        assert!(Ulid::from_string(&first.record_id).is_ok());

        let numeric = first.written_at.strip_suffix('Z').unwrap();
        assert!(numeric.parse::<u64>().is_ok());
    }

    #[test]
    fn seal_then_decode_round_trips() {
        let record = CheckpointRecord::seal(sample_document(), true).unwrap();
        let decoded = CheckpointRecord::decode(&record.encode().unwrap()).unwrap();
        assert_eq!(decoded, record);
        assert!(decoded.retain);
    }

    #[test]
    fn tampered_document_fails_hash_check() {
        let record = CheckpointRecord::seal(sample_document(), false).unwrap();
        let mut value: serde_json::Value =
            serde_json::from_slice(&record.encode().unwrap()).unwrap();
        value["document"]["objective"] = serde_json::json!("Something else entirely");
        let err = CheckpointRecord::decode(&serde_json::to_vec(&value).unwrap()).unwrap_err();
        assert!(matches!(err, BatonError::CorruptRecord(_)));
    }

    #[test]
    fn garbage_bytes_are_corrupt_not_missing() {
        let err = CheckpointRecord::decode(b"not json at all").unwrap_err();
        assert!(matches!(err, BatonError::CorruptRecord(_)));
    }
}
