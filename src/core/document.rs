//! Checkpoint document model.
//!
//! The structured schema a session writes at checkpoint time and reads back
//! at resume time. The document is immutable once written; a new checkpoint
//! for the same session key fully replaces the prior one.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::error::BatonError;

/// Why the checkpoint was taken.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    MidTask,
    TaskComplete,
    Checkpoint,
    SessionEnd,
}

impl Scenario {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MidTask => "MID_TASK",
            Self::TaskComplete => "TASK_COMPLETE",
            Self::Checkpoint => "CHECKPOINT",
            Self::SessionEnd => "SESSION_END",
        }
    }
}

/// A file or resource the resumed session will need, with its role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextEntry {
    pub reference: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletedEntry {
    pub what: String,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemainingEntry {
    pub task: String,
    pub blockers: Vec<String>,
    pub suggested_approach: String,
}

impl RemainingEntry {
    /// Sentinel marking "no work remains" as an explicit statement, so an
    /// empty section is distinguishable from one never recorded.
    pub fn none() -> Self {
        Self {
            task: "none".to_string(),
            blockers: Vec::new(),
            suggested_approach: String::new(),
        }
    }

    pub fn is_none_sentinel(&self) -> bool {
        self.task == "none" && self.blockers.is_empty() && self.suggested_approach.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LessonsLearned {
    pub constraints: Vec<String>,
    pub dead_ends: Vec<String>,
    pub bug_patterns: Vec<String>,
}

/// The unit of persisted session state.
///
/// `work_remaining` is deliberately not defaulted on deserialize: a record
/// missing the field is corrupt, not empty. Callers that have nothing left
/// record [`RemainingEntry::none`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckpointDocument {
    pub scenario: Scenario,
    pub objective: String,
    #[serde(default)]
    pub architectural_context: Vec<ContextEntry>,
    #[serde(default)]
    pub work_completed: Vec<CompletedEntry>,
    pub work_remaining: Vec<RemainingEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lessons_learned: Option<LessonsLearned>,
    pub current_state: String,
    #[serde(default)]
    pub open_questions: Vec<String>,
    pub resumption_prompt: String,
}

impl CheckpointDocument {
    /// Enforce the required-field rules shared by the writer and the reader.
    /// The offending field is named in the error.
    pub fn validate(&self) -> Result<(), BatonError> {
        for (field, value) in [
            ("objective", &self.objective),
            ("current_state", &self.current_state),
            ("resumption_prompt", &self.resumption_prompt),
        ] {
            if value.trim().is_empty() {
                return Err(BatonError::Validation(format!(
                    "field '{}' must be non-empty",
                    field
                )));
            }
        }
        Ok(())
    }

    pub fn canonical_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn canonical_hash_hex(&self) -> Result<String, serde_json::Error> {
        let bytes = self.canonical_json_bytes()?;
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        Ok(format!("{:x}", hasher.finalize()))
    }
}
