//! Resume reader: load, validate, then decide retention.
//!
//! A checkpoint is a one-shot handoff across a context discard, so the
//! default is delete-after-read: a stale checkpoint left behind risks a
//! future resume silently loading outdated state. Retention is opt-in, for
//! debugging and deliberate re-resumption.

use crate::core::document::CheckpointDocument;
use crate::core::error::BatonError;
use crate::core::record::CheckpointRecord;
use crate::core::session::SessionKey;
use crate::core::store::CheckpointStore;

/// Outcome of a successful resume, for caller-facing reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retention {
    Deleted,
    Retained,
}

/// Load the checkpoint at `key` and apply the cleanup decision.
///
/// Absent record -> `NotFound`. Present but structurally invalid ->
/// `CorruptRecord`, and the record is never deleted so investigation stays
/// possible. Only after the document has fully parsed is the record removed,
/// unless `keep` or the record's stored retain flag asks otherwise.
pub fn read(
    store: &dyn CheckpointStore,
    key: &SessionKey,
    keep: bool,
) -> Result<(CheckpointDocument, Retention), BatonError> {
    let bytes = store.get(key).map_err(|e| match e {
        BatonError::NotFound(_) => BatonError::NotFound(format!(
            "no checkpoint for session '{}' at {}",
            key,
            store.address(key).display()
        )),
        other => other,
    })?;

    let record = CheckpointRecord::decode(&bytes)?;

    let retention = if keep || record.retain {
        Retention::Retained
    } else {
        match store.delete(key) {
            // The record vanished between get and delete; the document was
            // already produced, so the handoff still happened.
            Ok(()) | Err(BatonError::NotFound(_)) => Retention::Deleted,
            Err(other) => return Err(other),
        }
    };

    Ok((record.document, retention))
}
