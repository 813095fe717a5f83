//! Checkpoint writer: validate, seal, persist.

use std::path::PathBuf;

use crate::core::document::CheckpointDocument;
use crate::core::error::BatonError;
use crate::core::record::CheckpointRecord;
use crate::core::session::SessionKey;
use crate::core::store::CheckpointStore;

/// Persist a checkpoint document under `key`, replacing any prior record.
///
/// Validation is eager and fails closed: an invalid document never reaches
/// the store, so an existing record at `key` is untouched by a rejected
/// write. Returns the storage address used.
pub fn write(
    store: &dyn CheckpointStore,
    key: &SessionKey,
    document: CheckpointDocument,
    retain: bool,
) -> Result<PathBuf, BatonError> {
    document.validate()?;
    let record = CheckpointRecord::seal(document, retain)?;
    let bytes = record.encode()?;
    store.put(key, &bytes)
}
