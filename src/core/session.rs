//! Session key resolution.
//!
//! A `SessionKey` is the stable storage address for a named or default
//! session. Resolution is a pure function of the supplied name: the same name
//! always maps to the same address, and no name resolves to the well-known
//! default address.

use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::core::error::BatonError;

/// File name for the default (unnamed) session checkpoint.
pub const DEFAULT_HANDOFF_FILE: &str = "handoff.json";
/// Directory holding named session checkpoints under the namespace root.
pub const NAMED_HANDOFF_DIR: &str = "handoffs";

const NAME_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Default,
    Named(String),
}

impl SessionKey {
    /// Resolve an optional session name to a storage key.
    ///
    /// Absent and empty names both resolve to the default key. Non-empty
    /// names are validated so the resolved address cannot escape the
    /// checkpoint namespace.
    pub fn resolve(name: Option<&str>) -> Result<Self, BatonError> {
        let name = match name {
            None => return Ok(Self::Default),
            Some(n) if n.is_empty() => return Ok(Self::Default),
            Some(n) => n,
        };

        if name.contains("..") {
            return Err(BatonError::InvalidName(format!(
                "'{}' contains a parent-directory sequence",
                name
            )));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(BatonError::InvalidName(format!(
                "'{}' contains a path separator",
                name
            )));
        }
        let pattern = Regex::new(NAME_PATTERN).unwrap();
        if !pattern.is_match(name) {
            return Err(BatonError::InvalidName(format!(
                "'{}': allowed names match {}",
                name, NAME_PATTERN
            )));
        }

        Ok(Self::Named(name.to_string()))
    }

    /// Storage path relative to the namespace root.
    pub fn relative_path(&self) -> PathBuf {
        match self {
            Self::Default => PathBuf::from(DEFAULT_HANDOFF_FILE),
            Self::Named(name) => {
                PathBuf::from(NAMED_HANDOFF_DIR).join(format!("handoff-{}.json", name))
            }
        }
    }

    /// Absolute storage address under `root`.
    pub fn address(&self, root: &Path) -> PathBuf {
        root.join(self.relative_path())
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Default => "default",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
