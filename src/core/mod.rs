//! Core modules for Baton's checkpoint/resume protocol.
//!
//! The full protocol lives here: key resolution, the document schema, the
//! record envelope, the store abstraction, and the writer/reader pair.

pub mod document;
pub mod error;
pub mod output;
pub mod reader;
pub mod record;
pub mod session;
pub mod store;
pub mod writer;
