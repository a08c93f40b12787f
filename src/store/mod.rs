// src/store/mod.rs
// =============================================================================
// This module saves harvested pages to disk.
//
// Submodules:
// - filename: URL -> safe file name
// - documents: the document directory and the actual writes
// =============================================================================

mod documents;
mod filename;

pub use documents::{DocumentStore, StorageError};
pub use filename::sanitize_filename;
