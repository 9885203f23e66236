//! Domain models for the notes service.
//!
//! - [`Note`]: a persisted note record, always carrying its store-assigned id.
//! - [`NoteInput`]: the validated, not-yet-persisted fields of a write request.
//!   Produced by [`crate::api::validation`], consumed by [`crate::db::Database`].

mod note;

pub use note::*;
