//! Core domain logic for simplenotes.
//! This crate is the single source of truth for note validation, tag
//! normalization, and persistence invariants.

pub mod db;
pub mod form;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use form::note_form::{CleanedNote, NoteForm, ValidationOutcome};
pub use form::tags::split_tags;
pub use form::timefmt::{combine, parse_date, parse_time, NOTE_DATE_FORMAT, NOTE_TIME_FORMAT};
pub use logging::{default_log_level, init_logging};
pub use model::note::{Note, NoteId, MAX_BODY_LENGTH};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_service::{NoteService, NoteServiceError, NotesPage};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
