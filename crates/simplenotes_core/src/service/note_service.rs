//! Note use-case service.
//!
//! # Responsibility
//! - Provide create/update/delete/get/list entry points over raw form input.
//! - Run stale-tag reclamation after every operation that can orphan a tag.
//!
//! # Invariants
//! - Updates replace body, date, and the tag set wholesale, never merge.
//! - Validation failures are reported as values; nothing is persisted.
//! - Reclamation runs after update and delete, and nowhere else: create can
//!   only add associations.

use crate::form::note_form::{CleanedNote, NoteForm, ValidationOutcome};
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{normalize_list_limit, NoteRepository, RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for note use-cases.
#[derive(Debug)]
pub enum NoteServiceError {
    /// Form failed validation; messages are shown back to the user.
    Validation(Vec<String>),
    /// Target note does not exist.
    NotFound(NoteId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NoteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "invalid note form: {}", errors.join("; ")),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent note state: {details}"),
        }
    }
}

impl Error for NoteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesPage {
    /// Items sorted newest date first.
    pub items: Vec<Note>,
    /// Effective normalized limit used by the query.
    pub applied_limit: u32,
}

/// Note service facade over repository implementations.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the form and creates one note with its tags.
    pub fn create_note(&mut self, form: &NoteForm) -> Result<Note, NoteServiceError> {
        let cleaned = self.validated(form)?;
        let id = self.repo.create_note(&cleaned.body, cleaned.date)?;
        if !cleaned.tags.is_empty() {
            self.repo.set_note_tags(id, &cleaned.tags)?;
        }
        self.read_back(id, "created note missing in read-back")
    }

    /// Validates the form and replaces an existing note wholesale.
    ///
    /// The old tag set is replaced, not merged; tags orphaned by the
    /// replacement are reclaimed before returning.
    pub fn update_note(&mut self, id: NoteId, form: &NoteForm) -> Result<Note, NoteServiceError> {
        let cleaned = self.validated(form)?;
        self.repo.update_note(id, &cleaned.body, cleaned.date)?;
        self.repo.set_note_tags(id, &cleaned.tags)?;
        self.repo.reclaim_stale_tags()?;
        self.read_back(id, "updated note missing in read-back")
    }

    /// Hard-deletes one note and reclaims any tags it orphaned.
    pub fn delete_note(&mut self, id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id)?;
        self.repo.reclaim_stale_tags()?;
        Ok(())
    }

    /// Gets one note by stable ID.
    pub fn get_note(&self, id: NoteId) -> Result<Note, NoteServiceError> {
        self.repo
            .find_note(id)?
            .ok_or(NoteServiceError::NotFound(id))
    }

    /// Lists notes newest date first using a normalized limit.
    pub fn list_recent(&self, limit: Option<u32>) -> Result<NotesPage, NoteServiceError> {
        let applied_limit = normalize_list_limit(limit);
        let items = self.repo.list_recent(applied_limit)?;
        Ok(NotesPage {
            items,
            applied_limit,
        })
    }

    /// Lists all tag names known by storage.
    pub fn list_tags(&self) -> RepoResult<Vec<String>> {
        self.repo.list_tags()
    }

    fn validated(&self, form: &NoteForm) -> Result<CleanedNote, NoteServiceError> {
        match form.validate() {
            ValidationOutcome::Valid(cleaned) => Ok(cleaned),
            ValidationOutcome::Invalid(errors) => Err(NoteServiceError::Validation(errors)),
        }
    }

    fn read_back(&self, id: NoteId, context: &'static str) -> Result<Note, NoteServiceError> {
        self.repo
            .find_note(id)?
            .ok_or(NoteServiceError::InconsistentState(context))
    }
}
