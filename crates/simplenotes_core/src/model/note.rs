//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by repository and service code.
//! - Provide the fixed date/time presentation helpers.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `body` is non-empty after trimming and at most `MAX_BODY_LENGTH` chars.
//! - `date` is always a fully parsed instant normalized to UTC.
//! - `tags` hold lowercase trimmed names, sorted by name when read back.

use crate::form::timefmt::{NOTE_DATE_FORMAT, NOTE_TIME_FORMAT};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Maximum number of characters a note body may have.
pub const MAX_BODY_LENGTH: usize = 500;

/// A user-authored timestamped text entry with associated tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID used for linking and audit.
    pub id: NoteId,
    /// Cleaned note text.
    pub body: String,
    /// Combined calendar date + time of day, normalized to UTC.
    pub date: DateTime<Utc>,
    /// Tag names, normalized to lowercase.
    pub tags: Vec<String>,
}

impl Note {
    /// Formats the date portion using the fixed date-only pattern.
    pub fn display_date(&self) -> String {
        self.date.format(NOTE_DATE_FORMAT).to_string()
    }

    /// Formats the time portion using the fixed 12-hour pattern.
    pub fn display_time(&self) -> String {
        self.date.format(NOTE_TIME_FORMAT).to_string()
    }
}
