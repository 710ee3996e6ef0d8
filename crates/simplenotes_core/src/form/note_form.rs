//! Note form validator.
//!
//! # Responsibility
//! - Validate raw body/date/time/tags fields and produce cleaned values.
//! - Report every failure in one pass; callers re-present the form with the
//!   collected messages and the original input intact.
//!
//! # Invariants
//! - Checks never short-circuit: a bad date does not hide a bad time.
//! - Errors are values; validation never panics or throws.
//! - `Valid` is the only carrier of the combined instant, so a failed parse
//!   can never leak a partially-defaulted timestamp toward persistence.

use crate::form::tags::split_tags;
use crate::form::timefmt::{combine, parse_date, parse_time};
use crate::model::note::MAX_BODY_LENGTH;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const ERR_BODY_BLANK: &str = "Body cannot be blank";
const ERR_BODY_TOO_LARGE: &str = "Body is too large";
const ERR_INVALID_DATE: &str = "Invalid Date";
const ERR_INVALID_TIME: &str = "Invalid Time";

/// Raw note form fields as submitted by the client.
///
/// Missing fields deserialize as empty strings, matching absent form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteForm {
    pub body: String,
    pub date: String,
    pub time: String,
    pub tags: String,
}

/// Cleaned values ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedNote {
    /// Body with surrounding whitespace trimmed.
    pub body: String,
    /// Combined date + time of day, normalized to UTC.
    pub date: DateTime<Utc>,
    /// Cleaned tag names; duplicates preserved at this layer.
    pub tags: Vec<String>,
}

/// Result of validating one form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(CleanedNote),
    Invalid(Vec<String>),
}

impl NoteForm {
    /// Runs every check and accumulates human-readable failure messages.
    ///
    /// # Contract
    /// - The blank check uses the trimmed body; the length check uses the
    ///   untrimmed original.
    /// - An empty time field defaults to midnight.
    /// - Both date and time are always checked, in that order.
    pub fn validate(&self) -> ValidationOutcome {
        let mut errors = Vec::new();

        let cleaned_body = self.body.trim();
        if cleaned_body.is_empty() {
            errors.push(ERR_BODY_BLANK.to_string());
        }
        if self.body.chars().count() > MAX_BODY_LENGTH {
            errors.push(ERR_BODY_TOO_LARGE.to_string());
        }

        let date = match parse_date(&self.date) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(ERR_INVALID_DATE.to_string());
                None
            }
        };
        let time = match parse_time(&self.time) {
            Ok(time) => Some(time),
            Err(_) => {
                errors.push(ERR_INVALID_TIME.to_string());
                None
            }
        };

        let tags = split_tags(&self.tags);

        if let (Some(date), Some(time)) = (date, time) {
            if errors.is_empty() {
                return ValidationOutcome::Valid(CleanedNote {
                    body: cleaned_body.to_string(),
                    date: combine(date, time),
                    tags,
                });
            }
        }

        ValidationOutcome::Invalid(errors)
    }

    /// Returns whether the form passes validation.
    pub fn is_valid(&self) -> bool {
        matches!(self.validate(), ValidationOutcome::Valid(_))
    }
}
