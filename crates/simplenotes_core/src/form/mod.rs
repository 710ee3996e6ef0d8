//! Note form validation and cleaning.
//!
//! # Responsibility
//! - Turn raw form fields into persistence-ready values.
//! - Accumulate every validation failure instead of stopping at the first.
//!
//! # Invariants
//! - Validation is pure: no I/O, no shared mutable state.
//! - A combined instant is only produced when both date and time parsed.

pub mod note_form;
pub mod tags;
pub mod timefmt;
