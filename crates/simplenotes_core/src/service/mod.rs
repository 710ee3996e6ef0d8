//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate form validation and repository calls into use-case APIs.
//! - Keep the HTTP layer decoupled from storage details.

pub mod note_service;
