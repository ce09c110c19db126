//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, duplicate detection and store calls into the
//!   caller-facing submit/resolve workflow.
//! - Keep UI/transport layers decoupled from storage details.

pub mod registry_service;
