//! Duplicate detection over a registry snapshot.
//!
//! # Responsibility
//! - Decide whether submitted person data collides with an existing record
//!   representing the same individual.
//!
//! # See also
//! - `service::registry_service` for how a hit enters the merge workflow.

mod detector;

pub use detector::find_duplicate;
