//! Core domain logic for the person registry.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod dedup;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use dedup::find_duplicate;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::person::{FieldViolations, PersonField, PersonFields, PersonId, PersonRecord};
pub use repo::person_repo::{PersonStore, SqlitePersonStore, StoreError, StoreResult};
pub use service::registry_service::{
    seed_person_fields, MergeOutcome, MergeSessionId, PendingMerge, RegistryService, ResolveError,
    ServiceError, ServiceResult, SubmitOrigin, SubmitOutcome, UpdateOutcome,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
