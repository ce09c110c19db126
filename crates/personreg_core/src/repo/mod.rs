//! Record store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the minimal store contract the workflow consumes
//!   (list / create / update-by-id / delete-by-id).
//! - Isolate SQLite query details from workflow orchestration.
//!
//! # Invariants
//! - Store writes must enforce `PersonFields::validate()` before persistence.
//! - Store APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod person_repo;
