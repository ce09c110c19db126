//! Registry submit/resolve workflow service.
//!
//! # Responsibility
//! - Drive every create/update submission through
//!   validate -> detect -> (await decision) -> commit.
//! - Reify the awaiting-decision state as an explicit [`PendingMerge`] value
//!   instead of ambient mutable state.
//!
//! # Invariants
//! - Invalid fields never reach the store.
//! - `NoChange` submissions issue zero store-mutation calls.
//! - The detector is not re-invoked on the keep-separate path, so a rejected
//!   conflict can never re-enter the decision loop.
//! - Dropping a [`PendingMerge`] abandons the workflow with no side effect.

use crate::dedup::find_duplicate;
use crate::model::person::{FieldViolations, PersonFields, PersonId, PersonRecord};
use crate::repo::person_repo::{PersonStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Correlation token tying one pending decision's log events together.
pub type MergeSessionId = Uuid;

/// Service error for submit-path failures.
#[derive(Debug)]
pub enum ServiceError {
    /// Update target does not exist in the store snapshot.
    NotFound(PersonId),
    /// Store collaborator failure, surfaced verbatim.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Where a pending candidate came from.
///
/// Decides what the merge path has to absorb: an update-flow candidate owns a
/// persisted record that must be deleted once its data lives under the
/// matched id; a create-flow candidate was never persisted, so accepting the
/// merge simply never creates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOrigin {
    /// Fresh submission; no record of its own exists yet.
    Create,
    /// Edit of the already-persisted record with this id.
    Update(PersonId),
}

/// Reified awaiting-decision state of the merge workflow.
///
/// Lives only in the caller's memory between a `DuplicateFound` outcome and
/// the explicit accept/reject decision. Dropping it abandons the submission
/// without any store mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMerge {
    /// Log-correlation token; has no behavioral role and is never persisted.
    pub session: MergeSessionId,
    /// The submitted field values awaiting commit.
    pub candidate: PersonFields,
    /// The matched existing record the candidate collides with.
    pub existing: PersonRecord,
    /// Create-flow or update-flow provenance of the candidate.
    pub origin: SubmitOrigin,
}

/// Outcome of a create submission.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Candidate committed as a new record.
    Committed(PersonRecord),
    /// One or more fields failed validation; nothing was written.
    ValidationFailed(FieldViolations),
    /// A near-duplicate exists; an explicit decision is required.
    DuplicateFound(PendingMerge),
}

/// Outcome of an update submission.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// Stored record replaced with the submitted values.
    Committed(PersonRecord),
    /// Submitted values equal the stored record; no mutation was issued.
    NoChange,
    /// One or more fields failed validation; nothing was written.
    ValidationFailed(FieldViolations),
    /// A near-duplicate exists; an explicit decision is required.
    DuplicateFound(PendingMerge),
}

/// Terminal state of a resolved merge decision.
#[derive(Debug)]
pub enum MergeOutcome {
    /// Exactly one record survives under the matched id, carrying the
    /// candidate's values.
    Merged(PersonRecord),
    /// Candidate committed under its own identity despite the match.
    KeptSeparate(PersonRecord),
}

/// Resolution failure, distinguishable per failed half.
///
/// The merge is two store calls with no atomicity guarantee; this error
/// records which half succeeded so callers can reconcile instead of seeing a
/// silent partial success.
#[derive(Debug)]
pub enum ResolveError {
    /// Updating the surviving record failed; no mutation was applied.
    MergeUpdate {
        target: PersonId,
        source: StoreError,
    },
    /// The survivor was updated but deleting the absorbed record failed; a
    /// stale record with the merged data still exists under `stale`.
    MergeDelete {
        survivor: PersonId,
        stale: PersonId,
        source: StoreError,
    },
    /// The keep-separate commit via the normal create/update path failed.
    Commit { source: StoreError },
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MergeUpdate { target, source } => {
                write!(f, "merge update of person {target} failed: {source}")
            }
            Self::MergeDelete {
                survivor,
                stale,
                source,
            } => write!(
                f,
                "merge into person {survivor} left stale person {stale} behind: {source}"
            ),
            Self::Commit { source } => write!(f, "keep-separate commit failed: {source}"),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MergeUpdate { source, .. }
            | Self::MergeDelete { source, .. }
            | Self::Commit { source } => Some(source),
        }
    }
}

/// Workflow service over a record store collaborator.
///
/// One writer per service instance; concurrent resolutions against the same
/// record pair are serialized by construction.
pub struct RegistryService<S: PersonStore> {
    store: S,
}

impl<S: PersonStore> RegistryService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Full registry snapshot in ascending id order.
    ///
    /// This is the caller-facing re-read after any mutation.
    pub fn list_persons(&self) -> ServiceResult<Vec<PersonRecord>> {
        Ok(self.store.list()?)
    }

    /// Submits a fresh candidate for creation.
    ///
    /// # Contract
    /// - Validation failures and duplicate hits block the commit; nothing is
    ///   written in either case.
    /// - With no collision, the candidate is created and returned with its
    ///   assigned id.
    pub fn submit_new(&self, fields: &PersonFields) -> ServiceResult<SubmitOutcome> {
        if let Err(violations) = fields.validate() {
            info!(
                "event=submit_new module=service status=validation_failed field_count={}",
                violations.fields.len()
            );
            return Ok(SubmitOutcome::ValidationFailed(violations));
        }

        let existing = self.store.list()?;
        if let Some(found) = find_duplicate(fields, &existing, None) {
            let pending = PendingMerge {
                session: Uuid::new_v4(),
                candidate: fields.clone(),
                existing: found.clone(),
                origin: SubmitOrigin::Create,
            };
            info!(
                "event=submit_new module=service status=duplicate_found session={} existing_id={}",
                pending.session, pending.existing.id
            );
            return Ok(SubmitOutcome::DuplicateFound(pending));
        }

        let record = self.store.create(fields)?;
        info!(
            "event=submit_new module=service status=committed person_id={}",
            record.id
        );
        Ok(SubmitOutcome::Committed(record))
    }

    /// Submits edited values for the record with the given id.
    ///
    /// # Contract
    /// - Values identical to the stored record short-circuit to `NoChange`
    ///   with zero store-mutation calls.
    /// - Duplicate detection excludes the record's own id, so a record never
    ///   collides with itself.
    pub fn submit_update(&self, id: PersonId, fields: &PersonFields) -> ServiceResult<UpdateOutcome> {
        if let Err(violations) = fields.validate() {
            info!(
                "event=submit_update module=service status=validation_failed person_id={id} field_count={}",
                violations.fields.len()
            );
            return Ok(UpdateOutcome::ValidationFailed(violations));
        }

        let existing = self.store.list()?;
        let stored = existing
            .iter()
            .find(|record| record.id == id)
            .ok_or(ServiceError::NotFound(id))?;

        if stored.fields == *fields {
            info!("event=submit_update module=service status=no_change person_id={id}");
            return Ok(UpdateOutcome::NoChange);
        }

        if let Some(found) = find_duplicate(fields, &existing, Some(id)) {
            let pending = PendingMerge {
                session: Uuid::new_v4(),
                candidate: fields.clone(),
                existing: found.clone(),
                origin: SubmitOrigin::Update(id),
            };
            info!(
                "event=submit_update module=service status=duplicate_found session={} person_id={id} existing_id={}",
                pending.session, pending.existing.id
            );
            return Ok(UpdateOutcome::DuplicateFound(pending));
        }

        self.store.update_by_id(id, fields)?;
        info!("event=submit_update module=service status=committed person_id={id}");
        Ok(UpdateOutcome::Committed(PersonRecord::new(id, fields.clone())))
    }

    /// Resolves a pending duplicate decision.
    ///
    /// `accept = true` merges the candidate into the matched record and
    /// absorbs the candidate's own identity; `accept = false` commits the
    /// candidate as-is, keeping both records.
    pub fn resolve_merge(
        &self,
        pending: PendingMerge,
        accept: bool,
    ) -> Result<MergeOutcome, ResolveError> {
        if accept {
            self.merge(pending)
        } else {
            self.keep_separate(pending)
        }
    }

    /// Inserts the well-known starter record when it is not present yet.
    ///
    /// Idempotent: returns `None` when a record with the seed values already
    /// exists.
    pub fn ensure_seed_person(&self) -> ServiceResult<Option<PersonRecord>> {
        let fields = seed_person_fields();
        let existing = self.store.list()?;
        if existing.iter().any(|record| record.fields == fields) {
            return Ok(None);
        }

        let record = self.store.create(&fields)?;
        info!(
            "event=seed_person module=service status=created person_id={}",
            record.id
        );
        Ok(Some(record))
    }

    fn merge(&self, pending: PendingMerge) -> Result<MergeOutcome, ResolveError> {
        let survivor = pending.existing.id;

        // First half: the matched record takes over the candidate's values.
        self.store
            .update_by_id(survivor, &pending.candidate)
            .map_err(|source| {
                warn!(
                    "event=merge_resolve module=service status=error session={} phase=update target={survivor} error={source}",
                    pending.session
                );
                ResolveError::MergeUpdate {
                    target: survivor,
                    source,
                }
            })?;

        // Second half, update-flow only: the candidate's prior identity is
        // absorbed. A failure here leaves two records carrying the merged
        // data, which must surface as a partial state, never as success.
        if let SubmitOrigin::Update(absorbed) = pending.origin {
            self.store.delete_by_id(absorbed).map_err(|source| {
                warn!(
                    "event=merge_resolve module=service status=error session={} phase=delete survivor={survivor} stale={absorbed} error={source}",
                    pending.session
                );
                ResolveError::MergeDelete {
                    survivor,
                    stale: absorbed,
                    source,
                }
            })?;
        }

        info!(
            "event=merge_resolve module=service status=merged session={} survivor={survivor}",
            pending.session
        );
        Ok(MergeOutcome::Merged(PersonRecord::new(
            survivor,
            pending.candidate,
        )))
    }

    fn keep_separate(&self, pending: PendingMerge) -> Result<MergeOutcome, ResolveError> {
        // Commit through the normal path with the detector not re-invoked;
        // re-checking here would loop the caller back into the same decision.
        let record = match pending.origin {
            SubmitOrigin::Create => self
                .store
                .create(&pending.candidate)
                .map_err(|source| ResolveError::Commit { source })?,
            SubmitOrigin::Update(id) => {
                self.store
                    .update_by_id(id, &pending.candidate)
                    .map_err(|source| ResolveError::Commit { source })?;
                PersonRecord::new(id, pending.candidate.clone())
            }
        };

        info!(
            "event=merge_resolve module=service status=kept_separate session={} person_id={}",
            pending.session, record.id
        );
        Ok(MergeOutcome::KeptSeparate(record))
    }
}

/// Field values of the well-known starter record.
pub fn seed_person_fields() -> PersonFields {
    PersonFields::new(
        "Eugenie",
        "Giesbrecht",
        "Paulinenstr. 50",
        "Stuttgart",
        "2025-02-16",
    )
}
