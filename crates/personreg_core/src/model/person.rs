//! Person domain model and field validation.
//!
//! # Responsibility
//! - Define the canonical person record and its submittable field set.
//! - Validate candidate fields before any collision check or store write.
//!
//! # Invariants
//! - `id` is store-assigned, immutable and never reused after deletion.
//! - All five fields are non-empty at the moment a record is committed.
//! - `first_name`, `surname` and `city` contain only letters (including
//!   Latin-extended variants), apostrophes, hyphens and whitespace.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable store-assigned identifier for a person record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = i64;

// The exact character class carried over from the established registry rules:
// Latin letters plus the U+00C0..U+00FF accented range, apostrophe, hyphen
// and whitespace. Anything outside it makes a name/city value invalid.
static DISALLOWED_NAME_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-ZäöüÄÖÜßÀ-ÿ'\s-]").expect("valid name class regex"));

/// Field names reported by validation, in canonical submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonField {
    FirstName,
    Surname,
    Address,
    City,
    BirthDate,
}

impl PersonField {
    /// Stable wire/display name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::Surname => "surname",
            Self::Address => "address",
            Self::City => "city",
            Self::BirthDate => "birth_date",
        }
    }
}

impl Display for PersonField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failure naming every offending field.
///
/// Violations are collected, not short-circuited, so callers can mark all
/// invalid inputs in one pass and block submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolations {
    /// Offending fields in canonical submission order.
    pub fields: Vec<PersonField>,
}

impl FieldViolations {
    /// Returns whether `field` is among the reported violations.
    pub fn contains(&self, field: PersonField) -> bool {
        self.fields.contains(&field)
    }
}

impl Display for FieldViolations {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid person fields: ")?;
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl Error for FieldViolations {}

/// The submittable field set of a person record.
///
/// This is what a caller intends to write on create or update; it carries no
/// identity. `birth_date` holds an ISO-8601 calendar date as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFields {
    pub first_name: String,
    pub surname: String,
    pub address: String,
    pub city: String,
    pub birth_date: String,
}

impl PersonFields {
    /// Builds a field set from owned or borrowed string inputs.
    pub fn new(
        first_name: impl Into<String>,
        surname: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            surname: surname.into(),
            address: address.into(),
            city: city.into(),
            birth_date: birth_date.into(),
        }
    }

    /// Validates all fields independently and collects every violation.
    ///
    /// # Contract
    /// - `first_name`, `surname`, `city`: non-empty and within the allowed
    ///   character class.
    /// - `address`, `birth_date`: non-empty only.
    /// - Pure; the result depends on this value alone, never on the existing
    ///   record set.
    pub fn validate(&self) -> Result<(), FieldViolations> {
        let mut fields = Vec::new();

        if !is_valid_name(&self.first_name) {
            fields.push(PersonField::FirstName);
        }
        if !is_valid_name(&self.surname) {
            fields.push(PersonField::Surname);
        }
        if self.address.is_empty() {
            fields.push(PersonField::Address);
        }
        if !is_valid_name(&self.city) {
            fields.push(PersonField::City);
        }
        if self.birth_date.is_empty() {
            fields.push(PersonField::BirthDate);
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(FieldViolations { fields })
        }
    }
}

/// Canonical committed person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Stable store-assigned ID.
    pub id: PersonId,
    /// The record's current field values.
    #[serde(flatten)]
    pub fields: PersonFields,
}

impl PersonRecord {
    /// Builds a record from an assigned ID and committed field values.
    pub fn new(id: PersonId, fields: PersonFields) -> Self {
        Self { id, fields }
    }
}

fn is_valid_name(value: &str) -> bool {
    !value.is_empty() && !DISALLOWED_NAME_CHAR_RE.is_match(value)
}
