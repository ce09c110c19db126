//! Person store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the four-operation record store the merge workflow consumes.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `PersonFields::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `list` ordering is ascending `person_id`, so duplicate detection over a
//!   snapshot is deterministic.

use crate::db::DbError;
use crate::model::person::{FieldViolations, PersonFields, PersonId, PersonRecord};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PERSON_SELECT_SQL: &str = "SELECT
    person_id,
    first_name,
    surname,
    address,
    city,
    birth_date
FROM persons";

const REQUIRED_COLUMNS: &[&str] = &[
    "person_id",
    "first_name",
    "surname",
    "address",
    "city",
    "birth_date",
];

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for person persistence operations.
#[derive(Debug)]
pub enum StoreError {
    Validation(FieldViolations),
    Db(DbError),
    NotFound(PersonId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "person not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted person data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldViolations> for StoreError {
    fn from(value: FieldViolations) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Minimal record store contract consumed by the merge workflow.
///
/// Implementations own id assignment. `create` must never reuse an id that
/// belonged to a deleted record.
pub trait PersonStore {
    /// Full snapshot of live records in ascending id order.
    fn list(&self) -> StoreResult<Vec<PersonRecord>>;
    /// Persists a new record and returns it with its assigned id.
    fn create(&self, fields: &PersonFields) -> StoreResult<PersonRecord>;
    /// Replaces the stored field values of the record with the given id.
    fn update_by_id(&self, id: PersonId, fields: &PersonFields) -> StoreResult<()>;
    /// Removes the record with the given id. Deletion is final.
    fn delete_by_id(&self, id: PersonId) -> StoreResult<()>;
}

/// SQLite-backed person store.
pub struct SqlitePersonStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonStore<'conn> {
    /// Wraps a migrated connection after verifying schema readiness.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match the
    ///   version this binary expects.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the persons
    ///   schema is absent or incomplete.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        verify_schema(conn)?;
        Ok(Self { conn })
    }
}

impl PersonStore for SqlitePersonStore<'_> {
    fn list(&self) -> StoreResult<Vec<PersonRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} ORDER BY person_id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            persons.push(parse_person_row(row)?);
        }

        Ok(persons)
    }

    fn create(&self, fields: &PersonFields) -> StoreResult<PersonRecord> {
        fields.validate()?;

        self.conn.execute(
            "INSERT INTO persons (first_name, surname, address, city, birth_date)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                fields.first_name.as_str(),
                fields.surname.as_str(),
                fields.address.as_str(),
                fields.city.as_str(),
                fields.birth_date.as_str(),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        Ok(PersonRecord::new(id, fields.clone()))
    }

    fn update_by_id(&self, id: PersonId, fields: &PersonFields) -> StoreResult<()> {
        fields.validate()?;

        let changed = self.conn.execute(
            "UPDATE persons
             SET
                first_name = ?1,
                surname = ?2,
                address = ?3,
                city = ?4,
                birth_date = ?5
             WHERE person_id = ?6;",
            params![
                fields.first_name.as_str(),
                fields.surname.as_str(),
                fields.address.as_str(),
                fields.city.as_str(),
                fields.birth_date.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    fn delete_by_id(&self, id: PersonId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM persons WHERE person_id = ?1;", params![id])?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_person_row(row: &Row<'_>) -> StoreResult<PersonRecord> {
    let id: PersonId = row.get("person_id")?;
    let fields = PersonFields {
        first_name: row.get("first_name")?,
        surname: row.get("surname")?,
        address: row.get("address")?,
        city: row.get("city")?,
        birth_date: row.get("birth_date")?,
    };
    fields.validate()?;
    Ok(PersonRecord::new(id, fields))
}

fn verify_schema(conn: &Connection) -> StoreResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'persons'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(StoreError::MissingRequiredTable("persons"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('persons');")?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(0)?);
    }
    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|column| column == required) {
            return Err(StoreError::MissingRequiredColumn {
                table: "persons",
                column: required,
            });
        }
    }

    Ok(())
}
