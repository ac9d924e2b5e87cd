//! Partial-update machinery shared by every entity repository.
//!
//! Update requests carry a sparse set of fields: a field absent from the
//! request is left untouched, a field explicitly set to `null` is written
//! as NULL, and a field with a value is overwritten. [`Patch`] captures
//! that tri-state per field and [`UpdateSet`] turns a collection of
//! provided fields into a single positional-parameter UPDATE statement.
//!
//! Column names always come from fixed per-entity allow-lists hard-coded
//! at the call sites; caller input never reaches the SQL text.

use rusqlite::types::Null;
use rusqlite::{Connection, ToSql};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// A single field of a partial-update request.
///
/// # Examples
///
/// ```
/// use innkeep::Patch;
///
/// let keep: Patch<String> = Patch::Keep;
/// let clear: Patch<String> = Patch::Clear;
/// let set = Patch::Set("confirmed".to_string());
///
/// assert!(!keep.is_provided());
/// assert!(clear.is_provided());
/// assert!(set.is_provided());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not part of the request; leave the column untouched.
    Keep,
    /// The field was explicitly provided as null; write NULL.
    Clear,
    /// The field was provided with a value; write it.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns true if the field was intentionally provided (`Clear` or
    /// `Set`).
    pub const fn is_provided(&self) -> bool {
        !matches!(self, Self::Keep)
    }

    /// Maps the contained value, preserving `Keep` and `Clear`.
    ///
    /// Used at repository call sites to convert domain values into their
    /// stored representation (for example dates into ISO-8601 text).
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Keep => Patch::Keep,
            Self::Clear => Patch::Clear,
            Self::Set(value) => Patch::Set(f(value)),
        }
    }
}

// Keep carries no data, so Default needs no bound on T.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

// A missing key deserializes via Default (Keep), so present-but-null and
// absent are distinguishable: null becomes Clear, a value becomes Set.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        })
    }
}

/// An ordered set of column assignments for one entity update.
///
/// Collects the provided fields of a patch and renders them into
/// `UPDATE <table> SET c1 = ?1, c2 = ?2 WHERE id = ?n`, with the row
/// identifier as the final positional parameter. Applying an empty set is
/// a client error ([`Error::NoFieldsProvided`]), not a no-op write.
///
/// # Examples
///
/// ```
/// use innkeep::{Patch, UpdateSet};
///
/// let mut set = UpdateSet::new("hotels");
/// set.push("name", Patch::Set("Grand Hotel".to_string()));
/// set.push("rating", Patch::<f64>::Clear);
/// set.push("description", Patch::<String>::Keep);
/// assert_eq!(set.len(), 2);
/// ```
pub struct UpdateSet {
    table: &'static str,
    columns: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl UpdateSet {
    /// Creates an empty update set for the given table.
    #[must_use]
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Records one field of a patch.
    ///
    /// `Keep` fields are skipped; `Clear` binds NULL; `Set` binds the
    /// value. The column name must come from the entity's allow-list.
    pub fn push<T: ToSql + 'static>(&mut self, column: &'static str, patch: Patch<T>) -> &mut Self {
        match patch {
            Patch::Keep => {}
            Patch::Clear => {
                self.columns.push(column);
                self.values.push(Box::new(Null));
            }
            Patch::Set(value) => {
                self.columns.push(column);
                self.values.push(Box::new(value));
            }
        }
        self
    }

    /// Returns the number of provided fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if no fields were provided.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Executes the update against the given connection.
    ///
    /// Returns the number of rows affected; zero means the identifier did
    /// not match any row and nothing was written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoFieldsProvided`] if no fields were recorded, or
    /// a database error if the statement fails.
    pub fn apply(&self, conn: &Connection, id: i64) -> Result<usize> {
        if self.is_empty() {
            return Err(Error::NoFieldsProvided {
                entity: self.table.to_string(),
            });
        }

        let assignments = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ?{}", i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{}",
            self.table,
            self.columns.len() + 1
        );

        let mut params: Vec<&dyn ToSql> = self.values.iter().map(AsRef::as_ref).collect();
        params.push(&id);

        Ok(conn.execute(&sql, params.as_slice())?)
    }
}

impl std::fmt::Debug for UpdateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateSet")
            .field("table", &self.table)
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}
