//! Error types for the innkeep library.
//!
//! This module provides the error hierarchy for all operations in the
//! innkeep library, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with an innkeep error.
///
/// # Examples
///
/// ```
/// use innkeep::{Error, Result};
///
/// fn example_operation() -> Result<i64> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the innkeep library.
///
/// This enum encompasses all error conditions that can occur while
/// operating on the reservation store. The boundary layer maps these onto
/// transport status codes: client-caused variants (see
/// [`Error::is_client_error`]) become 4xx responses, [`Error::NotFound`]
/// becomes 404, everything else a generic 500.
#[derive(Debug, Error)]
pub enum Error {
    /// A request field failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A partial update was requested with no recognized fields.
    ///
    /// An update that would touch zero columns is a client error, never a
    /// silent success; the record is left untouched.
    #[error("no update fields provided for {entity}")]
    NoFieldsProvided {
        /// The entity the empty update was aimed at.
        entity: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A foreign key reference pointed at a row that does not exist.
    ///
    /// Surfaces during booking creation when a `room_ids` entry is invalid,
    /// and from the association manager when either side of the pair is
    /// missing. Always triggers a full rollback of the enclosing
    /// transaction.
    #[error("referential integrity violation: {details}")]
    ForeignKey {
        /// Details about the failed reference.
        details: String,
    },

    /// Any other failure reported by the underlying store.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        // SQLite reports broken references as a constraint violation with
        // the FOREIGNKEY extended code; everything else stays a plain
        // database error.
        if let rusqlite::Error::SqliteFailure(failure, ref message) = err {
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY {
                return Self::ForeignKey {
                    details: message
                        .clone()
                        .unwrap_or_else(|| "FOREIGN KEY constraint failed".to_string()),
                };
            }
        }
        Self::Database(err)
    }
}

impl Error {
    /// Check if the error indicates a missing resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::Error;
    ///
    /// let err = Error::NotFound { resource: "booking 7".into() };
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error was caused by the client's request.
    ///
    /// Client-caused errors map to 4xx-class responses at the boundary,
    /// distinct from not-found and internal failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use innkeep::Error;
    ///
    /// let err = Error::NoFieldsProvided { entity: "hotels".into() };
    /// assert!(err.is_client_error());
    /// ```
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NoFieldsProvided { .. }
        )
    }

    /// Check if the error is a referential integrity violation.
    #[must_use]
    pub fn is_foreign_key(&self) -> bool {
        matches!(self, Self::ForeignKey { .. })
    }
}
