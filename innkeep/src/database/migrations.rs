//! Database schema management and migrations.
//!
//! This module handles schema initialization, version checking, and the
//! compatibility gate applied on every open.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_BOOKINGS_TABLE, CREATE_CUSTOMERS_TABLE, CREATE_HOTELS_TABLE, CREATE_INDICES,
    CREATE_METADATA_TABLE, CREATE_PAYMENTS_TABLE, CREATE_REVIEWS_TABLE,
    CREATE_ROOMS_TABLE, CREATE_ROOM_BOOKINGS_TABLE, CREATE_ROOM_TYPES_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, and metadata for a fresh database.
/// Parent tables are created before the tables that reference them.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```no_run
/// use rusqlite::Connection;
/// use innkeep::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;

    conn.execute(CREATE_HOTELS_TABLE, [])?;
    conn.execute(CREATE_ROOM_TYPES_TABLE, [])?;
    conn.execute(CREATE_ROOMS_TABLE, [])?;
    conn.execute(CREATE_CUSTOMERS_TABLE, [])?;
    conn.execute(CREATE_BOOKINGS_TABLE, [])?;
    conn.execute(CREATE_ROOM_BOOKINGS_TABLE, [])?;
    conn.execute(CREATE_PAYMENTS_TABLE, [])?;
    conn.execute(CREATE_REVIEWS_TABLE, [])?;

    for index in CREATE_INDICES {
        conn.execute(index, [])?;
    }

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    log::debug!("initialized schema at version {CURRENT_SCHEMA_VERSION}");
    Ok(())
}

/// Gets the current schema version from the database.
///
/// # Errors
///
/// Returns an error if the query fails for reasons other than a missing
/// metadata table or row (both of which indicate version 0).
///
/// # Returns
///
/// - `Ok(0)` if the metadata table doesn't exist or has no version
/// - `Ok(version)` if a version is found
/// - `Err(_)` if a database error occurs
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            // Database exists but no schema - needs initialization
            Ok(0)
        }
        Err(e) => {
            // Check if it's a "no such table" error
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes if needed.
///
/// A version of 0 triggers initialization; a version newer than
/// [`CURRENT_SCHEMA_VERSION`] means the client is too old; an older
/// version would require a migration this library does not ship yet.
///
/// # Errors
///
/// Returns an error if the schema version is incompatible, or if
/// initialization or the version query fails.
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        // Fresh database, initialize it
        initialize_schema(conn)?;
        return Ok(());
    }

    if version > CURRENT_SCHEMA_VERSION {
        return Err(Error::DatabaseCorruption {
            details: format!(
                "schema version {version} is newer than client version {CURRENT_SCHEMA_VERSION}"
            ),
        });
    }

    if version < CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
