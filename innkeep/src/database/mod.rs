//! Database layer for the hotel inventory and reservation store.
//!
//! This module provides a `SQLite`-based storage layer: connection
//! management, schema versioning, per-entity CRUD repositories, the
//! transactional booking manager, the room-booking association manager,
//! and the relational read views.
//!
//! Writes are methods on [`Database`] (they open transactions and need
//! exclusive access); reads are associated functions taking a
//! [`rusqlite::Connection`], usually obtained via
//! [`Database::connection`].
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::database::{Database, DatabaseConfig};
//! use innkeep::model::{NewBooking, NewCustomer};
//! use chrono::NaiveDate;
//!
//! let config = DatabaseConfig::new("/tmp/innkeep.db");
//! let mut db = Database::open(config).unwrap();
//!
//! let customer = db
//!     .create_customer(&NewCustomer {
//!         first_name: "Ana".into(),
//!         last_name: "Li".into(),
//!         email: "a@x.com".into(),
//!         phone: None,
//!         address: None,
//!     })
//!     .unwrap();
//!
//! let booking = db
//!     .create_booking(&NewBooking {
//!         customer_id: customer.id,
//!         check_in_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
//!         check_out_date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
//!         total_amount: None,
//!         status: None,
//!         room_ids: vec![],
//!     })
//!     .unwrap();
//!
//! let detail = Database::booking_detail(db.connection(), booking.id)
//!     .unwrap()
//!     .unwrap();
//! assert!(detail.rooms.is_empty());
//! ```

mod bookings;
mod config;
mod connection;
mod customers;
mod hotels;
pub mod migrations;
mod payments;
mod reviews;
mod room_bookings;
mod room_types;
mod rooms;
mod schema;
pub mod views;

#[cfg(test)]
pub(crate) mod test_util;

// Re-export public API
pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::Database;

// Re-export migration functions for advanced use cases
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};

use chrono::NaiveDate;

/// Converts a date to its ISO-8601 text representation for storage.
pub(crate) fn date_to_sql(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a stored ISO-8601 date column.
pub(crate) fn date_from_sql(idx: usize, text: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let text = date_to_sql(date);
        assert_eq!(text, "2024-05-01");
        assert_eq!(date_from_sql(0, &text).unwrap(), date);
    }

    #[test]
    fn test_date_from_sql_rejects_garbage() {
        assert!(date_from_sql(0, "not-a-date").is_err());
    }
}
