//! Booking transaction manager.
//!
//! Booking creation is the one multi-statement write in the store: the
//! header insert and the initial room associations must land together or
//! not at all. Everything here runs on a single borrowed transaction with
//! IMMEDIATE behavior; an error on any statement propagates out and the
//! dropped transaction rolls the whole unit back, so no partial booking
//! and no orphan association can persist.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::model::{Booking, BookingPatch, NewBooking, DEFAULT_BOOKING_STATUS};
use crate::update::UpdateSet;

use super::schema::INSERT_ROOM_BOOKING;
use super::{date_from_sql, date_to_sql};
use super::connection::Database;

const SELECT_BOOKING: &str = r"
    SELECT id, customer_id, check_in_date, check_out_date, total_amount, status
    FROM bookings
    WHERE id = ?1
";

const INSERT_BOOKING: &str = r"
    INSERT INTO bookings (customer_id, check_in_date, check_out_date, total_amount, status)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const DELETE_BOOKING: &str = "DELETE FROM bookings WHERE id = ?1";

// The schema also cascades these; the explicit deletes keep the cleanup
// inside the same transaction regardless of pragma state.
const DELETE_BOOKING_PAYMENTS: &str = "DELETE FROM payments WHERE booking_id = ?1";
const DELETE_BOOKING_ASSOCIATIONS: &str = "DELETE FROM room_bookings WHERE booking_id = ?1";

/// Deserializes a booking header from a row in standard column order.
pub(super) fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
    let check_in: String = row.get(2)?;
    let check_out: String = row.get(3)?;
    Ok(Booking {
        id: row.get(0)?,
        customer_id: row.get(1)?,
        check_in_date: date_from_sql(2, &check_in)?,
        check_out_date: date_from_sql(3, &check_out)?,
        total_amount: row.get(4)?,
        status: row.get(5)?,
    })
}

impl Database {
    /// Creates a booking together with its initial room associations as
    /// one atomic unit.
    ///
    /// Inserts the header (total defaults to 0, status to
    /// [`DEFAULT_BOOKING_STATUS`]), then one association per entry of
    /// `room_ids` with a placeholder price of 0. Real per-room prices are
    /// set afterwards through
    /// [`assign_room_to_booking`](Database::assign_room_to_booking).
    ///
    /// Returns the created header only; callers wanting the nested room
    /// list read it back through
    /// [`booking_detail`](Database::booking_detail).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ForeignKey`] if the customer or any room
    /// id does not exist; in that case nothing persists. Any other store
    /// failure likewise rolls back the entire unit.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::database::{Database, DatabaseConfig};
    /// use innkeep::model::NewBooking;
    /// use chrono::NaiveDate;
    ///
    /// let config = DatabaseConfig::new("/tmp/innkeep.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let booking = db
    ///     .create_booking(&NewBooking {
    ///         customer_id: 1,
    ///         check_in_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    ///         check_out_date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
    ///         total_amount: None,
    ///         status: None,
    ///         room_ids: vec![4, 5],
    ///     })
    ///     .unwrap();
    /// assert_eq!(booking.status, "pending");
    /// ```
    pub fn create_booking(&mut self, booking: &NewBooking) -> Result<Booking> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_BOOKING,
            params![
                booking.customer_id,
                date_to_sql(booking.check_in_date),
                date_to_sql(booking.check_out_date),
                booking.total_amount.unwrap_or(0.0),
                booking.status.as_deref().unwrap_or(DEFAULT_BOOKING_STATUS),
            ],
        )?;
        let id = tx.last_insert_rowid();

        {
            let mut stmt = tx.prepare(INSERT_ROOM_BOOKING)?;
            for room_id in &booking.room_ids {
                // Placeholder price; set later via the association manager.
                stmt.execute(params![id, room_id, 0.0])?;
            }
        }

        let created = tx.query_row(SELECT_BOOKING, params![id], row_to_booking)?;
        tx.commit()?;

        log::debug!(
            "created booking {id} with {} room association(s)",
            booking.room_ids.len()
        );
        Ok(created)
    }

    /// Retrieves a booking header by id, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_booking(conn: &Connection, id: i64) -> Result<Option<Booking>> {
        match conn.query_row(SELECT_BOOKING, params![id], row_to_booking) {
            Ok(booking) => Ok(Some(booking)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies a partial update to a booking header.
    ///
    /// Room associations are never mutated through this path; the patch
    /// type only admits header fields.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoFieldsProvided`] if the patch is empty,
    /// or a database error if the update fails.
    pub fn update_booking(&mut self, id: i64, patch: &BookingPatch) -> Result<Option<Booking>> {
        let mut set = UpdateSet::new("bookings");
        set.push("customer_id", patch.customer_id.clone())
            .push("check_in_date", patch.check_in_date.clone().map(date_to_sql))
            .push(
                "check_out_date",
                patch.check_out_date.clone().map(date_to_sql),
            )
            .push("total_amount", patch.total_amount.clone())
            .push("status", patch.status.clone());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if set.apply(&tx, id)? == 0 {
            return Ok(None);
        }
        let updated = tx.query_row(SELECT_BOOKING, params![id], row_to_booking)?;

        tx.commit()?;
        Ok(Some(updated))
    }

    /// Deletes a booking as one atomic unit, returning the deleted header.
    ///
    /// Payments and room associations owned by the booking are deleted in
    /// the same transaction, so no orphan rows survive.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or any delete fails; on error
    /// nothing is removed.
    pub fn delete_booking(&mut self, id: i64) -> Result<Option<Booking>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = match tx.query_row(SELECT_BOOKING, params![id], row_to_booking) {
            Ok(booking) => booking,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        tx.execute(DELETE_BOOKING_PAYMENTS, params![id])?;
        tx.execute(DELETE_BOOKING_ASSOCIATIONS, params![id])?;
        tx.execute(DELETE_BOOKING, params![id])?;

        tx.commit()?;
        log::debug!("deleted booking {id} and its dependent rows");
        Ok(Some(existing))
    }
}
