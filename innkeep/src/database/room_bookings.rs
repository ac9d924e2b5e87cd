//! Room-to-booking association manager.
//!
//! Associations are identified by the `(booking_id, room_id)` pair rather
//! than a surrogate id; the composite primary key also rejects duplicate
//! assignments of the same room to the same booking.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::model::RoomBooking;

use super::bookings::row_to_booking;
use super::connection::Database;
use super::schema::{DELETE_ROOM_BOOKING, INSERT_ROOM_BOOKING};
use super::views::{booked_rooms, CustomerBooking, RoomBookingHistory};

const BOOKINGS_FOR_ROOM: &str = r"
    SELECT b.id, b.customer_id, b.check_in_date, b.check_out_date,
           b.total_amount, b.status,
           rb.price, c.first_name, c.last_name, c.email
    FROM room_bookings rb
    JOIN bookings b ON b.id = rb.booking_id
    JOIN customers c ON c.id = b.customer_id
    WHERE rb.room_id = ?1
    ORDER BY b.check_in_date DESC, b.id DESC
";

const BOOKINGS_FOR_CUSTOMER: &str = r"
    SELECT id, customer_id, check_in_date, check_out_date, total_amount, status
    FROM bookings
    WHERE customer_id = ?1
    ORDER BY check_in_date DESC, id DESC
";

const SELECT_ROOM_BOOKING: &str = r"
    SELECT booking_id, room_id, price
    FROM room_bookings
    WHERE booking_id = ?1 AND room_id = ?2
";

/// Deserializes an association from a row in standard column order.
pub(super) fn row_to_room_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoomBooking> {
    Ok(RoomBooking {
        booking_id: row.get(0)?,
        room_id: row.get(1)?,
        price: row.get(2)?,
    })
}

impl Database {
    /// Assigns a room to an existing booking at the given nightly price.
    ///
    /// An omitted price snapshots as 0, matching the placeholder used by
    /// [`create_booking`](Database::create_booking).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ForeignKey`] if either the booking or the
    /// room does not exist, or a database error if the room is already
    /// assigned to this booking.
    pub fn assign_room_to_booking(
        &mut self,
        booking_id: i64,
        room_id: i64,
        price: Option<f64>,
    ) -> Result<RoomBooking> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_ROOM_BOOKING,
            params![booking_id, room_id, price.unwrap_or(0.0)],
        )?;
        let created = tx.query_row(
            SELECT_ROOM_BOOKING,
            params![booking_id, room_id],
            row_to_room_booking,
        )?;

        tx.commit()?;
        log::debug!("assigned room {room_id} to booking {booking_id}");
        Ok(created)
    }

    /// Removes a room from a booking, returning the removed association,
    /// or `Ok(None)` if no such association exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or the delete fails.
    pub fn remove_room_from_booking(
        &mut self,
        booking_id: i64,
        room_id: i64,
    ) -> Result<Option<RoomBooking>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = match tx.query_row(
            SELECT_ROOM_BOOKING,
            params![booking_id, room_id],
            row_to_room_booking,
        ) {
            Ok(association) => association,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        tx.execute(DELETE_ROOM_BOOKING, params![booking_id, room_id])?;
        tx.commit()?;
        Ok(Some(existing))
    }

    /// Lists every booking a room has appeared in, flat with the
    /// per-room price and customer contact, newest check-in first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn bookings_for_room(conn: &Connection, room_id: i64) -> Result<Vec<RoomBookingHistory>> {
        let mut stmt = conn.prepare(BOOKINGS_FOR_ROOM)?;
        let rows = stmt.query_map(params![room_id], |row| {
            Ok(RoomBookingHistory {
                booking: row_to_booking(row)?,
                price: row.get(6)?,
                first_name: row.get(7)?,
                last_name: row.get(8)?,
                email: row.get(9)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Lists a customer's bookings, each with its nested room list,
    /// newest check-in first. A roomless booking carries an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the queries fail.
    pub fn bookings_for_customer(
        conn: &Connection,
        customer_id: i64,
    ) -> Result<Vec<CustomerBooking>> {
        let headers = {
            let mut stmt = conn.prepare(BOOKINGS_FOR_CUSTOMER)?;
            let rows = stmt.query_map(params![customer_id], row_to_booking)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        };

        let mut result = Vec::with_capacity(headers.len());
        for booking in headers {
            let rooms = booked_rooms(conn, booking.id)?;
            result.push(CustomerBooking { booking, rooms });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{
        create_test_database, new_booking, new_customer, seed_room_setup,
    };

    #[test]
    fn test_assign_room_with_price() {
        let mut db = create_test_database();
        let (_, _, room) = seed_room_setup(&mut db);
        let customer = db.create_customer(&new_customer("ana@example.com")).unwrap();
        let booking = db.create_booking(&new_booking(customer.id, vec![])).unwrap();

        let association = db
            .assign_room_to_booking(booking.id, room.id, Some(140.0))
            .unwrap();

        assert_eq!(association.booking_id, booking.id);
        assert_eq!(association.room_id, room.id);
        assert_eq!(association.price, 140.0);
    }

    #[test]
    fn test_assign_room_price_defaults_to_zero() {
        let mut db = create_test_database();
        let (_, _, room) = seed_room_setup(&mut db);
        let customer = db.create_customer(&new_customer("ana@example.com")).unwrap();
        let booking = db.create_booking(&new_booking(customer.id, vec![])).unwrap();

        let association = db.assign_room_to_booking(booking.id, room.id, None).unwrap();
        assert_eq!(association.price, 0.0);
    }

    #[test]
    fn test_assign_room_missing_booking_rejected() {
        let mut db = create_test_database();
        let (_, _, room) = seed_room_setup(&mut db);

        let err = db.assign_room_to_booking(999, room.id, None).unwrap_err();
        assert!(err.is_foreign_key());
    }

    #[test]
    fn test_assign_room_missing_room_rejected() {
        let mut db = create_test_database();
        let customer = db.create_customer(&new_customer("ana@example.com")).unwrap();
        let booking = db.create_booking(&new_booking(customer.id, vec![])).unwrap();

        let err = db
            .assign_room_to_booking(booking.id, 999, None)
            .unwrap_err();
        assert!(err.is_foreign_key());
    }

    #[test]
    fn test_assign_room_twice_rejected() {
        let mut db = create_test_database();
        let (_, _, room) = seed_room_setup(&mut db);
        let customer = db.create_customer(&new_customer("ana@example.com")).unwrap();
        let booking = db
            .create_booking(&new_booking(customer.id, vec![room.id]))
            .unwrap();

        assert!(db
            .assign_room_to_booking(booking.id, room.id, Some(99.0))
            .is_err());
    }

    #[test]
    fn test_remove_room_returns_association() {
        let mut db = create_test_database();
        let (_, _, room) = seed_room_setup(&mut db);
        let customer = db.create_customer(&new_customer("ana@example.com")).unwrap();
        let booking = db.create_booking(&new_booking(customer.id, vec![])).unwrap();
        db.assign_room_to_booking(booking.id, room.id, Some(140.0))
            .unwrap();

        let removed = db
            .remove_room_from_booking(booking.id, room.id)
            .unwrap()
            .unwrap();
        assert_eq!(removed.price, 140.0);

        // A second removal finds nothing.
        assert!(db
            .remove_room_from_booking(booking.id, room.id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_remove_room_leaves_booking_intact() {
        let mut db = create_test_database();
        let (_, _, room) = seed_room_setup(&mut db);
        let customer = db.create_customer(&new_customer("ana@example.com")).unwrap();
        let booking = db
            .create_booking(&new_booking(customer.id, vec![room.id]))
            .unwrap();

        db.remove_room_from_booking(booking.id, room.id)
            .unwrap()
            .unwrap();

        let header = Database::get_booking(db.connection(), booking.id).unwrap();
        assert!(header.is_some());
    }

    #[test]
    fn test_bookings_for_room_history() {
        let mut db = create_test_database();
        let (_, _, room) = seed_room_setup(&mut db);
        let customer = db.create_customer(&new_customer("ana@example.com")).unwrap();
        let booking = db.create_booking(&new_booking(customer.id, vec![])).unwrap();
        db.assign_room_to_booking(booking.id, room.id, Some(140.0))
            .unwrap();

        let history = Database::bookings_for_room(db.connection(), room.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].booking.id, booking.id);
        assert_eq!(history[0].price, 140.0);
        assert_eq!(history[0].email, "ana@example.com");

        assert!(Database::bookings_for_room(db.connection(), 999)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_bookings_for_customer_nested_rooms() {
        let mut db = create_test_database();
        let (_, _, room) = seed_room_setup(&mut db);
        let customer = db.create_customer(&new_customer("ana@example.com")).unwrap();
        let with_room = db
            .create_booking(&new_booking(customer.id, vec![room.id]))
            .unwrap();
        let without = db.create_booking(&new_booking(customer.id, vec![])).unwrap();

        let bookings = Database::bookings_for_customer(db.connection(), customer.id).unwrap();
        assert_eq!(bookings.len(), 2);

        let attached = bookings
            .iter()
            .find(|b| b.booking.id == with_room.id)
            .unwrap();
        assert_eq!(attached.rooms.len(), 1);
        assert_eq!(attached.rooms[0].room_id, room.id);

        let bare = bookings.iter().find(|b| b.booking.id == without.id).unwrap();
        assert!(bare.rooms.is_empty());
    }
}
