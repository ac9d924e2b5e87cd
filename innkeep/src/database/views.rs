//! Relational read aggregator.
//!
//! Detail and list views over the entity tables. Every view here is a
//! read: all functions are associated and borrow a [`Connection`], never
//! the database wrapper. Detail views join the row's relations into one
//! record; list views stay flat, denormalizing only scalar lookup
//! columns so a listing never carries a nested payload per row.
//!
//! The one nested read is [`Database::booking_detail`], which runs a
//! keyed header query plus a separate child query for the room list. A
//! booking with no rooms therefore yields a genuinely empty vector.

use rusqlite::{params, Connection};
use serde::Serialize;

use crate::error::Result;
use crate::model::{Booking, Payment, Review, Room, RoomType};

use super::bookings::row_to_booking;
use super::connection::Database;
use super::payments::row_to_payment;
use super::reviews::row_to_review;
use super::rooms::row_to_room;
use super::room_types::row_to_room_type;

/// One room within a booking's nested room list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookedRoom {
    /// The room's identifier.
    pub room_id: i64,
    /// The room's door number.
    pub room_number: String,
    /// Category name, if the room has one.
    pub type_name: Option<String>,
    /// Price snapshot from the association.
    pub price: f64,
}

/// A booking with its customer contact and nested room list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDetail {
    /// The booking header.
    #[serde(flatten)]
    pub booking: Booking,
    /// Customer given name.
    pub first_name: String,
    /// Customer family name.
    pub last_name: String,
    /// Customer email.
    pub email: String,
    /// Customer phone, if recorded.
    pub phone: Option<String>,
    /// Rooms attached to the booking, in room-id order. Empty when the
    /// booking has no associations.
    pub rooms: Vec<BookedRoom>,
}

/// One row of the booking listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSummary {
    /// The booking header.
    #[serde(flatten)]
    pub booking: Booking,
    /// Customer given name.
    pub first_name: String,
    /// Customer family name.
    pub last_name: String,
    /// Number of rooms attached to the booking.
    pub room_count: i64,
}

/// A room with its category and hotel context.
///
/// The category columns are optional because a room may have no
/// category; the hotel columns are not, since every room has a hotel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomDetail {
    /// The room record.
    #[serde(flatten)]
    pub room: Room,
    /// Category name, if assigned.
    pub type_name: Option<String>,
    /// Category description, if assigned and described.
    pub type_description: Option<String>,
    /// Category base price, if assigned.
    pub base_price: Option<f64>,
    /// Owning hotel's name.
    pub hotel_name: String,
    /// Owning hotel's location.
    pub hotel_location: String,
}

/// One row of the room listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummary {
    /// The room record.
    #[serde(flatten)]
    pub room: Room,
    /// Category name, if assigned.
    pub type_name: Option<String>,
    /// Category base price, if assigned.
    pub base_price: Option<f64>,
    /// Owning hotel's name.
    pub hotel_name: String,
}

/// One row of the room-type listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomTypeSummary {
    /// The category record.
    #[serde(flatten)]
    pub room_type: RoomType,
    /// Owning hotel's name.
    pub hotel_name: String,
}

/// A payment with its booking and customer context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentDetail {
    /// The payment record.
    #[serde(flatten)]
    pub payment: Payment,
    /// The paid booking's arrival date, ISO formatted.
    pub check_in_date: String,
    /// The paid booking's departure date, ISO formatted.
    pub check_out_date: String,
    /// The paid booking's total.
    pub total_amount: f64,
    /// Customer given name.
    pub first_name: String,
    /// Customer family name.
    pub last_name: String,
    /// Customer email.
    pub email: String,
}

/// One row of the review listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    /// The review record.
    #[serde(flatten)]
    pub review: Review,
    /// Reviewed room's door number.
    pub room_number: String,
    /// Reviewer given name.
    pub first_name: String,
    /// Reviewer family name.
    pub last_name: String,
}

/// A review with its full room, hotel, and customer context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewDetail {
    /// The review record.
    #[serde(flatten)]
    pub review: Review,
    /// Reviewed room's door number.
    pub room_number: String,
    /// Reviewed room's category name, if assigned.
    pub type_name: Option<String>,
    /// Hotel the room belongs to.
    pub hotel_name: String,
    /// Reviewer given name.
    pub first_name: String,
    /// Reviewer family name.
    pub last_name: String,
    /// Reviewer email.
    pub email: String,
}

/// One booking in a room's history, flat with customer contact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomBookingHistory {
    /// The booking header.
    #[serde(flatten)]
    pub booking: Booking,
    /// Price snapshot for this room within the booking.
    pub price: f64,
    /// Customer given name.
    pub first_name: String,
    /// Customer family name.
    pub last_name: String,
    /// Customer email.
    pub email: String,
}

/// One booking in a customer's history, with its nested room list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerBooking {
    /// The booking header.
    #[serde(flatten)]
    pub booking: Booking,
    /// Rooms attached to the booking, in room-id order.
    pub rooms: Vec<BookedRoom>,
}

const SELECT_BOOKING_DETAIL: &str = r"
    SELECT b.id, b.customer_id, b.check_in_date, b.check_out_date,
           b.total_amount, b.status,
           c.first_name, c.last_name, c.email, c.phone
    FROM bookings b
    JOIN customers c ON c.id = b.customer_id
    WHERE b.id = ?1
";

const SELECT_BOOKED_ROOMS: &str = r"
    SELECT rb.room_id, r.room_number, rt.type_name, rb.price
    FROM room_bookings rb
    JOIN rooms r ON r.id = rb.room_id
    LEFT JOIN room_types rt ON rt.id = r.room_type_id
    WHERE rb.booking_id = ?1
    ORDER BY rb.room_id
";

const LIST_BOOKINGS: &str = r"
    SELECT b.id, b.customer_id, b.check_in_date, b.check_out_date,
           b.total_amount, b.status,
           c.first_name, c.last_name,
           (SELECT COUNT(*) FROM room_bookings rb WHERE rb.booking_id = b.id)
    FROM bookings b
    JOIN customers c ON c.id = b.customer_id
    ORDER BY b.check_in_date DESC, b.id DESC
";

const SELECT_ROOM_DETAIL: &str = r"
    SELECT r.id, r.hotel_id, r.room_type_id, r.room_number, r.floor, r.status,
           rt.type_name, rt.description, rt.base_price,
           h.name, h.location
    FROM rooms r
    JOIN hotels h ON h.id = r.hotel_id
    LEFT JOIN room_types rt ON rt.id = r.room_type_id
    WHERE r.id = ?1
";

const LIST_ROOMS: &str = r"
    SELECT r.id, r.hotel_id, r.room_type_id, r.room_number, r.floor, r.status,
           rt.type_name, rt.base_price, h.name
    FROM rooms r
    JOIN hotels h ON h.id = r.hotel_id
    LEFT JOIN room_types rt ON rt.id = r.room_type_id
    ORDER BY r.id
";

const LIST_ROOM_TYPES: &str = r"
    SELECT rt.id, rt.hotel_id, rt.type_name, rt.description, rt.base_price,
           h.name
    FROM room_types rt
    JOIN hotels h ON h.id = rt.hotel_id
    ORDER BY rt.id
";

const PAYMENT_DETAIL_COLUMNS: &str = r"
    SELECT p.id, p.booking_id, p.amount, p.payment_method, p.status,
           p.payment_date,
           b.check_in_date, b.check_out_date, b.total_amount,
           c.first_name, c.last_name, c.email
    FROM payments p
    JOIN bookings b ON b.id = p.booking_id
    JOIN customers c ON c.id = b.customer_id
";

const SELECT_BOOKING_FOR_PAYMENT: &str = r"
    SELECT b.id, b.customer_id, b.check_in_date, b.check_out_date,
           b.total_amount, b.status
    FROM payments p
    JOIN bookings b ON b.id = p.booking_id
    WHERE p.id = ?1
";

const REVIEW_DETAIL_COLUMNS: &str = r"
    SELECT rv.id, rv.room_id, rv.customer_id, rv.rating, rv.comment,
           rv.created_at,
           r.room_number, rt.type_name, h.name,
           c.first_name, c.last_name, c.email
    FROM reviews rv
    JOIN rooms r ON r.id = rv.room_id
    JOIN hotels h ON h.id = r.hotel_id
    LEFT JOIN room_types rt ON rt.id = r.room_type_id
    JOIN customers c ON c.id = rv.customer_id
";

const LIST_REVIEWS: &str = r"
    SELECT rv.id, rv.room_id, rv.customer_id, rv.rating, rv.comment,
           rv.created_at,
           r.room_number, c.first_name, c.last_name
    FROM reviews rv
    JOIN rooms r ON r.id = rv.room_id
    JOIN customers c ON c.id = rv.customer_id
    ORDER BY rv.created_at DESC, rv.id DESC
";

fn row_to_payment_detail(row: &rusqlite::Row<'_>) -> rusqlite::Result<PaymentDetail> {
    Ok(PaymentDetail {
        payment: row_to_payment(row)?,
        check_in_date: row.get(6)?,
        check_out_date: row.get(7)?,
        total_amount: row.get(8)?,
        first_name: row.get(9)?,
        last_name: row.get(10)?,
        email: row.get(11)?,
    })
}

/// Loads the ordered room list for one booking. Shared with the
/// association manager's per-customer history view.
pub(super) fn booked_rooms(conn: &Connection, booking_id: i64) -> Result<Vec<BookedRoom>> {
    let mut stmt = conn.prepare(SELECT_BOOKED_ROOMS)?;
    let rows = stmt.query_map(params![booking_id], |row| {
        Ok(BookedRoom {
            room_id: row.get(0)?,
            room_number: row.get(1)?,
            type_name: row.get(2)?,
            price: row.get(3)?,
        })
    })?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

impl Database {
    /// Retrieves a booking with its customer contact and nested room
    /// list, or `Ok(None)` if the booking does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if either query fails (other than "not found").
    pub fn booking_detail(conn: &Connection, id: i64) -> Result<Option<BookingDetail>> {
        let header = conn.query_row(SELECT_BOOKING_DETAIL, params![id], |row| {
            Ok((
                row_to_booking(row)?,
                row.get::<_, String>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, String>(8)?,
                row.get::<_, Option<String>>(9)?,
            ))
        });
        let (booking, first_name, last_name, email, phone) = match header {
            Ok(fields) => fields,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let rooms = booked_rooms(conn, id)?;
        Ok(Some(BookingDetail {
            booking,
            first_name,
            last_name,
            email,
            phone,
            rooms,
        }))
    }

    /// Lists all bookings with customer names and the attached-room
    /// count per row, newest check-in first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_bookings(conn: &Connection) -> Result<Vec<BookingSummary>> {
        let mut stmt = conn.prepare(LIST_BOOKINGS)?;
        let rows = stmt.query_map([], |row| {
            Ok(BookingSummary {
                booking: row_to_booking(row)?,
                first_name: row.get(6)?,
                last_name: row.get(7)?,
                room_count: row.get(8)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Retrieves a room with its category and hotel context, or
    /// `Ok(None)` if the room does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn room_detail(conn: &Connection, id: i64) -> Result<Option<RoomDetail>> {
        let result = conn.query_row(SELECT_ROOM_DETAIL, params![id], |row| {
            Ok(RoomDetail {
                room: row_to_room(row)?,
                type_name: row.get(6)?,
                type_description: row.get(7)?,
                base_price: row.get(8)?,
                hotel_name: row.get(9)?,
                hotel_location: row.get(10)?,
            })
        });
        match result {
            Ok(detail) => Ok(Some(detail)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all rooms with category and hotel lookup columns.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(conn: &Connection) -> Result<Vec<RoomSummary>> {
        let mut stmt = conn.prepare(LIST_ROOMS)?;
        let rows = stmt.query_map([], |row| {
            Ok(RoomSummary {
                room: row_to_room(row)?,
                type_name: row.get(6)?,
                base_price: row.get(7)?,
                hotel_name: row.get(8)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Lists all room types with their hotel's name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_room_types(conn: &Connection) -> Result<Vec<RoomTypeSummary>> {
        let mut stmt = conn.prepare(LIST_ROOM_TYPES)?;
        let rows = stmt.query_map([], |row| {
            Ok(RoomTypeSummary {
                room_type: row_to_room_type(row)?,
                hotel_name: row.get(5)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Retrieves a payment with its booking and customer context, or
    /// `Ok(None)` if the payment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn payment_detail(conn: &Connection, id: i64) -> Result<Option<PaymentDetail>> {
        let sql = format!("{PAYMENT_DETAIL_COLUMNS} WHERE p.id = ?1");
        match conn.query_row(&sql, params![id], row_to_payment_detail) {
            Ok(detail) => Ok(Some(detail)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Retrieves the payment recorded against a booking, or `Ok(None)`
    /// if none exists. If several were recorded, the earliest is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn payment_for_booking(
        conn: &Connection,
        booking_id: i64,
    ) -> Result<Option<PaymentDetail>> {
        let sql = format!("{PAYMENT_DETAIL_COLUMNS} WHERE p.booking_id = ?1 ORDER BY p.id LIMIT 1");
        match conn.query_row(&sql, params![booking_id], row_to_payment_detail) {
            Ok(detail) => Ok(Some(detail)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Retrieves the booking a payment was recorded against, or
    /// `Ok(None)` if the payment does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn booking_for_payment(conn: &Connection, payment_id: i64) -> Result<Option<Booking>> {
        match conn.query_row(SELECT_BOOKING_FOR_PAYMENT, params![payment_id], row_to_booking) {
            Ok(booking) => Ok(Some(booking)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all payments with booking dates and customer contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_payments(conn: &Connection) -> Result<Vec<PaymentDetail>> {
        let sql = format!("{PAYMENT_DETAIL_COLUMNS} ORDER BY p.id");
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_payment_detail)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Retrieves a review with its room, hotel, and customer context, or
    /// `Ok(None)` if the review does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn review_detail(conn: &Connection, id: i64) -> Result<Option<ReviewDetail>> {
        let sql = format!("{REVIEW_DETAIL_COLUMNS} WHERE rv.id = ?1");
        let result = conn.query_row(&sql, params![id], |row| {
            Ok(ReviewDetail {
                review: row_to_review(row)?,
                room_number: row.get(6)?,
                type_name: row.get(7)?,
                hotel_name: row.get(8)?,
                first_name: row.get(9)?,
                last_name: row.get(10)?,
                email: row.get(11)?,
            })
        });
        match result {
            Ok(detail) => Ok(Some(detail)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all reviews with room numbers and reviewer names, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_reviews(conn: &Connection) -> Result<Vec<ReviewSummary>> {
        let mut stmt = conn.prepare(LIST_REVIEWS)?;
        let rows = stmt.query_map([], |row| {
            Ok(ReviewSummary {
                review: row_to_review(row)?,
                room_number: row.get(6)?,
                first_name: row.get(7)?,
                last_name: row.get(8)?,
            })
        })?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }
}
