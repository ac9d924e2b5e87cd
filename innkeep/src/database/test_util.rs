//! Shared test utilities for database unit tests.
//!
//! This module provides helper functions and fixtures used across multiple
//! database test modules.

use chrono::NaiveDate;
use tempfile::tempdir;

use crate::database::{Database, DatabaseConfig};
use crate::model::{Hotel, NewBooking, NewCustomer, NewHotel, NewRoom, NewRoomType, Room, RoomType};

/// Creates a temporary test database that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_database() -> Database {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::new(path);
    let db = Database::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    db
}

/// Builds a hotel input with representative optional fields filled in.
#[must_use]
pub fn new_hotel(name: &str) -> NewHotel {
    NewHotel {
        name: name.to_string(),
        location: "Tashkent".to_string(),
        rating: Some(4.5),
        price_per_night: Some(150.0),
        description: Some("City-centre hotel".to_string()),
    }
}

/// Builds a customer input keyed by the given unique email.
#[must_use]
pub fn new_customer(email: &str) -> NewCustomer {
    NewCustomer {
        first_name: "Ana".to_string(),
        last_name: "Li".to_string(),
        email: email.to_string(),
        phone: Some("+998901234567".to_string()),
        address: Some("12 Navoi St".to_string()),
    }
}

/// Builds a room type input attached to the given hotel.
#[must_use]
pub fn new_room_type(hotel_id: i64) -> NewRoomType {
    NewRoomType {
        hotel_id,
        type_name: "Double".to_string(),
        description: Some("Two guests, queen bed".to_string()),
        base_price: 120.0,
    }
}

/// Builds a booking input for the given customer and room set, with a
/// fixed two-night stay and all optional fields left to defaults.
///
/// # Panics
///
/// Panics if the fixed calendar dates are invalid, which cannot happen.
#[must_use]
pub fn new_booking(customer_id: i64, room_ids: Vec<i64>) -> NewBooking {
    NewBooking {
        customer_id,
        check_in_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        check_out_date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        total_amount: None,
        status: None,
        room_ids,
    }
}

/// Seeds a hotel, a room type belonging to it, and a room of that type.
///
/// Most room and booking tests need this full chain in place before the
/// behavior under test can run.
///
/// # Panics
///
/// Panics if any of the seed inserts fail.
pub fn seed_room_setup(db: &mut Database) -> (Hotel, RoomType, Room) {
    let hotel = db.create_hotel(&new_hotel("Grand Plaza")).unwrap();
    let room_type = db.create_room_type(&new_room_type(hotel.id)).unwrap();
    let room = db
        .create_room(&NewRoom {
            hotel_id: hotel.id,
            room_type_id: Some(room_type.id),
            room_number: "101".to_string(),
            floor: Some(1),
            status: None,
        })
        .unwrap();
    (hotel, room_type, room)
}
