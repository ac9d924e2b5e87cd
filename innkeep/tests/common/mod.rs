//! Common test utilities for integration tests.
//!
//! Helper functions and fixture builders shared by the integration
//! suites.

use chrono::NaiveDate;
use tempfile::TempDir;

use innkeep::model::{NewBooking, NewCustomer, NewHotel, NewRoom, NewRoomType};
use innkeep::{Database, DatabaseConfig};

/// Opens a database in a fresh temporary directory.
///
/// The `TempDir` must be kept alive for as long as the database is in
/// use.
#[allow(dead_code)]
pub fn open_test_database() -> (Database, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = DatabaseConfig::new(dir.path().join("test.db"));
    let db = Database::open(config).unwrap();
    (db, dir)
}

/// Rooms, customer, and hotel fixture shared by the booking suites.
#[allow(dead_code)]
pub struct World {
    pub hotel_id: i64,
    pub room_type_id: i64,
    pub room_ids: Vec<i64>,
    pub customer_id: i64,
}

/// Seeds a hotel with one categorized and one uncategorized room, plus
/// a customer.
#[allow(dead_code)]
pub fn seed_world(db: &mut Database) -> World {
    let hotel = db
        .create_hotel(&NewHotel {
            name: "Grand Plaza".into(),
            location: "Tashkent".into(),
            rating: Some(4.5),
            price_per_night: Some(150.0),
            description: None,
        })
        .unwrap();
    let room_type = db
        .create_room_type(&NewRoomType {
            hotel_id: hotel.id,
            type_name: "Double".into(),
            description: None,
            base_price: 120.0,
        })
        .unwrap();
    let first = db
        .create_room(&NewRoom {
            hotel_id: hotel.id,
            room_type_id: Some(room_type.id),
            room_number: "101".into(),
            floor: Some(1),
            status: None,
        })
        .unwrap();
    let second = db
        .create_room(&NewRoom {
            hotel_id: hotel.id,
            room_type_id: None,
            room_number: "102".into(),
            floor: Some(1),
            status: None,
        })
        .unwrap();
    let customer = db
        .create_customer(&NewCustomer {
            first_name: "Ana".into(),
            last_name: "Li".into(),
            email: "ana@example.com".into(),
            phone: None,
            address: None,
        })
        .unwrap();

    World {
        hotel_id: hotel.id,
        room_type_id: room_type.id,
        room_ids: vec![first.id, second.id],
        customer_id: customer.id,
    }
}

/// Builds a two-night booking input for the given customer and rooms.
#[allow(dead_code)]
pub fn booking_input(customer_id: i64, room_ids: Vec<i64>) -> NewBooking {
    NewBooking {
        customer_id,
        check_in_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        check_out_date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
        total_amount: None,
        status: None,
        room_ids,
    }
}
