//! Database schema definitions and SQL constants.
//!
//! This module contains the table definitions, indices, and shared SQL
//! statements for the reservation store. Referential actions are declared
//! explicitly: rows owned by a deleted parent are cascaded, and a room
//! losing its category is set to NULL rather than deleted.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on every open to ensure
/// compatibility between the database file and the library.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
///
/// The metadata table stores key-value pairs for database configuration
/// and versioning information.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the hotels table.
pub const CREATE_HOTELS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS hotels (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        location TEXT NOT NULL,
        rating REAL,
        price_per_night REAL,
        description TEXT,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )";

/// SQL statement to create the room_types table.
pub const CREATE_ROOM_TYPES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_types (
        id INTEGER PRIMARY KEY,
        hotel_id INTEGER NOT NULL REFERENCES hotels(id) ON DELETE CASCADE,
        type_name TEXT NOT NULL,
        description TEXT,
        base_price REAL NOT NULL
    )";

/// SQL statement to create the rooms table.
///
/// `room_type_id` is nullable: a room may exist without a category, and
/// deleting a category detaches its rooms instead of deleting them.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id INTEGER PRIMARY KEY,
        hotel_id INTEGER NOT NULL REFERENCES hotels(id) ON DELETE CASCADE,
        room_type_id INTEGER REFERENCES room_types(id) ON DELETE SET NULL,
        room_number TEXT NOT NULL,
        floor INTEGER,
        status TEXT NOT NULL DEFAULT 'available'
    )";

/// SQL statement to create the customers table.
pub const CREATE_CUSTOMERS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        address TEXT
    )";

/// SQL statement to create the bookings table.
pub const CREATE_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY,
        customer_id INTEGER NOT NULL REFERENCES customers(id),
        check_in_date TEXT NOT NULL,
        check_out_date TEXT NOT NULL,
        total_amount REAL NOT NULL DEFAULT 0,
        status TEXT NOT NULL DEFAULT 'pending'
    )";

/// SQL statement to create the room_bookings junction table.
///
/// The composite primary key rejects duplicate (booking, room) pairs, so
/// removal of an association is well-defined. A room may still appear in
/// any number of bookings over time; no date-overlap constraint exists.
pub const CREATE_ROOM_BOOKINGS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS room_bookings (
        booking_id INTEGER NOT NULL REFERENCES bookings(id) ON DELETE CASCADE,
        room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
        price REAL NOT NULL DEFAULT 0,
        PRIMARY KEY (booking_id, room_id)
    )";

/// SQL statement to create the payments table.
pub const CREATE_PAYMENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS payments (
        id INTEGER PRIMARY KEY,
        booking_id INTEGER NOT NULL REFERENCES bookings(id) ON DELETE CASCADE,
        amount REAL NOT NULL,
        payment_method TEXT NOT NULL DEFAULT 'cash',
        status TEXT NOT NULL DEFAULT 'completed',
        payment_date TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )";

/// SQL statement to create the reviews table.
pub const CREATE_REVIEWS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reviews (
        id INTEGER PRIMARY KEY,
        room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
        customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
        rating INTEGER NOT NULL,
        comment TEXT,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )";

/// SQL statements to create the lookup indices.
///
/// These cover the foreign-key columns the views join on and the
/// association manager's room-side lookups.
pub const CREATE_INDICES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_room_types_hotel ON room_types(hotel_id)",
    "CREATE INDEX IF NOT EXISTS idx_rooms_hotel ON rooms(hotel_id)",
    "CREATE INDEX IF NOT EXISTS idx_rooms_type ON rooms(room_type_id)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_customer ON bookings(customer_id)",
    "CREATE INDEX IF NOT EXISTS idx_room_bookings_room ON room_bookings(room_id)",
    "CREATE INDEX IF NOT EXISTS idx_payments_booking ON payments(booking_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_room ON reviews(room_id)",
    "CREATE INDEX IF NOT EXISTS idx_reviews_customer ON reviews(customer_id)",
];

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";

/// SQL statement to insert a room-booking association.
///
/// Used both by the booking transaction manager (placeholder price 0 at
/// creation) and by the association manager (explicit price).
pub const INSERT_ROOM_BOOKING: &str = r"
    INSERT INTO room_bookings (booking_id, room_id, price)
    VALUES (?1, ?2, ?3)
";

/// SQL statement to delete one room-booking association.
pub const DELETE_ROOM_BOOKING: &str = r"
    DELETE FROM room_bookings
    WHERE booking_id = ?1 AND room_id = ?2
";
