#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # innkeep
//!
//! An embedded hotel inventory and reservation store.
//!
//! This library manages hotels, room categories, rooms, customers,
//! bookings, payments, and reviews over a single `SQLite` file. Its core
//! is the transactional booking layer: a booking and its initial room
//! associations are created atomically, room assignments are managed as
//! an explicit association table, and partial updates distinguish
//! "leave unchanged" from "set to null" per field.
//!
//! ## Core Types
//!
//! - [`Database`] and [`DatabaseConfig`]: connection management
//! - [`model`] entities with their `New*` and `*Patch` input shapes
//! - [`Patch`] and [`UpdateSet`]: partial-update building blocks
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```no_run
//! use innkeep::{Database, DatabaseConfig};
//! use innkeep::model::NewHotel;
//!
//! let mut db = Database::open(DatabaseConfig::new("/tmp/innkeep.db")).unwrap();
//! let hotel = db
//!     .create_hotel(&NewHotel {
//!         name: "Grand Plaza".into(),
//!         location: "Tashkent".into(),
//!         rating: None,
//!         price_per_night: None,
//!         description: None,
//!     })
//!     .unwrap();
//! assert!(hotel.id > 0);
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod model;
pub mod update;

// Re-export key types at crate root for convenience
pub use config::Config;
pub use database::views::{BookedRoom, BookingDetail, BookingSummary, RoomDetail};
pub use database::{Database, DatabaseConfig};
pub use error::{Error, Result};
pub use model::{Booking, Customer, Hotel, Payment, Review, Room, RoomBooking, RoomType};
pub use update::{Patch, UpdateSet};
