//! Domain records for the reservation store.
//!
//! Each entity has up to three shapes: the stored record (what a read
//! returns), a `New*` input for creation (optional fields carry documented
//! defaults), and a `*Patch` input for partial updates built from
//! [`Patch`] fields. Patch structs double as the per-entity allow-list:
//! they contain exactly the updatable columns and reject unknown keys at
//! deserialization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::update::Patch;

/// Default status for a newly created booking.
pub const DEFAULT_BOOKING_STATUS: &str = "pending";

/// Default status for a newly created room.
pub const DEFAULT_ROOM_STATUS: &str = "available";

/// Default method for a newly recorded payment.
pub const DEFAULT_PAYMENT_METHOD: &str = "cash";

/// Default status for a newly recorded payment.
pub const DEFAULT_PAYMENT_STATUS: &str = "completed";

/// A hotel property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Row identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// City or address line.
    pub location: String,
    /// Star rating between 0.0 and 5.0, if rated.
    pub rating: Option<f64>,
    /// Indicative nightly price, if advertised.
    pub price_per_night: Option<f64>,
    /// Free-text description.
    pub description: Option<String>,
    /// Creation timestamp as stored (UTC, `YYYY-MM-DD HH:MM:SS`).
    pub created_at: String,
}

/// Input for creating a [`Hotel`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewHotel {
    /// Display name.
    pub name: String,
    /// City or address line.
    pub location: String,
    /// Star rating, if known.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Indicative nightly price, if advertised.
    #[serde(default)]
    pub price_per_night: Option<f64>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for a [`Hotel`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HotelPatch {
    /// New display name.
    pub name: Patch<String>,
    /// New location.
    pub location: Patch<String>,
    /// New rating, or null to clear it.
    pub rating: Patch<f64>,
    /// New nightly price, or null to clear it.
    pub price_per_night: Patch<f64>,
    /// New description, or null to clear it.
    pub description: Patch<String>,
}

/// A category of rooms within a hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    /// Row identifier.
    pub id: i64,
    /// Owning hotel.
    pub hotel_id: i64,
    /// Category name, e.g. "Deluxe Double".
    pub type_name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Base nightly price for this category.
    pub base_price: f64,
}

/// Input for creating a [`RoomType`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoomType {
    /// Owning hotel.
    pub hotel_id: i64,
    /// Category name.
    pub type_name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Base nightly price.
    pub base_price: f64,
}

/// Partial update for a [`RoomType`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomTypePatch {
    /// New owning hotel.
    pub hotel_id: Patch<i64>,
    /// New category name.
    pub type_name: Patch<String>,
    /// New description, or null to clear it.
    pub description: Patch<String>,
    /// New base price.
    pub base_price: Patch<f64>,
}

/// A physical room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Row identifier.
    pub id: i64,
    /// Owning hotel.
    pub hotel_id: i64,
    /// Category this room belongs to, if assigned.
    pub room_type_id: Option<i64>,
    /// Door number, free text ("101", "2B").
    pub room_number: String,
    /// Floor number, if recorded.
    pub floor: Option<i64>,
    /// Occupancy status; free text in practice, conventionally one of
    /// `available`, `occupied`, `maintenance`.
    pub status: String,
}

/// Input for creating a [`Room`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewRoom {
    /// Owning hotel.
    pub hotel_id: i64,
    /// Category this room belongs to, if assigned.
    #[serde(default)]
    pub room_type_id: Option<i64>,
    /// Door number.
    pub room_number: String,
    /// Floor number.
    #[serde(default)]
    pub floor: Option<i64>,
    /// Initial status; defaults to [`DEFAULT_ROOM_STATUS`].
    #[serde(default)]
    pub status: Option<String>,
}

/// Partial update for a [`Room`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoomPatch {
    /// New owning hotel.
    pub hotel_id: Patch<i64>,
    /// New category, or null to detach the room from its category.
    pub room_type_id: Patch<i64>,
    /// New door number.
    pub room_number: Patch<String>,
    /// New floor, or null to clear it.
    pub floor: Patch<i64>,
    /// New status.
    pub status: Patch<String>,
}

/// A guest on record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Row identifier.
    pub id: i64,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email. Expected unique, not enforced at this layer.
    pub email: String,
    /// Contact phone, if recorded.
    pub phone: Option<String>,
    /// Postal address, if recorded.
    pub address: Option<String>,
}

/// Input for creating a [`Customer`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Postal address.
    #[serde(default)]
    pub address: Option<String>,
}

/// Partial update for a [`Customer`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CustomerPatch {
    /// New given name.
    pub first_name: Patch<String>,
    /// New family name.
    pub last_name: Patch<String>,
    /// New contact email.
    pub email: Patch<String>,
    /// New phone, or null to clear it.
    pub phone: Patch<String>,
    /// New address, or null to clear it.
    pub address: Patch<String>,
}

/// A reservation header for one customer over a date range.
///
/// The rooms attached to a booking live in [`RoomBooking`] rows and are
/// managed separately; `total_amount` is an independently-set figure,
/// never recomputed from the per-room prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Row identifier.
    pub id: i64,
    /// The customer holding the reservation.
    pub customer_id: i64,
    /// Arrival date.
    pub check_in_date: NaiveDate,
    /// Departure date.
    pub check_out_date: NaiveDate,
    /// Total charged for the stay.
    pub total_amount: f64,
    /// Lifecycle status; free text in practice, conventionally one of
    /// `pending`, `confirmed`, `cancelled`.
    pub status: String,
}

/// Input for creating a [`Booking`] together with its initial room set.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    /// The customer holding the reservation.
    pub customer_id: i64,
    /// Arrival date.
    pub check_in_date: NaiveDate,
    /// Departure date.
    pub check_out_date: NaiveDate,
    /// Total charged; defaults to 0.
    #[serde(default)]
    pub total_amount: Option<f64>,
    /// Initial status; defaults to [`DEFAULT_BOOKING_STATUS`].
    #[serde(default)]
    pub status: Option<String>,
    /// Rooms to attach at creation time. Each association is created with
    /// a placeholder price of 0; real prices are set afterwards through
    /// the association manager. May be empty.
    #[serde(default)]
    pub room_ids: Vec<i64>,
}

/// Partial update for a [`Booking`] header.
///
/// Room associations are never mutated through this path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingPatch {
    /// New customer.
    pub customer_id: Patch<i64>,
    /// New arrival date.
    pub check_in_date: Patch<NaiveDate>,
    /// New departure date.
    pub check_out_date: Patch<NaiveDate>,
    /// New total.
    pub total_amount: Patch<f64>,
    /// New status.
    pub status: Patch<String>,
}

/// The join record attaching one room to one booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomBooking {
    /// The booking side of the pair.
    pub booking_id: i64,
    /// The room side of the pair.
    pub room_id: i64,
    /// Price snapshot for this room within this booking.
    pub price: f64,
}

/// A payment recorded against a booking.
///
/// Bookkeeping only; no gateway integration. Conceptually 1:1 with a
/// booking but multiple payments are structurally possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Row identifier.
    pub id: i64,
    /// The booking being paid for.
    pub booking_id: i64,
    /// Amount paid.
    pub amount: f64,
    /// Method, e.g. `cash`, `card`.
    pub payment_method: String,
    /// Settlement status.
    pub status: String,
    /// Timestamp as stored (UTC, `YYYY-MM-DD HH:MM:SS`).
    pub payment_date: String,
}

/// Input for recording a [`Payment`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    /// The booking being paid for.
    pub booking_id: i64,
    /// Amount paid.
    pub amount: f64,
    /// Method; defaults to [`DEFAULT_PAYMENT_METHOD`].
    #[serde(default)]
    pub payment_method: Option<String>,
    /// Status; defaults to [`DEFAULT_PAYMENT_STATUS`].
    #[serde(default)]
    pub status: Option<String>,
}

/// A guest review of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Row identifier.
    pub id: i64,
    /// The reviewed room.
    pub room_id: i64,
    /// The reviewing customer.
    pub customer_id: i64,
    /// Rating, typically 1 through 5.
    pub rating: i64,
    /// Free-text comment.
    pub comment: Option<String>,
    /// Creation timestamp as stored (UTC, `YYYY-MM-DD HH:MM:SS`).
    pub created_at: String,
}

/// Input for creating a [`Review`].
#[derive(Debug, Clone, Deserialize)]
pub struct NewReview {
    /// The reviewed room.
    pub room_id: i64,
    /// The reviewing customer.
    pub customer_id: i64,
    /// Rating, typically 1 through 5.
    pub rating: i64,
    /// Free-text comment.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Partial update for a [`Review`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReviewPatch {
    /// New rating.
    pub rating: Patch<i64>,
    /// New comment, or null to clear it.
    pub comment: Patch<String>,
}
