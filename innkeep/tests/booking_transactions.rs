//! Integration tests for the transactional booking layer.
//!
//! These cover the booking lifecycle end to end: atomic multi-room
//! creation, rollback on a bad reference, association management, and
//! cascading deletion.

mod common;

use common::{booking_input, open_test_database, seed_world};
use innkeep::model::NewPayment;
use innkeep::Database;

#[test]
fn test_multi_room_booking_lifecycle() {
    let (mut db, _dir) = open_test_database();
    let world = seed_world(&mut db);

    // Create a booking holding both rooms.
    let booking = db
        .create_booking(&booking_input(world.customer_id, world.room_ids.clone()))
        .unwrap();
    assert_eq!(booking.status, "pending");
    assert_eq!(booking.total_amount, 0.0);

    let detail = Database::booking_detail(db.connection(), booking.id)
        .unwrap()
        .unwrap();
    assert_eq!(detail.rooms.len(), 2);
    // Initial associations carry the placeholder price.
    assert!(detail.rooms.iter().all(|r| r.price == 0.0));

    // Re-price one room by removing and re-assigning its association.
    let room_id = world.room_ids[0];
    db.remove_room_from_booking(booking.id, room_id)
        .unwrap()
        .unwrap();
    let assoc = db
        .assign_room_to_booking(booking.id, room_id, Some(140.0))
        .unwrap();
    assert_eq!(assoc.price, 140.0);

    let detail = Database::booking_detail(db.connection(), booking.id)
        .unwrap()
        .unwrap();
    let repriced = detail.rooms.iter().find(|r| r.room_id == room_id).unwrap();
    assert_eq!(repriced.price, 140.0);
}

#[test]
fn test_booking_creation_is_atomic() {
    let (mut db, _dir) = open_test_database();
    let world = seed_world(&mut db);

    // One valid room, one nonexistent: the whole unit must fail.
    let err = db
        .create_booking(&booking_input(
            world.customer_id,
            vec![world.room_ids[0], 9999],
        ))
        .unwrap_err();
    assert!(err.is_foreign_key());

    assert!(Database::list_bookings(db.connection()).unwrap().is_empty());
    for &room_id in &world.room_ids {
        assert!(Database::bookings_for_room(db.connection(), room_id)
            .unwrap()
            .is_empty());
    }
}

#[test]
fn test_assigning_attached_room_again_fails_cleanly() {
    let (mut db, _dir) = open_test_database();
    let world = seed_world(&mut db);
    let room_id = world.room_ids[0];

    let booking = db
        .create_booking(&booking_input(world.customer_id, vec![room_id]))
        .unwrap();

    assert!(db
        .assign_room_to_booking(booking.id, room_id, Some(80.0))
        .is_err());

    // The original association is untouched.
    let detail = Database::booking_detail(db.connection(), booking.id)
        .unwrap()
        .unwrap();
    assert_eq!(detail.rooms.len(), 1);
    assert_eq!(detail.rooms[0].price, 0.0);
}

#[test]
fn test_removal_is_idempotent_in_effect() {
    let (mut db, _dir) = open_test_database();
    let world = seed_world(&mut db);
    let room_id = world.room_ids[0];

    let booking = db
        .create_booking(&booking_input(world.customer_id, vec![room_id]))
        .unwrap();

    assert!(db
        .remove_room_from_booking(booking.id, room_id)
        .unwrap()
        .is_some());
    assert!(db
        .remove_room_from_booking(booking.id, room_id)
        .unwrap()
        .is_none());
}

#[test]
fn test_booking_deletion_cascades() {
    let (mut db, _dir) = open_test_database();
    let world = seed_world(&mut db);

    let booking = db
        .create_booking(&booking_input(world.customer_id, world.room_ids.clone()))
        .unwrap();
    let payment = db
        .create_payment(&NewPayment {
            booking_id: booking.id,
            amount: 240.0,
            payment_method: None,
            status: None,
        })
        .unwrap();

    db.delete_booking(booking.id).unwrap().unwrap();

    assert!(Database::booking_detail(db.connection(), booking.id)
        .unwrap()
        .is_none());
    assert!(Database::get_payment(db.connection(), payment.id)
        .unwrap()
        .is_none());
    for &room_id in &world.room_ids {
        assert!(Database::bookings_for_room(db.connection(), room_id)
            .unwrap()
            .is_empty());
    }
}

#[test]
fn test_deleting_customer_with_bookings_is_rejected() {
    let (mut db, _dir) = open_test_database();
    let world = seed_world(&mut db);
    db.create_booking(&booking_input(world.customer_id, vec![]))
        .unwrap();

    // bookings.customer_id carries no cascade, so the booking blocks the
    // customer's deletion.
    let err = db.delete_customer(world.customer_id).unwrap_err();
    assert!(err.is_foreign_key());
}

#[test]
fn test_hotel_deletion_cascades_to_rooms() {
    let (mut db, _dir) = open_test_database();
    let world = seed_world(&mut db);

    db.delete_hotel(world.hotel_id).unwrap().unwrap();

    assert!(Database::list_rooms(db.connection()).unwrap().is_empty());
    assert!(Database::list_room_types(db.connection())
        .unwrap()
        .is_empty());
}
