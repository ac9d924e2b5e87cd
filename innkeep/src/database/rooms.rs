//! Room repository: single-table CRUD operations.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::model::{NewRoom, Room, RoomPatch, DEFAULT_ROOM_STATUS};
use crate::update::UpdateSet;

use super::connection::Database;

const SELECT_ROOM: &str = r"
    SELECT id, hotel_id, room_type_id, room_number, floor, status
    FROM rooms
    WHERE id = ?1
";

const INSERT_ROOM: &str = r"
    INSERT INTO rooms (hotel_id, room_type_id, room_number, floor, status)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const DELETE_ROOM: &str = "DELETE FROM rooms WHERE id = ?1";

/// Deserializes a room from a row in standard column order.
pub(super) fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    Ok(Room {
        id: row.get(0)?,
        hotel_id: row.get(1)?,
        room_type_id: row.get(2)?,
        room_number: row.get(3)?,
        floor: row.get(4)?,
        status: row.get(5)?,
    })
}

impl Database {
    /// Creates a room and returns the stored record.
    ///
    /// The status defaults to [`DEFAULT_ROOM_STATUS`] when not provided.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ForeignKey`] if the hotel or room type
    /// does not exist, or a database error if the insert fails.
    pub fn create_room(&mut self, room: &NewRoom) -> Result<Room> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_ROOM,
            params![
                room.hotel_id,
                room.room_type_id,
                room.room_number,
                room.floor,
                room.status.as_deref().unwrap_or(DEFAULT_ROOM_STATUS),
            ],
        )?;
        let id = tx.last_insert_rowid();
        let created = tx.query_row(SELECT_ROOM, params![id], row_to_room)?;

        tx.commit()?;
        Ok(created)
    }

    /// Retrieves a room by id, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_room(conn: &Connection, id: i64) -> Result<Option<Room>> {
        match conn.query_row(SELECT_ROOM, params![id], row_to_room) {
            Ok(room) => Ok(Some(room)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies a partial update to a room.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoFieldsProvided`] if the patch is empty,
    /// or a database error if the update fails.
    pub fn update_room(&mut self, id: i64, patch: &RoomPatch) -> Result<Option<Room>> {
        let mut set = UpdateSet::new("rooms");
        set.push("hotel_id", patch.hotel_id.clone())
            .push("room_type_id", patch.room_type_id.clone())
            .push("room_number", patch.room_number.clone())
            .push("floor", patch.floor.clone())
            .push("status", patch.status.clone());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if set.apply(&tx, id)? == 0 {
            return Ok(None);
        }
        let updated = tx.query_row(SELECT_ROOM, params![id], row_to_room)?;

        tx.commit()?;
        Ok(Some(updated))
    }

    /// Deletes a room, returning the deleted record.
    ///
    /// Associations and reviews referencing the room are removed by the
    /// schema's cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    pub fn delete_room(&mut self, id: i64) -> Result<Option<Room>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = match tx.query_row(SELECT_ROOM, params![id], row_to_room) {
            Ok(room) => room,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        tx.execute(DELETE_ROOM, params![id])?;

        tx.commit()?;
        Ok(Some(existing))
    }
}
