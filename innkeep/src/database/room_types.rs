//! Room-type repository: single-table CRUD operations.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::model::{NewRoomType, RoomType, RoomTypePatch};
use crate::update::UpdateSet;

use super::connection::Database;

const SELECT_ROOM_TYPE: &str = r"
    SELECT id, hotel_id, type_name, description, base_price
    FROM room_types
    WHERE id = ?1
";

const INSERT_ROOM_TYPE: &str = r"
    INSERT INTO room_types (hotel_id, type_name, description, base_price)
    VALUES (?1, ?2, ?3, ?4)
";

const DELETE_ROOM_TYPE: &str = "DELETE FROM room_types WHERE id = ?1";

/// Deserializes a room type from a row in standard column order.
pub(super) fn row_to_room_type(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoomType> {
    Ok(RoomType {
        id: row.get(0)?,
        hotel_id: row.get(1)?,
        type_name: row.get(2)?,
        description: row.get(3)?,
        base_price: row.get(4)?,
    })
}

impl Database {
    /// Creates a room type and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ForeignKey`] if the owning hotel does not
    /// exist, or a database error if the insert fails.
    pub fn create_room_type(&mut self, room_type: &NewRoomType) -> Result<RoomType> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_ROOM_TYPE,
            params![
                room_type.hotel_id,
                room_type.type_name,
                room_type.description,
                room_type.base_price,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let created = tx.query_row(SELECT_ROOM_TYPE, params![id], row_to_room_type)?;

        tx.commit()?;
        Ok(created)
    }

    /// Retrieves a room type by id, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_room_type(conn: &Connection, id: i64) -> Result<Option<RoomType>> {
        match conn.query_row(SELECT_ROOM_TYPE, params![id], row_to_room_type) {
            Ok(room_type) => Ok(Some(room_type)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies a partial update to a room type.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoFieldsProvided`] if the patch is empty,
    /// or a database error if the update fails.
    pub fn update_room_type(&mut self, id: i64, patch: &RoomTypePatch) -> Result<Option<RoomType>> {
        let mut set = UpdateSet::new("room_types");
        set.push("hotel_id", patch.hotel_id.clone())
            .push("type_name", patch.type_name.clone())
            .push("description", patch.description.clone())
            .push("base_price", patch.base_price.clone());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if set.apply(&tx, id)? == 0 {
            return Ok(None);
        }
        let updated = tx.query_row(SELECT_ROOM_TYPE, params![id], row_to_room_type)?;

        tx.commit()?;
        Ok(Some(updated))
    }

    /// Deletes a room type, returning the deleted record.
    ///
    /// Rooms of this type are detached (their `room_type_id` becomes
    /// NULL), not deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    pub fn delete_room_type(&mut self, id: i64) -> Result<Option<RoomType>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = match tx.query_row(SELECT_ROOM_TYPE, params![id], row_to_room_type) {
            Ok(room_type) => room_type,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        tx.execute(DELETE_ROOM_TYPE, params![id])?;

        tx.commit()?;
        Ok(Some(existing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, new_hotel, new_room_type};
    use crate::update::Patch;
    use crate::Error;

    #[test]
    fn test_create_room_type_requires_hotel() {
        let mut db = create_test_database();
        let err = db.create_room_type(&new_room_type(999)).unwrap_err();
        assert!(err.is_foreign_key());
    }

    #[test]
    fn test_create_and_get_room_type() {
        let mut db = create_test_database();
        let hotel = db.create_hotel(&new_hotel("Grand Hotel")).unwrap();
        let created = db.create_room_type(&new_room_type(hotel.id)).unwrap();

        let loaded = Database::get_room_type(db.connection(), created.id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.hotel_id, hotel.id);
    }

    #[test]
    fn test_update_room_type_base_price_only() {
        let mut db = create_test_database();
        let hotel = db.create_hotel(&new_hotel("Grand Hotel")).unwrap();
        let created = db.create_room_type(&new_room_type(hotel.id)).unwrap();

        let patch = RoomTypePatch {
            base_price: Patch::Set(99.0),
            ..RoomTypePatch::default()
        };
        let updated = db.update_room_type(created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.base_price, 99.0);
        assert_eq!(updated.type_name, created.type_name);
    }

    #[test]
    fn test_update_room_type_empty_patch_rejected() {
        let mut db = create_test_database();
        let hotel = db.create_hotel(&new_hotel("Grand Hotel")).unwrap();
        let created = db.create_room_type(&new_room_type(hotel.id)).unwrap();

        let err = db
            .update_room_type(created.id, &RoomTypePatch::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoFieldsProvided { .. }));
    }

    #[test]
    fn test_delete_room_type_detaches_rooms() {
        let mut db = create_test_database();
        let hotel = db.create_hotel(&new_hotel("Grand Hotel")).unwrap();
        let room_type = db.create_room_type(&new_room_type(hotel.id)).unwrap();
        let room = db
            .create_room(&crate::model::NewRoom {
                hotel_id: hotel.id,
                room_type_id: Some(room_type.id),
                room_number: "101".into(),
                floor: Some(1),
                status: None,
            })
            .unwrap();

        db.delete_room_type(room_type.id).unwrap().unwrap();

        let reloaded = Database::get_room(db.connection(), room.id)
            .unwrap()
            .unwrap();
        assert_eq!(reloaded.room_type_id, None);
    }
}
