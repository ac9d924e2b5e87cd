//! Hotel repository: single-table CRUD operations.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::model::{Hotel, HotelPatch, NewHotel};
use crate::update::UpdateSet;

use super::connection::Database;

const SELECT_HOTEL: &str = r"
    SELECT id, name, location, rating, price_per_night, description, created_at
    FROM hotels
    WHERE id = ?1
";

const INSERT_HOTEL: &str = r"
    INSERT INTO hotels (name, location, rating, price_per_night, description)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const DELETE_HOTEL: &str = "DELETE FROM hotels WHERE id = ?1";

const LIST_HOTELS: &str = r"
    SELECT id, name, location, rating, price_per_night, description, created_at
    FROM hotels
    ORDER BY id
";

/// Deserializes a hotel from a row in standard column order.
pub(super) fn row_to_hotel(row: &rusqlite::Row<'_>) -> rusqlite::Result<Hotel> {
    Ok(Hotel {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        rating: row.get(3)?,
        price_per_night: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
    })
}

impl Database {
    /// Creates a hotel and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use innkeep::database::{Database, DatabaseConfig};
    /// use innkeep::model::NewHotel;
    ///
    /// let config = DatabaseConfig::new("/tmp/innkeep.db");
    /// let mut db = Database::open(config).unwrap();
    ///
    /// let hotel = db
    ///     .create_hotel(&NewHotel {
    ///         name: "Grand Hotel".into(),
    ///         location: "Tashkent".into(),
    ///         rating: Some(4.5),
    ///         price_per_night: Some(150.0),
    ///         description: None,
    ///     })
    ///     .unwrap();
    /// assert_eq!(hotel.name, "Grand Hotel");
    /// ```
    pub fn create_hotel(&mut self, hotel: &NewHotel) -> Result<Hotel> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_HOTEL,
            params![
                hotel.name,
                hotel.location,
                hotel.rating,
                hotel.price_per_night,
                hotel.description,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let created = tx.query_row(SELECT_HOTEL, params![id], row_to_hotel)?;

        tx.commit()?;
        Ok(created)
    }

    /// Retrieves a hotel by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(hotel))` if the hotel exists
    /// - `Ok(None)` if it doesn't
    pub fn get_hotel(conn: &Connection, id: i64) -> Result<Option<Hotel>> {
        match conn.query_row(SELECT_HOTEL, params![id], row_to_hotel) {
            Ok(hotel) => Ok(Some(hotel)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies a partial update to a hotel and returns the updated record.
    ///
    /// Only the provided fields are written; everything else is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoFieldsProvided`] if the patch is empty,
    /// or a database error if the update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(hotel))` with the post-update record
    /// - `Ok(None)` if no hotel has this id
    pub fn update_hotel(&mut self, id: i64, patch: &HotelPatch) -> Result<Option<Hotel>> {
        let mut set = UpdateSet::new("hotels");
        set.push("name", patch.name.clone())
            .push("location", patch.location.clone())
            .push("rating", patch.rating.clone())
            .push("price_per_night", patch.price_per_night.clone())
            .push("description", patch.description.clone());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if set.apply(&tx, id)? == 0 {
            return Ok(None);
        }
        let updated = tx.query_row(SELECT_HOTEL, params![id], row_to_hotel)?;

        tx.commit()?;
        Ok(Some(updated))
    }

    /// Deletes a hotel, returning the deleted record.
    ///
    /// Room types and rooms owned by the hotel are removed by the
    /// schema's cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(hotel))` if the hotel existed and was deleted
    /// - `Ok(None)` if no hotel has this id
    pub fn delete_hotel(&mut self, id: i64) -> Result<Option<Hotel>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = match tx.query_row(SELECT_HOTEL, params![id], row_to_hotel) {
            Ok(hotel) => hotel,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        tx.execute(DELETE_HOTEL, params![id])?;

        tx.commit()?;
        Ok(Some(existing))
    }

    /// Lists all hotels ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_hotels(conn: &Connection) -> Result<Vec<Hotel>> {
        let mut stmt = conn.prepare(LIST_HOTELS)?;
        let hotels = stmt
            .query_map([], row_to_hotel)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(hotels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, new_hotel};
    use crate::update::Patch;
    use crate::Error;

    #[test]
    fn test_create_and_get_hotel() {
        let mut db = create_test_database();
        let created = db.create_hotel(&new_hotel("Grand Hotel")).unwrap();

        let loaded = Database::get_hotel(db.connection(), created.id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.name, "Grand Hotel");
    }

    #[test]
    fn test_get_hotel_not_found() {
        let db = create_test_database();
        assert!(Database::get_hotel(db.connection(), 999).unwrap().is_none());
    }

    #[test]
    fn test_update_hotel_touches_only_provided_fields() {
        let mut db = create_test_database();
        let created = db.create_hotel(&new_hotel("Grand Hotel")).unwrap();

        let patch = HotelPatch {
            rating: Patch::Set(4.8),
            ..HotelPatch::default()
        };
        let updated = db.update_hotel(created.id, &patch).unwrap().unwrap();

        assert_eq!(updated.rating, Some(4.8));
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.location, created.location);
        assert_eq!(updated.price_per_night, created.price_per_night);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[test]
    fn test_update_hotel_clears_nullable_field() {
        let mut db = create_test_database();
        let created = db.create_hotel(&new_hotel("Grand Hotel")).unwrap();
        assert!(created.rating.is_some());

        let patch = HotelPatch {
            rating: Patch::Clear,
            ..HotelPatch::default()
        };
        let updated = db.update_hotel(created.id, &patch).unwrap().unwrap();
        assert_eq!(updated.rating, None);
    }

    #[test]
    fn test_update_hotel_empty_patch_rejected() {
        let mut db = create_test_database();
        let created = db.create_hotel(&new_hotel("Grand Hotel")).unwrap();

        let err = db
            .update_hotel(created.id, &HotelPatch::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoFieldsProvided { .. }));

        // Record unchanged
        let loaded = Database::get_hotel(db.connection(), created.id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_update_hotel_not_found() {
        let mut db = create_test_database();
        let patch = HotelPatch {
            name: Patch::Set("Nowhere".to_string()),
            ..HotelPatch::default()
        };
        assert!(db.update_hotel(999, &patch).unwrap().is_none());
    }

    #[test]
    fn test_delete_hotel_returns_record() {
        let mut db = create_test_database();
        let created = db.create_hotel(&new_hotel("Grand Hotel")).unwrap();

        let deleted = db.delete_hotel(created.id).unwrap().unwrap();
        assert_eq!(deleted, created);
        assert!(Database::get_hotel(db.connection(), created.id)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_delete_hotel_not_found() {
        let mut db = create_test_database();
        assert!(db.delete_hotel(999).unwrap().is_none());
    }

    #[test]
    fn test_list_hotels_ordered() {
        let mut db = create_test_database();
        db.create_hotel(&new_hotel("Alpha")).unwrap();
        db.create_hotel(&new_hotel("Beta")).unwrap();

        let all = Database::list_hotels(db.connection()).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
    }
}
