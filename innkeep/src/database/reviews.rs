//! Guest reviews of rooms.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::model::{NewReview, Review, ReviewPatch};
use crate::update::UpdateSet;

use super::connection::Database;

const SELECT_REVIEW: &str = r"
    SELECT id, room_id, customer_id, rating, comment, created_at
    FROM reviews
    WHERE id = ?1
";

const INSERT_REVIEW: &str = r"
    INSERT INTO reviews (room_id, customer_id, rating, comment)
    VALUES (?1, ?2, ?3, ?4)
";

const DELETE_REVIEW: &str = "DELETE FROM reviews WHERE id = ?1";

const REVIEWS_FOR_ROOM: &str = r"
    SELECT id, room_id, customer_id, rating, comment, created_at
    FROM reviews
    WHERE room_id = ?1
    ORDER BY created_at DESC, id DESC
";

const REVIEWS_FOR_CUSTOMER: &str = r"
    SELECT id, room_id, customer_id, rating, comment, created_at
    FROM reviews
    WHERE customer_id = ?1
    ORDER BY created_at DESC, id DESC
";

/// Deserializes a review from a row in standard column order.
pub(super) fn row_to_review(row: &rusqlite::Row<'_>) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        room_id: row.get(1)?,
        customer_id: row.get(2)?,
        rating: row.get(3)?,
        comment: row.get(4)?,
        created_at: row.get(5)?,
    })
}

impl Database {
    /// Creates a review of a room by a customer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ForeignKey`] if the room or the customer
    /// does not exist.
    pub fn create_review(&mut self, review: &NewReview) -> Result<Review> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_REVIEW,
            params![
                review.room_id,
                review.customer_id,
                review.rating,
                review.comment,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let created = tx.query_row(SELECT_REVIEW, params![id], row_to_review)?;

        tx.commit()?;
        Ok(created)
    }

    /// Retrieves a review by id, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_review(conn: &Connection, id: i64) -> Result<Option<Review>> {
        match conn.query_row(SELECT_REVIEW, params![id], row_to_review) {
            Ok(review) => Ok(Some(review)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies a partial update to a review. Only the rating and comment
    /// are updatable; the room and customer a review points at are fixed
    /// at creation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoFieldsProvided`] if the patch is empty,
    /// or a database error if the update fails.
    pub fn update_review(&mut self, id: i64, patch: &ReviewPatch) -> Result<Option<Review>> {
        let mut set = UpdateSet::new("reviews");
        set.push("rating", patch.rating.clone())
            .push("comment", patch.comment.clone());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if set.apply(&tx, id)? == 0 {
            return Ok(None);
        }
        let updated = tx.query_row(SELECT_REVIEW, params![id], row_to_review)?;

        tx.commit()?;
        Ok(Some(updated))
    }

    /// Deletes a review, returning the deleted record, or `Ok(None)` if
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or the delete fails.
    pub fn delete_review(&mut self, id: i64) -> Result<Option<Review>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = match tx.query_row(SELECT_REVIEW, params![id], row_to_review) {
            Ok(review) => review,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        tx.execute(DELETE_REVIEW, params![id])?;

        tx.commit()?;
        Ok(Some(existing))
    }

    /// Lists a room's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reviews_for_room(conn: &Connection, room_id: i64) -> Result<Vec<Review>> {
        let mut stmt = conn.prepare(REVIEWS_FOR_ROOM)?;
        let rows = stmt.query_map(params![room_id], row_to_review)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }

    /// Lists a customer's reviews, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn reviews_for_customer(conn: &Connection, customer_id: i64) -> Result<Vec<Review>> {
        let mut stmt = conn.prepare(REVIEWS_FOR_CUSTOMER)?;
        let rows = stmt.query_map(params![customer_id], row_to_review)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
    }
}
