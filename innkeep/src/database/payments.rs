//! Payment records.
//!
//! Bookkeeping entries only; payments are append-only at this layer and
//! carry no update or delete path. They disappear with their booking.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::model::{NewPayment, Payment, DEFAULT_PAYMENT_METHOD, DEFAULT_PAYMENT_STATUS};

use super::connection::Database;

const SELECT_PAYMENT: &str = r"
    SELECT id, booking_id, amount, payment_method, status, payment_date
    FROM payments
    WHERE id = ?1
";

const INSERT_PAYMENT: &str = r"
    INSERT INTO payments (booking_id, amount, payment_method, status)
    VALUES (?1, ?2, ?3, ?4)
";

/// Deserializes a payment from a row in standard column order.
pub(super) fn row_to_payment(row: &rusqlite::Row<'_>) -> rusqlite::Result<Payment> {
    Ok(Payment {
        id: row.get(0)?,
        booking_id: row.get(1)?,
        amount: row.get(2)?,
        payment_method: row.get(3)?,
        status: row.get(4)?,
        payment_date: row.get(5)?,
    })
}

impl Database {
    /// Records a payment against a booking.
    ///
    /// Method defaults to [`DEFAULT_PAYMENT_METHOD`] and status to
    /// [`DEFAULT_PAYMENT_STATUS`]; the payment date is stamped by the
    /// store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ForeignKey`] if the booking does not
    /// exist.
    pub fn create_payment(&mut self, payment: &NewPayment) -> Result<Payment> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_PAYMENT,
            params![
                payment.booking_id,
                payment.amount,
                payment
                    .payment_method
                    .as_deref()
                    .unwrap_or(DEFAULT_PAYMENT_METHOD),
                payment.status.as_deref().unwrap_or(DEFAULT_PAYMENT_STATUS),
            ],
        )?;
        let id = tx.last_insert_rowid();
        let created = tx.query_row(SELECT_PAYMENT, params![id], row_to_payment)?;

        tx.commit()?;
        Ok(created)
    }

    /// Retrieves a payment by id, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_payment(conn: &Connection, id: i64) -> Result<Option<Payment>> {
        match conn.query_row(SELECT_PAYMENT, params![id], row_to_payment) {
            Ok(payment) => Ok(Some(payment)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
