//! Customer repository: single-table CRUD operations.

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::model::{Customer, CustomerPatch, NewCustomer};
use crate::update::UpdateSet;

use super::connection::Database;

const SELECT_CUSTOMER: &str = r"
    SELECT id, first_name, last_name, email, phone, address
    FROM customers
    WHERE id = ?1
";

const INSERT_CUSTOMER: &str = r"
    INSERT INTO customers (first_name, last_name, email, phone, address)
    VALUES (?1, ?2, ?3, ?4, ?5)
";

const DELETE_CUSTOMER: &str = "DELETE FROM customers WHERE id = ?1";

const LIST_CUSTOMERS: &str = r"
    SELECT id, first_name, last_name, email, phone, address
    FROM customers
    ORDER BY id
";

/// Deserializes a customer from a row in standard column order.
pub(super) fn row_to_customer(row: &rusqlite::Row<'_>) -> rusqlite::Result<Customer> {
    Ok(Customer {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        address: row.get(5)?,
    })
}

impl Database {
    /// Creates a customer and returns the stored record.
    ///
    /// Email uniqueness is expected by convention but not enforced at
    /// this layer.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_customer(&mut self, customer: &NewCustomer) -> Result<Customer> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            INSERT_CUSTOMER,
            params![
                customer.first_name,
                customer.last_name,
                customer.email,
                customer.phone,
                customer.address,
            ],
        )?;
        let id = tx.last_insert_rowid();
        let created = tx.query_row(SELECT_CUSTOMER, params![id], row_to_customer)?;

        tx.commit()?;
        Ok(created)
    }

    /// Retrieves a customer by id, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    pub fn get_customer(conn: &Connection, id: i64) -> Result<Option<Customer>> {
        match conn.query_row(SELECT_CUSTOMER, params![id], row_to_customer) {
            Ok(customer) => Ok(Some(customer)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Applies a partial update to a customer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoFieldsProvided`] if the patch is empty,
    /// or a database error if the update fails.
    pub fn update_customer(&mut self, id: i64, patch: &CustomerPatch) -> Result<Option<Customer>> {
        let mut set = UpdateSet::new("customers");
        set.push("first_name", patch.first_name.clone())
            .push("last_name", patch.last_name.clone())
            .push("email", patch.email.clone())
            .push("phone", patch.phone.clone())
            .push("address", patch.address.clone());

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if set.apply(&tx, id)? == 0 {
            return Ok(None);
        }
        let updated = tx.query_row(SELECT_CUSTOMER, params![id], row_to_customer)?;

        tx.commit()?;
        Ok(Some(updated))
    }

    /// Deletes a customer, returning the deleted record.
    ///
    /// Fails with a referential error while bookings still reference the
    /// customer; reviews are cascaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or delete fails.
    pub fn delete_customer(&mut self, id: i64) -> Result<Option<Customer>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existing = match tx.query_row(SELECT_CUSTOMER, params![id], row_to_customer) {
            Ok(customer) => customer,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        tx.execute(DELETE_CUSTOMER, params![id])?;

        tx.commit()?;
        Ok(Some(existing))
    }

    /// Lists all customers ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_customers(conn: &Connection) -> Result<Vec<Customer>> {
        let mut stmt = conn.prepare(LIST_CUSTOMERS)?;
        let customers = stmt
            .query_map([], row_to_customer)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(customers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, new_customer};
    use crate::update::Patch;
    use crate::Error;

    #[test]
    fn test_create_and_get_customer() {
        let mut db = create_test_database();
        let created = db.create_customer(&new_customer("ana@example.com")).unwrap();

        let loaded = Database::get_customer(db.connection(), created.id)
            .unwrap()
            .unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.email, "ana@example.com");
    }

    #[test]
    fn test_update_customer_field_isolation() {
        let mut db = create_test_database();
        let created = db.create_customer(&new_customer("ana@example.com")).unwrap();

        let patch = CustomerPatch {
            phone: Patch::Set("+998 90 000 00 00".to_string()),
            ..CustomerPatch::default()
        };
        let updated = db.update_customer(created.id, &patch).unwrap().unwrap();

        assert_eq!(updated.phone.as_deref(), Some("+998 90 000 00 00"));
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.last_name, created.last_name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.address, created.address);
    }

    #[test]
    fn test_update_customer_empty_patch_rejected() {
        let mut db = create_test_database();
        let created = db.create_customer(&new_customer("ana@example.com")).unwrap();

        let err = db
            .update_customer(created.id, &CustomerPatch::default())
            .unwrap_err();
        assert!(matches!(err, Error::NoFieldsProvided { .. }));
    }

    #[test]
    fn test_delete_customer() {
        let mut db = create_test_database();
        let created = db.create_customer(&new_customer("ana@example.com")).unwrap();

        let deleted = db.delete_customer(created.id).unwrap().unwrap();
        assert_eq!(deleted.id, created.id);
        assert!(db.delete_customer(created.id).unwrap().is_none());
    }

    #[test]
    fn test_list_customers() {
        let mut db = create_test_database();
        db.create_customer(&new_customer("a@example.com")).unwrap();
        db.create_customer(&new_customer("b@example.com")).unwrap();

        let all = Database::list_customers(db.connection()).unwrap();
        assert_eq!(all.len(), 2);
    }
}
