/*! This module initializes the application's database. */

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    account::create_account_table,
    category::{create_category_table, seed_sentinel_categories},
    transaction::create_transaction_table,
};

/// Create the application tables and seed the well-known categories.
///
/// The schema setup runs inside one exclusive transaction so a half-created
/// schema is never left behind. Initialization is idempotent and safe to run
/// against an existing database.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_account_table(&transaction)?;
    create_category_table(&transaction)?;
    create_transaction_table(&transaction)?;
    seed_sentinel_categories(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_succeeds() {
        let conn = Connection::open_in_memory().unwrap();

        assert_eq!(Ok(()), initialize(&conn));
    }

    #[test]
    fn initialize_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        assert_eq!(Ok(()), initialize(&conn));
    }
}
