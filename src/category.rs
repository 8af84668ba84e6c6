//! Categories classify transactions, e.g. "Groceries" or "Rent".
//!
//! Two well-known categories are seeded at initialization and used by the
//! listing filters: [UNCATEGORIZED_CATEGORY_ID] marks transactions that have
//! not been classified yet, and [INTERNAL_TRANSFER_CATEGORY_ID] marks money
//! moved between the user's own accounts.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::CategoryId};

/// The category of transactions that have not been classified yet.
pub const UNCATEGORIZED_CATEGORY_ID: CategoryId = 1;

/// The category of transactions that move money between the user's own
/// accounts.
pub const INTERNAL_TRANSFER_CATEGORY_ID: CategoryId = 2;

/// A label classifying what a transaction was for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The id for the category.
    pub id: CategoryId,
    /// The display name of the category.
    pub name: String,
}

/// Create the category table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub(crate) fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
            )",
        (),
    )?;

    Ok(())
}

/// Insert the well-known categories if they are not already present.
pub(crate) fn seed_sentinel_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "INSERT OR IGNORE INTO category (id, name) VALUES (?1, ?2), (?3, ?4)",
        (
            UNCATEGORIZED_CATEGORY_ID,
            "Uncategorized",
            INTERNAL_TRANSFER_CATEGORY_ID,
            "Internal Transfer",
        ),
    )?;

    Ok(())
}

/// Map a database row to a [Category].
pub(crate) fn map_category_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;

    Ok(Category { id, name })
}

/// Check whether `id` refers to an existing category.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub(crate) fn category_exists(id: CategoryId, connection: &Connection) -> Result<bool, Error> {
    let count: i64 = connection.query_row(
        "SELECT COUNT(id) FROM category WHERE id = ?1",
        [id],
        |row| row.get(0),
    )?;

    Ok(count == 1)
}

/// Create a new category with the given `name`.
///
/// # Errors
/// This function will return an [Error::SqlError] if the name already exists
/// or if there is some other SQL error.
pub fn create_category(name: &str, connection: &Connection) -> Result<Category, Error> {
    let category = connection
        .prepare("INSERT INTO category (name) VALUES (?1) RETURNING id, name")?
        .query_one([name], map_category_row)?;

    Ok(category)
}

#[cfg(test)]
mod category_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    use super::{
        INTERNAL_TRANSFER_CATEGORY_ID, UNCATEGORIZED_CATEGORY_ID, category_exists, create_category,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn sentinel_categories_are_seeded() {
        let conn = get_test_connection();

        assert!(category_exists(UNCATEGORIZED_CATEGORY_ID, &conn).unwrap());
        assert!(category_exists(INTERNAL_TRANSFER_CATEGORY_ID, &conn).unwrap());
    }

    #[test]
    fn created_categories_do_not_collide_with_sentinels() {
        let conn = get_test_connection();

        let category = create_category("Groceries", &conn).expect("Could not create category");

        assert!(category.id > INTERNAL_TRANSFER_CATEGORY_ID);
    }

    #[test]
    fn unknown_category_does_not_exist() {
        let conn = get_test_connection();

        assert!(!category_exists(1337, &conn).unwrap());
    }
}
