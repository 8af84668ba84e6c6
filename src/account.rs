//! Account lookups used to scope transaction queries.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::AccountId};

/// The path segment that selects transactions across every account.
pub(crate) const ALL_ACCOUNTS_SEGMENT: &str = "all";

/// A bank account or credit card that transactions are recorded against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The display name of the account.
    pub name: String,
}

/// Which accounts a transaction listing should cover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum AccountSelector {
    /// No account filter, include transactions from every account.
    All,
    /// Restrict to transactions belonging to one account.
    Account(AccountId),
}

/// Create the account table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub(crate) fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
            )",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Account].
pub(crate) fn map_account_row(row: &Row) -> Result<Account, rusqlite::Error> {
    let id = row.get(0)?;
    let name = row.get(1)?;

    Ok(Account { id, name })
}

/// Retrieve an account from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid account,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_account(id: AccountId, connection: &Connection) -> Result<Account, Error> {
    let account = connection
        .prepare("SELECT id, name FROM account WHERE id = :id")?
        .query_one(&[(":id", &id)], map_account_row)?;

    Ok(account)
}

/// Create a new account with the given `name`.
///
/// # Errors
/// This function will return an [Error::SqlError] if the name already exists
/// or if there is some other SQL error.
pub fn create_account(name: &str, connection: &Connection) -> Result<Account, Error> {
    let account = connection
        .prepare("INSERT INTO account (name) VALUES (?1) RETURNING id, name")?
        .query_one([name], map_account_row)?;

    Ok(account)
}
