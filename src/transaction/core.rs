//! Defines the core transaction model and its database helpers.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::UNCATEGORIZED_CATEGORY_ID,
    database_id::{AccountId, CategoryId, TransactionId},
};

// ============================================================================
// MODELS
// ============================================================================

/// Money spent or received, recorded against one of the user's accounts.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// When the transaction happened.
    pub date: Date,
    /// Who the money went to or came from.
    pub payee: String,
    /// Free-form notes attached to the transaction.
    pub memo: String,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// The account the transaction was recorded against.
    pub account_id: AccountId,
    /// The category the transaction belongs to.
    pub category_id: CategoryId,
    /// Whether the transaction has been soft-deleted.
    ///
    /// Deleted rows stay in the database but are hidden from listings.
    pub deleted: bool,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(amount: f64, date: Date, account_id: AccountId) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            date,
            account_id,
            payee: String::new(),
            memo: String::new(),
            category_id: UNCATEGORIZED_CATEGORY_ID,
        }
    }
}

/// A builder for creating [Transaction] rows.
///
/// The payee and memo default to empty strings and the category defaults to
/// uncategorized.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    /// The monetary amount of the transaction.
    ///
    /// Positive values represent income/credits, negative values represent
    /// expenses/debits.
    pub amount: f64,

    /// The date when the transaction occurred.
    pub date: Date,

    /// The account the transaction is recorded against.
    pub account_id: AccountId,

    /// Who the money went to or came from.
    pub payee: String,

    /// Free-form notes attached to the transaction.
    pub memo: String,

    /// The category of the transaction, e.g. "Groceries", "Transport".
    pub category_id: CategoryId,
}

impl TransactionBuilder {
    /// Set the payee for the transaction.
    pub fn payee(mut self, payee: &str) -> Self {
        self.payee = payee.to_owned();
        self
    }

    /// Set the memo for the transaction.
    pub fn memo(mut self, memo: &str) -> Self {
        self.memo = memo.to_owned();
        self
    }

    /// Set the category for the transaction.
    pub fn category_id(mut self, category_id: CategoryId) -> Self {
        self.category_id = category_id;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidRequest] if the account or category does not exist,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (date, payee, memo, amount, account_id, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, date, payee, memo, amount, account_id, category_id, deleted",
        )?
        .query_row(
            (
                builder.date,
                builder.payee,
                builder.memo,
                builder.amount,
                builder.account_id,
                builder.category_id,
            ),
            map_transaction_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::InvalidRequest(format!(
                "unknown account {} or category {}",
                builder.account_id, builder.category_id
            )),
            error => error.into(),
        })?;

    Ok(transaction)
}

/// Retrieve a live (not soft-deleted) transaction by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to exactly one live transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, date, payee, memo, amount, account_id, category_id, deleted
             FROM \"transaction\" WHERE id = :id AND deleted = 0",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get the total number of transaction rows, soft-deleted rows included.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub(crate) fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                payee TEXT NOT NULL,
                memo TEXT NOT NULL,
                amount REAL NOT NULL,
                account_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL,
                deleted INTEGER NOT NULL DEFAULT 0,
                FOREIGN KEY(account_id) REFERENCES account(id) ON UPDATE CASCADE ON DELETE CASCADE,
                FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE
                )",
        (),
    )?;

    // Composite index used by the account-scoped date-range listing.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date_account
         ON \"transaction\"(date, account_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let payee = row.get(2)?;
    let memo = row.get(3)?;
    let amount = row.get(4)?;
    let account_id = row.get(5)?;
    let category_id = row.get(6)?;
    let deleted = row.get(7)?;

    Ok(Transaction {
        id,
        date,
        payee,
        memo,
        amount,
        account_id,
        category_id,
        deleted,
    })
}

// ============================================================================
// TESTS
// ============================================================================
