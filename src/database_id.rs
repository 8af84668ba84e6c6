//! Type aliases for database row identifiers.

/// An identifier for a row in the application database.
pub type DatabaseId = i64;

/// The identifier of a transaction row.
pub type TransactionId = DatabaseId;

/// The identifier of an account row.
pub type AccountId = DatabaseId;

/// The identifier of a category row.
pub type CategoryId = DatabaseId;
