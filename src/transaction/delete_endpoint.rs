//! The route handler that soft-deletes a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, database_id::TransactionId};

use super::core::get_transaction;

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The body returned after a successful delete.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteTransactionResponse {
    /// The id of the transaction that was marked deleted.
    #[serde(rename = "transactionId")]
    pub transaction_id: TransactionId,
}

/// A route handler that marks a transaction as deleted.
///
/// The row stays in the database; it only disappears from listings.
///
/// # Errors
/// Returns [Error::NotFound] if the id does not refer to exactly one live
/// transaction, which includes rows that were already deleted.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<DeleteTransactionResponse>, Error> {
    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_transaction(transaction_id, &mut connection)?;

    Ok(Json(DeleteTransactionResponse { transaction_id }))
}

/// Mark the transaction as deleted inside a scoped database transaction.
///
/// The scope commits on success and rolls back when dropped on the error
/// path.
fn delete_transaction(id: TransactionId, connection: &mut Connection) -> Result<(), Error> {
    let db_transaction = connection.transaction()?;

    get_transaction(id, &db_transaction)?;
    db_transaction.execute(
        "UPDATE \"transaction\" SET deleted = 1 WHERE id = ?1",
        params![id],
    )?;

    db_transaction.commit()?;

    Ok(())
}
