//! The route handler that updates fields on a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    account::get_account,
    category::category_exists,
    database_id::{AccountId, CategoryId, TransactionId},
};

use super::core::{Transaction, get_transaction};

/// The fields a client may change on a transaction.
///
/// This is an explicit allowlist: unknown body fields are rejected at
/// deserialization instead of being applied blindly to the row.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTransactionBody {
    /// A new transaction date.
    pub date: Option<Date>,
    /// A new payee.
    pub payee: Option<String>,
    /// A new memo.
    pub memo: Option<String>,
    /// A new amount.
    pub amount: Option<f64>,
    /// Move the transaction to another account.
    pub account_id: Option<AccountId>,
    /// Reclassify the transaction.
    pub category_id: Option<CategoryId>,
}

/// The body returned after a successful update.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateTransactionResponse {
    /// The updated transaction, re-read from the database after commit.
    pub transactions: Vec<Transaction>,
}

/// The state needed to update a transaction.
#[derive(Debug, Clone)]
pub struct UpdateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that applies the supplied fields to a transaction.
///
/// Fields absent from the body keep their stored values.
///
/// # Errors
/// Returns [Error::NotFound] if the id does not refer to exactly one live
/// transaction and [Error::InvalidRequest] if the body references an
/// account or category that does not exist.
pub async fn update_transaction_endpoint(
    State(state): State<UpdateTransactionState>,
    Path(transaction_id): Path<TransactionId>,
    Json(body): Json<UpdateTransactionBody>,
) -> Result<Json<UpdateTransactionResponse>, Error> {
    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = update_transaction(transaction_id, &body, &mut connection)?;

    Ok(Json(UpdateTransactionResponse {
        transactions: vec![transaction],
    }))
}

/// Apply the supplied fields inside a scoped database transaction, commit,
/// and re-read the stored row.
///
/// The scope commits on success and rolls back when dropped on the error
/// path.
fn update_transaction(
    id: TransactionId,
    body: &UpdateTransactionBody,
    connection: &mut Connection,
) -> Result<Transaction, Error> {
    let db_transaction = connection.transaction()?;

    let current = get_transaction(id, &db_transaction)?;

    if let Some(account_id) = body.account_id {
        get_account(account_id, &db_transaction).map_err(|error| match error {
            Error::NotFound => Error::InvalidRequest(format!("unknown account_id {account_id}")),
            error => error,
        })?;
    }

    if let Some(category_id) = body.category_id
        && !category_exists(category_id, &db_transaction)?
    {
        return Err(Error::InvalidRequest(format!(
            "unknown category_id {category_id}"
        )));
    }

    db_transaction.execute(
        "UPDATE \"transaction\" \
         SET date = ?1, payee = ?2, memo = ?3, amount = ?4, account_id = ?5, category_id = ?6 \
         WHERE id = ?7",
        params![
            body.date.unwrap_or(current.date),
            body.payee.as_deref().unwrap_or(&current.payee),
            body.memo.as_deref().unwrap_or(&current.memo),
            body.amount.unwrap_or(current.amount),
            body.account_id.unwrap_or(current.account_id),
            body.category_id.unwrap_or(current.category_id),
            id,
        ],
    )?;

    db_transaction.commit()?;

    get_transaction(id, connection)
}

#[cfg(test)]
mod update_transaction_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        account::create_account,
        category::create_category,
        db::initialize,
        transaction::{Transaction, create_transaction, get_transaction},
    };

    use super::{UpdateTransactionBody, update_transaction};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn updates_only_the_supplied_fields() {
        let mut conn = get_test_connection();
        let account = create_account("Checking", &conn).unwrap();
        let groceries = create_category("Groceries", &conn).unwrap();
        let original = create_transaction(
            Transaction::build(-12.5, date!(2025 - 09 - 30), account.id)
                .payee("Corner Dairy")
                .memo("milk"),
            &conn,
        )
        .unwrap();

        let body = UpdateTransactionBody {
            category_id: Some(groceries.id),
            amount: Some(-13.0),
            ..Default::default()
        };

        let got = update_transaction(original.id, &body, &mut conn).unwrap();

        assert_eq!(got.category_id, groceries.id);
        assert_eq!(got.amount, -13.0);
        // Untouched fields keep their stored values.
        assert_eq!(got.date, original.date);
        assert_eq!(got.payee, original.payee);
        assert_eq!(got.memo, original.memo);

        // The returned row is what a re-read sees.
        assert_eq!(got, get_transaction(original.id, &conn).unwrap());
    }

    #[test]
    fn empty_body_leaves_the_row_unchanged() {
        let mut conn = get_test_connection();
        let account = create_account("Checking", &conn).unwrap();
        let original = create_transaction(
            Transaction::build(-12.5, date!(2025 - 09 - 30), account.id).payee("Corner Dairy"),
            &conn,
        )
        .unwrap();

        let got = update_transaction(original.id, &UpdateTransactionBody::default(), &mut conn)
            .unwrap();

        assert_eq!(got, original);
    }

    #[test]
    fn update_fails_on_unknown_id() {
        let mut conn = get_test_connection();

        let got = update_transaction(1337, &UpdateTransactionBody::default(), &mut conn);

        assert_eq!(got, Err(Error::NotFound));
    }

    #[test]
    fn update_fails_on_unknown_category() {
        let mut conn = get_test_connection();
        let account = create_account("Checking", &conn).unwrap();
        let original = create_transaction(
            Transaction::build(-12.5, date!(2025 - 09 - 30), account.id),
            &conn,
        )
        .unwrap();

        let body = UpdateTransactionBody {
            category_id: Some(99),
            ..Default::default()
        };

        let got = update_transaction(original.id, &body, &mut conn);

        assert_eq!(
            got,
            Err(Error::InvalidRequest("unknown category_id 99".to_owned()))
        );
        // The rejected update must not have touched the row.
        assert_eq!(get_transaction(original.id, &conn).unwrap(), original);
    }

    #[test]
    fn update_fails_on_unknown_account() {
        let mut conn = get_test_connection();
        let account = create_account("Checking", &conn).unwrap();
        let original = create_transaction(
            Transaction::build(-12.5, date!(2025 - 09 - 30), account.id),
            &conn,
        )
        .unwrap();

        let body = UpdateTransactionBody {
            account_id: Some(99),
            ..Default::default()
        };

        let got = update_transaction(original.id, &body, &mut conn);

        assert_eq!(
            got,
            Err(Error::InvalidRequest("unknown account_id 99".to_owned()))
        );
    }
}
