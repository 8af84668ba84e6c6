//! The route handler that lists the transactions of an account.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
};
use rusqlite::{Connection, params_from_iter, types::Value};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    account::{ALL_ACCOUNTS_SEGMENT, AccountSelector, get_account},
    database_id::AccountId,
    pagination::{PaginationConfig, Paginator},
};

use super::{
    core::{Transaction, map_transaction_row},
    filter::TransactionFilter,
    sort::Sorter,
};

/// The raw query parameters accepted by the transaction listing.
///
/// Values stay as strings here; the parsing rules live in [crate::params]
/// and the components built from them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListQuery {
    /// Inclusive lower date bound, "YYYY-MM-DD".
    pub start_date: Option<String>,
    /// Inclusive upper date bound, "YYYY-MM-DD".
    pub end_date: Option<String>,
    /// Whether to include internal transfers. Defaults to false.
    pub include_internal_transfer: Option<String>,
    /// Whether to restrict to uncategorized transactions. Defaults to false.
    pub only_uncategorized: Option<String>,
    /// The listing order as `<field>:<asc|desc>`.
    pub order_by: Option<String>,
    /// The number of rows per page.
    pub per_page: Option<String>,
    /// The page to return.
    pub page: Option<String>,
}

/// One page of transactions and the paging bookkeeping for it.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    /// How many pages the filtered listing spans.
    pub total_pages: u64,
    /// The page this response holds.
    pub current_page: u64,
    /// The transactions on this page.
    pub transactions: Vec<Transaction>,
}

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The config that controls paging defaults.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// A route handler listing the transactions of one account, or of every
/// account when the path segment is "all".
///
/// Filtering, ordering, and paging are controlled by the query parameters,
/// see [ListQuery]. Soft-deleted transactions never appear in the listing.
///
/// # Errors
/// Returns [Error::NotFound] if the account does not exist and
/// [Error::InvalidRequest] for malformed query parameters.
pub async fn list_transactions_endpoint(
    State(state): State<ListTransactionsState>,
    Path(account_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<TransactionPage>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let page = list_transactions(&account_id, &query, &state.pagination_config, &connection)?;

    Ok(Json(page))
}

/// Resolve the account path segment, build the query context, and execute
/// the listing.
///
/// The stages compose in a fixed order: the filter narrows the query before
/// the row count is taken, and the ordering applies before the limit so the
/// top-N rows are stable.
fn list_transactions(
    account_segment: &str,
    query: &ListQuery,
    pagination_config: &PaginationConfig,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    let selector = resolve_account_selector(account_segment, connection)?;
    let filter = TransactionFilter::from_query(selector, query)?;
    let sorter = Sorter::from_query(query)?;
    let paginator = Paginator::new(
        query.page.as_deref(),
        query.per_page.as_deref(),
        pagination_config,
    )?;

    let mut clauses = vec!["deleted = 0".to_owned()];
    let mut binds: Vec<Value> = Vec::new();
    filter.apply(&mut clauses, &mut binds);
    let predicate = clauses.join(" AND ");

    let total: i64 = connection
        .prepare(&format!(
            "SELECT COUNT(id) FROM \"transaction\" WHERE {predicate}"
        ))?
        .query_one(params_from_iter(binds.iter()), |row| row.get(0))?;

    let page_query = format!(
        "SELECT id, date, payee, memo, amount, account_id, category_id, deleted \
         FROM \"transaction\" WHERE {predicate} {} LIMIT ? OFFSET ?",
        sorter.order_clause()
    );
    binds.push(Value::from(paginator.per_page() as i64));
    binds.push(Value::from(paginator.offset() as i64));

    let transactions = connection
        .prepare(&page_query)?
        .query_map(params_from_iter(binds.iter()), map_transaction_row)?
        .map(|row_result| row_result.map_err(Error::SqlError))
        .collect::<Result<Vec<Transaction>, Error>>()?;

    Ok(TransactionPage {
        total_pages: paginator.total_pages(total as u64),
        current_page: paginator.page(),
        transactions,
    })
}

/// Map the `{account_id}` path segment to an account selector.
///
/// The literal segment "all" selects every account; anything else must be
/// the id of an existing account.
fn resolve_account_selector(
    segment: &str,
    connection: &Connection,
) -> Result<AccountSelector, Error> {
    if segment == ALL_ACCOUNTS_SEGMENT {
        return Ok(AccountSelector::All);
    }

    let account_id: AccountId = segment.parse().map_err(|_| Error::NotFound)?;
    let account = get_account(account_id, connection)?;

    Ok(AccountSelector::Account(account.id))
}
