//! Transaction management for the finance service.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `TransactionBuilder` for creating rows
//! - The filter, sorter, and paginator glue that shapes listings
//! - The JSON route handlers for listing, updating, and soft-deleting

mod core;
mod delete_endpoint;
mod filter;
mod list_endpoint;
mod sort;
mod update_endpoint;

pub use core::{Transaction, TransactionBuilder, create_transaction, get_transaction};
pub use delete_endpoint::{DeleteTransactionResponse, delete_transaction_endpoint};
pub use list_endpoint::{TransactionPage, list_transactions_endpoint};
pub use update_endpoint::{
    UpdateTransactionBody, UpdateTransactionResponse, update_transaction_endpoint,
};

pub(crate) use core::create_transaction_table;

#[cfg(test)]
pub(crate) use core::count_transactions;
