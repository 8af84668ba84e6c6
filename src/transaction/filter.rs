//! Query predicates that narrow a transaction listing.

use rusqlite::types::Value;
use time::Date;

use crate::{
    Error,
    account::AccountSelector,
    category::{INTERNAL_TRANSFER_CATEGORY_ID, UNCATEGORIZED_CATEGORY_ID},
    params::{parse_bool, parse_date_range},
};

use super::list_endpoint::ListQuery;

/// Narrows a transaction query by date range, internal-transfer exclusion,
/// categorization status, and account.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TransactionFilter {
    start_date: Date,
    end_date: Date,
    include_internal_transfer: bool,
    only_uncategorized: bool,
    account: AccountSelector,
}

impl TransactionFilter {
    /// Build a filter from the raw request query.
    ///
    /// Internal transfers are excluded unless `includeInternalTransfer` is
    /// true, and `onlyUncategorized` restricts the listing to transactions
    /// that have not been classified yet.
    ///
    /// # Errors
    /// Returns [Error::InvalidRequest] if a date bound is malformed.
    pub fn from_query(account: AccountSelector, query: &ListQuery) -> Result<Self, Error> {
        let (start_date, end_date) =
            parse_date_range(query.start_date.as_deref(), query.end_date.as_deref())?;

        Ok(Self {
            start_date,
            end_date,
            include_internal_transfer: parse_bool(query.include_internal_transfer.as_deref()),
            only_uncategorized: parse_bool(query.only_uncategorized.as_deref()),
            account,
        })
    }

    /// Append the filter's predicates and bind values to a query under
    /// construction.
    ///
    /// Dates are bound as their "YYYY-MM-DD" text form, matching how dates
    /// are stored.
    pub fn apply(&self, clauses: &mut Vec<String>, binds: &mut Vec<Value>) {
        clauses.push("date BETWEEN ? AND ?".to_owned());
        binds.push(Value::from(self.start_date.to_string()));
        binds.push(Value::from(self.end_date.to_string()));

        if !self.include_internal_transfer {
            clauses.push("category_id <> ?".to_owned());
            binds.push(Value::from(INTERNAL_TRANSFER_CATEGORY_ID));
        }

        if self.only_uncategorized {
            clauses.push("category_id = ?".to_owned());
            binds.push(Value::from(UNCATEGORIZED_CATEGORY_ID));
        }

        if let AccountSelector::Account(account_id) = self.account {
            clauses.push("account_id = ?".to_owned());
            binds.push(Value::from(account_id));
        }
    }
}

#[cfg(test)]
mod filter_tests {
    use rusqlite::types::Value;

    use crate::{
        account::AccountSelector,
        category::INTERNAL_TRANSFER_CATEGORY_ID,
        transaction::list_endpoint::ListQuery,
    };

    use super::TransactionFilter;

    fn apply(filter: &TransactionFilter) -> (Vec<String>, Vec<Value>) {
        let mut clauses = Vec::new();
        let mut binds = Vec::new();
        filter.apply(&mut clauses, &mut binds);
        (clauses, binds)
    }

    #[test]
    fn default_filter_excludes_internal_transfers() {
        let filter =
            TransactionFilter::from_query(AccountSelector::All, &ListQuery::default()).unwrap();

        let (clauses, binds) = apply(&filter);

        assert!(clauses.contains(&"category_id <> ?".to_owned()));
        assert!(binds.contains(&Value::from(INTERNAL_TRANSFER_CATEGORY_ID)));
    }

    #[test]
    fn include_internal_transfer_drops_the_exclusion() {
        let query = ListQuery {
            include_internal_transfer: Some("true".to_owned()),
            ..Default::default()
        };

        let filter = TransactionFilter::from_query(AccountSelector::All, &query).unwrap();

        let (clauses, _) = apply(&filter);

        assert!(!clauses.contains(&"category_id <> ?".to_owned()));
    }

    #[test]
    fn only_uncategorized_adds_category_predicate() {
        let query = ListQuery {
            only_uncategorized: Some("true".to_owned()),
            ..Default::default()
        };

        let filter = TransactionFilter::from_query(AccountSelector::All, &query).unwrap();

        let (clauses, _) = apply(&filter);

        assert!(clauses.contains(&"category_id = ?".to_owned()));
    }

    #[test]
    fn account_selector_scopes_to_one_account() {
        let filter =
            TransactionFilter::from_query(AccountSelector::Account(7), &ListQuery::default())
                .unwrap();

        let (clauses, binds) = apply(&filter);

        assert!(clauses.contains(&"account_id = ?".to_owned()));
        assert!(binds.contains(&Value::from(7_i64)));
    }

    #[test]
    fn all_accounts_adds_no_account_predicate() {
        let filter =
            TransactionFilter::from_query(AccountSelector::All, &ListQuery::default()).unwrap();

        let (clauses, _) = apply(&filter);

        assert!(!clauses.contains(&"account_id = ?".to_owned()));
    }

    #[test]
    fn date_bounds_are_bound_as_text() {
        let query = ListQuery {
            start_date: Some("2025-01-01".to_owned()),
            end_date: Some("2025-01-31".to_owned()),
            ..Default::default()
        };

        let filter = TransactionFilter::from_query(AccountSelector::All, &query).unwrap();

        let (clauses, binds) = apply(&filter);

        assert_eq!(clauses[0], "date BETWEEN ? AND ?");
        assert_eq!(binds[0], Value::from("2025-01-01".to_owned()));
        assert_eq!(binds[1], Value::from("2025-01-31".to_owned()));
    }

    #[test]
    fn building_the_same_filter_twice_is_identical() {
        let query = ListQuery {
            start_date: Some("2025-01-01".to_owned()),
            only_uncategorized: Some("true".to_owned()),
            ..Default::default()
        };

        let first = TransactionFilter::from_query(AccountSelector::Account(3), &query).unwrap();
        let second = TransactionFilter::from_query(AccountSelector::Account(3), &query).unwrap();

        assert_eq!(first, second);
        assert_eq!(apply(&first), apply(&second));
    }
}
