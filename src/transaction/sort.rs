//! Validated ordering for transaction listings.

use crate::Error;

use super::list_endpoint::ListQuery;

/// The default listing order: most recent first.
pub(crate) const DEFAULT_ORDER: &str = "date:desc";

/// The transaction columns a listing may be sorted by.
///
/// `orderBy` field names resolve against this allowlist, never against
/// arbitrary column names taken from the request.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortField {
    Date,
    Amount,
    Payee,
    Memo,
    AccountId,
    CategoryId,
    Id,
}

impl SortField {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "date" => Some(Self::Date),
            "amount" => Some(Self::Amount),
            "payee" => Some(Self::Payee),
            "memo" => Some(Self::Memo),
            "account_id" => Some(Self::AccountId),
            "category_id" => Some(Self::CategoryId),
            "id" => Some(Self::Id),
            _ => None,
        }
    }

    fn column(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Payee => "payee",
            Self::Memo => "memo",
            Self::AccountId => "account_id",
            Self::CategoryId => "category_id",
            Self::Id => "id",
        }
    }
}

/// The order to sort transactions in a query.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SortDirection {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}

impl SortDirection {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(Self::Ascending),
            "desc" => Some(Self::Descending),
            _ => None,
        }
    }

    fn keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Maps the client-supplied `orderBy` value to a column ordering clause.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Sorter {
    field: SortField,
    direction: SortDirection,
}

impl Sorter {
    /// Read the `orderBy` request value, falling back to [DEFAULT_ORDER].
    ///
    /// # Errors
    /// Returns [Error::InvalidRequest] carrying the offending value if it is
    /// not of the form `<field>:<direction>` with a sortable field and a
    /// direction of `asc` or `desc`.
    pub fn from_query(query: &ListQuery) -> Result<Self, Error> {
        let order_by = query.order_by.as_deref().unwrap_or(DEFAULT_ORDER);

        let invalid =
            || Error::InvalidRequest(format!("invalid orderBy parameter \"{order_by}\""));

        let (field_name, direction_name) = order_by.split_once(':').ok_or_else(invalid)?;
        let field = SortField::parse(field_name).ok_or_else(invalid)?;
        let direction = SortDirection::parse(direction_name).ok_or_else(invalid)?;

        Ok(Self { field, direction })
    }

    /// The ORDER BY clause for the listing query.
    ///
    /// Ties sort by `id` to keep pages stable across rows with equal keys.
    pub fn order_clause(&self) -> String {
        format!(
            "ORDER BY {} {}, id ASC",
            self.field.column(),
            self.direction.keyword()
        )
    }
}

#[cfg(test)]
mod sorter_tests {
    use crate::{Error, transaction::list_endpoint::ListQuery};

    use super::Sorter;

    fn query_with_order(order_by: &str) -> ListQuery {
        ListQuery {
            order_by: Some(order_by.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn default_order_is_date_descending() {
        let sorter = Sorter::from_query(&ListQuery::default()).unwrap();

        assert_eq!(sorter.order_clause(), "ORDER BY date DESC, id ASC");
    }

    #[test]
    fn parses_each_allowed_field() {
        for field in ["date", "amount", "payee", "memo", "account_id", "category_id", "id"] {
            let sorter = Sorter::from_query(&query_with_order(&format!("{field}:asc")))
                .unwrap_or_else(|_| panic!("expected \"{field}\" to be sortable"));

            assert_eq!(sorter.order_clause(), format!("ORDER BY {field} ASC, id ASC"));
        }
    }

    #[test]
    fn unknown_field_is_invalid_request() {
        let got = Sorter::from_query(&query_with_order("nonexistentField:asc"));

        assert_eq!(
            got,
            Err(Error::InvalidRequest(
                "invalid orderBy parameter \"nonexistentField:asc\"".to_owned()
            ))
        );
    }

    #[test]
    fn unknown_direction_is_invalid_request() {
        let got = Sorter::from_query(&query_with_order("date:sideways"));

        assert_eq!(
            got,
            Err(Error::InvalidRequest(
                "invalid orderBy parameter \"date:sideways\"".to_owned()
            ))
        );
    }

    #[test]
    fn missing_separator_is_invalid_request() {
        let got = Sorter::from_query(&query_with_order("date"));

        assert_eq!(
            got,
            Err(Error::InvalidRequest(
                "invalid orderBy parameter \"date\"".to_owned()
            ))
        );
    }
}
