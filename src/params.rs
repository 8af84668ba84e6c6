//! Parsers for raw string request parameters.
//!
//! Request handlers keep query values as strings so the parsing rules live
//! in one place: booleans are permissive, dates and counts are strict.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The format dates must use in request parameters, e.g. "2025-07-14".
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The strings accepted as true, compared case-insensitively.
const TRUTHY: [&str; 6] = ["true", "t", "yes", "y", "on", "1"];

/// Parse a boolean request parameter.
///
/// Absent and unrecognized values are false.
pub(crate) fn parse_bool(value: Option<&str>) -> bool {
    match value {
        Some(value) => TRUTHY.contains(&value.to_ascii_lowercase().as_str()),
        None => false,
    }
}

/// Parse the inclusive date range bounding a transaction listing.
///
/// A missing bound widens to the earliest or latest representable date, so
/// an unbounded listing matches every row.
///
/// # Errors
/// Returns [Error::InvalidRequest] naming the offending value if a bound is
/// present but not a date of the form "YYYY-MM-DD".
pub(crate) fn parse_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(Date, Date), Error> {
    let start_date = match start {
        Some(value) => parse_date(value)?,
        None => Date::MIN,
    };

    let end_date = match end {
        Some(value) => parse_date(value)?,
        None => Date::MAX,
    };

    Ok((start_date, end_date))
}

fn parse_date(value: &str) -> Result<Date, Error> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|_| Error::InvalidRequest(format!("invalid date \"{value}\"")))
}

/// Parse a positive integer request parameter, using `default` when the
/// value is absent.
///
/// # Errors
/// Returns [Error::InvalidRequest] naming the parameter if the value is not
/// an integer or is less than one.
pub(crate) fn parse_positive(name: &str, value: Option<&str>, default: u64) -> Result<u64, Error> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.parse::<u32>() {
        Ok(parsed) if parsed >= 1 => Ok(u64::from(parsed)),
        _ => Err(Error::InvalidRequest(format!(
            "invalid {name} parameter \"{value}\""
        ))),
    }
}


#[cfg(test)]
mod parse_date_range_tests {
    use time::{Date, macros::date};

    use crate::Error;

    use super::parse_date_range;

    #[test]
    fn parses_both_bounds() {
        let want = (date!(2025 - 01 - 01), date!(2025 - 01 - 31));

        let got = parse_date_range(Some("2025-01-01"), Some("2025-01-31")).unwrap();

        assert_eq!(want, got);
    }

    #[test]
    fn missing_bounds_widen_to_extremes() {
        let got = parse_date_range(None, None).unwrap();

        assert_eq!((Date::MIN, Date::MAX), got);
    }

    #[test]
    fn malformed_date_is_invalid_request() {
        let got = parse_date_range(Some("01/31/2025"), None);

        assert_eq!(
            got,
            Err(Error::InvalidRequest(
                "invalid date \"01/31/2025\"".to_owned()
            ))
        );
    }
}

#[cfg(test)]
mod parse_positive_tests {
    use crate::Error;

    use super::parse_positive;

    #[test]
    fn absent_uses_default() {
        assert_eq!(parse_positive("page", None, 1), Ok(1));
    }

    #[test]
    fn parses_positive_integers() {
        assert_eq!(parse_positive("perPage", Some("25"), 10), Ok(25));
    }

    #[test]
    fn rejects_zero_negative_and_non_numeric() {
        for value in ["0", "-3", "ten", "2.5", ""] {
            let got = parse_positive("page", Some(value), 1);

            assert_eq!(
                got,
                Err(Error::InvalidRequest(format!(
                    "invalid page parameter \"{value}\""
                )))
            );
        }
    }
}
