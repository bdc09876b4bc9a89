use thiserror::Error;
use time::{
    OffsetDateTime, UtcDateTime,
    error::Format,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const INSTANT_MILLIS: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
#[error("The timestamp is not a valid ISO-8601 instant: {0:?}")]
pub struct InvalidTimestampError(String);

pub fn parse_instant(value: &str) -> Result<UtcDateTime, InvalidTimestampError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map(OffsetDateTime::to_utc)
        .map_err(|_| InvalidTimestampError(value.to_owned()))
}

pub fn format_instant_millis(instant: UtcDateTime) -> Result<String, Format> {
    instant.format(INSTANT_MILLIS)
}

#[cfg(test)]
mod tests {
    use crate::util::{format_instant_millis, parse_instant};
    use time::{Duration, macros::utc_datetime};

    #[test]
    fn parses_cms_timestamps() {
        assert_eq!(
            parse_instant("2024-01-15T00:00:00Z"),
            Ok(utc_datetime!(2024-01-15 00:00))
        );
        assert_eq!(
            parse_instant("2024-01-15T09:30:00.250Z"),
            Ok(utc_datetime!(2024-01-15 09:30:00.250))
        );
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        assert_eq!(
            parse_instant("2024-03-01T08:00:00+09:00"),
            Ok(utc_datetime!(2024-02-29 23:00))
        );
    }

    #[test]
    fn rejects_malformed_timestamps() {
        for malformed in ["", "yesterday", "2024-13-01T00:00:00Z", "2024-01-15"] {
            assert!(parse_instant(malformed).is_err(), "{malformed}");
        }
    }

    #[test]
    fn formats_with_milliseconds() {
        assert_eq!(
            format_instant_millis(utc_datetime!(2024-12-01 00:00)).unwrap(),
            "2024-12-01T00:00:00.000Z"
        );
        assert_eq!(
            format_instant_millis(utc_datetime!(2025-01-01 00:00) - Duration::MILLISECOND)
                .unwrap(),
            "2024-12-31T23:59:59.999Z"
        );
        assert_eq!(
            format_instant_millis(utc_datetime!(2024-03-05 07:08:09.012_345)).unwrap(),
            "2024-03-05T07:08:09.012Z"
        );
    }
}
