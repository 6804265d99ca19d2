use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::OffsetDateTime;

/// Returns the current local time, falling back to UTC when the local offset
/// cannot be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Formats `datetime` as `YYYYMMDD_HHMMSS`.
pub fn file_stamp(datetime: OffsetDateTime) -> String {
    let format = format_description!("[year][month][day]_[hour][minute][second]");
    datetime
        .format(format)
        .unwrap_or_else(|_| datetime.unix_timestamp().to_string())
}

/// Formats `datetime` as an RFC 3339 string.
pub fn rfc3339(datetime: OffsetDateTime) -> String {
    datetime
        .format(&Rfc3339)
        .unwrap_or_else(|_| datetime.unix_timestamp().to_string())
}
