use chrono::{NaiveDate, Utc};

use crate::models::timestamp;

/// Today's date in the server's zone.
pub fn today() -> NaiveDate {
    Utc::now()
        .with_timezone(&timestamp::server_offset())
        .date_naive()
}

/// A job is expired once `today` is past its end date. Jobs without an end
/// date never expire; an end date that cannot be parsed counts as expired.
pub fn is_job_expired(end_date: Option<&str>, today: NaiveDate) -> bool {
    let Some(raw) = end_date.map(str::trim).filter(|s| !s.is_empty()) else {
        return false;
    };
    match timestamp::parse(raw) {
        Some(end) => today > end.with_timezone(&timestamp::server_offset()).date_naive(),
        None => true,
    }
}
