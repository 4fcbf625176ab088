use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Timelike, Utc, Weekday};

/// Exchange local time approximated as a fixed UTC-5 offset. Deliberately not
/// DST-aware; the window only needs day granularity.
const EXCHANGE_UTC_OFFSET_HOURS: i32 = -5;

const MARKET_OPEN_HOUR: u32 = 9;
const MARKET_OPEN_MINUTE: u32 = 30;

/// Start of the news window: the most recent trading day whose session has
/// begun, as a calendar date.
///
/// Before 09:30 exchange-local the current day has not started for
/// news-freshness purposes and rolls back one calendar day; weekends then
/// roll back to the prior Friday. A Monday pre-open instant therefore lands
/// on Friday, three days back.
pub fn resolve_window_start(now: DateTime<Utc>) -> NaiveDate {
    let offset = FixedOffset::east_opt(EXCHANGE_UTC_OFFSET_HOURS * 3600).unwrap();
    let local = now.with_timezone(&offset);

    let mut date = local.date_naive();
    let before_open = local.hour() < MARKET_OPEN_HOUR
        || (local.hour() == MARKET_OPEN_HOUR && local.minute() < MARKET_OPEN_MINUTE);
    if before_open {
        date -= Duration::days(1);
    }

    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date - Duration::days(2),
        _ => date,
    }
}
