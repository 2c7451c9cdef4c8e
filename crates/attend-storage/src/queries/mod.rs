//! Query modules, one per table family, plus shared column codecs.

pub mod point_prediction_ops;
pub mod slot_accuracy_ops;
pub mod track_prediction_ops;
pub mod validation_ops;
pub mod weight_ops;

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};

use attend_core::errors::AttendResult;

use crate::corrupt_row;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn encode_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn decode_date(table: &str, raw: &str) -> AttendResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| corrupt_row(table, format!("bad date {raw:?}: {e}")))
}

/// Fixed-width RFC 3339 so lexical order matches time order.
pub(crate) fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn decode_timestamp(table: &str, raw: &str) -> AttendResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| corrupt_row(table, format!("bad timestamp {raw:?}: {e}")))
}

/// First date inside a window of `window_days` days ending today (UTC).
pub(crate) fn window_start(window_days: u32) -> String {
    let today = Utc::now().date_naive();
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);
    encode_date(start)
}
