//! Intraday point prediction insert and per-date reads.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use attend_core::errors::AttendResult;
use attend_core::models::{Interval, PointPrediction, TimeSlot};

use super::{decode_timestamp, encode_date, encode_timestamp};
use crate::to_storage_err;

const TABLE: &str = "point_predictions";

/// Insert one reading for `target_date`.
pub fn insert_point_prediction(
    conn: &Connection,
    target_date: NaiveDate,
    prediction: &PointPrediction,
) -> AttendResult<()> {
    conn.execute(
        "INSERT INTO point_predictions
            (target_date, value, confidence, issued_at, time_slot,
             ci80_lower, ci80_upper, ci95_lower, ci95_upper)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            encode_date(target_date),
            prediction.value,
            prediction.confidence,
            encode_timestamp(&prediction.timestamp),
            i64::from(TimeSlot::of(&prediction.timestamp).index()),
            prediction.ci80.map(|i| i.lower),
            prediction.ci80.map(|i| i.upper),
            prediction.ci95.map(|i| i.lower),
            prediction.ci95.map(|i| i.upper),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

struct RawPoint {
    value: f64,
    confidence: Option<f64>,
    issued_at: String,
    ci80: (Option<f64>, Option<f64>),
    ci95: (Option<f64>, Option<f64>),
}

fn interval(bounds: (Option<f64>, Option<f64>)) -> Option<Interval> {
    match bounds {
        (Some(lower), Some(upper)) => Some(Interval::new(lower, upper)),
        _ => None,
    }
}

/// All readings for `target_date`, oldest first.
pub fn get_for_date(conn: &Connection, target_date: NaiveDate) -> AttendResult<Vec<PointPrediction>> {
    let mut stmt = conn
        .prepare(
            "SELECT value, confidence, issued_at, ci80_lower, ci80_upper, ci95_lower, ci95_upper
             FROM point_predictions
             WHERE target_date = ?1
             ORDER BY issued_at ASC, id ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![encode_date(target_date)], |row| {
            Ok(RawPoint {
                value: row.get(0)?,
                confidence: row.get(1)?,
                issued_at: row.get(2)?,
                ci80: (row.get(3)?, row.get(4)?),
                ci95: (row.get(5)?, row.get(6)?),
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for raw in rows {
        let raw = raw.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(PointPrediction {
            value: raw.value,
            confidence: raw.confidence,
            timestamp: decode_timestamp(TABLE, &raw.issued_at)?,
            ci80: interval(raw.ci80),
            ci95: interval(raw.ci95),
        });
    }
    Ok(out)
}
