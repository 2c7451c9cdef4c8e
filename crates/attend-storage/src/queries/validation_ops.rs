//! Validation records: insert, windowed reads, counts, optimizer samples.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use attend_core::errors::AttendResult;
use attend_core::models::{OptimizationSample, PredictionInputs, Track, ValidationRecord};

use super::{decode_date, decode_timestamp, encode_date, encode_timestamp, window_start};
use crate::{corrupt_row, to_storage_err};

const TABLE: &str = "validations";

/// Whether `target_date` already has a validation record.
pub fn is_graded(conn: &Connection, target_date: NaiveDate) -> AttendResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM validations WHERE target_date = ?1",
            params![encode_date(target_date)],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(found.is_some())
}

/// Insert a record. The caller checks `is_graded` first; a duplicate still
/// fails on the primary key.
pub fn insert_validation(conn: &Connection, record: &ValidationRecord) -> AttendResult<()> {
    conn.execute(
        "INSERT INTO validations
            (target_date, production_prediction, experimental_prediction, actual_value,
             production_error, experimental_error, better_track, improvement, validated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            encode_date(record.date),
            record.production_prediction,
            record.experimental_prediction,
            record.actual_value,
            record.production_error,
            record.experimental_error,
            record.better_track.as_str(),
            record.improvement,
            encode_timestamp(&record.validated_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

struct RawValidation {
    date: String,
    production_prediction: f64,
    experimental_prediction: f64,
    actual_value: f64,
    production_error: f64,
    experimental_error: f64,
    better_track: String,
    improvement: f64,
    validated_at: String,
}

impl RawValidation {
    fn decode(self) -> AttendResult<ValidationRecord> {
        let better_track = Track::parse(&self.better_track)
            .ok_or_else(|| corrupt_row(TABLE, format!("unknown track {:?}", self.better_track)))?;
        Ok(ValidationRecord {
            date: decode_date(TABLE, &self.date)?,
            production_prediction: self.production_prediction,
            experimental_prediction: self.experimental_prediction,
            actual_value: self.actual_value,
            production_error: self.production_error,
            experimental_error: self.experimental_error,
            better_track,
            improvement: self.improvement,
            validated_at: decode_timestamp(TABLE, &self.validated_at)?,
        })
    }
}

/// Records whose date falls in the window, oldest first.
pub fn get_since(conn: &Connection, window_days: u32) -> AttendResult<Vec<ValidationRecord>> {
    let mut stmt = conn
        .prepare(
            "SELECT target_date, production_prediction, experimental_prediction, actual_value,
                    production_error, experimental_error, better_track, improvement, validated_at
             FROM validations
             WHERE target_date >= ?1
             ORDER BY target_date ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![window_start(window_days)], |row| {
            Ok(RawValidation {
                date: row.get(0)?,
                production_prediction: row.get(1)?,
                experimental_prediction: row.get(2)?,
                actual_value: row.get(3)?,
                production_error: row.get(4)?,
                experimental_error: row.get(5)?,
                better_track: row.get(6)?,
                improvement: row.get(7)?,
                validated_at: row.get(8)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for raw in rows {
        out.push(raw.map_err(|e| to_storage_err(e.to_string()))?.decode()?);
    }
    Ok(out)
}

/// Number of records whose date falls in the window.
pub fn count_since(conn: &Connection, window_days: u32) -> AttendResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM validations WHERE target_date >= ?1",
            params![window_start(window_days)],
            |row| row.get(0),
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(count.max(0) as usize)
}

/// Graded dates in the window joined with the inputs that produced them.
pub fn optimization_samples(conn: &Connection, window_days: u32) -> AttendResult<Vec<OptimizationSample>> {
    let mut stmt = conn
        .prepare(
            "SELECT v.target_date, t.base_value, t.weather_factor, t.ai_factor, v.actual_value
             FROM validations v
             JOIN track_predictions t
               ON t.target_date = v.target_date AND t.track = 'production'
             WHERE v.target_date >= ?1
             ORDER BY v.target_date ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![window_start(window_days)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                PredictionInputs::new(row.get(1)?, row.get(2)?, row.get(3)?),
                row.get::<_, f64>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (date, inputs, actual) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(OptimizationSample {
            date: decode_date(TABLE, &date)?,
            inputs,
            actual,
        });
    }
    Ok(out)
}
