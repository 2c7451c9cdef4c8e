//! Dual-track prediction upsert and pair reads.

use chrono::NaiveDate;
use rusqlite::{params, Connection};

use attend_core::errors::AttendResult;
use attend_core::models::{PredictionInputs, StoredPredictionPair, Track};

use super::encode_date;
use crate::to_storage_err;

/// Insert or replace the prediction for `(target_date, track)`.
pub fn upsert_prediction(
    conn: &Connection,
    target_date: NaiveDate,
    track: Track,
    value: f64,
    inputs: &PredictionInputs,
) -> AttendResult<()> {
    conn.execute(
        "INSERT INTO track_predictions
            (target_date, track, value, base_value, weather_factor, ai_factor)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(target_date, track) DO UPDATE SET
            value = excluded.value,
            base_value = excluded.base_value,
            weather_factor = excluded.weather_factor,
            ai_factor = excluded.ai_factor,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![
            encode_date(target_date),
            track.as_str(),
            value,
            inputs.base_value,
            inputs.weather_factor,
            inputs.ai_factor,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Both tracks for `target_date`, or `None` unless both rows exist.
/// Inputs are taken from the production row.
pub fn get_pair(conn: &Connection, target_date: NaiveDate) -> AttendResult<Option<StoredPredictionPair>> {
    let mut stmt = conn
        .prepare(
            "SELECT track, value, base_value, weather_factor, ai_factor
             FROM track_predictions
             WHERE target_date = ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![encode_date(target_date)], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, f64>(1)?,
                PredictionInputs::new(row.get(2)?, row.get(3)?, row.get(4)?),
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut production = None;
    let mut experimental = None;
    for row in rows {
        let (track, value, inputs) = row.map_err(|e| to_storage_err(e.to_string()))?;
        match Track::parse(&track) {
            Some(Track::Production) => production = Some((value, inputs)),
            Some(Track::Experimental) => experimental = Some(value),
            None => {
                return Err(crate::corrupt_row(
                    "track_predictions",
                    format!("unknown track {track:?}"),
                ))
            }
        }
    }

    Ok(match (production, experimental) {
        (Some((production, inputs)), Some(experimental)) => Some(StoredPredictionPair {
            date: target_date,
            production,
            experimental,
            inputs,
        }),
        _ => None,
    })
}
