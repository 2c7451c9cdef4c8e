//! Weight configurations and optimization events.

use rusqlite::{params, Connection, OptionalExtension};

use attend_core::errors::AttendResult;
use attend_core::models::{OptimizationEvent, Track, WeightConfiguration};

use super::encode_timestamp;
use crate::{corrupt_row, to_storage_err};

/// The current production configuration, if one was ever stored.
pub fn load_current(conn: &Connection) -> AttendResult<Option<WeightConfiguration>> {
    let row: Option<(f64, f64, f64)> = conn
        .query_row(
            "SELECT w_base, w_weather, w_ai FROM weight_configurations
             WHERE track = 'production' AND is_current = 1
             ORDER BY id DESC LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()
        .map_err(|e| to_storage_err(e.to_string()))?;

    match row {
        Some((w_base, w_weather, w_ai)) => WeightConfiguration::new(w_base, w_weather, w_ai, Track::Production)
            .map(Some)
            .map_err(|e| corrupt_row("weight_configurations", e.to_string())),
        None => Ok(None),
    }
}

/// Make `weights` the current production configuration.
pub fn set_current(conn: &Connection, weights: &WeightConfiguration) -> AttendResult<()> {
    conn.execute(
        "UPDATE weight_configurations SET is_current = 0 WHERE track = 'production'",
        [],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    conn.execute(
        "INSERT INTO weight_configurations (w_base, w_weather, w_ai, track, is_current)
         VALUES (?1, ?2, ?3, 'production', 1)",
        params![weights.w_base, weights.w_weather, weights.w_ai],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn insert_event(conn: &Connection, event: &OptimizationEvent) -> AttendResult<()> {
    conn.execute(
        "INSERT INTO optimization_events
            (id, evaluation_window_days, sample_count, old_weights, new_weights,
             improvement_percentage, statistically_significant, applied, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            event.id,
            i64::from(event.evaluation_window_days),
            event.sample_count as i64,
            serde_json::to_string(&event.old_weights)?,
            serde_json::to_string(&event.new_weights)?,
            event.improvement_percentage,
            event.statistically_significant,
            event.applied,
            encode_timestamp(&event.created_at),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Recorded optimization runs, newest first.
pub fn list_events(conn: &Connection, limit: usize) -> AttendResult<Vec<OptimizationEvent>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, evaluation_window_days, sample_count, old_weights, new_weights,
                    improvement_percentage, statistically_significant, applied, created_at
             FROM optimization_events
             ORDER BY created_at DESC
             LIMIT ?1",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, f64>(5)?,
                row.get::<_, bool>(6)?,
                row.get::<_, bool>(7)?,
                row.get::<_, String>(8)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = Vec::new();
    for row in rows {
        let (id, window, samples, old, new, improvement, significant, applied, created_at) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        out.push(OptimizationEvent {
            id,
            evaluation_window_days: window.max(0) as u32,
            sample_count: samples.max(0) as usize,
            old_weights: serde_json::from_str(&old)?,
            new_weights: serde_json::from_str(&new)?,
            improvement_percentage: improvement,
            statistically_significant: significant,
            applied,
            created_at: super::decode_timestamp("optimization_events", &created_at)?,
        });
    }
    Ok(out)
}
