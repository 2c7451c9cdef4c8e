//! v001: point predictions, track predictions, validations, weights, optimization events.

use rusqlite::Connection;

use attend_core::errors::AttendResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> AttendResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS point_predictions (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            target_date  TEXT NOT NULL,
            value        REAL NOT NULL,
            confidence   REAL,
            issued_at    TEXT NOT NULL,
            time_slot    INTEGER NOT NULL,
            ci80_lower   REAL,
            ci80_upper   REAL,
            ci95_lower   REAL,
            ci95_upper   REAL
        );

        CREATE INDEX IF NOT EXISTS idx_point_predictions_date ON point_predictions(target_date, issued_at);

        CREATE TABLE IF NOT EXISTS track_predictions (
            target_date     TEXT NOT NULL,
            track           TEXT NOT NULL,
            value           REAL NOT NULL,
            base_value      REAL NOT NULL,
            weather_factor  REAL NOT NULL,
            ai_factor       REAL NOT NULL,
            updated_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (target_date, track)
        );

        CREATE TABLE IF NOT EXISTS validations (
            target_date              TEXT PRIMARY KEY,
            production_prediction    REAL NOT NULL,
            experimental_prediction  REAL NOT NULL,
            actual_value             REAL NOT NULL,
            production_error         REAL NOT NULL,
            experimental_error       REAL NOT NULL,
            better_track             TEXT NOT NULL,
            improvement              REAL NOT NULL,
            validated_at             TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS weight_configurations (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            w_base      REAL NOT NULL,
            w_weather   REAL NOT NULL,
            w_ai        REAL NOT NULL,
            track       TEXT NOT NULL,
            is_current  INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_weights_current ON weight_configurations(track, is_current);

        CREATE TABLE IF NOT EXISTS optimization_events (
            id                         TEXT PRIMARY KEY,
            evaluation_window_days     INTEGER NOT NULL,
            sample_count               INTEGER NOT NULL,
            old_weights                TEXT NOT NULL,
            new_weights                TEXT NOT NULL,
            improvement_percentage     REAL NOT NULL,
            statistically_significant  INTEGER NOT NULL,
            applied                    INTEGER NOT NULL,
            created_at                 TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_optimization_events_created ON optimization_events(created_at);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
