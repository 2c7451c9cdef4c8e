//! Historical accuracy per half-hour slot, from graded point predictions.

use std::collections::BTreeMap;

use rusqlite::Connection;

use attend_core::errors::AttendResult;
use attend_core::models::{SlotAccuracy, TimeSlot};

use crate::to_storage_err;

/// Mean absolute error of every point prediction on a graded date, grouped by slot.
pub fn accuracy_by_slot(conn: &Connection) -> AttendResult<BTreeMap<TimeSlot, SlotAccuracy>> {
    let mut stmt = conn
        .prepare(
            "SELECT p.time_slot, AVG(ABS(p.value - v.actual_value)), COUNT(*)
             FROM point_predictions p
             JOIN validations v ON v.target_date = p.target_date
             GROUP BY p.time_slot",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, f64>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut out = BTreeMap::new();
    for row in rows {
        let (slot, mae, count) = row.map_err(|e| to_storage_err(e.to_string()))?;
        out.insert(
            TimeSlot::new(slot.clamp(0, i64::from(u8::MAX)) as u8),
            SlotAccuracy {
                mae,
                count: count.max(0) as usize,
            },
        );
    }
    Ok(out)
}
