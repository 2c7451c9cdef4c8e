use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SLOTS_PER_DAY;

/// Half-hour bucket of the day, `0..48`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeSlot(u8);

impl TimeSlot {
    /// Build a slot from its index. Out-of-range indices wrap into the day.
    pub fn new(index: u8) -> Self {
        Self(index % SLOTS_PER_DAY)
    }

    /// Slot a timestamp falls into.
    pub fn of(timestamp: &DateTime<Utc>) -> Self {
        let index = timestamp.hour() * 2 + timestamp.minute() / 30;
        Self::new(index as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }
}

/// Historical accuracy of predictions issued in one time slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotAccuracy {
    /// Mean absolute error against the realized count.
    pub mae: f64,
    /// Number of graded predictions behind `mae`.
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn slot_of_timestamp() {
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(TimeSlot::of(&t).index(), 0);
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 13, 45, 0).unwrap();
        assert_eq!(TimeSlot::of(&t).index(), 27);
        let t = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 59).unwrap();
        assert_eq!(TimeSlot::of(&t).index(), 47);
    }

    #[test]
    fn new_wraps() {
        assert_eq!(TimeSlot::new(50).index(), 2);
    }
}
