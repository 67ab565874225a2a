use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::MonthKey;
use crate::scroll_sync::DayOrigin;

/// Every visible navigation change on a mounted Plans screen produces an
/// Event. Hosts consume them from the return value of each input call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The detail view now shows `date`. `day_index` is `None` when the
    /// date lies outside the day window.
    DaySelected {
        date: NaiveDate,
        day_index: Option<usize>,
        origin: DayOrigin,
        at_ms: u64,
    },
    /// Both week strips now agree on `index`.
    WeekChanged { index: usize, at_ms: u64 },
    MonthToggled { expanded: bool, at_ms: u64 },
    /// The month view was swiped to another month.
    MonthChanged { month: MonthKey, at_ms: u64 },
    /// The day window was rebuilt around `reference`. Indexes held from
    /// earlier events are stale.
    WindowRegenerated {
        reference: NaiveDate,
        generation: u64,
        at_ms: u64,
    },
    ScreenUnmounted { session_id: Uuid, at_ms: u64 },
}

impl Event {
    pub fn at_ms(&self) -> u64 {
        match self {
            Event::DaySelected { at_ms, .. }
            | Event::WeekChanged { at_ms, .. }
            | Event::MonthToggled { at_ms, .. }
            | Event::MonthChanged { at_ms, .. }
            | Event::WindowRegenerated { at_ms, .. }
            | Event::ScreenUnmounted { at_ms, .. } => *at_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::DaySelected {
            date: NaiveDate::from_ymd_opt(2024, 1, 22).unwrap(),
            day_index: Some(21),
            origin: DayOrigin::MonthGrid,
            at_ms: 40,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "DaySelected");
        assert_eq!(json["date"], "2024-01-22");
        assert_eq!(json["origin"], "month_grid");
        assert_eq!(event.at_ms(), 40);
    }
}
