//! Workout display data and the collaborator that supplies it.
//!
//! The navigation core treats workouts as opaque display data keyed by date.
//! Real templates come from an external static catalogue; the sources here
//! exist so the engine can be driven without one.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub id: String,
    pub start_time: NaiveTime,
    pub muscle_group: String,
    pub duration_minutes: u32,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

/// Supplies the workouts scheduled on a given date.
pub trait WorkoutSource {
    /// Workouts for `date`, in display order. Empty on rest days.
    fn workouts_for(&self, date: NaiveDate) -> Vec<WorkoutSummary>;
}

/// Source with nothing scheduled.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptySource;

impl WorkoutSource for EmptySource {
    fn workouts_for(&self, _date: NaiveDate) -> Vec<WorkoutSummary> {
        Vec::new()
    }
}

/// (name, sets, reps)
type Moves = &'static [(&'static str, u32, u32)];

/// Placeholder weekly split: one muscle-group session per training weekday.
#[derive(Debug, Clone)]
pub struct WeeklyTemplateSource {
    rest_days: Vec<Weekday>,
}

impl WeeklyTemplateSource {
    pub fn new(rest_days: Vec<Weekday>) -> Self {
        Self { rest_days }
    }

    fn template(weekday: Weekday) -> (&'static str, u32, Moves) {
        const CHEST: Moves = &[("Bench Press", 4, 8), ("Incline Fly", 3, 12)];
        const BACK: Moves = &[("Deadlift", 4, 5), ("Pull-up", 3, 10)];
        const CORE: Moves = &[("Plank", 3, 1), ("Dead Bug", 3, 12)];
        const LEGS: Moves = &[("Back Squat", 5, 5), ("Lunge", 3, 10)];
        const SHOULDERS: Moves = &[("Overhead Press", 4, 8), ("Lateral Raise", 3, 15)];
        const ARMS: Moves = &[("Barbell Curl", 3, 10), ("Dip", 3, 12)];
        const MOBILITY: Moves = &[("Hip Flow", 2, 1)];

        match weekday {
            Weekday::Mon => ("Chest", 60, CHEST),
            Weekday::Tue => ("Back", 55, BACK),
            Weekday::Wed => ("Core", 30, CORE),
            Weekday::Thu => ("Legs", 65, LEGS),
            Weekday::Fri => ("Shoulders", 45, SHOULDERS),
            Weekday::Sat => ("Arms", 40, ARMS),
            Weekday::Sun => ("Mobility", 25, MOBILITY),
        }
    }
}

impl WorkoutSource for WeeklyTemplateSource {
    fn workouts_for(&self, date: NaiveDate) -> Vec<WorkoutSummary> {
        let weekday = date.weekday();
        if self.rest_days.contains(&weekday) {
            return Vec::new();
        }
        let (group, minutes, moves) = Self::template(weekday);
        let workout_id = format!("{}-{}", date.format("%Y%m%d"), group.to_lowercase());
        vec![WorkoutSummary {
            id: workout_id.clone(),
            start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            muscle_group: group.to_string(),
            duration_minutes: minutes,
            exercises: moves
                .iter()
                .enumerate()
                .map(|(i, (name, sets, reps))| Exercise {
                    id: format!("{workout_id}-{i}"),
                    name: (*name).to_string(),
                    sets: *sets,
                    reps: *reps,
                })
                .collect(),
        }]
    }
}
