//! Time-of-day context and the canonical meal time bands.

use std::fmt;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// Meal category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Evening meal.
    Dinner,
    /// Anything outside the main meal bands.
    Snack,
}

impl MealType {
    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An hour-of-day range mapped to a meal category and a label.
#[derive(Clone, Copy, Debug)]
pub struct TimeBand {
    /// First hour in the band (inclusive).
    pub start: u32,
    /// Hour after the band (exclusive).
    pub end: u32,
    /// Meal served in this band.
    pub meal: MealType,
    /// Human label for the band.
    pub label: &'static str,
}

/// The one banding used for both meal detection and labels.
///
/// Hours not covered here fall in the late-night snack band.
pub const TIME_BANDS: [TimeBand; 3] = [
    TimeBand { start: 5, end: 11, meal: MealType::Breakfast, label: "morning" },
    TimeBand { start: 11, end: 16, meal: MealType::Lunch, label: "midday" },
    TimeBand { start: 16, end: 22, meal: MealType::Dinner, label: "evening" },
];

const LATE_NIGHT: TimeBand = TimeBand { start: 22, end: 5, meal: MealType::Snack, label: "late night" };

/// Band containing `hour` (0..=23).
#[must_use]
pub fn band_for_hour(hour: u32) -> TimeBand {
    TIME_BANDS
        .iter()
        .copied()
        .find(|band| hour >= band.start && hour < band.end)
        .unwrap_or(LATE_NIGHT)
}

/// Snapshot of the local time used to phrase suggestions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeContext {
    /// e.g. "07:05 PM".
    pub current_time: String,
    /// e.g. "Friday, March 7, 2025".
    pub current_date: String,
    /// e.g. "Friday".
    pub day_of_week: String,
    /// Hour of day, 0..=23.
    pub hour: u32,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// Label of the band containing `hour`.
    pub time_label: &'static str,
}

impl TimeContext {
    /// Build the context for a local wall-clock time.
    #[must_use]
    pub fn at(now: NaiveDateTime) -> Self {
        let hour = now.hour();
        Self {
            current_time: now.format("%I:%M %p").to_string(),
            current_date: now.format("%A, %B %-d, %Y").to_string(),
            day_of_week: now.format("%A").to_string(),
            hour,
            is_weekend: matches!(now.weekday(), Weekday::Sat | Weekday::Sun),
            time_label: band_for_hour(hour).label,
        }
    }

    /// Build the context for the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self::at(chrono::Local::now().naive_local())
    }

    /// Meal category for this time.
    #[must_use]
    pub fn meal_type(&self) -> MealType {
        band_for_hour(self.hour).meal
    }
}
