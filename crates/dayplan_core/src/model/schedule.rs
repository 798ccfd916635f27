//! Schedule domain model and priority enumeration.
//!
//! # Responsibility
//! - Define the schedule record used by calendar, progress and store layers.
//! - Own the three-level priority lookup tables (weight/label/color).
//!
//! # Invariants
//! - `start_at <= end_at` is enforced at write time via `validate()`.
//! - Priority weights are fixed: HIGH=3, MEDIUM=2, LOW=1.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a schedule row.
pub type ScheduleId = Uuid;

/// Three-level ordinal priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Fixed numeric sort weight, higher sorts first.
    pub fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Display label for list badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "important",
            Self::Medium => "normal",
            Self::Low => "minor",
        }
    }

    /// UI color token for the priority badge.
    pub fn color_class(self) -> &'static str {
        match self {
            Self::High => "bg-red-500 text-white",
            Self::Medium => "bg-gray-400 text-white",
            Self::Low => "bg-green-500 text-white",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Validation failures raised before any schedule write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// `start_at` is after `end_at`.
    InvertedRange { start_at: i64, end_at: i64 },
}

impl Display for ScheduleValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "schedule title must not be empty"),
            Self::InvertedRange { start_at, end_at } => write!(
                f,
                "schedule start {start_at} must not be after end {end_at}"
            ),
        }
    }
}

impl Error for ScheduleValidationError {}

/// One schedule/to-do row owned by a single user.
///
/// Timestamps are Unix epoch milliseconds. `keywords` materializes the
/// newline-delimited description column as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub owner_id: Uuid,
    pub title: String,
    /// Epoch milliseconds, inclusive start of the scheduled interval.
    pub start_at: i64,
    /// Epoch milliseconds, inclusive end of the scheduled interval.
    pub end_at: i64,
    /// `None` renders as the synthetic "uncategorized" placeholder.
    pub category_id: Option<Uuid>,
    pub priority: Priority,
    pub keywords: Vec<String>,
    pub completed: bool,
    pub created_at: i64,
}

impl Schedule {
    /// Creates a schedule with a generated id and the given time range.
    pub fn new(
        owner_id: Uuid,
        title: impl Into<String>,
        start_at: i64,
        end_at: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: title.into(),
            start_at,
            end_at,
            category_id: None,
            priority: Priority::default(),
            keywords: Vec::new(),
            completed: false,
            created_at: 0,
        }
    }

    /// Checks write-time invariants.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank.
    /// - `InvertedRange` when `start_at > end_at`.
    pub fn validate(&self) -> Result<(), ScheduleValidationError> {
        if self.title.trim().is_empty() {
            return Err(ScheduleValidationError::EmptyTitle);
        }
        if self.start_at > self.end_at {
            return Err(ScheduleValidationError::InvertedRange {
                start_at: self.start_at,
                end_at: self.end_at,
            });
        }
        Ok(())
    }
}

/// Stable descending priority order; equal priorities keep input order.
pub fn sort_by_priority(schedules: &mut [Schedule]) {
    schedules.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
}

#[cfg(test)]
mod tests {
    use super::{sort_by_priority, Priority, Schedule, ScheduleValidationError};
    use uuid::Uuid;

    fn schedule_with_priority(title: &str, priority: Priority) -> Schedule {
        let mut schedule = Schedule::new(Uuid::new_v4(), title, 0, 100);
        schedule.priority = priority;
        schedule
    }

    #[test]
    fn priority_weights_are_fixed() {
        assert_eq!(Priority::High.weight(), 3);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::Low.weight(), 1);
    }

    #[test]
    fn sorts_low_high_medium_into_high_medium_low() {
        let mut items = vec![
            schedule_with_priority("a", Priority::Low),
            schedule_with_priority("b", Priority::High),
            schedule_with_priority("c", Priority::Medium),
        ];
        sort_by_priority(&mut items);
        let order: Vec<&str> = items.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(order, ["b", "c", "a"]);
    }

    #[test]
    fn sort_is_stable_for_equal_priorities() {
        let mut items = vec![
            schedule_with_priority("first", Priority::Medium),
            schedule_with_priority("second", Priority::Medium),
            schedule_with_priority("third", Priority::High),
        ];
        sort_by_priority(&mut items);
        let order: Vec<&str> = items.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(order, ["third", "first", "second"]);
    }

    #[test]
    fn validate_rejects_blank_title_and_inverted_range() {
        let blank = Schedule::new(Uuid::new_v4(), "   ", 0, 10);
        assert_eq!(blank.validate(), Err(ScheduleValidationError::EmptyTitle));

        let inverted = Schedule::new(Uuid::new_v4(), "x", 10, 0);
        assert!(matches!(
            inverted.validate(),
            Err(ScheduleValidationError::InvertedRange { .. })
        ));

        let degenerate = Schedule::new(Uuid::new_v4(), "x", 10, 10);
        assert!(degenerate.validate().is_ok());
    }
}
