//! Task categories and their priority strategies.
//!
//! Each category scores a task as a baseline plus a weighted due-date
//! urgency. Urgency never decreases as the due date gets closer, and the
//! baselines are spaced so that a bug always outranks a feature and a
//! feature always outranks a chore, whatever their due dates.

use super::ParseTaskCategoryError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work a task represents. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Defect in existing behaviour.
    Bug,
    /// New behaviour.
    Feature,
    /// Maintenance work.
    Chore,
}

impl TaskCategory {
    /// Every category, from most to least urgent.
    pub const ALL: [Self; 3] = [Self::Bug, Self::Feature, Self::Chore];

    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bug => "bug",
            Self::Feature => "feature",
            Self::Chore => "chore",
        }
    }

    /// Returns the scoring parameters for this category.
    #[must_use]
    pub const fn strategy(self) -> PriorityStrategy {
        match self {
            Self::Bug => PriorityStrategy::new(60, 3),
            Self::Feature => PriorityStrategy::new(30, 2),
            Self::Chore => PriorityStrategy::new(10, 1),
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskCategory {
    type Error = ParseTaskCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "bug" => Ok(Self::Bug),
            "feature" => Ok(Self::Feature),
            "chore" => Ok(Self::Chore),
            _ => Err(ParseTaskCategoryError(value.to_owned())),
        }
    }
}

/// Temporal inputs to a priority computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityContext {
    due_date: Option<NaiveDate>,
    today: NaiveDate,
}

impl PriorityContext {
    /// Creates a context evaluated on `today`.
    #[must_use]
    pub const fn new(due_date: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self { due_date, today }
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the reference date.
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Returns the signed number of days until the due date.
    ///
    /// Negative values mean the task is overdue.
    #[must_use]
    pub fn days_until_due(&self) -> Option<i64> {
        self.due_date
            .map(|due_date| due_date.signed_duration_since(self.today).num_days())
    }

    /// Maps the due date onto an urgency band in `0..=MAX_URGENCY`.
    #[must_use]
    pub fn urgency(&self) -> u32 {
        match self.days_until_due() {
            None => 0,
            Some(days) if days < 0 => MAX_URGENCY,
            Some(0) => 8,
            Some(1..=2) => 6,
            Some(3..=7) => 4,
            Some(8..=14) => 2,
            Some(_) => 0,
        }
    }
}

/// Highest urgency band, reached by overdue tasks.
pub const MAX_URGENCY: u32 = 10;

/// Linear scoring rule: `baseline + weight * urgency`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityStrategy {
    baseline: u32,
    weight: u32,
}

impl PriorityStrategy {
    const fn new(baseline: u32, weight: u32) -> Self {
        Self { baseline, weight }
    }

    /// Returns the score of a task with no due date.
    #[must_use]
    pub const fn baseline(self) -> u32 {
        self.baseline
    }

    /// Returns the highest score this strategy can produce.
    #[must_use]
    pub const fn ceiling(self) -> u32 {
        self.baseline + self.weight * MAX_URGENCY
    }

    /// Computes the priority score for `context`.
    #[must_use]
    pub fn compute(self, context: &PriorityContext) -> u32 {
        self.baseline + self.weight * context.urgency()
    }
}
