use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Emergency,
    Vacation,
    Car,
    House,
    Education,
    Retirement,
    Other,
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GoalCategory::Emergency => "Emergency Fund",
            GoalCategory::Vacation => "Vacation",
            GoalCategory::Car => "Car",
            GoalCategory::House => "House",
            GoalCategory::Education => "Education",
            GoalCategory::Retirement => "Retirement",
            GoalCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingsGoal {
    pub id: Uuid,
    pub title: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub deadline: DateTime<Utc>,
    pub category: GoalCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SavingsGoal {
    pub fn new(
        title: impl Into<String>,
        target_amount: f64,
        current_amount: f64,
        deadline: DateTime<Utc>,
        category: GoalCategory,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            target_amount,
            current_amount,
            deadline,
            category,
            description: None,
        }
    }

    /// Saved fraction of the target, clamped to `[0, 1]`; zero for a non-positive target.
    pub fn progress(&self) -> f64 {
        if self.target_amount > 0.0 {
            (self.current_amount / self.target_amount).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }
}

impl Identifiable for SavingsGoal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for SavingsGoal {
    fn name(&self) -> &str {
        &self.title
    }
}

impl Amounted for SavingsGoal {
    fn amount(&self) -> f64 {
        self.current_amount
    }
}
