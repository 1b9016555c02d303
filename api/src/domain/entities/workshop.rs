//! Workshop domain entity

use serde::{Deserialize, Serialize};

/// Maximum number of students enrolled in one workshop
pub const WORKSHOP_CAPACITY: i32 = 30;

/// Unique identifier for a workshop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkshopId(pub i32);

impl From<i32> for WorkshopId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for WorkshopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An optional elective with a fixed number of seats
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Workshop {
    pub id: WorkshopId,
    pub name: String,
    pub enrolled_count: i32,
}

impl Workshop {
    pub fn available_seats(&self) -> i32 {
        WORKSHOP_CAPACITY - self.enrolled_count
    }

    pub fn has_available_seats(&self) -> bool {
        self.enrolled_count < WORKSHOP_CAPACITY
    }
}
