//! Specialty domain entity
//!
//! A fixed-capacity track chosen after second semester. Later semesters
//! inherit it through the last two characters of their group code.

use serde::{Deserialize, Serialize};

/// Maximum number of students enrolled in one specialty
pub const SPECIALTY_CAPACITY: i32 = 40;

/// Unique identifier for a specialty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecialtyId(pub i32);

impl From<i32> for SpecialtyId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for SpecialtyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Specialty {
    pub id: SpecialtyId,
    pub name: String,
    /// Two-character code embedded in group codes (e.g. "IQ")
    pub code: String,
    pub enrolled_count: i32,
}

impl Specialty {
    pub fn available_seats(&self) -> i32 {
        SPECIALTY_CAPACITY - self.enrolled_count
    }

    pub fn has_available_seats(&self) -> bool {
        self.enrolled_count < SPECIALTY_CAPACITY
    }
}
