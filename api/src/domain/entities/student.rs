//! Student domain entity
//!
//! A student eligible to re-enroll for the coming term, identified by
//! their school control number.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// School-issued control number (primary key of a student)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlNumber(pub i32);

impl From<i32> for ControlNumber {
    fn from(n: i32) -> Self {
        Self(n)
    }
}

impl std::fmt::Display for ControlNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semester after which a student must pick a specialty track
pub const SPECIALTY_CHOICE_SEMESTER: i32 = 2;

/// A student as loaded from the roster. Never mutated by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    pub control_number: ControlNumber,
    pub first_names: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    /// Group code of the semester the student just finished (e.g. "305IQ")
    pub previous_group: String,
    pub previous_semester: i32,
}

impl Student {
    /// Students finishing second semester must choose a specialty
    pub fn must_choose_specialty(&self) -> bool {
        self.previous_semester == SPECIALTY_CHOICE_SEMESTER
    }

    /// Students past the choice semester keep the track encoded in their group
    pub fn inherits_specialty(&self) -> bool {
        self.previous_semester > SPECIALTY_CHOICE_SEMESTER
    }

    /// Semester the student is enrolling into
    pub fn target_semester(&self) -> Result<i32, DomainError> {
        self.previous_semester.checked_add(1).ok_or_else(|| {
            DomainError::Internal(format!(
                "Semestre anterior fuera de rango para el alumno {}",
                self.control_number
            ))
        })
    }

    pub fn full_name(&self) -> String {
        format!(
            "{} {} {}",
            self.first_names, self.paternal_surname, self.maternal_surname
        )
    }
}
