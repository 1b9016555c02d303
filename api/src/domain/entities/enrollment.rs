//! Enrollment record domain entity
//!
//! The result of one successful registration: a student placed in a
//! group for the next semester, optionally with a specialty and workshop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ControlNumber, Specialty, SpecialtyId, Student, Workshop, WorkshopId};

/// Unique identifier for an enrollment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentId(pub i32);

impl std::fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored enrollment record. At most one exists per (student, semester).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentRecord {
    pub id: EnrollmentId,
    pub student_id: ControlNumber,
    pub specialty_id: Option<SpecialtyId>,
    pub workshop_id: Option<WorkshopId>,
    pub group_code: String,
    pub semester: i32,
    pub requested_at: DateTime<Utc>,
}

/// Data needed to insert a new enrollment record
#[derive(Debug, Clone)]
pub struct NewEnrollmentRecord {
    pub student_id: ControlNumber,
    pub specialty_id: Option<SpecialtyId>,
    pub workshop_id: Option<WorkshopId>,
    pub group_code: String,
    pub semester: i32,
}

/// A record joined with the rows it references, for display
#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentDetails {
    pub record: EnrollmentRecord,
    pub student: Student,
    pub specialty: Option<Specialty>,
    pub workshop: Option<Workshop>,
}

impl EnrollmentDetails {
    pub fn specialty_name(&self) -> Option<&str> {
        self.specialty.as_ref().map(|s| s.name.as_str())
    }

    pub fn specialty_code(&self) -> Option<&str> {
        self.specialty.as_ref().map(|s| s.code.as_str())
    }

    pub fn workshop_name(&self) -> Option<&str> {
        self.workshop.as_ref().map(|w| w.name.as_str())
    }
}
