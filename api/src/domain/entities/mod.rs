//! Domain entities
//!
//! Pure domain models for the re-enrollment term.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod enrollment;
pub mod specialty;
pub mod student;
pub mod workshop;

pub use enrollment::{EnrollmentDetails, EnrollmentId, EnrollmentRecord, NewEnrollmentRecord};
pub use specialty::{Specialty, SpecialtyId, SPECIALTY_CAPACITY};
pub use student::{ControlNumber, Student, SPECIALTY_CHOICE_SEMESTER};
pub use workshop::{Workshop, WorkshopId, WORKSHOP_CAPACITY};
