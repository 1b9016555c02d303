//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., PostgreSQL).

use async_trait::async_trait;

use crate::domain::entities::{
    ControlNumber, EnrollmentDetails, EnrollmentRecord, NewEnrollmentRecord, Specialty,
    SpecialtyId, Student, Workshop, WorkshopId,
};
use crate::error::DomainError;

/// Repository for Student entities
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Find a student by control number
    async fn find_by_control_number(
        &self,
        control_number: &ControlNumber,
    ) -> Result<Option<Student>, DomainError>;
}

/// Read access to the specialty and workshop catalogs
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Specialties with at least one free seat, ordered by id
    async fn find_specialties_with_seats(&self) -> Result<Vec<Specialty>, DomainError>;

    /// Workshops with at least one free seat, ordered by id
    async fn find_workshops_with_seats(&self) -> Result<Vec<Workshop>, DomainError>;
}

/// Repository for enrollment records
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Most recent record of a student, joined with its references
    async fn find_latest_by_student(
        &self,
        control_number: &ControlNumber,
    ) -> Result<Option<EnrollmentDetails>, DomainError>;

    /// Every record, newest first
    async fn find_all(&self) -> Result<Vec<EnrollmentDetails>, DomainError>;

    /// Start a unit of work for a registration
    async fn begin(&self) -> Result<Box<dyn EnrollmentTransaction>, DomainError>;
}

/// One atomic registration.
///
/// Nothing done through the transaction is visible to others until
/// `commit` succeeds. Dropping it without committing discards every change.
#[async_trait]
pub trait EnrollmentTransaction: Send {
    /// Load a student and hold it until the transaction ends, so that
    /// registrations for the same student run one after another
    async fn lock_student(
        &mut self,
        control_number: &ControlNumber,
    ) -> Result<Option<Student>, DomainError>;

    /// Whether a record already exists for (student, semester)
    async fn record_exists(
        &mut self,
        control_number: &ControlNumber,
        semester: i32,
    ) -> Result<bool, DomainError>;

    /// Load a specialty and hold it until the transaction ends
    async fn lock_specialty(&mut self, id: &SpecialtyId) -> Result<Option<Specialty>, DomainError>;

    /// Find a specialty by its two-character code
    async fn find_specialty_by_code(&mut self, code: &str)
        -> Result<Option<Specialty>, DomainError>;

    /// Load a workshop and hold it until the transaction ends
    async fn lock_workshop(&mut self, id: &WorkshopId) -> Result<Option<Workshop>, DomainError>;

    /// Insert a record. A second record for the same (student, semester)
    /// fails with `DomainError::Conflict`.
    async fn insert_record(
        &mut self,
        record: &NewEnrollmentRecord,
    ) -> Result<EnrollmentRecord, DomainError>;

    /// Take one seat of a specialty. Returns false, changing nothing,
    /// when the specialty is already full.
    async fn claim_specialty_seat(&mut self, id: &SpecialtyId) -> Result<bool, DomainError>;

    /// Take one seat of a workshop. Returns false, changing nothing,
    /// when the workshop is already full.
    async fn claim_workshop_seat(&mut self, id: &WorkshopId) -> Result<bool, DomainError>;

    /// Make every change visible at once
    async fn commit(&mut self) -> Result<(), DomainError>;
}
