//! Mock implementations of port traits
//!
//! These are in-memory implementations that can be configured for testing.
//! They store data in memory and allow tests to verify behavior.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entities::{
    ControlNumber, EnrollmentDetails, EnrollmentId, EnrollmentRecord, NewEnrollmentRecord,
    Specialty, SpecialtyId, Student, Workshop, WorkshopId, SPECIALTY_CAPACITY, WORKSHOP_CAPACITY,
};
use crate::domain::ports::{
    CatalogRepository, EnrollmentRepository, EnrollmentTransaction, FormRenderer,
    StudentRepository,
};
use crate::error::DomainError;

// ============================================================================
// In-Memory Enrollment Store
// ============================================================================

#[derive(Debug, Clone, Default)]
struct StoreState {
    students: BTreeMap<i32, Student>,
    specialties: BTreeMap<i32, Specialty>,
    workshops: BTreeMap<i32, Workshop>,
    records: Vec<EnrollmentRecord>,
    next_record_id: i32,
}

impl StoreState {
    fn details(&self, record: &EnrollmentRecord) -> Option<EnrollmentDetails> {
        Some(EnrollmentDetails {
            record: record.clone(),
            student: self.students.get(&record.student_id.0)?.clone(),
            specialty: record
                .specialty_id
                .and_then(|id| self.specialties.get(&id.0).cloned()),
            workshop: record
                .workshop_id
                .and_then(|id| self.workshops.get(&id.0).cloned()),
        })
    }
}

/// In-memory store implementing every repository port.
///
/// Transactions take an exclusive lock on the whole store and work on a
/// staged copy, so concurrent registrations run one after another and an
/// uncommitted transaction leaves no trace.
#[derive(Default)]
pub struct InMemoryEnrollmentStore {
    state: Arc<Mutex<StoreState>>,
    fail_commit: bool,
}

impl InMemoryEnrollmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose transactions always fail to commit
    pub fn failing_commit(self) -> Self {
        Self {
            fail_commit: true,
            ..self
        }
    }

    /// Pre-populate with a student for testing
    pub fn with_student(self, student: Student) -> Self {
        self.state
            .try_lock()
            .unwrap()
            .students
            .insert(student.control_number.0, student);
        self
    }

    /// Pre-populate with a specialty for testing
    pub fn with_specialty(self, specialty: Specialty) -> Self {
        self.state
            .try_lock()
            .unwrap()
            .specialties
            .insert(specialty.id.0, specialty);
        self
    }

    /// Pre-populate with a workshop for testing
    pub fn with_workshop(self, workshop: Workshop) -> Self {
        self.state
            .try_lock()
            .unwrap()
            .workshops
            .insert(workshop.id.0, workshop);
        self
    }

    /// Pre-populate with an existing enrollment record
    pub fn with_record(self, record: EnrollmentRecord) -> Self {
        {
            let mut state = self.state.try_lock().unwrap();
            state.next_record_id = state.next_record_id.max(record.id.0);
            state.records.push(record);
        }
        self
    }

    /// Committed enrolled count of a specialty
    pub async fn specialty_count(&self, id: i32) -> Option<i32> {
        let state = self.state.lock().await;
        state.specialties.get(&id).map(|s| s.enrolled_count)
    }

    /// Committed enrolled count of a workshop
    pub async fn workshop_count(&self, id: i32) -> Option<i32> {
        let state = self.state.lock().await;
        state.workshops.get(&id).map(|w| w.enrolled_count)
    }

    /// Number of committed enrollment records
    pub async fn record_count(&self) -> usize {
        self.state.lock().await.records.len()
    }
}

#[async_trait]
impl StudentRepository for InMemoryEnrollmentStore {
    async fn find_by_control_number(
        &self,
        control_number: &ControlNumber,
    ) -> Result<Option<Student>, DomainError> {
        let state = self.state.lock().await;
        Ok(state.students.get(&control_number.0).cloned())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryEnrollmentStore {
    async fn find_specialties_with_seats(&self) -> Result<Vec<Specialty>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .specialties
            .values()
            .filter(|s| s.enrolled_count < SPECIALTY_CAPACITY)
            .cloned()
            .collect())
    }

    async fn find_workshops_with_seats(&self) -> Result<Vec<Workshop>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .workshops
            .values()
            .filter(|w| w.enrolled_count < WORKSHOP_CAPACITY)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryEnrollmentStore {
    async fn find_latest_by_student(
        &self,
        control_number: &ControlNumber,
    ) -> Result<Option<EnrollmentDetails>, DomainError> {
        let state = self.state.lock().await;
        Ok(state
            .records
            .iter()
            .filter(|r| r.student_id == *control_number)
            .max_by_key(|r| (r.semester, r.id.0))
            .and_then(|r| state.details(r)))
    }

    async fn find_all(&self) -> Result<Vec<EnrollmentDetails>, DomainError> {
        let state = self.state.lock().await;
        let mut all: Vec<EnrollmentDetails> = state
            .records
            .iter()
            .filter_map(|r| state.details(r))
            .collect();
        all.sort_by(|a, b| {
            (b.record.requested_at, b.record.id.0).cmp(&(a.record.requested_at, a.record.id.0))
        });
        Ok(all)
    }

    async fn begin(&self) -> Result<Box<dyn EnrollmentTransaction>, DomainError> {
        let guard = self.state.clone().lock_owned().await;
        let staged = (*guard).clone();
        Ok(Box::new(InMemoryTransaction {
            guard,
            staged,
            fail_commit: self.fail_commit,
        }))
    }
}

pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<StoreState>,
    staged: StoreState,
    fail_commit: bool,
}

#[async_trait]
impl EnrollmentTransaction for InMemoryTransaction {
    async fn lock_student(
        &mut self,
        control_number: &ControlNumber,
    ) -> Result<Option<Student>, DomainError> {
        Ok(self.staged.students.get(&control_number.0).cloned())
    }

    async fn record_exists(
        &mut self,
        control_number: &ControlNumber,
        semester: i32,
    ) -> Result<bool, DomainError> {
        Ok(self
            .staged
            .records
            .iter()
            .any(|r| r.student_id == *control_number && r.semester == semester))
    }

    async fn lock_specialty(&mut self, id: &SpecialtyId) -> Result<Option<Specialty>, DomainError> {
        Ok(self.staged.specialties.get(&id.0).cloned())
    }

    async fn find_specialty_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<Specialty>, DomainError> {
        Ok(self
            .staged
            .specialties
            .values()
            .find(|s| s.code == code)
            .cloned())
    }

    async fn lock_workshop(&mut self, id: &WorkshopId) -> Result<Option<Workshop>, DomainError> {
        Ok(self.staged.workshops.get(&id.0).cloned())
    }

    async fn insert_record(
        &mut self,
        new_record: &NewEnrollmentRecord,
    ) -> Result<EnrollmentRecord, DomainError> {
        if self
            .staged
            .records
            .iter()
            .any(|r| r.student_id == new_record.student_id && r.semester == new_record.semester)
        {
            return Err(DomainError::Conflict(format!(
                "El alumno ya tiene una ficha registrada para el semestre {}",
                new_record.semester
            )));
        }

        self.staged.next_record_id += 1;
        let record = EnrollmentRecord {
            id: EnrollmentId(self.staged.next_record_id),
            student_id: new_record.student_id,
            specialty_id: new_record.specialty_id,
            workshop_id: new_record.workshop_id,
            group_code: new_record.group_code.clone(),
            semester: new_record.semester,
            requested_at: Utc::now(),
        };
        self.staged.records.push(record.clone());

        Ok(record)
    }

    async fn claim_specialty_seat(&mut self, id: &SpecialtyId) -> Result<bool, DomainError> {
        match self.staged.specialties.get_mut(&id.0) {
            Some(s) if s.enrolled_count < SPECIALTY_CAPACITY => {
                s.enrolled_count += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn claim_workshop_seat(&mut self, id: &WorkshopId) -> Result<bool, DomainError> {
        match self.staged.workshops.get_mut(&id.0) {
            Some(w) if w.enrolled_count < WORKSHOP_CAPACITY => {
                w.enrolled_count += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        if self.fail_commit {
            return Err(DomainError::Database("commit failed".to_string()));
        }

        *self.guard = std::mem::take(&mut self.staged);
        Ok(())
    }
}

// ============================================================================
// Mock Form Renderer
// ============================================================================

/// Renderer that records the group codes it was asked to render
#[derive(Default)]
pub struct MockFormRenderer {
    rendered: Arc<std::sync::Mutex<Vec<String>>>,
    should_fail: bool,
}

impl MockFormRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Shared handle to the group codes rendered so far
    pub fn rendered(&self) -> Arc<std::sync::Mutex<Vec<String>>> {
        self.rendered.clone()
    }
}

impl FormRenderer for MockFormRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, details: &EnrollmentDetails) -> Result<Vec<u8>, DomainError> {
        if self.should_fail {
            return Err(DomainError::Internal("renderer failed".to_string()));
        }

        self.rendered
            .lock()
            .unwrap()
            .push(details.record.group_code.clone());
        Ok(b"%PDF-1.5 mock".to_vec())
    }
}
