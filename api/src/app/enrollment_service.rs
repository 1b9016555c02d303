//! Enrollment service
//!
//! Registers students for the coming semester and answers lookups about
//! students and their enrollment records.

use std::sync::Arc;

use crate::app::assignment::{derive_group_code, inherited_specialty_code};
use crate::domain::entities::{
    ControlNumber, EnrollmentDetails, NewEnrollmentRecord, Specialty, SpecialtyId, Student,
    Workshop, WorkshopId,
};
use crate::domain::ports::{EnrollmentRepository, EnrollmentTransaction, StudentRepository};
use crate::error::DomainError;

/// Input of one registration
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub control_number: ControlNumber,
    pub specialty_id: Option<SpecialtyId>,
    pub workshop_id: Option<WorkshopId>,
}

/// A student together with their current record, if any
#[derive(Debug, Clone)]
pub struct StudentLookup {
    pub student: Student,
    pub enrollment: Option<EnrollmentDetails>,
}

/// Service for registering and looking up enrollments
pub struct EnrollmentService<SR, ER>
where
    SR: StudentRepository,
    ER: EnrollmentRepository,
{
    students: Arc<SR>,
    enrollments: Arc<ER>,
}

impl<SR, ER> EnrollmentService<SR, ER>
where
    SR: StudentRepository,
    ER: EnrollmentRepository,
{
    pub fn new(students: Arc<SR>, enrollments: Arc<ER>) -> Self {
        Self {
            students,
            enrollments,
        }
    }

    /// Register a student for their next semester.
    ///
    /// Validation, specialty resolution, group derivation, the insert and
    /// both seat claims run inside one transaction. Any error returned
    /// from here leaves the store untouched.
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<EnrollmentDetails, DomainError> {
        let mut tx = self.enrollments.begin().await?;
        let details = register_in(&mut *tx, request).await?;
        tx.commit().await?;

        tracing::info!(
            control_number = %details.student.control_number,
            semester = details.record.semester,
            group = %details.record.group_code,
            specialty_id = ?details.record.specialty_id,
            workshop_id = ?details.record.workshop_id,
            "Enrollment registered"
        );

        Ok(details)
    }

    /// Find a student and their most recent enrollment record
    pub async fn lookup_student(
        &self,
        control_number: &ControlNumber,
    ) -> Result<StudentLookup, DomainError> {
        let student = self.find_student(control_number).await?;
        let enrollment = self
            .enrollments
            .find_latest_by_student(control_number)
            .await?;

        Ok(StudentLookup {
            student,
            enrollment,
        })
    }

    /// Get the enrollment record of a student.
    ///
    /// Fails with `NotFound` when either the student or the record is absent.
    pub async fn get_enrollment(
        &self,
        control_number: &ControlNumber,
    ) -> Result<EnrollmentDetails, DomainError> {
        self.find_student(control_number).await?;

        self.enrollments
            .find_latest_by_student(control_number)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound("El alumno no tiene ficha de inscripción".to_string())
            })
    }

    /// List every enrollment record, newest first
    pub async fn list_enrollments(&self) -> Result<Vec<EnrollmentDetails>, DomainError> {
        self.enrollments.find_all().await
    }

    async fn find_student(&self, control_number: &ControlNumber) -> Result<Student, DomainError> {
        self.students
            .find_by_control_number(control_number)
            .await?
            .ok_or_else(|| DomainError::NotFound("Alumno no encontrado".to_string()))
    }
}

/// The registration steps, run against an open transaction. The first
/// failing check wins.
async fn register_in(
    tx: &mut dyn EnrollmentTransaction,
    request: &RegistrationRequest,
) -> Result<EnrollmentDetails, DomainError> {
    let student = tx
        .lock_student(&request.control_number)
        .await?
        .ok_or_else(|| DomainError::NotFound("Alumno no encontrado".to_string()))?;

    let semester = student.target_semester()?;
    if tx.record_exists(&student.control_number, semester).await? {
        tracing::debug!(
            control_number = %student.control_number,
            semester,
            "Duplicate enrollment rejected"
        );
        return Err(DomainError::Conflict(format!(
            "El alumno ya tiene una ficha registrada para el semestre {}",
            semester
        )));
    }

    if student.must_choose_specialty() && request.specialty_id.is_none() {
        tracing::debug!(control_number = %student.control_number, "Missing specialty rejected");
        return Err(DomainError::InvalidInput(
            "Los alumnos de 2do semestre deben elegir una especialidad".to_string(),
        ));
    }

    let mut specialty = match &request.specialty_id {
        Some(id) => Some(chosen_specialty(tx, id).await?),
        None => None,
    };

    let mut workshop = match &request.workshop_id {
        Some(id) => Some(chosen_workshop(tx, id).await?),
        None => None,
    };

    if specialty.is_none() && student.inherits_specialty() {
        specialty = inherit_specialty(tx, &student).await?;
    }

    let group_code = derive_group_code(
        semester,
        student.previous_semester,
        specialty.as_ref().map(|s| s.code.as_str()),
        &student.previous_group,
    );

    let record = tx
        .insert_record(&NewEnrollmentRecord {
            student_id: student.control_number,
            specialty_id: specialty.as_ref().map(|s| s.id),
            workshop_id: workshop.as_ref().map(|w| w.id),
            group_code,
            semester,
        })
        .await?;

    if let Some(specialty) = specialty.as_mut() {
        if !tx.claim_specialty_seat(&specialty.id).await? {
            return Err(specialty_full(specialty));
        }
        specialty.enrolled_count += 1;
    }

    if let Some(workshop) = workshop.as_mut() {
        if !tx.claim_workshop_seat(&workshop.id).await? {
            return Err(workshop_full(workshop));
        }
        workshop.enrolled_count += 1;
    }

    Ok(EnrollmentDetails {
        record,
        student,
        specialty,
        workshop,
    })
}

async fn chosen_specialty(
    tx: &mut dyn EnrollmentTransaction,
    id: &SpecialtyId,
) -> Result<Specialty, DomainError> {
    let specialty = tx
        .lock_specialty(id)
        .await?
        .ok_or_else(|| DomainError::InvalidInput("Especialidad no válida".to_string()))?;

    if !specialty.has_available_seats() {
        return Err(specialty_full(&specialty));
    }

    Ok(specialty)
}

async fn chosen_workshop(
    tx: &mut dyn EnrollmentTransaction,
    id: &WorkshopId,
) -> Result<Workshop, DomainError> {
    let workshop = tx
        .lock_workshop(id)
        .await?
        .ok_or_else(|| DomainError::InvalidInput("Taller no válido".to_string()))?;

    if !workshop.has_available_seats() {
        return Err(workshop_full(&workshop));
    }

    Ok(workshop)
}

/// Attach the specialty encoded in the student's previous group, if it exists.
/// An unknown code leaves the record without a specialty.
async fn inherit_specialty(
    tx: &mut dyn EnrollmentTransaction,
    student: &Student,
) -> Result<Option<Specialty>, DomainError> {
    let Some(code) = inherited_specialty_code(&student.previous_group) else {
        return Ok(None);
    };

    let found = tx.find_specialty_by_code(code).await?;
    if found.is_none() {
        tracing::warn!(
            control_number = %student.control_number,
            previous_group = %student.previous_group,
            code,
            "No specialty matches the previous group; enrolling without specialty"
        );
    }

    Ok(found)
}

fn specialty_full(specialty: &Specialty) -> DomainError {
    DomainError::CapacityExceeded(format!(
        "No hay cupo disponible en la especialidad {}",
        specialty.name
    ))
}

fn workshop_full(workshop: &Workshop) -> DomainError {
    DomainError::CapacityExceeded(format!(
        "No hay cupo disponible en el taller {}",
        workshop.name
    ))
}
