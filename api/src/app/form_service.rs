//! Enrollment form service
//!
//! Produces the printable enrollment form of a student.

use std::sync::Arc;

use crate::domain::entities::ControlNumber;
use crate::domain::ports::{EnrollmentRepository, FormRenderer, StudentRepository};
use crate::error::DomainError;

/// A rendered form ready to be served
#[derive(Debug, Clone)]
pub struct RenderedForm {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct FormService<SR, ER, FR>
where
    SR: StudentRepository,
    ER: EnrollmentRepository,
    FR: FormRenderer,
{
    students: Arc<SR>,
    enrollments: Arc<ER>,
    renderer: Arc<FR>,
}

impl<SR, ER, FR> FormService<SR, ER, FR>
where
    SR: StudentRepository,
    ER: EnrollmentRepository,
    FR: FormRenderer,
{
    pub fn new(students: Arc<SR>, enrollments: Arc<ER>, renderer: Arc<FR>) -> Self {
        Self {
            students,
            enrollments,
            renderer,
        }
    }

    /// Render the enrollment form of a student.
    ///
    /// Fails with `NotFound` if the student or their record is absent.
    pub async fn render(
        &self,
        control_number: &ControlNumber,
    ) -> Result<RenderedForm, DomainError> {
        if self
            .students
            .find_by_control_number(control_number)
            .await?
            .is_none()
        {
            return Err(DomainError::NotFound("Alumno no encontrado".to_string()));
        }

        let details = self
            .enrollments
            .find_latest_by_student(control_number)
            .await?
            .ok_or_else(|| {
                DomainError::NotFound(
                    "El alumno no tiene ficha de inscripción registrada".to_string(),
                )
            })?;

        let bytes = self.renderer.render(&details)?;

        Ok(RenderedForm {
            filename: format!("solicitud_reinscripcion_{}.pdf", control_number),
            content_type: self.renderer.content_type(),
            bytes,
        })
    }
}
