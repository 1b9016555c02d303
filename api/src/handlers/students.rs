//! Student handlers
//!
//! Lookup of a student before they fill in the re-enrollment form.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::StudentLookup;
use crate::domain::entities::{ControlNumber, EnrollmentDetails};
use crate::error::AppError;
use crate::AppState;

/// Response body for a student lookup
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub numero_control: i32,
    pub nombres: String,
    pub apellido_paterno: String,
    pub apellido_materno: String,
    pub grupo_anterior: String,
    pub semestre_anterior: i32,
    /// Whether the form must offer a specialty choice
    pub puede_elegir_especialidad: bool,
    pub tiene_ficha: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ficha_existente: Option<ExistingRecord>,
}

/// Summary of a record the student already has
#[derive(Debug, Serialize)]
pub struct ExistingRecord {
    pub id_inscripcion: i32,
    pub grupo_inscripcion: String,
    pub semestre_inscripcion: i32,
    pub especialidad: Option<String>,
    pub taller: Option<String>,
    pub fecha_solicitud: DateTime<Utc>,
}

impl From<&EnrollmentDetails> for ExistingRecord {
    fn from(details: &EnrollmentDetails) -> Self {
        Self {
            id_inscripcion: details.record.id.0,
            grupo_inscripcion: details.record.group_code.clone(),
            semestre_inscripcion: details.record.semester,
            especialidad: details.specialty_name().map(str::to_string),
            taller: details.workshop_name().map(str::to_string),
            fecha_solicitud: details.record.requested_at,
        }
    }
}

impl From<StudentLookup> for StudentResponse {
    fn from(lookup: StudentLookup) -> Self {
        let student = lookup.student;
        Self {
            numero_control: student.control_number.0,
            puede_elegir_especialidad: student.must_choose_specialty(),
            tiene_ficha: lookup.enrollment.is_some(),
            ficha_existente: lookup.enrollment.as_ref().map(ExistingRecord::from),
            nombres: student.first_names,
            apellido_paterno: student.paternal_surname,
            apellido_materno: student.maternal_surname,
            grupo_anterior: student.previous_group,
            semestre_anterior: student.previous_semester,
        }
    }
}

/// GET /buscar-alumno/:numero_control/
pub async fn buscar_alumno(
    State(state): State<AppState>,
    Path(numero_control): Path<i32>,
) -> Result<Json<StudentResponse>, AppError> {
    let lookup = state
        .enrollment_service
        .lookup_student(&ControlNumber(numero_control))
        .await?;

    Ok(Json(lookup.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_enrollment_details, test_student};

    #[test]
    fn serialize_student_without_record() {
        let response: StudentResponse = StudentLookup {
            student: test_student(1001, 2, "107"),
            enrollment: None,
        }
        .into();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["numero_control"], 1001);
        assert_eq!(json["nombres"], "María José");
        assert_eq!(json["grupo_anterior"], "107");
        assert_eq!(json["puede_elegir_especialidad"], true);
        assert_eq!(json["tiene_ficha"], false);
        assert!(json.get("ficha_existente").is_none());
    }

    #[test]
    fn serialize_student_with_record() {
        let details = test_enrollment_details();
        let response: StudentResponse = StudentLookup {
            student: details.student.clone(),
            enrollment: Some(details),
        }
        .into();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["tiene_ficha"], true);
        assert_eq!(json["ficha_existente"]["id_inscripcion"], 1);
        assert_eq!(json["ficha_existente"]["grupo_inscripcion"], "3IQ");
        assert_eq!(json["ficha_existente"]["semestre_inscripcion"], 3);
        assert_eq!(json["ficha_existente"]["especialidad"], "Especialidad IQ");
        assert_eq!(json["ficha_existente"]["taller"], "Ajedrez");
        assert_eq!(
            json["ficha_existente"]["fecha_solicitud"],
            "2026-08-14T10:30:00Z"
        );
    }

    #[test]
    fn later_semesters_cannot_choose_specialty() {
        let response: StudentResponse = StudentLookup {
            student: test_student(1002, 4, "405IQ"),
            enrollment: None,
        }
        .into();

        assert!(!response.puede_elegir_especialidad);
    }

    #[test]
    fn existing_record_without_references() {
        let mut details = test_enrollment_details();
        details.specialty = None;
        details.workshop = None;

        let json = serde_json::to_value(ExistingRecord::from(&details)).unwrap();
        assert!(json["especialidad"].is_null());
        assert!(json["taller"].is_null());
    }
}
