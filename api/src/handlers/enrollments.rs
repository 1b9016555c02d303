//! Enrollment handlers
//!
//! Registration of re-enrollment requests and queries over the records.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use crate::app::RegistrationRequest;
use crate::domain::entities::{ControlNumber, EnrollmentDetails, SpecialtyId, WorkshopId};
use crate::error::AppError;
use crate::AppState;

/// Request body for a registration
///
/// Ids may come as numbers or numeric strings, as HTML forms send them.
/// `null`, `""` and `0` all mean "not given".
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    #[serde(default, deserialize_with = "optional_id")]
    pub numero_control: Option<i32>,
    /// Required for students leaving second semester
    #[serde(default, deserialize_with = "optional_id")]
    pub especialidad_id: Option<i32>,
    #[serde(default, deserialize_with = "optional_id")]
    pub taller_id: Option<i32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

fn optional_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match Option::<RawId>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(RawId::Number(n)) => n,
        Some(RawId::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<i64>()
                .map_err(|_| D::Error::custom(format!("Identificador no válido: {}", text)))?
        }
    };

    if id == 0 {
        return Ok(None);
    }
    i32::try_from(id)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("Identificador fuera de rango: {}", id)))
}

impl RegisterBody {
    fn into_request(self) -> Result<RegistrationRequest, AppError> {
        let control_number = self
            .numero_control
            .ok_or_else(|| AppError::BadRequest("Número de control es obligatorio".to_string()))?;

        Ok(RegistrationRequest {
            control_number: ControlNumber(control_number),
            specialty_id: self.especialidad_id.map(SpecialtyId),
            workshop_id: self.taller_id.map(WorkshopId),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub data: RegisteredEnrollment,
}

/// The record as created, with the assignment the student received
#[derive(Debug, Serialize)]
pub struct RegisteredEnrollment {
    pub id_inscripcion: i32,
    pub numero_control: i32,
    pub nombre_completo: String,
    pub grupo_asignado: String,
    pub semestre_asignado: i32,
    pub especialidad_asignada: Option<String>,
    pub codigo_especialidad: Option<String>,
    pub taller_asignado: Option<String>,
    pub fecha_solicitud: DateTime<Utc>,
}

impl From<&EnrollmentDetails> for RegisteredEnrollment {
    fn from(details: &EnrollmentDetails) -> Self {
        Self {
            id_inscripcion: details.record.id.0,
            numero_control: details.student.control_number.0,
            nombre_completo: details.student.full_name(),
            grupo_asignado: details.record.group_code.clone(),
            semestre_asignado: details.record.semester,
            especialidad_asignada: details.specialty_name().map(str::to_string),
            codigo_especialidad: details.specialty_code().map(str::to_string),
            taller_asignado: details.workshop_name().map(str::to_string),
            fecha_solicitud: details.record.requested_at,
        }
    }
}

/// Full view of one record, as returned by the record queries
#[derive(Debug, Serialize)]
pub struct EnrollmentSummary {
    pub id_inscripcion: i32,
    pub alumno: StudentSummary,
    pub inscripcion: RecordSummary,
}

#[derive(Debug, Serialize)]
pub struct StudentSummary {
    pub numero_control: i32,
    pub nombre_completo: String,
    pub grupo_anterior: String,
    pub semestre_anterior: i32,
}

#[derive(Debug, Serialize)]
pub struct RecordSummary {
    pub grupo_inscripcion: String,
    pub semestre_inscripcion: i32,
    pub especialidad: SpecialtySummary,
    pub taller: Option<String>,
    pub fecha_solicitud: DateTime<Utc>,
}

/// Both fields are null when the record has no specialty
#[derive(Debug, Serialize)]
pub struct SpecialtySummary {
    pub nombre: Option<String>,
    pub codigo: Option<String>,
}

impl From<&EnrollmentDetails> for EnrollmentSummary {
    fn from(details: &EnrollmentDetails) -> Self {
        let student = &details.student;
        Self {
            id_inscripcion: details.record.id.0,
            alumno: StudentSummary {
                numero_control: student.control_number.0,
                nombre_completo: student.full_name(),
                grupo_anterior: student.previous_group.clone(),
                semestre_anterior: student.previous_semester,
            },
            inscripcion: RecordSummary {
                grupo_inscripcion: details.record.group_code.clone(),
                semestre_inscripcion: details.record.semester,
                especialidad: SpecialtySummary {
                    nombre: details.specialty_name().map(str::to_string),
                    codigo: details.specialty_code().map(str::to_string),
                },
                taller: details.workshop_name().map(str::to_string),
                fecha_solicitud: details.record.requested_at,
            },
        }
    }
}

/// POST /registrar-inscripcion/
///
/// Creates the record for the student's next semester and returns 201.
pub async fn registrar_inscripcion(
    State(state): State<AppState>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let Json(body) = body?;
    let request = body.into_request()?;

    let details = state.enrollment_service.register(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "Inscripción registrada exitosamente".to_string(),
            data: RegisteredEnrollment::from(&details),
        }),
    ))
}

/// GET /consultar-ficha/:numero_control/
pub async fn consultar_ficha(
    State(state): State<AppState>,
    Path(numero_control): Path<i32>,
) -> Result<Json<EnrollmentSummary>, AppError> {
    let details = state
        .enrollment_service
        .get_enrollment(&ControlNumber(numero_control))
        .await?;

    Ok(Json(EnrollmentSummary::from(&details)))
}

/// GET /consultar-fichas/
///
/// Every record, newest first.
pub async fn consultar_fichas(
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrollmentSummary>>, AppError> {
    let records = state.enrollment_service.list_enrollments().await?;

    Ok(Json(records.iter().map(EnrollmentSummary::from).collect()))
}
