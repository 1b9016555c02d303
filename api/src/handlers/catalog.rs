//! Catalog handlers
//!
//! Specialties and workshops that still accept students.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::domain::entities::{Specialty, Workshop};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SpecialtyResponse {
    pub id_especialidad: i32,
    pub nombre: String,
    pub codigo: String,
    /// Students already enrolled
    pub cantidad: i32,
    pub fichas_disponibles: i32,
}

impl From<Specialty> for SpecialtyResponse {
    fn from(specialty: Specialty) -> Self {
        Self {
            id_especialidad: specialty.id.0,
            fichas_disponibles: specialty.available_seats(),
            cantidad: specialty.enrolled_count,
            nombre: specialty.name,
            codigo: specialty.code,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkshopResponse {
    pub id_taller: i32,
    pub nombre: String,
    pub cantidad: i32,
    pub fichas_disponibles: i32,
}

impl From<Workshop> for WorkshopResponse {
    fn from(workshop: Workshop) -> Self {
        Self {
            id_taller: workshop.id.0,
            fichas_disponibles: workshop.available_seats(),
            cantidad: workshop.enrolled_count,
            nombre: workshop.name,
        }
    }
}

/// GET /especialidades-disponibles/
pub async fn especialidades_disponibles(
    State(state): State<AppState>,
) -> Result<Json<Vec<SpecialtyResponse>>, AppError> {
    let specialties = state.catalog_service.available_specialties().await?;

    Ok(Json(specialties.into_iter().map(Into::into).collect()))
}

/// GET /talleres-disponibles/
pub async fn talleres_disponibles(
    State(state): State<AppState>,
) -> Result<Json<Vec<WorkshopResponse>>, AppError> {
    let workshops = state.catalog_service.available_workshops().await?;

    Ok(Json(workshops.into_iter().map(Into::into).collect()))
}
