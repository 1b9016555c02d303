//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod catalog;
pub mod enrollments;
pub mod forms;
pub mod students;

pub use catalog::{especialidades_disponibles, talleres_disponibles};
pub use enrollments::{consultar_ficha, consultar_fichas, registrar_inscripcion};
pub use forms::{generar_pdf, pdf_preflight};
pub use students::buscar_alumno;
