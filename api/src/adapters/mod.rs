//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod pdf;
pub mod postgres;

pub use pdf::PdfFormRenderer;
pub use postgres::{
    PostgresCatalogRepository, PostgresEnrollmentRepository, PostgresStudentRepository,
};
