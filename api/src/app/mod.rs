//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod assignment;
pub mod catalog_service;
pub mod enrollment_service;
pub mod form_service;

pub use catalog_service::CatalogService;
pub use enrollment_service::{EnrollmentService, RegistrationRequest, StudentLookup};
pub use form_service::{FormService, RenderedForm};
