//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod renderer;
pub mod repositories;

pub use renderer::FormRenderer;
pub use repositories::{
    CatalogRepository, EnrollmentRepository, EnrollmentTransaction, StudentRepository,
};
