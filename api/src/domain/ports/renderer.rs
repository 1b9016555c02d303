//! Document renderer port
//!
//! Lays out the printable enrollment form from one student and their record.

use crate::domain::entities::EnrollmentDetails;
use crate::error::DomainError;

/// Renders a fixed-template enrollment form to a binary document
pub trait FormRenderer: Send + Sync {
    /// MIME type of the produced document
    fn content_type(&self) -> &'static str;

    fn render(&self, details: &EnrollmentDetails) -> Result<Vec<u8>, DomainError>;
}
