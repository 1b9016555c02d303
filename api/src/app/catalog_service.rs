//! Catalog service
//!
//! Lists the specialties and workshops that still have free seats.

use std::sync::Arc;

use crate::domain::entities::{Specialty, Workshop};
use crate::domain::ports::CatalogRepository;
use crate::error::DomainError;

/// Service for browsing open specialties and workshops
pub struct CatalogService<CR>
where
    CR: CatalogRepository,
{
    catalog: Arc<CR>,
}

impl<CR> CatalogService<CR>
where
    CR: CatalogRepository,
{
    pub fn new(catalog: Arc<CR>) -> Self {
        Self { catalog }
    }

    /// Specialties with at least one available seat
    pub async fn available_specialties(&self) -> Result<Vec<Specialty>, DomainError> {
        let specialties = self.catalog.find_specialties_with_seats().await?;
        Ok(specialties
            .into_iter()
            .filter(Specialty::has_available_seats)
            .collect())
    }

    /// Workshops with at least one available seat
    pub async fn available_workshops(&self) -> Result<Vec<Workshop>, DomainError> {
        let workshops = self.catalog.find_workshops_with_seats().await?;
        Ok(workshops
            .into_iter()
            .filter(Workshop::has_available_seats)
            .collect())
    }
}
