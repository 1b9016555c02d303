//! PostgreSQL adapter for CatalogRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::domain::entities::{
    Specialty, SpecialtyId, Workshop, WorkshopId, SPECIALTY_CAPACITY, WORKSHOP_CAPACITY,
};
use crate::domain::ports::CatalogRepository;
use crate::entity::{specialties, workshops};
use crate::error::DomainError;

/// PostgreSQL implementation of CatalogRepository
pub struct PostgresCatalogRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresCatalogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalogRepository {
    async fn find_specialties_with_seats(&self) -> Result<Vec<Specialty>, DomainError> {
        let results = specialties::Entity::find()
            .filter(specialties::Column::EnrolledCount.lt(SPECIALTY_CAPACITY))
            .order_by_asc(specialties::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }

    async fn find_workshops_with_seats(&self) -> Result<Vec<Workshop>, DomainError> {
        let results = workshops::Entity::find()
            .filter(workshops::Column::EnrolledCount.lt(WORKSHOP_CAPACITY))
            .order_by_asc(workshops::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Convert SeaORM model to domain entity
impl From<specialties::Model> for Specialty {
    fn from(model: specialties::Model) -> Self {
        Specialty {
            id: SpecialtyId(model.id),
            name: model.name,
            code: model.code,
            enrolled_count: model.enrolled_count,
        }
    }
}

/// Convert SeaORM model to domain entity
impl From<workshops::Model> for Workshop {
    fn from(model: workshops::Model) -> Self {
        Workshop {
            id: WorkshopId(model.id),
            name: model.name,
            enrolled_count: model.enrolled_count,
        }
    }
}
