//! PostgreSQL adapter for StudentRepository

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::entities::{ControlNumber, Student};
use crate::domain::ports::StudentRepository;
use crate::entity::students;
use crate::error::DomainError;

/// PostgreSQL implementation of StudentRepository
pub struct PostgresStudentRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresStudentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StudentRepository for PostgresStudentRepository {
    async fn find_by_control_number(
        &self,
        control_number: &ControlNumber,
    ) -> Result<Option<Student>, DomainError> {
        let result = students::Entity::find_by_id(control_number.0)
            .one(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }
}

/// Convert SeaORM model to domain entity
impl From<students::Model> for Student {
    fn from(model: students::Model) -> Self {
        Student {
            control_number: ControlNumber(model.control_number),
            first_names: model.first_names,
            paternal_surname: model.paternal_surname,
            maternal_surname: model.maternal_surname,
            previous_group: model.previous_group,
            previous_semester: model.previous_semester,
        }
    }
}
