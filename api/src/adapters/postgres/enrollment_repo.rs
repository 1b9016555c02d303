//! PostgreSQL adapter for EnrollmentRepository
//!
//! Registrations run in a `DatabaseTransaction`. Student, specialty and
//! workshop rows are read `FOR UPDATE`, seat claims are conditional
//! updates that never push a counter past its capacity, and the
//! (student_id, semester) unique constraint backstops duplicate inserts.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait,
};

use crate::domain::entities::{
    ControlNumber, EnrollmentDetails, EnrollmentId, EnrollmentRecord, NewEnrollmentRecord,
    Specialty, SpecialtyId, Student, Workshop, WorkshopId, SPECIALTY_CAPACITY, WORKSHOP_CAPACITY,
};
use crate::domain::ports::{EnrollmentRepository, EnrollmentTransaction};
use crate::entity::{enrollment_records, specialties, students, workshops};
use crate::error::DomainError;

/// PostgreSQL implementation of EnrollmentRepository
pub struct PostgresEnrollmentRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresEnrollmentRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EnrollmentRepository for PostgresEnrollmentRepository {
    async fn find_latest_by_student(
        &self,
        control_number: &ControlNumber,
    ) -> Result<Option<EnrollmentDetails>, DomainError> {
        let result = enrollment_records::Entity::find()
            .filter(enrollment_records::Column::StudentId.eq(control_number.0))
            .order_by_desc(enrollment_records::Column::Semester)
            .order_by_desc(enrollment_records::Column::Id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        let Some(model) = result else {
            return Ok(None);
        };

        Ok(load_details(self.db.as_ref(), vec![model]).await?.pop())
    }

    async fn find_all(&self) -> Result<Vec<EnrollmentDetails>, DomainError> {
        let results = enrollment_records::Entity::find()
            .order_by_desc(enrollment_records::Column::RequestedAt)
            .order_by_desc(enrollment_records::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        load_details(self.db.as_ref(), results).await
    }

    async fn begin(&self) -> Result<Box<dyn EnrollmentTransaction>, DomainError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(Box::new(PostgresEnrollmentTransaction { txn: Some(txn) }))
    }
}

/// Join records with their student, specialty and workshop rows.
///
/// Records whose student row is gone are skipped.
async fn load_details<C: ConnectionTrait>(
    conn: &C,
    records: Vec<enrollment_records::Model>,
) -> Result<Vec<EnrollmentDetails>, DomainError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let student_ids: Vec<i32> = records.iter().map(|r| r.student_id).collect();
    let specialty_ids: Vec<i32> = records.iter().filter_map(|r| r.specialty_id).collect();
    let workshop_ids: Vec<i32> = records.iter().filter_map(|r| r.workshop_id).collect();

    let students_by_id: HashMap<i32, Student> = students::Entity::find()
        .filter(students::Column::ControlNumber.is_in(student_ids))
        .all(conn)
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?
        .into_iter()
        .map(|m| (m.control_number, m.into()))
        .collect();

    let specialties_by_id: HashMap<i32, Specialty> = if specialty_ids.is_empty() {
        HashMap::new()
    } else {
        specialties::Entity::find()
            .filter(specialties::Column::Id.is_in(specialty_ids))
            .all(conn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect()
    };

    let workshops_by_id: HashMap<i32, Workshop> = if workshop_ids.is_empty() {
        HashMap::new()
    } else {
        workshops::Entity::find()
            .filter(workshops::Column::Id.is_in(workshop_ids))
            .all(conn)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?
            .into_iter()
            .map(|m| (m.id, m.into()))
            .collect()
    };

    Ok(records
        .into_iter()
        .filter_map(|model| {
            let student = students_by_id.get(&model.student_id)?.clone();
            let specialty = model
                .specialty_id
                .and_then(|id| specialties_by_id.get(&id).cloned());
            let workshop = model
                .workshop_id
                .and_then(|id| workshops_by_id.get(&id).cloned());
            Some(EnrollmentDetails {
                record: model.into(),
                student,
                specialty,
                workshop,
            })
        })
        .collect())
}

/// A registration in progress. Dropped without `commit`, it rolls back.
pub struct PostgresEnrollmentTransaction {
    txn: Option<DatabaseTransaction>,
}

impl PostgresEnrollmentTransaction {
    fn conn(&self) -> Result<&DatabaseTransaction, DomainError> {
        self.txn
            .as_ref()
            .ok_or_else(|| DomainError::Internal("Transaction already committed".to_string()))
    }
}

#[async_trait]
impl EnrollmentTransaction for PostgresEnrollmentTransaction {
    async fn lock_student(
        &mut self,
        control_number: &ControlNumber,
    ) -> Result<Option<Student>, DomainError> {
        let result = students::Entity::find_by_id(control_number.0)
            .lock_exclusive()
            .one(self.conn()?)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn record_exists(
        &mut self,
        control_number: &ControlNumber,
        semester: i32,
    ) -> Result<bool, DomainError> {
        let result = enrollment_records::Entity::find()
            .filter(enrollment_records::Column::StudentId.eq(control_number.0))
            .filter(enrollment_records::Column::Semester.eq(semester))
            .one(self.conn()?)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.is_some())
    }

    async fn lock_specialty(&mut self, id: &SpecialtyId) -> Result<Option<Specialty>, DomainError> {
        let result = specialties::Entity::find_by_id(id.0)
            .lock_exclusive()
            .one(self.conn()?)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_specialty_by_code(
        &mut self,
        code: &str,
    ) -> Result<Option<Specialty>, DomainError> {
        let result = specialties::Entity::find()
            .filter(specialties::Column::Code.eq(code))
            .order_by_asc(specialties::Column::Id)
            .one(self.conn()?)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn lock_workshop(&mut self, id: &WorkshopId) -> Result<Option<Workshop>, DomainError> {
        let result = workshops::Entity::find_by_id(id.0)
            .lock_exclusive()
            .one(self.conn()?)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn insert_record(
        &mut self,
        record: &NewEnrollmentRecord,
    ) -> Result<EnrollmentRecord, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = enrollment_records::ActiveModel {
            student_id: Set(record.student_id.0),
            specialty_id: Set(record.specialty_id.map(|id| id.0)),
            workshop_id: Set(record.workshop_id.map(|id| id.0)),
            group_code: Set(record.group_code.clone()),
            semester: Set(record.semester),
            requested_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(self.conn()?)
            .await
            .map_err(|e| match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(format!(
                    "El alumno ya tiene una ficha registrada para el semestre {}",
                    record.semester
                )),
                _ => DomainError::Database(e.to_string()),
            })?;

        Ok(result.into())
    }

    async fn claim_specialty_seat(&mut self, id: &SpecialtyId) -> Result<bool, DomainError> {
        let result = specialties::Entity::update_many()
            .col_expr(
                specialties::Column::EnrolledCount,
                Expr::col(specialties::Column::EnrolledCount).add(1),
            )
            .filter(specialties::Column::Id.eq(id.0))
            .filter(specialties::Column::EnrolledCount.lt(SPECIALTY_CAPACITY))
            .exec(self.conn()?)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }

    async fn claim_workshop_seat(&mut self, id: &WorkshopId) -> Result<bool, DomainError> {
        let result = workshops::Entity::update_many()
            .col_expr(
                workshops::Column::EnrolledCount,
                Expr::col(workshops::Column::EnrolledCount).add(1),
            )
            .filter(workshops::Column::Id.eq(id.0))
            .filter(workshops::Column::EnrolledCount.lt(WORKSHOP_CAPACITY))
            .exec(self.conn()?)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected == 1)
    }

    async fn commit(&mut self) -> Result<(), DomainError> {
        let txn = self
            .txn
            .take()
            .ok_or_else(|| DomainError::Internal("Transaction already committed".to_string()))?;

        txn.commit()
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}

/// Convert SeaORM model to domain entity
impl From<enrollment_records::Model> for EnrollmentRecord {
    fn from(model: enrollment_records::Model) -> Self {
        EnrollmentRecord {
            id: EnrollmentId(model.id),
            student_id: ControlNumber(model.student_id),
            specialty_id: model.specialty_id.map(SpecialtyId),
            workshop_id: model.workshop_id.map(WorkshopId),
            group_code: model.group_code,
            semester: model.semester,
            requested_at: model.requested_at.with_timezone(&Utc),
        }
    }
}
