//! SeaORM entities
//!
//! Table models as stored in PostgreSQL. See `schema.sql` for the DDL.

pub mod enrollment_records;
pub mod specialties;
pub mod students;
pub mod workshops;
