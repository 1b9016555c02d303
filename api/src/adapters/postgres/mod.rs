//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod catalog_repo;
pub mod enrollment_repo;
pub mod student_repo;


pub use catalog_repo::PostgresCatalogRepository;
pub use enrollment_repo::PostgresEnrollmentRepository;
pub use student_repo::PostgresStudentRepository;
