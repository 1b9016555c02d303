use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "specialties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub code: String,
    pub enrolled_count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::enrollment_records::Entity")]
    EnrollmentRecords,
}

impl Related<super::enrollment_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EnrollmentRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
