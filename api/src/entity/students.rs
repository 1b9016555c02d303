use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub control_number: i32,
    pub first_names: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub previous_group: String,
    pub previous_semester: i32,
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
