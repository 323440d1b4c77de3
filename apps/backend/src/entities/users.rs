use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

/// `password` holds an Argon2id PHC string, never plaintext. The model is
/// deliberately not `Serialize`; handlers map it to a response type.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "institute_id")]
    pub institute_id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::institutes::Entity",
        from = "Column::InstituteId",
        to = "super::institutes::Column::Id"
    )]
    Institute,
}

impl Related<super::institutes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Institute.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
