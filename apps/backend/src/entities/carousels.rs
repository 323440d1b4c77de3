use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carousels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "institute_id")]
    pub institute_id: i32,
    pub title: String,
    #[sea_orm(column_name = "is_active")]
    pub is_active: bool,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::carousel_photos::Entity")]
    CarouselPhotos,
}

impl Related<super::carousel_photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CarouselPhotos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
