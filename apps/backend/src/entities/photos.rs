use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "photos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "institute_id")]
    pub institute_id: i32,
    #[sea_orm(column_name = "image_url")]
    pub image_url: String,
    #[sea_orm(column_name = "alt_text")]
    pub alt_text: Option<String>,
    #[sea_orm(column_name = "uploaded_by")]
    pub uploaded_by: i32,
    /// Identifier on the image host; `None` for rows created before hosting
    /// ids were tracked.
    #[sea_orm(column_name = "cloudinary_public_id")]
    pub cloudinary_public_id: Option<String>,
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
