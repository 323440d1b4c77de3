use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

/// Join row placing a photo in a carousel. Carries no tenant column; the
/// tenant is the parent carousel's.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "carousel_photos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "carousel_id")]
    pub carousel_id: i32,
    #[sea_orm(column_name = "photo_id")]
    pub photo_id: i32,
    #[sea_orm(column_name = "display_text")]
    pub display_text: Option<String>,
    #[sea_orm(column_name = "display_order")]
    pub display_order: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::carousels::Entity",
        from = "Column::CarouselId",
        to = "super::carousels::Column::Id",
        on_delete = "Cascade"
    )]
    Carousel,
    #[sea_orm(
        belongs_to = "super::photos::Entity",
        from = "Column::PhotoId",
        to = "super::photos::Column::Id",
        on_delete = "Cascade"
    )]
    Photo,
}

impl Related<super::carousels::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Carousel.def()
    }
}

impl Related<super::photos::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Photo.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
