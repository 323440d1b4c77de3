//! SeaORM adapter for institutes.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::institutes;

pub async fn create_institute<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<institutes::Model, sea_orm::DbErr> {
    let institute = institutes::ActiveModel {
        id: NotSet,
        name: Set(name.to_owned()),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    institute.insert(conn).await
}

pub async fn find_institute_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<institutes::Model>, sea_orm::DbErr> {
    institutes::Entity::find()
        .filter(institutes::Column::Name.eq(name))
        .one(conn)
        .await
}
