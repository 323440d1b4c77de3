use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKey, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Institutes {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
    InstituteId,
    Name,
    Email,
    Password,
    Role,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Notices {
    Table,
    Id,
    InstituteId,
    Title,
    Description,
    IsPublished,
    PublishDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Photos {
    Table,
    Id,
    InstituteId,
    ImageUrl,
    AltText,
    UploadedBy,
    CloudinaryPublicId,
    CreatedAt,
}

#[derive(Iden)]
enum Carousels {
    Table,
    Id,
    InstituteId,
    Title,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum CarouselPhotos {
    Table,
    Id,
    CarouselId,
    PhotoId,
    DisplayText,
    DisplayOrder,
    CreatedAt,
}

fn id_col<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn institute_fk<T: IntoIden + 'static>(table: T, col: impl IntoIden) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .from(table, col)
        .to(Institutes::Table, Institutes::Id)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // institutes
        manager
            .create_table(
                Table::create()
                    .table(Institutes::Table)
                    .if_not_exists()
                    .col(id_col(Institutes::Id))
                    .col(ColumnDef::new(Institutes::Name).string().not_null())
                    .col(
                        ColumnDef::new(Institutes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(id_col(Users::Id))
                    .col(ColumnDef::new(Users::InstituteId).integer().not_null())
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default("staff"),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut institute_fk(Users::Table, Users::InstituteId))
                    .to_owned(),
            )
            .await?;

        // Login resolves a user by email alone, so email is unique across tenants.
        manager
            .create_index(
                Index::create()
                    .name("idx_users_email_unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_institute")
                    .table(Users::Table)
                    .col(Users::InstituteId)
                    .to_owned(),
            )
            .await?;

        // notices
        manager
            .create_table(
                Table::create()
                    .table(Notices::Table)
                    .if_not_exists()
                    .col(id_col(Notices::Id))
                    .col(ColumnDef::new(Notices::InstituteId).integer().not_null())
                    .col(ColumnDef::new(Notices::Title).string().not_null())
                    .col(ColumnDef::new(Notices::Description).text().null())
                    .col(
                        ColumnDef::new(Notices::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Notices::PublishDate).date().null())
                    .col(
                        ColumnDef::new(Notices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notices::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut institute_fk(Notices::Table, Notices::InstituteId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notices_institute")
                    .table(Notices::Table)
                    .col(Notices::InstituteId)
                    .to_owned(),
            )
            .await?;

        // photos
        manager
            .create_table(
                Table::create()
                    .table(Photos::Table)
                    .if_not_exists()
                    .col(id_col(Photos::Id))
                    .col(ColumnDef::new(Photos::InstituteId).integer().not_null())
                    .col(ColumnDef::new(Photos::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Photos::AltText).string().null())
                    .col(ColumnDef::new(Photos::UploadedBy).integer().not_null())
                    .col(ColumnDef::new(Photos::CloudinaryPublicId).string().null())
                    .col(
                        ColumnDef::new(Photos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut institute_fk(Photos::Table, Photos::InstituteId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_photos_institute")
                    .table(Photos::Table)
                    .col(Photos::InstituteId)
                    .to_owned(),
            )
            .await?;

        // carousels
        manager
            .create_table(
                Table::create()
                    .table(Carousels::Table)
                    .if_not_exists()
                    .col(id_col(Carousels::Id))
                    .col(ColumnDef::new(Carousels::InstituteId).integer().not_null())
                    .col(ColumnDef::new(Carousels::Title).string().not_null())
                    .col(
                        ColumnDef::new(Carousels::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Carousels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(&mut institute_fk(Carousels::Table, Carousels::InstituteId))
                    .to_owned(),
            )
            .await?;

        // carousel_photos (tenant reached through the parent carousel)
        manager
            .create_table(
                Table::create()
                    .table(CarouselPhotos::Table)
                    .if_not_exists()
                    .col(id_col(CarouselPhotos::Id))
                    .col(ColumnDef::new(CarouselPhotos::CarouselId).integer().not_null())
                    .col(ColumnDef::new(CarouselPhotos::PhotoId).integer().not_null())
                    .col(ColumnDef::new(CarouselPhotos::DisplayText).string().null())
                    .col(
                        ColumnDef::new(CarouselPhotos::DisplayOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CarouselPhotos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CarouselPhotos::Table, CarouselPhotos::CarouselId)
                            .to(Carousels::Table, Carousels::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CarouselPhotos::Table, CarouselPhotos::PhotoId)
                            .to(Photos::Table, Photos::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_carousel_photos_carousel")
                    .table(CarouselPhotos::Table)
                    .col(CarouselPhotos::CarouselId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CarouselPhotos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Carousels::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Photos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Institutes::Table).to_owned())
            .await?;
        Ok(())
    }
}
