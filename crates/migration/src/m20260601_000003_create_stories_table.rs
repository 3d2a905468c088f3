use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260601_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stories::Table)
                    .if_not_exists()
                    .col(uuid(Stories::Id).primary_key())
                    .col(string(Stories::Title))
                    .col(text(Stories::Description))
                    .col(string_null(Stories::Image))
                    .col(string(Stories::Category))
                    .col(string_uniq(Stories::Slug))
                    .col(uuid(Stories::AuthorId))
                    .col(
                        timestamp_with_time_zone(Stories::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Stories::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stories_author")
                            .from(Stories::Table, Stories::AuthorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_stories_category")
                    .table(Stories::Table)
                    .col(Stories::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stories::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Stories {
    Table,
    Id,
    Title,
    Description,
    Image,
    Category,
    Slug,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}
