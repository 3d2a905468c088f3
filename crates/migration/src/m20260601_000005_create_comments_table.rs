use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260601_000001_create_users_table::Users,
    m20260601_000002_create_articles_table::Articles,
    m20260601_000003_create_stories_table::Stories,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The exactly-one-of(article_id, story_id) rule lives in the
        // create handler, not in a check constraint.
        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(uuid(Comments::Id).primary_key())
                    .col(text(Comments::Content))
                    .col(uuid_null(Comments::AuthorId))
                    .col(string_null(Comments::GuestFirstName))
                    .col(string_null(Comments::GuestLastName))
                    .col(string_null(Comments::GuestEmail))
                    .col(uuid_null(Comments::ArticleId))
                    .col(uuid_null(Comments::StoryId))
                    .col(
                        timestamp_with_time_zone(Comments::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Comments::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_author")
                            .from(Comments::Table, Comments::AuthorId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_article")
                            .from(Comments::Table, Comments::ArticleId)
                            .to(Articles::Table, Articles::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_story")
                            .from(Comments::Table, Comments::StoryId)
                            .to(Stories::Table, Stories::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comments_article_id")
                    .table(Comments::Table)
                    .col(Comments::ArticleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_comments_story_id")
                    .table(Comments::Table)
                    .col(Comments::StoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Comments {
    Table,
    Id,
    Content,
    AuthorId,
    GuestFirstName,
    GuestLastName,
    GuestEmail,
    ArticleId,
    StoryId,
    CreatedAt,
    UpdatedAt,
}
