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
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(uuid(TeamMembers::Id).primary_key())
                    .col(string(TeamMembers::Name))
                    .col(string(TeamMembers::Title))
                    .col(text_null(TeamMembers::Description))
                    .col(string_null(TeamMembers::Image))
                    .col(string_null(TeamMembers::Linkedin))
                    .col(string_null(TeamMembers::Email))
                    .col(uuid(TeamMembers::AuthorId))
                    .col(
                        timestamp_with_time_zone(TeamMembers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(TeamMembers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_members_author")
                            .from(TeamMembers::Table, TeamMembers::AuthorId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TeamMembers {
    Table,
    Id,
    Name,
    Title,
    Description,
    Image,
    Linkedin,
    Email,
    AuthorId,
    CreatedAt,
    UpdatedAt,
}
