use sea_orm_migration::{prelude::*, schema::*, sea_query::extension::postgres::Type};

use crate::m20260601_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(InquiryStatus::Table)
                    .values(vec![
                        InquiryStatus::Open,
                        InquiryStatus::InProgress,
                        InquiryStatus::Resolved,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(uuid(Inquiries::Id).primary_key())
                    .col(string(Inquiries::Subject))
                    .col(text(Inquiries::Message))
                    .col(enumeration(
                        Inquiries::Status,
                        InquiryStatus::Table,
                        vec![
                            InquiryStatus::Open,
                            InquiryStatus::InProgress,
                            InquiryStatus::Resolved,
                        ],
                    ))
                    .col(uuid(Inquiries::UserId))
                    .col(
                        timestamp_with_time_zone(Inquiries::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Inquiries::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inquiries_user")
                            .from(Inquiries::Table, Inquiries::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(InquiryStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Inquiries {
    Table,
    Id,
    Subject,
    Message,
    Status,
    UserId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum InquiryStatus {
    #[sea_orm(iden = "inquiry_status")]
    Table,
    #[sea_orm(iden = "open")]
    Open,
    #[sea_orm(iden = "in_progress")]
    InProgress,
    #[sea_orm(iden = "resolved")]
    Resolved,
}
