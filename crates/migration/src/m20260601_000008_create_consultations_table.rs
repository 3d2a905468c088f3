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
                    .as_enum(ConsultationStatus::Table)
                    .values(vec![
                        ConsultationStatus::Requested,
                        ConsultationStatus::Confirmed,
                        ConsultationStatus::Completed,
                        ConsultationStatus::Cancelled,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Consultations::Table)
                    .if_not_exists()
                    .col(uuid(Consultations::Id).primary_key())
                    .col(string(Consultations::Subject))
                    .col(text(Consultations::Description))
                    .col(timestamp_with_time_zone(Consultations::ScheduledFor))
                    .col(enumeration(
                        Consultations::Status,
                        ConsultationStatus::Table,
                        vec![
                            ConsultationStatus::Requested,
                            ConsultationStatus::Confirmed,
                            ConsultationStatus::Completed,
                            ConsultationStatus::Cancelled,
                        ],
                    ))
                    .col(uuid(Consultations::ClientId))
                    .col(
                        timestamp_with_time_zone(Consultations::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Consultations::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_consultations_client")
                            .from(Consultations::Table, Consultations::ClientId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_consultations_status")
                    .table(Consultations::Table)
                    .col(Consultations::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Consultations::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ConsultationStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Consultations {
    Table,
    Id,
    Subject,
    Description,
    ScheduledFor,
    Status,
    ClientId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ConsultationStatus {
    #[sea_orm(iden = "consultation_status")]
    Table,
    #[sea_orm(iden = "requested")]
    Requested,
    #[sea_orm(iden = "confirmed")]
    Confirmed,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
}
