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
                    .as_enum(AppointmentStatus::Table)
                    .values(vec![
                        AppointmentStatus::Scheduled,
                        AppointmentStatus::Cancelled,
                        AppointmentStatus::Completed,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(uuid(Appointments::Id).primary_key())
                    .col(uuid(Appointments::UserId))
                    .col(timestamp_with_time_zone(Appointments::ScheduledFor))
                    .col(text_null(Appointments::Notes))
                    .col(enumeration(
                        Appointments::Status,
                        AppointmentStatus::Table,
                        vec![
                            AppointmentStatus::Scheduled,
                            AppointmentStatus::Cancelled,
                            AppointmentStatus::Completed,
                        ],
                    ))
                    .col(
                        timestamp_with_time_zone(Appointments::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Appointments::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_user")
                            .from(Appointments::Table, Appointments::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(AppointmentStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Appointments {
    Table,
    Id,
    UserId,
    ScheduledFor,
    Notes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum AppointmentStatus {
    #[sea_orm(iden = "appointment_status")]
    Table,
    #[sea_orm(iden = "scheduled")]
    Scheduled,
    #[sea_orm(iden = "cancelled")]
    Cancelled,
    #[sea_orm(iden = "completed")]
    Completed,
}
