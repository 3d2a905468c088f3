use sea_orm_migration::{prelude::*, schema::*, sea_query::extension::postgres::Type};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(ContactStatus::Table)
                    .values(vec![
                        ContactStatus::New,
                        ContactStatus::InProgress,
                        ContactStatus::Completed,
                        ContactStatus::Archived,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(uuid(Contacts::Id).primary_key())
                    .col(string(Contacts::FirstName))
                    .col(string(Contacts::LastName))
                    .col(string(Contacts::Email))
                    .col(string_null(Contacts::Phone))
                    .col(string_null(Contacts::Company))
                    .col(string_null(Contacts::Website))
                    .col(string_null(Contacts::City))
                    .col(string_null(Contacts::State))
                    .col(text(Contacts::Message))
                    .col(enumeration(
                        Contacts::Status,
                        ContactStatus::Table,
                        vec![
                            ContactStatus::New,
                            ContactStatus::InProgress,
                            ContactStatus::Completed,
                            ContactStatus::Archived,
                        ],
                    ))
                    .col(
                        timestamp_with_time_zone(Contacts::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Contacts::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_contacts_status")
                    .table(Contacts::Table)
                    .col(Contacts::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Contacts::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(ContactStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Contacts {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    Website,
    City,
    State,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ContactStatus {
    #[sea_orm(iden = "contact_status")]
    Table,
    #[sea_orm(iden = "new")]
    New,
    #[sea_orm(iden = "in_progress")]
    InProgress,
    #[sea_orm(iden = "completed")]
    Completed,
    #[sea_orm(iden = "archived")]
    Archived,
}
