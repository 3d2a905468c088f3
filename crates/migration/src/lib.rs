//! # Meridian Database Migrations
//!
//! Sea-ORM migrations for the Meridian schema, one migration per table,
//! plus the first-run seed data.

pub use sea_orm_migration::prelude::*;

mod m20260601_000001_create_users_table;
mod m20260601_000002_create_articles_table;
mod m20260601_000003_create_stories_table;
mod m20260601_000004_create_team_members_table;
mod m20260601_000005_create_comments_table;
mod m20260601_000006_create_contacts_table;
mod m20260601_000007_create_inquiries_table;
mod m20260601_000008_create_consultations_table;
mod m20260601_000009_create_messages_table;
mod m20260601_000010_create_appointments_table;

pub mod seeds;

/// The main migrator that coordinates all migration operations
///
/// Migrations are executed in the order they appear in this list.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // users first, every other table points at it
            Box::new(m20260601_000001_create_users_table::Migration),
            Box::new(m20260601_000002_create_articles_table::Migration),
            Box::new(m20260601_000003_create_stories_table::Migration),
            Box::new(m20260601_000004_create_team_members_table::Migration),
            Box::new(m20260601_000005_create_comments_table::Migration),
            Box::new(m20260601_000006_create_contacts_table::Migration),
            Box::new(m20260601_000007_create_inquiries_table::Migration),
            Box::new(m20260601_000008_create_consultations_table::Migration),
            Box::new(m20260601_000009_create_messages_table::Migration),
            Box::new(m20260601_000010_create_appointments_table::Migration),
        ]
    }
}

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    sea_orm::Database::connect(database_url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_count() {
        let migrations = Migrator::migrations();
        assert_eq!(migrations.len(), 10, "one migration per table");
    }
}
