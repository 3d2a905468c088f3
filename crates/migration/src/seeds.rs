//! # Seed Data Management
//!
//! First-run seed data. The only seed today is the initial admin
//! account, created when the users table is empty and the
//! `MERIDIAN_ADMIN_EMAIL` / `MERIDIAN_ADMIN_PASSWORD` variables are set.

use chrono::Utc;
use entity::{sea_orm_active_enums::UserRole, users};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use secrecy::SecretString;
use uuid::Uuid;

/// Seed the initial admin account if no users exist yet.
///
/// # Returns
///
/// The number of rows inserted (0 or 1).
pub async fn seed_admin_user(db: &DatabaseConnection) -> Result<u64> {
    let count = entity::Users::find().count(db).await?;
    if count > 0 {
        return Ok(0);
    }

    let (Ok(email), Ok(password)) = (
        std::env::var("MERIDIAN_ADMIN_EMAIL"),
        std::env::var("MERIDIAN_ADMIN_PASSWORD"),
    )
    else {
        tracing::info!("No users and no MERIDIAN_ADMIN_* variables set, skipping admin seed");
        return Ok(0);
    };

    let name = std::env::var("MERIDIAN_ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string());

    let password_hash = auth::password::hash_password(&SecretString::from(password))
        .map_err(|e| AppError::internal(format!("Failed to hash admin password: {}", e)))?;

    let now = Utc::now();
    let admin = users::ActiveModel {
        id:            Set(Uuid::new_v4()),
        name:          Set(name),
        email:         Set(email.clone()),
        password_hash: Set(secrecy::ExposeSecret::expose_secret(&password_hash).to_string()),
        role:          Set(UserRole::Admin),
        created_at:    Set(now),
        updated_at:    Set(now),
    };

    admin
        .insert(db)
        .await
        .map_err(|e| AppError::database(format!("Failed to seed admin user: {}", e)))?;

    tracing::info!(email = %email, "Seeded initial admin user");

    Ok(1)
}

/// Runs all registered seeds.
pub async fn run_all_seeds(db: &DatabaseConnection) -> Result<u64> {
    let mut inserted = 0;
    inserted += seed_admin_user(db).await?;
    Ok(inserted)
}
