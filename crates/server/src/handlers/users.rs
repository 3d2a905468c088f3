//! # User Management Handlers
//!
//! Admin-only account management. Deleting a user removes every
//! dependent row first — comments the user wrote, comments under the
//! user's content, then the content itself, then the CRM rows — all
//! inside one transaction, so a failed step removes nothing.

use auth::{
    password::hash_password,
    secrecy::{ExposeSecret, SecretString},
};
use axum::Json;
use chrono::Utc;
use entity::{
    appointments::{Column as AppointmentColumn, Entity as AppointmentsEntity},
    articles::{Column as ArticleColumn, Entity as ArticlesEntity},
    comments::{Column as CommentColumn, Entity as CommentsEntity},
    consultations::{Column as ConsultationColumn, Entity as ConsultationsEntity},
    inquiries::{Column as InquiryColumn, Entity as InquiriesEntity},
    messages::{Column as MessageColumn, Entity as MessagesEntity},
    sea_orm_active_enums::UserRole,
    stories::{Column as StoryColumn, Entity as StoriesEntity},
    team_members::{Column as TeamColumn, Entity as TeamMembersEntity},
    users::{Column as UserColumn, Entity as UsersEntity},
};
use error::{AppError, Result};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    QuerySelect,
    Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common::{PaginationInfo, SuccessResponse},
        users::{CreateUserRequest, UpdateUserRequest, UserListQuery, UserListResponse, UserResponse},
    },
    handlers::{articles::flatten_transaction_error, auth::user_model_to_response},
    middleware::{auth::AuthenticatedUser, permissions::require_admin},
    AppState,
};

/// List accounts with optional role filter (admin only)
pub async fn list_users_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: UserListQuery,
) -> Result<Json<UserListResponse>> {
    require_admin(&user)?;

    let page = query.page();
    let limit = query.limit();

    let mut base_query = UsersEntity::find();

    if let Some(ref role) = query.role {
        base_query = base_query.filter(UserColumn::Role.eq(parse_user_role(role)?));
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count users: {}", e)))?;

    let users = base_query
        .order_by_desc(UserColumn::CreatedAt)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch users: {}", e)))?;

    Ok(Json(UserListResponse {
        users:      users.iter().map(user_model_to_response).collect(),
        pagination: PaginationInfo::new(page, limit, total),
    }))
}

/// Get one account (admin only)
pub async fn get_user_handler(
    state: &AppState,
    user: AuthenticatedUser,
    user_id: Uuid,
) -> Result<Json<UserResponse>> {
    require_admin(&user)?;

    let db_user = UsersEntity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user_model_to_response(&db_user)))
}

/// Create an account (admin only)
pub async fn create_user_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateUserRequest,
) -> Result<Json<UserResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let role = match req.role.as_deref() {
        Some(role) => parse_user_role(role)?,
        None => UserRole::Client,
    };

    let existing = UsersEntity::find()
        .filter(UserColumn::Email.eq(&req.email))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::conflict("An account with this email already exists"));
    }

    let password_hash = hash_password(&SecretString::from(req.password))
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;

    let now = Utc::now();
    let new_user = entity::users::ActiveModel {
        id:            Set(Uuid::new_v4()),
        name:          Set(req.name),
        email:         Set(req.email),
        password_hash: Set(password_hash.expose_secret().to_string()),
        role:          Set(role),
        created_at:    Set(now),
        updated_at:    Set(now),
    };

    let created = new_user
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {}", e)))?;

    info!(created_user_id = %created.id, user_id = %user.id, "User created");

    Ok(Json(user_model_to_response(&created)))
}

/// Update an account (admin only)
pub async fn update_user_handler(
    state: &AppState,
    user: AuthenticatedUser,
    user_id: Uuid,
    req: UpdateUserRequest,
) -> Result<Json<UserResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let db_user = UsersEntity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let mut active_model: entity::users::ActiveModel = db_user.into();

    if let Some(name) = req.name {
        active_model.name = Set(name);
    }
    if let Some(email) = req.email {
        let existing = UsersEntity::find()
            .filter(UserColumn::Email.eq(&email))
            .filter(UserColumn::Id.ne(user_id))
            .one(&state.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict("An account with this email already exists"));
        }
        active_model.email = Set(email);
    }
    if let Some(password) = req.password {
        let password_hash = hash_password(&SecretString::from(password))
            .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))?;
        active_model.password_hash = Set(password_hash.expose_secret().to_string());
    }
    if let Some(ref role) = req.role {
        active_model.role = Set(parse_user_role(role)?);
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update user: {}", e)))?;

    info!(updated_user_id = %user_id, user_id = %user.id, "User updated");

    Ok(Json(user_model_to_response(&updated)))
}

/// Delete an account and everything it owns (admin only)
///
/// Dependent rows go first, in a fixed order; the user row goes last.
pub async fn delete_user_handler(
    state: &AppState,
    user: AuthenticatedUser,
    user_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    require_admin(&user)?;

    let db_user = UsersEntity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    state
        .db
        .transaction::<_, (), AppError>(move |txn| {
            Box::pin(async move {
                // Comments the user wrote
                CommentsEntity::delete_many()
                    .filter(CommentColumn::AuthorId.eq(user_id))
                    .exec(txn)
                    .await?;

                // Comments under the user's content, then the content itself
                let article_ids: Vec<Uuid> = ArticlesEntity::find()
                    .select_only()
                    .column(ArticleColumn::Id)
                    .filter(ArticleColumn::AuthorId.eq(user_id))
                    .into_tuple()
                    .all(txn)
                    .await?;
                if !article_ids.is_empty() {
                    CommentsEntity::delete_many()
                        .filter(CommentColumn::ArticleId.is_in(article_ids))
                        .exec(txn)
                        .await?;
                }
                ArticlesEntity::delete_many()
                    .filter(ArticleColumn::AuthorId.eq(user_id))
                    .exec(txn)
                    .await?;

                let story_ids: Vec<Uuid> = StoriesEntity::find()
                    .select_only()
                    .column(StoryColumn::Id)
                    .filter(StoryColumn::AuthorId.eq(user_id))
                    .into_tuple()
                    .all(txn)
                    .await?;
                if !story_ids.is_empty() {
                    CommentsEntity::delete_many()
                        .filter(CommentColumn::StoryId.is_in(story_ids))
                        .exec(txn)
                        .await?;
                }
                StoriesEntity::delete_many()
                    .filter(StoryColumn::AuthorId.eq(user_id))
                    .exec(txn)
                    .await?;

                // Team bios and the CRM rows
                TeamMembersEntity::delete_many()
                    .filter(TeamColumn::AuthorId.eq(user_id))
                    .exec(txn)
                    .await?;
                InquiriesEntity::delete_many()
                    .filter(InquiryColumn::UserId.eq(user_id))
                    .exec(txn)
                    .await?;
                MessagesEntity::delete_many()
                    .filter(MessageColumn::SenderId.eq(user_id))
                    .exec(txn)
                    .await?;
                ConsultationsEntity::delete_many()
                    .filter(ConsultationColumn::ClientId.eq(user_id))
                    .exec(txn)
                    .await?;
                AppointmentsEntity::delete_many()
                    .filter(AppointmentColumn::UserId.eq(user_id))
                    .exec(txn)
                    .await?;

                // The user row goes last
                UsersEntity::delete_by_id(user_id).exec(txn).await?;

                Ok(())
            })
        })
        .await
        .map_err(flatten_transaction_error)?;

    state.revalidator.invalidate("/admin/users");

    info!(deleted_user_id = %user_id, email = %db_user.email, user_id = %user.id, "User deleted with dependents");

    Ok(Json(SuccessResponse::new("User deleted successfully")))
}

/// Parse a role string into the enum
fn parse_user_role(role: &str) -> Result<UserRole> {
    match role.to_lowercase().as_str() {
        "admin" => Ok(UserRole::Admin),
        "client" => Ok(UserRole::Client),
        _ => Err(AppError::bad_request("Invalid role. Must be one of: admin, client")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_role() {
        assert_eq!(parse_user_role("admin").unwrap(), UserRole::Admin);
        assert_eq!(parse_user_role("CLIENT").unwrap(), UserRole::Client);
        assert!(parse_user_role("superuser").is_err());
    }
}
