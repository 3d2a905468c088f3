//! # Message Handlers
//!
//! Portal messages between clients and the firm.

use axum::Json;
use chrono::Utc;
use entity::{
    messages::{Column as MessageColumn, Entity as MessagesEntity},
    users::Entity as UsersEntity,
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common::{PaginationInfo, SuccessResponse},
        messages::{CreateMessageRequest, MessageListQuery, MessageListResponse, MessageResponse},
    },
    middleware::{
        auth::AuthenticatedUser,
        permissions::{require_admin, require_admin_or_owner},
    },
    AppState,
};

/// Send a message as the signed-in user
pub async fn create_message_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateMessageRequest,
) -> Result<Json<MessageResponse>> {
    req.validate()?;

    let now = Utc::now();
    let message = entity::messages::ActiveModel {
        id:         Set(Uuid::new_v4()),
        content:    Set(req.content),
        is_read:    Set(false),
        sender_id:  Set(user.id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = message
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create message: {}", e)))?;

    state.revalidator.invalidate("/portal/messages");

    info!(message_id = %created.id, user_id = %user.id, "Message sent");

    Ok(Json(message_model_to_response(&created, None)))
}

/// List messages: admins see everything, clients see their own
pub async fn list_messages_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: MessageListQuery,
) -> Result<Json<MessageListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let mut base_query = MessagesEntity::find();

    if !user.is_admin() {
        base_query = base_query.filter(MessageColumn::SenderId.eq(user.id));
    }
    if query.unread == Some(true) {
        base_query = base_query.filter(MessageColumn::IsRead.eq(false));
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count messages: {}", e)))?;

    let rows = base_query
        .find_also_related(UsersEntity)
        .order_by_desc(MessageColumn::CreatedAt)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch messages: {}", e)))?;

    let messages = rows
        .iter()
        .map(|(message, sender)| message_model_to_response(message, sender.as_ref().map(|u| u.name.clone())))
        .collect();

    Ok(Json(MessageListResponse {
        messages,
        pagination: PaginationInfo::new(page, limit, total),
    }))
}

/// Mark a message read (admin or its sender)
pub async fn mark_message_read_handler(
    state: &AppState,
    user: AuthenticatedUser,
    message_id: Uuid,
) -> Result<Json<MessageResponse>> {
    let message = MessagesEntity::find_by_id(message_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;

    require_admin_or_owner(&user, message.sender_id)?;

    let mut active_model: entity::messages::ActiveModel = message.into();
    active_model.is_read = Set(true);
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update message: {}", e)))?;

    info!(message_id = %message_id, user_id = %user.id, "Message marked read");

    Ok(Json(message_model_to_response(&updated, None)))
}

/// Delete a message (admin only)
pub async fn delete_message_handler(
    state: &AppState,
    user: AuthenticatedUser,
    message_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    require_admin(&user)?;

    let message = MessagesEntity::find_by_id(message_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Message not found"))?;

    MessagesEntity::delete_by_id(message.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete message: {}", e)))?;

    state.revalidator.invalidate("/portal/messages");

    info!(message_id = %message_id, user_id = %user.id, "Message deleted");

    Ok(Json(SuccessResponse::new("Message deleted successfully")))
}

/// Convert a message entity model to a response DTO
fn message_model_to_response(message: &entity::messages::Model, sender_name: Option<String>) -> MessageResponse {
    MessageResponse {
        id: message.id,
        content: message.content.clone(),
        is_read: message.is_read,
        sender_id: message.sender_id,
        sender_name,
        created_at: message.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_model_to_response() {
        let message = entity::messages::Model {
            id:         Uuid::new_v4(),
            content:    "Following up on the proposal".to_string(),
            is_read:    false,
            sender_id:  Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = message_model_to_response(&message, Some("Quinn".to_string()));
        assert!(!response.is_read);
        assert_eq!(response.sender_name, Some("Quinn".to_string()));
    }

    #[test]
    fn test_message_response_omits_absent_sender() {
        let message = entity::messages::Model {
            id:         Uuid::new_v4(),
            content:    "x".to_string(),
            is_read:    true,
            sender_id:  Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&message_model_to_response(&message, None)).unwrap();
        assert!(!json.contains("sender_name"));
    }
}
