//! # Inquiry Handlers
//!
//! Client-portal inquiries. Clients see their own rows, admins see all;
//! status transitions are admin-only.

use axum::Json;
use chrono::Utc;
use entity::{
    inquiries::{Column as InquiryColumn, Entity as InquiriesEntity},
    sea_orm_active_enums::InquiryStatus,
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common::{PaginationInfo, SuccessResponse},
        inquiries::{
            CreateInquiryRequest,
            InquiryListQuery,
            InquiryListResponse,
            InquiryResponse,
            UpdateInquiryRequest,
        },
    },
    middleware::{
        auth::AuthenticatedUser,
        permissions::{require_admin, require_admin_or_owner},
    },
    AppState,
};

/// Open a new inquiry as the signed-in user
pub async fn create_inquiry_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateInquiryRequest,
) -> Result<Json<InquiryResponse>> {
    req.validate()?;

    let now = Utc::now();
    let inquiry = entity::inquiries::ActiveModel {
        id:         Set(Uuid::new_v4()),
        subject:    Set(req.subject),
        message:    Set(req.message),
        status:     Set(InquiryStatus::Open),
        user_id:    Set(user.id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = inquiry
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create inquiry: {}", e)))?;

    state.revalidator.invalidate("/portal/inquiries");

    info!(inquiry_id = %created.id, user_id = %user.id, "Inquiry created");

    Ok(Json(inquiry_model_to_response(&created)))
}

/// List inquiries: admins see everything, clients see their own
pub async fn list_inquiries_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: InquiryListQuery,
) -> Result<Json<InquiryListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let mut base_query = InquiriesEntity::find();

    if !user.is_admin() {
        base_query = base_query.filter(InquiryColumn::UserId.eq(user.id));
    }
    if let Some(ref status) = query.status {
        base_query = base_query.filter(InquiryColumn::Status.eq(parse_inquiry_status(status)?));
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count inquiries: {}", e)))?;

    let inquiries = base_query
        .order_by_desc(InquiryColumn::CreatedAt)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch inquiries: {}", e)))?;

    Ok(Json(InquiryListResponse {
        inquiries:  inquiries.iter().map(inquiry_model_to_response).collect(),
        pagination: PaginationInfo::new(page, limit, total),
    }))
}

/// Get one inquiry (admin or the inquiry's owner)
pub async fn get_inquiry_handler(
    state: &AppState,
    user: AuthenticatedUser,
    inquiry_id: Uuid,
) -> Result<Json<InquiryResponse>> {
    let inquiry = InquiriesEntity::find_by_id(inquiry_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Inquiry not found"))?;

    require_admin_or_owner(&user, inquiry.user_id)?;

    Ok(Json(inquiry_model_to_response(&inquiry)))
}

/// Move an inquiry through the workflow (admin only)
pub async fn update_inquiry_handler(
    state: &AppState,
    user: AuthenticatedUser,
    inquiry_id: Uuid,
    req: UpdateInquiryRequest,
) -> Result<Json<InquiryResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let status = parse_inquiry_status(&req.status)?;

    let inquiry = InquiriesEntity::find_by_id(inquiry_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Inquiry not found"))?;

    let mut active_model: entity::inquiries::ActiveModel = inquiry.into();
    active_model.status = Set(status);
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update inquiry: {}", e)))?;

    state.revalidator.invalidate("/portal/inquiries");

    info!(inquiry_id = %inquiry_id, status = %updated.status, user_id = %user.id, "Inquiry status updated");

    Ok(Json(inquiry_model_to_response(&updated)))
}

/// Delete an inquiry (admin or the inquiry's owner)
pub async fn delete_inquiry_handler(
    state: &AppState,
    user: AuthenticatedUser,
    inquiry_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    let inquiry = InquiriesEntity::find_by_id(inquiry_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Inquiry not found"))?;

    require_admin_or_owner(&user, inquiry.user_id)?;

    InquiriesEntity::delete_by_id(inquiry.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete inquiry: {}", e)))?;

    state.revalidator.invalidate("/portal/inquiries");

    info!(inquiry_id = %inquiry_id, user_id = %user.id, "Inquiry deleted");

    Ok(Json(SuccessResponse::new("Inquiry deleted successfully")))
}

/// Parse an inquiry status string into the enum
fn parse_inquiry_status(status: &str) -> Result<InquiryStatus> {
    match status.to_lowercase().as_str() {
        "open" => Ok(InquiryStatus::Open),
        "in_progress" => Ok(InquiryStatus::InProgress),
        "resolved" => Ok(InquiryStatus::Resolved),
        _ => {
            Err(AppError::bad_request(
                "Invalid status. Must be one of: open, in_progress, resolved",
            ))
        },
    }
}

/// Convert an inquiry entity model to a response DTO
fn inquiry_model_to_response(inquiry: &entity::inquiries::Model) -> InquiryResponse {
    InquiryResponse {
        id:         inquiry.id,
        subject:    inquiry.subject.clone(),
        message:    inquiry.message.clone(),
        status:     inquiry.status.to_string(),
        user_id:    inquiry.user_id,
        created_at: inquiry.created_at,
        updated_at: inquiry.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inquiry_status() {
        assert_eq!(parse_inquiry_status("open").unwrap(), InquiryStatus::Open);
        assert_eq!(
            parse_inquiry_status("IN_PROGRESS").unwrap(),
            InquiryStatus::InProgress
        );
        assert_eq!(
            parse_inquiry_status("resolved").unwrap(),
            InquiryStatus::Resolved
        );
        assert!(parse_inquiry_status("closed").is_err());
    }

    #[test]
    fn test_inquiry_model_to_response() {
        let inquiry = entity::inquiries::Model {
            id:         Uuid::new_v4(),
            subject:    "Billing question".to_string(),
            message:    "Can we split the invoice?".to_string(),
            status:     InquiryStatus::Open,
            user_id:    Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = inquiry_model_to_response(&inquiry);
        assert_eq!(response.status, "open");
        assert_eq!(response.subject, "Billing question");
    }
}
