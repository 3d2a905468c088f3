//! # Consultation Handlers
//!
//! Consultations are the one resource clients can mutate directly: the
//! owning client or an admin may update or cancel a request.

use axum::Json;
use chrono::Utc;
use entity::{
    consultations::{Column as ConsultationColumn, Entity as ConsultationsEntity},
    sea_orm_active_enums::ConsultationStatus,
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common::{PaginationInfo, SuccessResponse},
        consultations::{
            ConsultationListQuery,
            ConsultationListResponse,
            ConsultationResponse,
            CreateConsultationRequest,
            UpdateConsultationRequest,
        },
    },
    middleware::{auth::AuthenticatedUser, permissions::require_admin_or_owner},
    AppState,
};

/// Book a consultation as the signed-in client
pub async fn create_consultation_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateConsultationRequest,
) -> Result<Json<ConsultationResponse>> {
    req.validate()?;

    let now = Utc::now();
    let consultation = entity::consultations::ActiveModel {
        id:            Set(Uuid::new_v4()),
        subject:       Set(req.subject),
        description:   Set(req.description),
        scheduled_for: Set(req.scheduled_for),
        status:        Set(ConsultationStatus::Requested),
        client_id:     Set(user.id),
        created_at:    Set(now),
        updated_at:    Set(now),
    };

    let created = consultation
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create consultation: {}", e)))?;

    state.revalidator.invalidate("/portal/consultations");

    info!(consultation_id = %created.id, user_id = %user.id, "Consultation requested");

    Ok(Json(consultation_model_to_response(&created)))
}

/// List consultations: admins see everything, clients see their own
pub async fn list_consultations_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: ConsultationListQuery,
) -> Result<Json<ConsultationListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let mut base_query = ConsultationsEntity::find();

    if !user.is_admin() {
        base_query = base_query.filter(ConsultationColumn::ClientId.eq(user.id));
    }
    if let Some(ref status) = query.status {
        base_query = base_query.filter(ConsultationColumn::Status.eq(parse_consultation_status(status)?));
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count consultations: {}", e)))?;

    let consultations = base_query
        .order_by_desc(ConsultationColumn::CreatedAt)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch consultations: {}", e)))?;

    Ok(Json(ConsultationListResponse {
        consultations: consultations
            .iter()
            .map(consultation_model_to_response)
            .collect(),
        pagination:    PaginationInfo::new(page, limit, total),
    }))
}

/// Get one consultation (admin or the owning client)
pub async fn get_consultation_handler(
    state: &AppState,
    user: AuthenticatedUser,
    consultation_id: Uuid,
) -> Result<Json<ConsultationResponse>> {
    let consultation = ConsultationsEntity::find_by_id(consultation_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Consultation not found"))?;

    require_admin_or_owner(&user, consultation.client_id)?;

    Ok(Json(consultation_model_to_response(&consultation)))
}

/// Update a consultation (admin or the owning client)
pub async fn update_consultation_handler(
    state: &AppState,
    user: AuthenticatedUser,
    consultation_id: Uuid,
    req: UpdateConsultationRequest,
) -> Result<Json<ConsultationResponse>> {
    req.validate()?;

    let consultation = ConsultationsEntity::find_by_id(consultation_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Consultation not found"))?;

    require_admin_or_owner(&user, consultation.client_id)?;

    let mut active_model: entity::consultations::ActiveModel = consultation.into();

    if let Some(subject) = req.subject {
        active_model.subject = Set(subject);
    }
    if let Some(description) = req.description {
        active_model.description = Set(description);
    }
    if let Some(scheduled_for) = req.scheduled_for {
        active_model.scheduled_for = Set(scheduled_for);
    }
    if let Some(ref status) = req.status {
        active_model.status = Set(parse_consultation_status(status)?);
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update consultation: {}", e)))?;

    state.revalidator.invalidate("/portal/consultations");

    info!(consultation_id = %consultation_id, user_id = %user.id, "Consultation updated");

    Ok(Json(consultation_model_to_response(&updated)))
}

/// Delete a consultation (admin or the owning client)
pub async fn delete_consultation_handler(
    state: &AppState,
    user: AuthenticatedUser,
    consultation_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    let consultation = ConsultationsEntity::find_by_id(consultation_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Consultation not found"))?;

    require_admin_or_owner(&user, consultation.client_id)?;

    ConsultationsEntity::delete_by_id(consultation.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete consultation: {}", e)))?;

    state.revalidator.invalidate("/portal/consultations");

    info!(consultation_id = %consultation_id, user_id = %user.id, "Consultation deleted");

    Ok(Json(SuccessResponse::new("Consultation deleted successfully")))
}

/// Parse a consultation status string into the enum
fn parse_consultation_status(status: &str) -> Result<ConsultationStatus> {
    match status.to_lowercase().as_str() {
        "requested" => Ok(ConsultationStatus::Requested),
        "confirmed" => Ok(ConsultationStatus::Confirmed),
        "completed" => Ok(ConsultationStatus::Completed),
        "cancelled" => Ok(ConsultationStatus::Cancelled),
        _ => {
            Err(AppError::bad_request(
                "Invalid status. Must be one of: requested, confirmed, completed, cancelled",
            ))
        },
    }
}

/// Convert a consultation entity model to a response DTO
fn consultation_model_to_response(consultation: &entity::consultations::Model) -> ConsultationResponse {
    ConsultationResponse {
        id:            consultation.id,
        subject:       consultation.subject.clone(),
        description:   consultation.description.clone(),
        scheduled_for: consultation.scheduled_for,
        status:        consultation.status.to_string(),
        client_id:     consultation.client_id,
        created_at:    consultation.created_at,
        updated_at:    consultation.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_consultation_status() {
        assert_eq!(
            parse_consultation_status("requested").unwrap(),
            ConsultationStatus::Requested
        );
        assert_eq!(
            parse_consultation_status("Confirmed").unwrap(),
            ConsultationStatus::Confirmed
        );
        assert_eq!(
            parse_consultation_status("completed").unwrap(),
            ConsultationStatus::Completed
        );
        assert_eq!(
            parse_consultation_status("cancelled").unwrap(),
            ConsultationStatus::Cancelled
        );
        assert!(parse_consultation_status("postponed").is_err());
    }

    #[test]
    fn test_consultation_model_to_response() {
        let consultation = entity::consultations::Model {
            id:            Uuid::new_v4(),
            subject:       "Quarterly review".to_string(),
            description:   "Walk through Q2 numbers".to_string(),
            scheduled_for: Utc::now(),
            status:        ConsultationStatus::Requested,
            client_id:     Uuid::new_v4(),
            created_at:    Utc::now(),
            updated_at:    Utc::now(),
        };

        let response = consultation_model_to_response(&consultation);
        assert_eq!(response.status, "requested");
        assert_eq!(response.subject, "Quarterly review");
    }
}
