//! # Appointment Handlers
//!
//! Scheduling module. A status change commits first, then fires the
//! email/SMS notifications best-effort; a lost notification is logged
//! and accepted, a lost update is not possible.

use axum::Json;
use chrono::Utc;
use entity::{
    appointments::{Column as AppointmentColumn, Entity as AppointmentsEntity},
    sea_orm_active_enums::AppointmentStatus,
    users::Entity as UsersEntity,
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        appointments::{
            AppointmentListQuery,
            AppointmentListResponse,
            AppointmentResponse,
            CreateAppointmentRequest,
            UpdateAppointmentRequest,
        },
        common::{PaginationInfo, SuccessResponse},
    },
    middleware::{
        auth::AuthenticatedUser,
        permissions::{require_admin, require_admin_or_owner},
    },
    AppState,
};

/// Book an appointment for a user (admin only); notifies the user
pub async fn create_appointment_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateAppointmentRequest,
) -> Result<Json<AppointmentResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let target_user = UsersEntity::find_by_id(req.user_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let now = Utc::now();
    let appointment = entity::appointments::ActiveModel {
        id:            Set(Uuid::new_v4()),
        user_id:       Set(req.user_id),
        scheduled_for: Set(req.scheduled_for),
        notes:         Set(req.notes),
        status:        Set(AppointmentStatus::Scheduled),
        created_at:    Set(now),
        updated_at:    Set(now),
    };

    let created = appointment
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create appointment: {}", e)))?;

    // Row is committed; the notification is best-effort from here on.
    state
        .notifier
        .dispatch_appointment_update(&target_user, created.status, created.scheduled_for)
        .await;

    info!(appointment_id = %created.id, user_id = %user.id, "Appointment created");

    Ok(Json(appointment_model_to_response(&created)))
}

/// List appointments: admins see everything, clients see their own
pub async fn list_appointments_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: AppointmentListQuery,
) -> Result<Json<AppointmentListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let mut base_query = AppointmentsEntity::find();

    if !user.is_admin() {
        base_query = base_query.filter(AppointmentColumn::UserId.eq(user.id));
    }
    if let Some(ref status) = query.status {
        base_query = base_query.filter(AppointmentColumn::Status.eq(parse_appointment_status(status)?));
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count appointments: {}", e)))?;

    let appointments = base_query
        .order_by_desc(AppointmentColumn::ScheduledFor)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch appointments: {}", e)))?;

    Ok(Json(AppointmentListResponse {
        appointments: appointments
            .iter()
            .map(appointment_model_to_response)
            .collect(),
        pagination:   PaginationInfo::new(page, limit, total),
    }))
}

/// Get one appointment (admin or the affected user)
pub async fn get_appointment_handler(
    state: &AppState,
    user: AuthenticatedUser,
    appointment_id: Uuid,
) -> Result<Json<AppointmentResponse>> {
    let appointment = AppointmentsEntity::find_by_id(appointment_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Appointment not found"))?;

    require_admin_or_owner(&user, appointment.user_id)?;

    Ok(Json(appointment_model_to_response(&appointment)))
}

/// Update an appointment (admin only); status changes notify the user
pub async fn update_appointment_handler(
    state: &AppState,
    user: AuthenticatedUser,
    appointment_id: Uuid,
    req: UpdateAppointmentRequest,
) -> Result<Json<AppointmentResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let appointment = AppointmentsEntity::find_by_id(appointment_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Appointment not found"))?;

    let previous_status = appointment.status;
    let mut active_model: entity::appointments::ActiveModel = appointment.into();

    if let Some(scheduled_for) = req.scheduled_for {
        active_model.scheduled_for = Set(scheduled_for);
    }
    if let Some(notes) = req.notes {
        active_model.notes = Set(Some(notes));
    }
    if let Some(ref status) = req.status {
        active_model.status = Set(parse_appointment_status(status)?);
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update appointment: {}", e)))?;

    // The update is committed. Notify on status transitions only;
    // a failed or missing lookup downgrades to a log line.
    if updated.status != previous_status {
        match UsersEntity::find_by_id(updated.user_id).one(&state.db).await {
            Ok(Some(target_user)) => {
                state
                    .notifier
                    .dispatch_appointment_update(&target_user, updated.status, updated.scheduled_for)
                    .await;
            },
            Ok(None) => {
                warn!(appointment_id = %appointment_id, "Appointment user vanished, notification skipped");
            },
            Err(e) => {
                warn!(appointment_id = %appointment_id, error = %e, "User lookup failed, notification skipped");
            },
        }
    }

    info!(appointment_id = %appointment_id, user_id = %user.id, "Appointment updated");

    Ok(Json(appointment_model_to_response(&updated)))
}

/// Delete an appointment (admin only)
pub async fn delete_appointment_handler(
    state: &AppState,
    user: AuthenticatedUser,
    appointment_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    require_admin(&user)?;

    let appointment = AppointmentsEntity::find_by_id(appointment_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Appointment not found"))?;

    AppointmentsEntity::delete_by_id(appointment.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete appointment: {}", e)))?;

    info!(appointment_id = %appointment_id, user_id = %user.id, "Appointment deleted");

    Ok(Json(SuccessResponse::new("Appointment deleted successfully")))
}

/// Parse an appointment status string into the enum
fn parse_appointment_status(status: &str) -> Result<AppointmentStatus> {
    match status.to_lowercase().as_str() {
        "scheduled" => Ok(AppointmentStatus::Scheduled),
        "cancelled" => Ok(AppointmentStatus::Cancelled),
        "completed" => Ok(AppointmentStatus::Completed),
        _ => {
            Err(AppError::bad_request(
                "Invalid status. Must be one of: scheduled, cancelled, completed",
            ))
        },
    }
}

/// Convert an appointment entity model to a response DTO
fn appointment_model_to_response(appointment: &entity::appointments::Model) -> AppointmentResponse {
    AppointmentResponse {
        id:            appointment.id,
        user_id:       appointment.user_id,
        scheduled_for: appointment.scheduled_for,
        notes:         appointment.notes.clone(),
        status:        appointment.status.to_string(),
        created_at:    appointment.created_at,
        updated_at:    appointment.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_appointment_status() {
        assert_eq!(
            parse_appointment_status("scheduled").unwrap(),
            AppointmentStatus::Scheduled
        );
        assert_eq!(
            parse_appointment_status("Cancelled").unwrap(),
            AppointmentStatus::Cancelled
        );
        assert_eq!(
            parse_appointment_status("completed").unwrap(),
            AppointmentStatus::Completed
        );
        assert!(parse_appointment_status("missed").is_err());
    }

    #[test]
    fn test_appointment_model_to_response() {
        let appointment = entity::appointments::Model {
            id:            Uuid::new_v4(),
            user_id:       Uuid::new_v4(),
            scheduled_for: Utc::now(),
            notes:         Some("Bring the Q2 deck".to_string()),
            status:        AppointmentStatus::Scheduled,
            created_at:    Utc::now(),
            updated_at:    Utc::now(),
        };

        let response = appointment_model_to_response(&appointment);
        assert_eq!(response.status, "scheduled");
        assert_eq!(response.notes, Some("Bring the Q2 deck".to_string()));
    }
}
