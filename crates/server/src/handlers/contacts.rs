//! # Contact Handlers
//!
//! The public contact form writes here; the admin dashboard works the
//! submissions through the status workflow.

use axum::Json;
use chrono::Utc;
use entity::{
    contacts::{Column as ContactColumn, Entity as ContactsEntity},
    sea_orm_active_enums::ContactStatus,
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common::{PaginationInfo, SuccessResponse},
        contacts::{
            ContactListQuery,
            ContactListResponse,
            ContactResponse,
            CreateContactRequest,
            UpdateContactStatusRequest,
        },
    },
    middleware::{auth::AuthenticatedUser, permissions::require_admin},
    AppState,
};

/// Submit the public contact form (no session required)
pub async fn create_contact_handler(state: &AppState, req: CreateContactRequest) -> Result<Json<ContactResponse>> {
    req.validate()?;

    let now = Utc::now();
    let contact = entity::contacts::ActiveModel {
        id:         Set(Uuid::new_v4()),
        first_name: Set(req.first_name),
        last_name:  Set(req.last_name),
        email:      Set(req.email),
        phone:      Set(req.phone),
        company:    Set(req.company),
        website:    Set(req.website),
        city:       Set(req.city),
        state:      Set(req.state),
        message:    Set(req.message),
        status:     Set(ContactStatus::New),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = contact
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create contact: {}", e)))?;

    state.revalidator.invalidate("/admin/contacts");

    info!(contact_id = %created.id, "Contact form submitted");

    Ok(Json(contact_model_to_response(&created)))
}

/// List contact submissions (admin only)
pub async fn list_contacts_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: ContactListQuery,
) -> Result<Json<ContactListResponse>> {
    require_admin(&user)?;

    let page = query.page();
    let limit = query.limit();

    let mut base_query = ContactsEntity::find();

    if let Some(ref status) = query.status {
        base_query = base_query.filter(ContactColumn::Status.eq(parse_contact_status(status)?));
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count contacts: {}", e)))?;

    let contacts = base_query
        .order_by_desc(ContactColumn::CreatedAt)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch contacts: {}", e)))?;

    Ok(Json(ContactListResponse {
        contacts:   contacts.iter().map(contact_model_to_response).collect(),
        pagination: PaginationInfo::new(page, limit, total),
    }))
}

/// Get a single contact submission (admin only)
pub async fn get_contact_handler(
    state: &AppState,
    user: AuthenticatedUser,
    contact_id: Uuid,
) -> Result<Json<ContactResponse>> {
    require_admin(&user)?;

    let contact = ContactsEntity::find_by_id(contact_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Contact not found"))?;

    Ok(Json(contact_model_to_response(&contact)))
}

/// Move a contact through the workflow (admin only)
pub async fn update_contact_status_handler(
    state: &AppState,
    user: AuthenticatedUser,
    contact_id: Uuid,
    req: UpdateContactStatusRequest,
) -> Result<Json<ContactResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let status = parse_contact_status(&req.status)?;

    let contact = ContactsEntity::find_by_id(contact_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Contact not found"))?;

    let mut active_model: entity::contacts::ActiveModel = contact.into();
    active_model.status = Set(status);
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update contact: {}", e)))?;

    state.revalidator.invalidate("/admin/contacts");

    info!(contact_id = %contact_id, status = %updated.status, user_id = %user.id, "Contact status updated");

    Ok(Json(contact_model_to_response(&updated)))
}

/// Delete a contact submission (admin only)
pub async fn delete_contact_handler(
    state: &AppState,
    user: AuthenticatedUser,
    contact_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    require_admin(&user)?;

    let contact = ContactsEntity::find_by_id(contact_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Contact not found"))?;

    ContactsEntity::delete_by_id(contact.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete contact: {}", e)))?;

    state.revalidator.invalidate("/admin/contacts");

    info!(contact_id = %contact_id, user_id = %user.id, "Contact deleted");

    Ok(Json(SuccessResponse::new("Contact deleted successfully")))
}

/// Parse a contact status string into the enum
fn parse_contact_status(status: &str) -> Result<ContactStatus> {
    match status.to_lowercase().as_str() {
        "new" => Ok(ContactStatus::New),
        "in_progress" => Ok(ContactStatus::InProgress),
        "completed" => Ok(ContactStatus::Completed),
        "archived" => Ok(ContactStatus::Archived),
        _ => {
            Err(AppError::bad_request(
                "Invalid status. Must be one of: new, in_progress, completed, archived",
            ))
        },
    }
}

/// Convert a contact entity model to a response DTO
fn contact_model_to_response(contact: &entity::contacts::Model) -> ContactResponse {
    ContactResponse {
        id:         contact.id,
        first_name: contact.first_name.clone(),
        last_name:  contact.last_name.clone(),
        email:      contact.email.clone(),
        phone:      contact.phone.clone(),
        company:    contact.company.clone(),
        website:    contact.website.clone(),
        city:       contact.city.clone(),
        state:      contact.state.clone(),
        message:    contact.message.clone(),
        status:     contact.status.to_string(),
        created_at: contact.created_at,
        updated_at: contact.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_contact_status_valid() {
        assert_eq!(parse_contact_status("new").unwrap(), ContactStatus::New);
        assert_eq!(
            parse_contact_status("in_progress").unwrap(),
            ContactStatus::InProgress
        );
        assert_eq!(
            parse_contact_status("completed").unwrap(),
            ContactStatus::Completed
        );
        assert_eq!(
            parse_contact_status("archived").unwrap(),
            ContactStatus::Archived
        );
    }

    #[test]
    fn test_parse_contact_status_case_insensitive() {
        assert_eq!(parse_contact_status("NEW").unwrap(), ContactStatus::New);
        assert_eq!(
            parse_contact_status("Archived").unwrap(),
            ContactStatus::Archived
        );
    }

    #[test]
    fn test_parse_contact_status_invalid() {
        assert!(parse_contact_status("done").is_err());
        assert!(parse_contact_status("").is_err());
    }

    #[test]
    fn test_contact_model_to_response() {
        let contact = entity::contacts::Model {
            id:         Uuid::new_v4(),
            first_name: "Riley".to_string(),
            last_name:  "Monroe".to_string(),
            email:      "riley@example.com".to_string(),
            phone:      Some("555-0101".to_string()),
            company:    Some("Monroe Logistics".to_string()),
            website:    None,
            city:       Some("Austin".to_string()),
            state:      Some("TX".to_string()),
            message:    "Looking for an operations review".to_string(),
            status:     ContactStatus::New,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = contact_model_to_response(&contact);
        assert_eq!(response.status, "new");
        assert_eq!(response.company, Some("Monroe Logistics".to_string()));
    }
}
