//! # Team Bio Handlers
//!
//! CRUD for the public team page.

use axum::Json;
use chrono::Utc;
use entity::team_members::{Column as TeamColumn, Entity as TeamMembersEntity};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common::{PaginationInfo, SuccessResponse},
        team::{
            CreateTeamMemberRequest,
            TeamListQuery,
            TeamListResponse,
            TeamMemberResponse,
            UpdateTeamMemberRequest,
        },
    },
    middleware::{auth::AuthenticatedUser, permissions::require_admin},
    AppState,
};

/// List team bios, newest first
pub async fn list_team_handler(state: &AppState, query: TeamListQuery) -> Result<Json<TeamListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let total = TeamMembersEntity::find()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count team members: {}", e)))?;

    let members = TeamMembersEntity::find()
        .order_by_desc(TeamColumn::CreatedAt)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch team members: {}", e)))?;

    Ok(Json(TeamListResponse {
        team:       members.iter().map(team_model_to_response).collect(),
        pagination: PaginationInfo::new(page, limit, total),
    }))
}

/// Get a single team bio
pub async fn get_team_member_handler(state: &AppState, member_id: Uuid) -> Result<Json<TeamMemberResponse>> {
    let member = TeamMembersEntity::find_by_id(member_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Team member not found"))?;

    Ok(Json(team_model_to_response(&member)))
}

/// Create a team bio (admin only)
pub async fn create_team_member_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateTeamMemberRequest,
) -> Result<Json<TeamMemberResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let now = Utc::now();
    let member = entity::team_members::ActiveModel {
        id:          Set(Uuid::new_v4()),
        name:        Set(req.name),
        title:       Set(req.title),
        description: Set(req.description),
        image:       Set(req.image),
        linkedin:    Set(req.linkedin),
        email:       Set(req.email),
        author_id:   Set(user.id),
        created_at:  Set(now),
        updated_at:  Set(now),
    };

    let created = member
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create team member: {}", e)))?;

    state.revalidator.invalidate("/team");

    info!(member_id = %created.id, user_id = %user.id, "Team member created");

    Ok(Json(team_model_to_response(&created)))
}

/// Update a team bio (admin only)
pub async fn update_team_member_handler(
    state: &AppState,
    user: AuthenticatedUser,
    member_id: Uuid,
    req: UpdateTeamMemberRequest,
) -> Result<Json<TeamMemberResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let member = TeamMembersEntity::find_by_id(member_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Team member not found"))?;

    let mut active_model: entity::team_members::ActiveModel = member.into();

    if let Some(name) = req.name {
        active_model.name = Set(name);
    }
    if let Some(title) = req.title {
        active_model.title = Set(title);
    }
    if let Some(description) = req.description {
        active_model.description = Set(Some(description));
    }
    if let Some(image) = req.image {
        active_model.image = Set(Some(image));
    }
    if let Some(linkedin) = req.linkedin {
        active_model.linkedin = Set(Some(linkedin));
    }
    if let Some(email) = req.email {
        active_model.email = Set(Some(email));
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update team member: {}", e)))?;

    state.revalidator.invalidate("/team");

    info!(member_id = %member_id, user_id = %user.id, "Team member updated");

    Ok(Json(team_model_to_response(&updated)))
}

/// Delete a team bio (admin only)
pub async fn delete_team_member_handler(
    state: &AppState,
    user: AuthenticatedUser,
    member_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    require_admin(&user)?;

    let member = TeamMembersEntity::find_by_id(member_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Team member not found"))?;

    TeamMembersEntity::delete_by_id(member.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete team member: {}", e)))?;

    state.revalidator.invalidate("/team");

    info!(member_id = %member_id, user_id = %user.id, "Team member deleted");

    Ok(Json(SuccessResponse::new("Team member deleted successfully")))
}

/// Convert a team member entity model to a response DTO
fn team_model_to_response(member: &entity::team_members::Model) -> TeamMemberResponse {
    TeamMemberResponse {
        id:          member.id,
        name:        member.name.clone(),
        title:       member.title.clone(),
        description: member.description.clone(),
        image:       member.image.clone(),
        linkedin:    member.linkedin.clone(),
        email:       member.email.clone(),
        author_id:   member.author_id,
        created_at:  member.created_at,
        updated_at:  member.updated_at,
    }
}
