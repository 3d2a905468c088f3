//! # Story Handlers
//!
//! CRUD for client success stories. Same slug discipline as articles.

use axum::Json;
use chrono::Utc;
use entity::{
    comments::{Column as CommentColumn, Entity as CommentsEntity},
    stories::{Column as StoryColumn, Entity as StoriesEntity},
    users::Entity as UsersEntity,
};
use error::{AppError, Result};
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    EntityTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
    TransactionTrait,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        common::{PaginationInfo, SuccessResponse},
        stories::{CreateStoryRequest, StoryListQuery, StoryListResponse, StoryResponse, UpdateStoryRequest},
    },
    handlers::articles::flatten_transaction_error,
    middleware::{auth::AuthenticatedUser, permissions::require_admin},
    utils::slugify,
    AppState,
};

/// List stories, newest first, with author names and comment counts
pub async fn list_stories_handler(state: &AppState, query: StoryListQuery) -> Result<Json<StoryListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let mut base_query = StoriesEntity::find();

    if let Some(ref category) = query.category {
        base_query = base_query.filter(StoryColumn::Category.eq(category));
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count stories: {}", e)))?;

    let rows = base_query
        .find_also_related(UsersEntity)
        .order_by_desc(StoryColumn::CreatedAt)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch stories: {}", e)))?;

    let mut stories = Vec::with_capacity(rows.len());
    for (story, author) in &rows {
        let comment_count = CommentsEntity::find()
            .filter(CommentColumn::StoryId.eq(story.id))
            .count(&state.db)
            .await
            .unwrap_or(0);
        stories.push(story_model_to_response(
            story,
            author.as_ref().map(|u| u.name.clone()),
            Some(comment_count),
        ));
    }

    Ok(Json(StoryListResponse {
        stories,
        pagination: PaginationInfo::new(page, limit, total),
    }))
}

/// Get a single story with relations
pub async fn get_story_handler(state: &AppState, story_id: Uuid) -> Result<Json<StoryResponse>> {
    let (story, author) = StoriesEntity::find_by_id(story_id)
        .find_also_related(UsersEntity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Story not found"))?;

    let comment_count = CommentsEntity::find()
        .filter(CommentColumn::StoryId.eq(story.id))
        .count(&state.db)
        .await
        .unwrap_or(0);

    Ok(Json(story_model_to_response(
        &story,
        author.map(|u| u.name),
        Some(comment_count),
    )))
}

/// Create a story (admin only)
pub async fn create_story_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateStoryRequest,
) -> Result<Json<StoryResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let slug = slugify(&req.title);

    let existing = StoriesEntity::find()
        .filter(StoryColumn::Slug.eq(&slug))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::conflict("A story with this title already exists"));
    }

    let now = Utc::now();
    let story = entity::stories::ActiveModel {
        id:          Set(Uuid::new_v4()),
        title:       Set(req.title),
        description: Set(req.description),
        image:       Set(req.image),
        category:    Set(req.category),
        slug:        Set(slug),
        author_id:   Set(user.id),
        created_at:  Set(now),
        updated_at:  Set(now),
    };

    let created = story
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create story: {}", e)))?;

    state.revalidator.invalidate("/stories");

    info!(story_id = %created.id, user_id = %user.id, "Story created");

    Ok(Json(story_model_to_response(&created, None, Some(0))))
}

/// Update a story (admin only); title changes regenerate the slug
pub async fn update_story_handler(
    state: &AppState,
    user: AuthenticatedUser,
    story_id: Uuid,
    req: UpdateStoryRequest,
) -> Result<Json<StoryResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let story = StoriesEntity::find_by_id(story_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Story not found"))?;

    let mut active_model: entity::stories::ActiveModel = story.into();

    if let Some(title) = req.title {
        let new_slug = slugify(&title);
        let existing = StoriesEntity::find()
            .filter(StoryColumn::Slug.eq(&new_slug))
            .filter(StoryColumn::Id.ne(story_id))
            .one(&state.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict("A story with this title already exists"));
        }
        active_model.title = Set(title);
        active_model.slug = Set(new_slug);
    }
    if let Some(description) = req.description {
        active_model.description = Set(description);
    }
    if let Some(image) = req.image {
        active_model.image = Set(Some(image));
    }
    if let Some(category) = req.category {
        active_model.category = Set(category);
    }
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update story: {}", e)))?;

    state.revalidator.invalidate("/stories");
    state.revalidator.invalidate(&format!("/stories/{}", updated.slug));

    info!(story_id = %story_id, user_id = %user.id, "Story updated");

    Ok(Json(story_model_to_response(&updated, None, None)))
}

/// Delete a story and its comments (admin only)
pub async fn delete_story_handler(
    state: &AppState,
    user: AuthenticatedUser,
    story_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    require_admin(&user)?;

    let story = StoriesEntity::find_by_id(story_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Story not found"))?;

    state
        .db
        .transaction::<_, (), AppError>(|txn| {
            Box::pin(async move {
                CommentsEntity::delete_many()
                    .filter(CommentColumn::StoryId.eq(story_id))
                    .exec(txn)
                    .await?;
                StoriesEntity::delete_by_id(story_id).exec(txn).await?;
                Ok(())
            })
        })
        .await
        .map_err(flatten_transaction_error)?;

    state.revalidator.invalidate("/stories");
    state.revalidator.invalidate(&format!("/stories/{}", story.slug));

    info!(story_id = %story_id, user_id = %user.id, "Story deleted");

    Ok(Json(SuccessResponse::new("Story deleted successfully")))
}

/// Convert a story entity model to a response DTO
fn story_model_to_response(
    story: &entity::stories::Model,
    author_name: Option<String>,
    comment_count: Option<u64>,
) -> StoryResponse {
    StoryResponse {
        id: story.id,
        title: story.title.clone(),
        description: story.description.clone(),
        image: story.image.clone(),
        category: story.category.clone(),
        slug: story.slug.clone(),
        author_id: story.author_id,
        author_name,
        comment_count,
        created_at: story.created_at,
        updated_at: story.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_model_to_response() {
        let story = entity::stories::Model {
            id:          Uuid::new_v4(),
            title:       "Turnaround in Twelve Months".to_string(),
            description: "How we did it".to_string(),
            image:       None,
            category:    "manufacturing".to_string(),
            slug:        "turnaround-in-twelve-months".to_string(),
            author_id:   Uuid::new_v4(),
            created_at:  Utc::now(),
            updated_at:  Utc::now(),
        };

        let response = story_model_to_response(&story, Some("Kim".to_string()), Some(2));
        assert_eq!(response.slug, "turnaround-in-twelve-months");
        assert_eq!(response.comment_count, Some(2));
    }
}
