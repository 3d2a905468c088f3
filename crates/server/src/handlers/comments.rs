//! # Comment Handlers
//!
//! Comments attach to exactly one article or story and come from either
//! a signed-in user or a guest identity. When a create request names
//! both parents, the article wins; that precedence is pinned by tests.

use axum::Json;
use chrono::Utc;
use entity::{
    articles::Entity as ArticlesEntity,
    comments::{Column as CommentColumn, Entity as CommentsEntity},
    stories::Entity as StoriesEntity,
    users::Entity as UsersEntity,
};
use error::{AppError, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        comments::{
            CommentListQuery,
            CommentListResponse,
            CommentResponse,
            CreateCommentRequest,
            UpdateCommentRequest,
        },
        common::{PaginationInfo, SuccessResponse},
    },
    middleware::auth::{AuthenticatedUser, MaybeUser},
    AppState,
};

/// Which parent a comment create request resolves to.
#[derive(Debug, PartialEq, Eq)]
pub enum CommentParent {
    Article(Uuid),
    Story(Uuid),
}

/// Resolve the parent content item for a comment.
///
/// Exactly one of article/story is required; when both are present the
/// article takes precedence.
pub fn resolve_comment_parent(article_id: Option<Uuid>, story_id: Option<Uuid>) -> Result<CommentParent> {
    match (article_id, story_id) {
        (Some(article), _) => Ok(CommentParent::Article(article)),
        (None, Some(story)) => Ok(CommentParent::Story(story)),
        (None, None) => {
            Err(AppError::Validation {
                message: "A comment must reference an article or a story".to_string(),
                errors:  vec!["Either article_id or story_id is required".to_string()],
            })
        },
    }
}

/// List comments, optionally scoped to one article or story
pub async fn list_comments_handler(state: &AppState, query: CommentListQuery) -> Result<Json<CommentListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let mut base_query = CommentsEntity::find();

    if let Some(article_id) = query.article_id {
        base_query = base_query.filter(CommentColumn::ArticleId.eq(article_id));
    }
    if let Some(story_id) = query.story_id {
        base_query = base_query.filter(CommentColumn::StoryId.eq(story_id));
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count comments: {}", e)))?;

    let rows = base_query
        .find_also_related(UsersEntity)
        .order_by_desc(CommentColumn::CreatedAt)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch comments: {}", e)))?;

    let comments = rows
        .iter()
        .map(|(comment, author)| comment_model_to_response(comment, author.as_ref()))
        .collect();

    Ok(Json(CommentListResponse {
        comments,
        pagination: PaginationInfo::new(page, limit, total),
    }))
}

/// Create a comment, as a signed-in user or a guest
pub async fn create_comment_handler(
    state: &AppState,
    principal: MaybeUser,
    req: CreateCommentRequest,
) -> Result<Json<CommentResponse>> {
    req.validate()?;

    let parent = resolve_comment_parent(req.article_id, req.story_id)?;

    // Verify the parent row exists before attaching anything to it.
    let (article_id, story_id) = match parent {
        CommentParent::Article(id) => {
            ArticlesEntity::find_by_id(id)
                .one(&state.db)
                .await?
                .ok_or_else(|| AppError::not_found("Article not found"))?;
            (Some(id), None)
        },
        CommentParent::Story(id) => {
            StoriesEntity::find_by_id(id)
                .one(&state.db)
                .await?
                .ok_or_else(|| AppError::not_found("Story not found"))?;
            (None, Some(id))
        },
    };

    let author_id = principal.0.as_ref().map(|user| user.id);

    if author_id.is_none() {
        let missing_guest_identity = req.guest_first_name.as_deref().unwrap_or("").is_empty() ||
            req.guest_last_name.as_deref().unwrap_or("").is_empty() ||
            req.guest_email.as_deref().unwrap_or("").is_empty();
        if missing_guest_identity {
            return Err(AppError::Validation {
                message: "Guest comments require a name and email".to_string(),
                errors:  vec![
                    "guest_first_name, guest_last_name and guest_email are required without a session".to_string(),
                ],
            });
        }
    }

    let now = Utc::now();
    let comment = entity::comments::ActiveModel {
        id:               Set(Uuid::new_v4()),
        content:          Set(req.content),
        author_id:        Set(author_id),
        guest_first_name: Set(req.guest_first_name),
        guest_last_name:  Set(req.guest_last_name),
        guest_email:      Set(req.guest_email),
        article_id:       Set(article_id),
        story_id:         Set(story_id),
        created_at:       Set(now),
        updated_at:       Set(now),
    };

    let created = comment
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create comment: {}", e)))?;

    // Resolve the display name for the response
    let author = match created.author_id {
        Some(id) => UsersEntity::find_by_id(id).one(&state.db).await?,
        None => None,
    };

    state.revalidator.invalidate("/comments");

    info!(comment_id = %created.id, "Comment created");

    Ok(Json(comment_model_to_response(&created, author.as_ref())))
}

/// Update a comment's content (admin or the comment's author)
pub async fn update_comment_handler(
    state: &AppState,
    user: AuthenticatedUser,
    comment_id: Uuid,
    req: UpdateCommentRequest,
) -> Result<Json<CommentResponse>> {
    req.validate()?;

    let comment = CommentsEntity::find_by_id(comment_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Comment not found"))?;

    if !user.is_admin() && comment.author_id != Some(user.id) {
        return Err(AppError::forbidden(
            "You do not have permission to modify this comment",
        ));
    }

    let mut active_model: entity::comments::ActiveModel = comment.into();
    active_model.content = Set(req.content);
    active_model.updated_at = Set(Utc::now());

    let updated = active_model
        .update(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to update comment: {}", e)))?;

    let author = match updated.author_id {
        Some(id) => UsersEntity::find_by_id(id).one(&state.db).await?,
        None => None,
    };

    state.revalidator.invalidate("/comments");

    info!(comment_id = %comment_id, user_id = %user.id, "Comment updated");

    Ok(Json(comment_model_to_response(&updated, author.as_ref())))
}

/// Delete a comment (admin or the comment's author)
pub async fn delete_comment_handler(
    state: &AppState,
    user: AuthenticatedUser,
    comment_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    let comment = CommentsEntity::find_by_id(comment_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Comment not found"))?;

    if !user.is_admin() && comment.author_id != Some(user.id) {
        return Err(AppError::forbidden(
            "You do not have permission to delete this comment",
        ));
    }

    CommentsEntity::delete_by_id(comment.id)
        .exec(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to delete comment: {}", e)))?;

    state.revalidator.invalidate("/comments");

    info!(comment_id = %comment_id, user_id = %user.id, "Comment deleted");

    Ok(Json(SuccessResponse::new("Comment deleted successfully")))
}

/// Convert a comment entity model to a response DTO
fn comment_model_to_response(
    comment: &entity::comments::Model,
    author: Option<&entity::users::Model>,
) -> CommentResponse {
    let author_name = match author {
        Some(user) => user.name.clone(),
        None => {
            format!(
                "{} {}",
                comment.guest_first_name.clone().unwrap_or_default(),
                comment.guest_last_name.clone().unwrap_or_default()
            )
            .trim()
            .to_string()
        },
    };

    CommentResponse {
        id: comment.id,
        content: comment.content.clone(),
        author_id: comment.author_id,
        author_name,
        article_id: comment.article_id,
        story_id: comment.story_id,
        created_at: comment.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_parent_article_only() {
        let article = Uuid::new_v4();
        assert_eq!(
            resolve_comment_parent(Some(article), None).unwrap(),
            CommentParent::Article(article)
        );
    }

    #[test]
    fn test_resolve_parent_story_only() {
        let story = Uuid::new_v4();
        assert_eq!(
            resolve_comment_parent(None, Some(story)).unwrap(),
            CommentParent::Story(story)
        );
    }

    #[test]
    fn test_resolve_parent_both_prefers_article() {
        let article = Uuid::new_v4();
        let story = Uuid::new_v4();
        assert_eq!(
            resolve_comment_parent(Some(article), Some(story)).unwrap(),
            CommentParent::Article(article)
        );
    }

    #[test]
    fn test_resolve_parent_neither_is_validation_error() {
        let err = resolve_comment_parent(None, None).unwrap_err();
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    fn make_guest_comment() -> entity::comments::Model {
        entity::comments::Model {
            id:               Uuid::new_v4(),
            content:          "Great read".to_string(),
            author_id:        None,
            guest_first_name: Some("Pat".to_string()),
            guest_last_name:  Some("Lane".to_string()),
            guest_email:      Some("pat@example.com".to_string()),
            article_id:       Some(Uuid::new_v4()),
            story_id:         None,
            created_at:       Utc::now(),
            updated_at:       Utc::now(),
        }
    }

    #[test]
    fn test_comment_response_guest_name() {
        let comment = make_guest_comment();
        let response = comment_model_to_response(&comment, None);
        assert_eq!(response.author_name, "Pat Lane");
        assert!(response.author_id.is_none());
    }

    #[test]
    fn test_comment_response_user_name_wins() {
        let mut comment = make_guest_comment();
        let user_id = Uuid::new_v4();
        comment.author_id = Some(user_id);
        let user = entity::users::Model {
            id:            user_id,
            name:          "Casey Brook".to_string(),
            email:         "casey@example.com".to_string(),
            password_hash: "hash".to_string(),
            role:          entity::sea_orm_active_enums::UserRole::Client,
            created_at:    Utc::now(),
            updated_at:    Utc::now(),
        };

        let response = comment_model_to_response(&comment, Some(&user));
        assert_eq!(response.author_name, "Casey Brook");
        assert_eq!(response.author_id, Some(user_id));
    }
}
