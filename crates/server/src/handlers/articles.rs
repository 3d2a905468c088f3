//! # Article Handlers
//!
//! CRUD for marketing articles. Slugs are derived from titles; a title
//! change regenerates the slug and collides with 409. Deleting an
//! article removes its comments first, inside one transaction.

use axum::Json;
use chrono::Utc;
use entity::{
    articles::{Column as ArticleColumn, Entity as ArticlesEntity},
    comments::{Column as CommentColumn, Entity as CommentsEntity},
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
        articles::{
            ArticleListQuery,
            ArticleListResponse,
            ArticleResponse,
            CreateArticleRequest,
            UpdateArticleRequest,
        },
        common::{PaginationInfo, SuccessResponse},
    },
    middleware::{auth::AuthenticatedUser, permissions::require_admin},
    utils::slugify,
    AppState,
};

/// List articles, newest first, with author names and comment counts
pub async fn list_articles_handler(state: &AppState, query: ArticleListQuery) -> Result<Json<ArticleListResponse>> {
    let page = query.page();
    let limit = query.limit();

    let mut base_query = ArticlesEntity::find();

    if let Some(ref category) = query.category {
        base_query = base_query.filter(ArticleColumn::Category.eq(category));
    }

    let total = base_query
        .clone()
        .count(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to count articles: {}", e)))?;

    let rows = base_query
        .find_also_related(UsersEntity)
        .order_by_desc(ArticleColumn::CreatedAt)
        .paginate(&state.db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch articles: {}", e)))?;

    let mut articles = Vec::with_capacity(rows.len());
    for (article, author) in &rows {
        let comment_count = CommentsEntity::find()
            .filter(CommentColumn::ArticleId.eq(article.id))
            .count(&state.db)
            .await
            .unwrap_or(0);
        articles.push(article_model_to_response(
            article,
            author.as_ref().map(|u| u.name.clone()),
            Some(comment_count),
        ));
    }

    Ok(Json(ArticleListResponse {
        articles,
        pagination: PaginationInfo::new(page, limit, total),
    }))
}

/// Get a single article with relations
pub async fn get_article_handler(state: &AppState, article_id: Uuid) -> Result<Json<ArticleResponse>> {
    let (article, author) = ArticlesEntity::find_by_id(article_id)
        .find_also_related(UsersEntity)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Article not found"))?;

    let comment_count = CommentsEntity::find()
        .filter(CommentColumn::ArticleId.eq(article.id))
        .count(&state.db)
        .await
        .unwrap_or(0);

    Ok(Json(article_model_to_response(
        &article,
        author.map(|u| u.name),
        Some(comment_count),
    )))
}

/// Create an article (admin only)
pub async fn create_article_handler(
    state: &AppState,
    user: AuthenticatedUser,
    req: CreateArticleRequest,
) -> Result<Json<ArticleResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let slug = slugify(&req.title);

    let existing = ArticlesEntity::find()
        .filter(ArticleColumn::Slug.eq(&slug))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::conflict("An article with this title already exists"));
    }

    let now = Utc::now();
    let article = entity::articles::ActiveModel {
        id:         Set(Uuid::new_v4()),
        title:      Set(req.title),
        content:    Set(req.content),
        image:      Set(req.image),
        category:   Set(req.category),
        slug:       Set(slug),
        author_id:  Set(user.id),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let created = article
        .insert(&state.db)
        .await
        .map_err(|e| AppError::database(format!("Failed to create article: {}", e)))?;

    state.revalidator.invalidate("/articles");

    info!(article_id = %created.id, user_id = %user.id, "Article created");

    Ok(Json(article_model_to_response(&created, None, Some(0))))
}

/// Update an article (admin only); title changes regenerate the slug
pub async fn update_article_handler(
    state: &AppState,
    user: AuthenticatedUser,
    article_id: Uuid,
    req: UpdateArticleRequest,
) -> Result<Json<ArticleResponse>> {
    require_admin(&user)?;
    req.validate()?;

    let article = ArticlesEntity::find_by_id(article_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Article not found"))?;

    let mut active_model: entity::articles::ActiveModel = article.into();

    if let Some(title) = req.title {
        let new_slug = slugify(&title);
        // Verify new slug is unique (ignoring the current article)
        let existing = ArticlesEntity::find()
            .filter(ArticleColumn::Slug.eq(&new_slug))
            .filter(ArticleColumn::Id.ne(article_id))
            .one(&state.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::conflict("An article with this title already exists"));
        }
        active_model.title = Set(title);
        active_model.slug = Set(new_slug);
    }
    if let Some(content) = req.content {
        active_model.content = Set(content);
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
        .map_err(|e| AppError::database(format!("Failed to update article: {}", e)))?;

    state.revalidator.invalidate("/articles");
    state.revalidator.invalidate(&format!("/articles/{}", updated.slug));

    info!(article_id = %article_id, user_id = %user.id, "Article updated");

    Ok(Json(article_model_to_response(&updated, None, None)))
}

/// Delete an article and its comments (admin only)
pub async fn delete_article_handler(
    state: &AppState,
    user: AuthenticatedUser,
    article_id: Uuid,
) -> Result<Json<SuccessResponse>> {
    require_admin(&user)?;

    let article = ArticlesEntity::find_by_id(article_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::not_found("Article not found"))?;

    // Comments first, then the article, atomically.
    state
        .db
        .transaction::<_, (), AppError>(|txn| {
            Box::pin(async move {
                CommentsEntity::delete_many()
                    .filter(CommentColumn::ArticleId.eq(article_id))
                    .exec(txn)
                    .await?;
                ArticlesEntity::delete_by_id(article_id).exec(txn).await?;
                Ok(())
            })
        })
        .await
        .map_err(flatten_transaction_error)?;

    state.revalidator.invalidate("/articles");
    state.revalidator.invalidate(&format!("/articles/{}", article.slug));

    info!(article_id = %article_id, user_id = %user.id, "Article deleted");

    Ok(Json(SuccessResponse::new("Article deleted successfully")))
}

/// Collapse a transaction error into the inner application error.
pub fn flatten_transaction_error(err: sea_orm::TransactionError<AppError>) -> AppError {
    match err {
        sea_orm::TransactionError::Connection(db) => AppError::from(db),
        sea_orm::TransactionError::Transaction(inner) => inner,
    }
}

/// Convert an article entity model to a response DTO
fn article_model_to_response(
    article: &entity::articles::Model,
    author_name: Option<String>,
    comment_count: Option<u64>,
) -> ArticleResponse {
    ArticleResponse {
        id: article.id,
        title: article.title.clone(),
        content: article.content.clone(),
        image: article.image.clone(),
        category: article.category.clone(),
        slug: article.slug.clone(),
        author_id: article.author_id,
        author_name,
        comment_count,
        created_at: article.created_at,
        updated_at: article.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_article(title: &str, slug: &str) -> entity::articles::Model {
        entity::articles::Model {
            id:         Uuid::new_v4(),
            title:      title.to_string(),
            content:    "body".to_string(),
            image:      None,
            category:   "strategy".to_string(),
            slug:       slug.to_string(),
            author_id:  Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_article_model_to_response() {
        let article = make_test_article("Scaling Operations", "scaling-operations");
        let response =
            article_model_to_response(&article, Some("Dana Cole".to_string()), Some(4));

        assert_eq!(response.id, article.id);
        assert_eq!(response.slug, "scaling-operations");
        assert_eq!(response.author_name, Some("Dana Cole".to_string()));
        assert_eq!(response.comment_count, Some(4));
    }

    #[test]
    fn test_article_response_omits_absent_relations() {
        let article = make_test_article("A", "a");
        let response = article_model_to_response(&article, None, None);

        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("author_name"));
        assert!(!json.contains("comment_count"));
    }

    #[test]
    fn test_article_list_query_defaults() {
        let query = ArticleListQuery {
            page:     None,
            limit:    None,
            category: None,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 20);
    }
}
