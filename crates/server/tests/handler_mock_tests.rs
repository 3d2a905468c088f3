//! Handler tests against a mocked database (SeaORM's MockDatabase).
//!
//! Each test appends the exact result sets the handler's query sequence
//! consumes, in order.

mod common;

use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;
use error::AppError;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use server::{
    dto::{
        articles::{CreateArticleRequest, UpdateArticleRequest},
        comments::CreateCommentRequest,
    },
    handlers,
    middleware::auth::{AuthenticatedUser, MaybeUser},
};
use uuid::Uuid;

fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id:    Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        role:  UserRole::Admin,
    }
}

fn client_user() -> AuthenticatedUser {
    AuthenticatedUser {
        id:    Uuid::new_v4(),
        email: "client@example.com".to_string(),
        role:  UserRole::Client,
    }
}

fn article_row(title: &str, slug: &str) -> entity::articles::Model {
    entity::articles::Model {
        id:         Uuid::new_v4(),
        title:      title.to_string(),
        content:    "Body copy".to_string(),
        image:      None,
        category:   "strategy".to_string(),
        slug:       slug.to_string(),
        author_id:  Uuid::new_v4(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_create_article_read_after_write() {
    let admin = admin_user();
    let mut inserted = article_row("Pricing Your Services", "pricing-your-services");
    inserted.author_id = admin.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // slug-uniqueness check finds nothing
        .append_query_results([Vec::<entity::articles::Model>::new()])
        // insert returns the created row
        .append_query_results([vec![inserted.clone()]])
        .into_connection();
    let state = common::make_state(db);

    let req = CreateArticleRequest {
        title:    "Pricing Your Services".to_string(),
        content:  "Body copy".to_string(),
        image:    None,
        category: "strategy".to_string(),
    };

    let response = handlers::articles::create_article_handler(&state, admin, req)
        .await
        .expect("create succeeds")
        .0;

    assert_eq!(response.id, inserted.id);
    assert_eq!(response.title, "Pricing Your Services");
    assert_eq!(response.slug, "pricing-your-services");
    assert_eq!(response.category, "strategy");
    assert_eq!(response.content, "Body copy");
}

#[tokio::test]
async fn test_create_article_duplicate_slug_conflicts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![article_row("Pricing Your Services", "pricing-your-services")]])
        .into_connection();
    let state = common::make_state(db);

    let req = CreateArticleRequest {
        title:    "Pricing your services".to_string(),
        content:  "Other body".to_string(),
        image:    None,
        category: "strategy".to_string(),
    };

    let err = handlers::articles::create_article_handler(&state, admin_user(), req)
        .await
        .expect_err("duplicate slug must conflict");

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_update_article_title_collision_conflicts() {
    let current = article_row("Old Title", "old-title");
    let other = article_row("Taken Title", "taken-title");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // fetch the row under update
        .append_query_results([vec![current.clone()]])
        // slug check finds a different row already using the slug
        .append_query_results([vec![other]])
        .into_connection();
    let state = common::make_state(db);

    let req = UpdateArticleRequest {
        title:    Some("Taken Title".to_string()),
        content:  None,
        image:    None,
        category: None,
    };

    let err = handlers::articles::update_article_handler(&state, admin_user(), current.id, req)
        .await
        .expect_err("slug collision must conflict");

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_delete_missing_article_is_not_found_not_internal() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<entity::articles::Model>::new()])
        .into_connection();
    let state = common::make_state(db);

    let err = handlers::articles::delete_article_handler(&state, admin_user(), Uuid::new_v4())
        .await
        .expect_err("missing row");

    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_article_removes_comments_first() {
    let article = article_row("Doomed", "doomed");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![article.clone()]])
        .append_exec_results([
            // comments delete, then the article row
            MockExecResult {
                last_insert_id: 0,
                rows_affected:  3,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected:  1,
            },
        ])
        .into_connection();
    let state = common::make_state(db);

    let response = handlers::articles::delete_article_handler(&state, admin_user(), article.id)
        .await
        .expect("delete succeeds")
        .0;

    assert!(response.success);
}

#[tokio::test]
async fn test_delete_user_cascades_all_dependents() {
    let user = entity::users::Model {
        id:            Uuid::new_v4(),
        name:          "Departing Client".to_string(),
        email:         "bye@example.com".to_string(),
        password_hash: "hash".to_string(),
        role:          UserRole::Client,
        created_at:    Utc::now(),
        updated_at:    Utc::now(),
    };

    let exec = |rows| {
        MockExecResult {
            last_insert_id: 0,
            rows_affected:  rows,
        }
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // the row under deletion
        .append_query_results([vec![user.clone()]])
        // the user's article and story id lookups inside the transaction
        .append_query_results([Vec::<entity::articles::Model>::new()])
        .append_query_results([Vec::<entity::stories::Model>::new()])
        // authored comments, articles, stories, team bios, inquiries,
        // messages, consultations, appointments, then the user row
        .append_exec_results([
            exec(4),
            exec(2),
            exec(1),
            exec(0),
            exec(3),
            exec(5),
            exec(1),
            exec(1),
            exec(1),
        ])
        .into_connection();
    let state = common::make_state(db);

    let response = handlers::users::delete_user_handler(&state, admin_user(), user.id)
        .await
        .expect("cascade delete succeeds")
        .0;

    assert!(response.success);
}

#[tokio::test]
async fn test_guest_comment_requires_identity() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![article_row("Commented", "commented")]])
        .into_connection();
    let state = common::make_state(db);

    let req = CreateCommentRequest {
        content:          "Nice piece".to_string(),
        article_id:       Some(Uuid::new_v4()),
        story_id:         None,
        guest_first_name: None,
        guest_last_name:  None,
        guest_email:      None,
    };

    let err = handlers::comments::create_comment_handler(&state, MaybeUser(None), req)
        .await
        .expect_err("guest without identity");

    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn test_comment_with_no_parent_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let state = common::make_state(db);

    let req = CreateCommentRequest {
        content:          "Orphan".to_string(),
        article_id:       None,
        story_id:         None,
        guest_first_name: Some("Pat".to_string()),
        guest_last_name:  Some("Lane".to_string()),
        guest_email:      Some("pat@example.com".to_string()),
    };

    let err = handlers::comments::create_comment_handler(&state, MaybeUser(None), req)
        .await
        .expect_err("no parent");

    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn test_guest_comment_created_under_article() {
    let article = article_row("Commented", "commented");
    let comment = entity::comments::Model {
        id:               Uuid::new_v4(),
        content:          "Nice piece".to_string(),
        author_id:        None,
        guest_first_name: Some("Pat".to_string()),
        guest_last_name:  Some("Lane".to_string()),
        guest_email:      Some("pat@example.com".to_string()),
        article_id:       Some(article.id),
        story_id:         None,
        created_at:       Utc::now(),
        updated_at:       Utc::now(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        // parent existence check, then the insert
        .append_query_results([vec![article.clone()]])
        .append_query_results([vec![comment.clone()]])
        .into_connection();
    let state = common::make_state(db);

    let req = CreateCommentRequest {
        content:          "Nice piece".to_string(),
        article_id:       Some(article.id),
        story_id:         None,
        guest_first_name: Some("Pat".to_string()),
        guest_last_name:  Some("Lane".to_string()),
        guest_email:      Some("pat@example.com".to_string()),
    };

    let response = handlers::comments::create_comment_handler(&state, MaybeUser(None), req)
        .await
        .expect("guest comment succeeds")
        .0;

    assert_eq!(response.article_id, Some(article.id));
    assert!(response.story_id.is_none());
    assert_eq!(response.author_name, "Pat Lane");
}

#[tokio::test]
async fn test_client_cannot_read_foreign_inquiry() {
    let inquiry = entity::inquiries::Model {
        id:         Uuid::new_v4(),
        subject:    "Private".to_string(),
        message:    "Not yours".to_string(),
        status:     entity::sea_orm_active_enums::InquiryStatus::Open,
        user_id:    Uuid::new_v4(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![inquiry.clone()]])
        .into_connection();
    let state = common::make_state(db);

    let err = handlers::inquiries::get_inquiry_handler(&state, client_user(), inquiry.id)
        .await
        .expect_err("foreign inquiry");

    assert!(matches!(err, AppError::Forbidden { .. }));
}

#[tokio::test]
async fn test_admin_reads_any_inquiry() {
    let inquiry = entity::inquiries::Model {
        id:         Uuid::new_v4(),
        subject:    "Anything".to_string(),
        message:    "Visible to admins".to_string(),
        status:     entity::sea_orm_active_enums::InquiryStatus::Open,
        user_id:    Uuid::new_v4(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![inquiry.clone()]])
        .into_connection();
    let state = common::make_state(db);

    let response = handlers::inquiries::get_inquiry_handler(&state, admin_user(), inquiry.id)
        .await
        .expect("admin read succeeds")
        .0;

    assert_eq!(response.id, inquiry.id);
    assert_eq!(response.status, "open");
}
