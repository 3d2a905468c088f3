//! # API Router Configuration
//!
//! Routes are grouped by access level: public marketing reads and form
//! submissions, a guest-or-user comment endpoint, and the protected
//! admin/portal surface behind the auth middleware.

use axum::{
    extract::{Extension, Path, State as AxumState},
    middleware,
    routing::{delete, get, patch, post, put},
    Json,
    Router,
};
use error::{ApiJson, ApiQuery, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    dto,
    handlers,
    middleware::auth::{auth_middleware, optional_auth_middleware, AuthenticatedUser, MaybeUser},
    AppState,
};

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/articles", post(create_article))
        .route("/api/v1/articles/:id", put(update_article))
        .route("/api/v1/articles/:id", delete(delete_article))
        .route("/api/v1/stories", post(create_story))
        .route("/api/v1/stories/:id", put(update_story))
        .route("/api/v1/stories/:id", delete(delete_story))
        .route("/api/v1/team-members", post(create_team_member))
        .route("/api/v1/team-members/:id", put(update_team_member))
        .route("/api/v1/team-members/:id", delete(delete_team_member))
        .route("/api/v1/comments/:id", patch(update_comment))
        .route("/api/v1/comments/:id", delete(delete_comment))
        .route("/api/v1/contacts", get(list_contacts))
        .route("/api/v1/contacts/:id", get(get_contact))
        .route("/api/v1/contacts/:id/status", patch(update_contact_status))
        .route("/api/v1/contacts/:id", delete(delete_contact))
        .route("/api/v1/inquiries", get(list_inquiries))
        .route("/api/v1/inquiries", post(create_inquiry))
        .route("/api/v1/inquiries/:id", get(get_inquiry))
        .route("/api/v1/inquiries/:id", patch(update_inquiry))
        .route("/api/v1/inquiries/:id", delete(delete_inquiry))
        .route("/api/v1/consultations", get(list_consultations))
        .route("/api/v1/consultations", post(create_consultation))
        .route("/api/v1/consultations/:id", get(get_consultation))
        .route("/api/v1/consultations/:id", put(update_consultation))
        .route("/api/v1/consultations/:id", delete(delete_consultation))
        .route("/api/v1/messages", get(list_messages))
        .route("/api/v1/messages", post(create_message))
        .route("/api/v1/messages/:id/read", patch(mark_message_read))
        .route("/api/v1/messages/:id", delete(delete_message))
        .route("/api/v1/users", get(list_users))
        .route("/api/v1/users", post(create_user))
        .route("/api/v1/users/:id", get(get_user))
        .route("/api/v1/users/:id", put(update_user))
        .route("/api/v1/users/:id", delete(delete_user))
        .route("/api/v1/appointments", get(list_appointments))
        .route("/api/v1/appointments", post(create_appointment))
        .route("/api/v1/appointments/:id", get(get_appointment))
        .route("/api/v1/appointments/:id", put(update_appointment))
        .route("/api/v1/appointments/:id", delete(delete_appointment))
        .route("/api/v1/dashboard/stats", get(dashboard_stats))
        .route("/api/v1/dashboard/activity", get(dashboard_activity))
        .route("/api/v1/dashboard/client", get(client_dashboard))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Comment creation accepts both guests and signed-in users
    let guest_routes = Router::new()
        .route("/api/v1/comments", post(create_comment))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        ));

    // Public routes that don't require authentication
    let public_routes = Router::new()
        .route("/api/v1/health", get(api_health))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/articles", get(list_articles))
        .route("/api/v1/articles/:id", get(get_article))
        .route("/api/v1/stories", get(list_stories))
        .route("/api/v1/stories/:id", get(get_story))
        .route("/api/v1/team-members", get(list_team))
        .route("/api/v1/team-members/:id", get(get_team_member))
        .route("/api/v1/comments", get(list_comments))
        .route("/api/v1/contacts", post(create_contact));

    public_routes
        .merge(guest_routes)
        .merge(protected_routes)
        .with_state(state)
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
///
/// # Arguments
///
/// * `state` - Application state containing DB pool and config
///
/// # Returns
///
/// Main router with health checks, API routes, and shared layers
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
        .layer(middleware::from_fn(
            crate::middleware::security_headers::security_headers_middleware,
        ))
        .layer(middleware::from_fn(
            crate::middleware::request_id::request_id_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers: extractor shims around the inner handlers.

async fn api_health(AxumState(state): AxumState<AppState>) -> Result<Json<handlers::health::HealthResponse>> {
    handlers::health::health_handler(&state).await
}

async fn register(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<dto::auth::RegisterRequest>,
) -> Result<Json<dto::auth::AuthSuccessResponse>> {
    handlers::auth::register_handler(&state, req).await
}

async fn login(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<dto::auth::LoginRequest>,
) -> Result<Json<dto::auth::AuthSuccessResponse>> {
    handlers::auth::login_handler(&state, req).await
}

async fn me(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<dto::users::UserResponse>> {
    handlers::auth::me_handler(&state, user).await
}

async fn list_articles(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<dto::articles::ArticleListQuery>,
) -> Result<Json<dto::articles::ArticleListResponse>> {
    handlers::articles::list_articles_handler(&state, query).await
}

async fn get_article(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::articles::ArticleResponse>> {
    handlers::articles::get_article_handler(&state, id).await
}

async fn create_article(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<dto::articles::CreateArticleRequest>,
) -> Result<Json<dto::articles::ArticleResponse>> {
    handlers::articles::create_article_handler(&state, user, req).await
}

async fn update_article(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<dto::articles::UpdateArticleRequest>,
) -> Result<Json<dto::articles::ArticleResponse>> {
    handlers::articles::update_article_handler(&state, user, id, req).await
}

async fn delete_article(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::articles::delete_article_handler(&state, user, id).await
}

async fn list_stories(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<dto::stories::StoryListQuery>,
) -> Result<Json<dto::stories::StoryListResponse>> {
    handlers::stories::list_stories_handler(&state, query).await
}

async fn get_story(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::stories::StoryResponse>> {
    handlers::stories::get_story_handler(&state, id).await
}

async fn create_story(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<dto::stories::CreateStoryRequest>,
) -> Result<Json<dto::stories::StoryResponse>> {
    handlers::stories::create_story_handler(&state, user, req).await
}

async fn update_story(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<dto::stories::UpdateStoryRequest>,
) -> Result<Json<dto::stories::StoryResponse>> {
    handlers::stories::update_story_handler(&state, user, id, req).await
}

async fn delete_story(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::stories::delete_story_handler(&state, user, id).await
}

async fn list_team(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<dto::team::TeamListQuery>,
) -> Result<Json<dto::team::TeamListResponse>> {
    handlers::team::list_team_handler(&state, query).await
}

async fn get_team_member(
    AxumState(state): AxumState<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::team::TeamMemberResponse>> {
    handlers::team::get_team_member_handler(&state, id).await
}

async fn create_team_member(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<dto::team::CreateTeamMemberRequest>,
) -> Result<Json<dto::team::TeamMemberResponse>> {
    handlers::team::create_team_member_handler(&state, user, req).await
}

async fn update_team_member(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<dto::team::UpdateTeamMemberRequest>,
) -> Result<Json<dto::team::TeamMemberResponse>> {
    handlers::team::update_team_member_handler(&state, user, id, req).await
}

async fn delete_team_member(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::team::delete_team_member_handler(&state, user, id).await
}

async fn list_comments(
    AxumState(state): AxumState<AppState>,
    ApiQuery(query): ApiQuery<dto::comments::CommentListQuery>,
) -> Result<Json<dto::comments::CommentListResponse>> {
    handlers::comments::list_comments_handler(&state, query).await
}

async fn create_comment(
    AxumState(state): AxumState<AppState>,
    Extension(principal): Extension<MaybeUser>,
    ApiJson(req): ApiJson<dto::comments::CreateCommentRequest>,
) -> Result<Json<dto::comments::CommentResponse>> {
    handlers::comments::create_comment_handler(&state, principal, req).await
}

async fn update_comment(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<dto::comments::UpdateCommentRequest>,
) -> Result<Json<dto::comments::CommentResponse>> {
    handlers::comments::update_comment_handler(&state, user, id, req).await
}

async fn delete_comment(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::comments::delete_comment_handler(&state, user, id).await
}

async fn create_contact(
    AxumState(state): AxumState<AppState>,
    ApiJson(req): ApiJson<dto::contacts::CreateContactRequest>,
) -> Result<Json<dto::contacts::ContactResponse>> {
    handlers::contacts::create_contact_handler(&state, req).await
}

async fn list_contacts(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<dto::contacts::ContactListQuery>,
) -> Result<Json<dto::contacts::ContactListResponse>> {
    handlers::contacts::list_contacts_handler(&state, user, query).await
}

async fn get_contact(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::contacts::ContactResponse>> {
    handlers::contacts::get_contact_handler(&state, user, id).await
}

async fn update_contact_status(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<dto::contacts::UpdateContactStatusRequest>,
) -> Result<Json<dto::contacts::ContactResponse>> {
    handlers::contacts::update_contact_status_handler(&state, user, id, req).await
}

async fn delete_contact(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::contacts::delete_contact_handler(&state, user, id).await
}

async fn list_inquiries(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<dto::inquiries::InquiryListQuery>,
) -> Result<Json<dto::inquiries::InquiryListResponse>> {
    handlers::inquiries::list_inquiries_handler(&state, user, query).await
}

async fn create_inquiry(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<dto::inquiries::CreateInquiryRequest>,
) -> Result<Json<dto::inquiries::InquiryResponse>> {
    handlers::inquiries::create_inquiry_handler(&state, user, req).await
}

async fn get_inquiry(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::inquiries::InquiryResponse>> {
    handlers::inquiries::get_inquiry_handler(&state, user, id).await
}

async fn update_inquiry(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<dto::inquiries::UpdateInquiryRequest>,
) -> Result<Json<dto::inquiries::InquiryResponse>> {
    handlers::inquiries::update_inquiry_handler(&state, user, id, req).await
}

async fn delete_inquiry(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::inquiries::delete_inquiry_handler(&state, user, id).await
}

async fn list_consultations(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<dto::consultations::ConsultationListQuery>,
) -> Result<Json<dto::consultations::ConsultationListResponse>> {
    handlers::consultations::list_consultations_handler(&state, user, query).await
}

async fn create_consultation(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<dto::consultations::CreateConsultationRequest>,
) -> Result<Json<dto::consultations::ConsultationResponse>> {
    handlers::consultations::create_consultation_handler(&state, user, req).await
}

async fn get_consultation(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::consultations::ConsultationResponse>> {
    handlers::consultations::get_consultation_handler(&state, user, id).await
}

async fn update_consultation(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<dto::consultations::UpdateConsultationRequest>,
) -> Result<Json<dto::consultations::ConsultationResponse>> {
    handlers::consultations::update_consultation_handler(&state, user, id, req).await
}

async fn delete_consultation(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::consultations::delete_consultation_handler(&state, user, id).await
}

async fn list_messages(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<dto::messages::MessageListQuery>,
) -> Result<Json<dto::messages::MessageListResponse>> {
    handlers::messages::list_messages_handler(&state, user, query).await
}

async fn create_message(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<dto::messages::CreateMessageRequest>,
) -> Result<Json<dto::messages::MessageResponse>> {
    handlers::messages::create_message_handler(&state, user, req).await
}

async fn mark_message_read(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::messages::MessageResponse>> {
    handlers::messages::mark_message_read_handler(&state, user, id).await
}

async fn delete_message(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::messages::delete_message_handler(&state, user, id).await
}

async fn list_users(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<dto::users::UserListQuery>,
) -> Result<Json<dto::users::UserListResponse>> {
    handlers::users::list_users_handler(&state, user, query).await
}

async fn create_user(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<dto::users::CreateUserRequest>,
) -> Result<Json<dto::users::UserResponse>> {
    handlers::users::create_user_handler(&state, user, req).await
}

async fn get_user(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::users::UserResponse>> {
    handlers::users::get_user_handler(&state, user, id).await
}

async fn update_user(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<dto::users::UpdateUserRequest>,
) -> Result<Json<dto::users::UserResponse>> {
    handlers::users::update_user_handler(&state, user, id, req).await
}

async fn delete_user(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::users::delete_user_handler(&state, user, id).await
}

async fn list_appointments(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<dto::appointments::AppointmentListQuery>,
) -> Result<Json<dto::appointments::AppointmentListResponse>> {
    handlers::appointments::list_appointments_handler(&state, user, query).await
}

async fn create_appointment(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(req): ApiJson<dto::appointments::CreateAppointmentRequest>,
) -> Result<Json<dto::appointments::AppointmentResponse>> {
    handlers::appointments::create_appointment_handler(&state, user, req).await
}

async fn get_appointment(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::appointments::AppointmentResponse>> {
    handlers::appointments::get_appointment_handler(&state, user, id).await
}

async fn update_appointment(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<dto::appointments::UpdateAppointmentRequest>,
) -> Result<Json<dto::appointments::AppointmentResponse>> {
    handlers::appointments::update_appointment_handler(&state, user, id, req).await
}

async fn delete_appointment(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<dto::common::SuccessResponse>> {
    handlers::appointments::delete_appointment_handler(&state, user, id).await
}

async fn dashboard_stats(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<dto::dashboard::StatsQuery>,
) -> Result<Json<dto::dashboard::DashboardStatsResponse>> {
    handlers::dashboard::stats_handler(&state, user, query).await
}

async fn dashboard_activity(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiQuery(query): ApiQuery<dto::dashboard::ActivityQuery>,
) -> Result<Json<dto::dashboard::ActivityFeedResponse>> {
    handlers::dashboard::activity_handler(&state, user, query).await
}

async fn client_dashboard(
    AxumState(state): AxumState<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<dto::dashboard::ClientDashboardResponse>> {
    handlers::dashboard::client_dashboard_handler(&state, user).await
}
