//! # Dashboard Handlers
//!
//! Read-only aggregation: entity totals, a bucketed time series, growth
//! against the previous period, and the recent-activity feed. The
//! independent count queries fan out concurrently and are awaited
//! jointly; there is no ordering dependency between them.

use axum::Json;
use chrono::{DateTime, Utc};
use entity::{
    articles::{Column as ArticleColumn, Entity as ArticlesEntity},
    comments::{Column as CommentColumn, Entity as CommentsEntity},
    consultations::{Column as ConsultationColumn, Entity as ConsultationsEntity},
    contacts::{Column as ContactColumn, Entity as ContactsEntity},
    inquiries::{Column as InquiryColumn, Entity as InquiriesEntity},
    messages::{Column as MessageColumn, Entity as MessagesEntity},
    stories::{Column as StoryColumn, Entity as StoriesEntity},
    team_members::Entity as TeamMembersEntity,
    users::Entity as UsersEntity,
};
use error::{AppError, Result};
use sea_orm::{ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::{
    dto::dashboard::{
        ActivityFeedResponse,
        ActivityItem,
        ActivityQuery,
        ClientDashboardResponse,
        DashboardStatsResponse,
        EntityTotals,
        GrowthSummary,
        SeriesData,
        StatsQuery,
    },
    middleware::{auth::AuthenticatedUser, permissions::require_admin},
    stats::{bucket_counts, calculate_growth, merge_recent_activity, TimeRange},
    AppState,
};

/// Activity entries embedded in the stats payload
const STATS_ACTIVITY_CAP: usize = 5;

/// Admin dashboard statistics
pub async fn stats_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: StatsQuery,
) -> Result<Json<DashboardStatsResponse>> {
    require_admin(&user)?;

    let range = query
        .time_range
        .as_deref()
        .and_then(TimeRange::parse)
        .unwrap_or(TimeRange::Week);
    let now = Utc::now();
    let window_start = range.window_start(now);
    let previous_start = window_start - (now - window_start);

    // Entity totals, fanned out and awaited jointly
    let (users, articles, stories, team_members, comments, contacts, inquiries, consultations, messages) =
        tokio::try_join!(
            UsersEntity::find().count(&state.db),
            ArticlesEntity::find().count(&state.db),
            StoriesEntity::find().count(&state.db),
            TeamMembersEntity::find().count(&state.db),
            CommentsEntity::find().count(&state.db),
            ContactsEntity::find().count(&state.db),
            InquiriesEntity::find().count(&state.db),
            ConsultationsEntity::find().count(&state.db),
            MessagesEntity::find().count(&state.db),
        )
        .map_err(AppError::from)?;

    // Creation timestamps inside the window, bucketed application-side
    let (contact_times, comment_times, consultation_times) = tokio::try_join!(
        ContactsEntity::find()
            .select_only()
            .column(ContactColumn::CreatedAt)
            .filter(ContactColumn::CreatedAt.gte(window_start))
            .into_tuple::<DateTime<Utc>>()
            .all(&state.db),
        CommentsEntity::find()
            .select_only()
            .column(CommentColumn::CreatedAt)
            .filter(CommentColumn::CreatedAt.gte(window_start))
            .into_tuple::<DateTime<Utc>>()
            .all(&state.db),
        ConsultationsEntity::find()
            .select_only()
            .column(ConsultationColumn::CreatedAt)
            .filter(ConsultationColumn::CreatedAt.gte(window_start))
            .into_tuple::<DateTime<Utc>>()
            .all(&state.db),
    )
    .map_err(AppError::from)?;

    // Previous-period counts for the growth percentages
    let (prev_contacts, prev_comments, prev_consultations) = tokio::try_join!(
        ContactsEntity::find()
            .filter(ContactColumn::CreatedAt.gte(previous_start))
            .filter(ContactColumn::CreatedAt.lt(window_start))
            .count(&state.db),
        CommentsEntity::find()
            .filter(CommentColumn::CreatedAt.gte(previous_start))
            .filter(CommentColumn::CreatedAt.lt(window_start))
            .count(&state.db),
        ConsultationsEntity::find()
            .filter(ConsultationColumn::CreatedAt.gte(previous_start))
            .filter(ConsultationColumn::CreatedAt.lt(window_start))
            .count(&state.db),
    )
    .map_err(AppError::from)?;

    let recent_activity = fetch_recent_activity(&state.db, STATS_ACTIVITY_CAP).await?;

    Ok(Json(DashboardStatsResponse {
        totals: EntityTotals {
            users,
            articles,
            stories,
            team_members,
            comments,
            contacts,
            inquiries,
            consultations,
            messages,
        },
        time_range: range_name(range).to_string(),
        labels: range.bucket_labels(now),
        series: SeriesData {
            contacts:      bucket_counts(range, now, &contact_times),
            comments:      bucket_counts(range, now, &comment_times),
            consultations: bucket_counts(range, now, &consultation_times),
        },
        growth: GrowthSummary {
            contacts:      calculate_growth(contact_times.len() as u64, prev_contacts),
            comments:      calculate_growth(comment_times.len() as u64, prev_comments),
            consultations: calculate_growth(consultation_times.len() as u64, prev_consultations),
        },
        recent_activity,
    }))
}

/// Stand-alone recent-activity feed (admin only)
pub async fn activity_handler(
    state: &AppState,
    user: AuthenticatedUser,
    query: ActivityQuery,
) -> Result<Json<ActivityFeedResponse>> {
    require_admin(&user)?;

    let activity = fetch_recent_activity(&state.db, query.limit()).await?;

    Ok(Json(ActivityFeedResponse {
        activity,
    }))
}

/// Client-portal dashboard, scoped to the requesting user
pub async fn client_dashboard_handler(
    state: &AppState,
    user: AuthenticatedUser,
) -> Result<Json<ClientDashboardResponse>> {
    let now = Utc::now();

    let (inquiries, open_inquiries, consultations, upcoming_consultations, unread_messages) = tokio::try_join!(
        InquiriesEntity::find()
            .filter(InquiryColumn::UserId.eq(user.id))
            .count(&state.db),
        InquiriesEntity::find()
            .filter(InquiryColumn::UserId.eq(user.id))
            .filter(InquiryColumn::Status.eq(entity::sea_orm_active_enums::InquiryStatus::Open))
            .count(&state.db),
        ConsultationsEntity::find()
            .filter(ConsultationColumn::ClientId.eq(user.id))
            .count(&state.db),
        ConsultationsEntity::find()
            .filter(ConsultationColumn::ClientId.eq(user.id))
            .filter(ConsultationColumn::ScheduledFor.gte(now))
            .count(&state.db),
        MessagesEntity::find()
            .filter(MessageColumn::SenderId.eq(user.id))
            .filter(MessageColumn::IsRead.eq(false))
            .count(&state.db),
    )
    .map_err(AppError::from)?;

    // Own rows only, merged into one short feed
    let cap = STATS_ACTIVITY_CAP;
    let mut items: Vec<ActivityItem> = Vec::new();

    let recent_inquiries = InquiriesEntity::find()
        .filter(InquiryColumn::UserId.eq(user.id))
        .order_by_desc(InquiryColumn::CreatedAt)
        .limit(cap as u64)
        .all(&state.db)
        .await?;
    items.extend(recent_inquiries.into_iter().map(|row| {
        ActivityItem {
            activity_type: "inquiry".to_string(),
            id:            row.id,
            title:         row.subject,
            timestamp:     row.created_at,
        }
    }));

    let recent_consultations = ConsultationsEntity::find()
        .filter(ConsultationColumn::ClientId.eq(user.id))
        .order_by_desc(ConsultationColumn::CreatedAt)
        .limit(cap as u64)
        .all(&state.db)
        .await?;
    items.extend(recent_consultations.into_iter().map(|row| {
        ActivityItem {
            activity_type: "consultation".to_string(),
            id:            row.id,
            title:         row.subject,
            timestamp:     row.created_at,
        }
    }));

    Ok(Json(ClientDashboardResponse {
        inquiries,
        open_inquiries,
        consultations,
        upcoming_consultations,
        unread_messages,
        recent_activity: merge_recent_activity(items, cap),
    }))
}

/// Pull the most recent rows from each feed table, tag, merge, truncate.
///
/// Each table contributes at most `cap` rows before the merge, so the
/// result can never exceed `cap` regardless of how much history exists.
async fn fetch_recent_activity(db: &DbConn, cap: usize) -> Result<Vec<ActivityItem>> {
    let mut items: Vec<ActivityItem> = Vec::new();

    let articles = ArticlesEntity::find()
        .order_by_desc(ArticleColumn::CreatedAt)
        .limit(cap as u64)
        .all(db)
        .await?;
    items.extend(articles.into_iter().map(|row| {
        ActivityItem {
            activity_type: "article".to_string(),
            id:            row.id,
            title:         row.title,
            timestamp:     row.created_at,
        }
    }));

    let stories = StoriesEntity::find()
        .order_by_desc(StoryColumn::CreatedAt)
        .limit(cap as u64)
        .all(db)
        .await?;
    items.extend(stories.into_iter().map(|row| {
        ActivityItem {
            activity_type: "story".to_string(),
            id:            row.id,
            title:         row.title,
            timestamp:     row.created_at,
        }
    }));

    let comments = CommentsEntity::find()
        .order_by_desc(CommentColumn::CreatedAt)
        .limit(cap as u64)
        .all(db)
        .await?;
    items.extend(comments.into_iter().map(|row| {
        ActivityItem {
            activity_type: "comment".to_string(),
            id:            row.id,
            title:         snippet(&row.content),
            timestamp:     row.created_at,
        }
    }));

    let contacts = ContactsEntity::find()
        .order_by_desc(ContactColumn::CreatedAt)
        .limit(cap as u64)
        .all(db)
        .await?;
    items.extend(contacts.into_iter().map(|row| {
        ActivityItem {
            activity_type: "contact".to_string(),
            id:            row.id,
            title:         format!("{} {}", row.first_name, row.last_name),
            timestamp:     row.created_at,
        }
    }));

    let consultations = ConsultationsEntity::find()
        .order_by_desc(ConsultationColumn::CreatedAt)
        .limit(cap as u64)
        .all(db)
        .await?;
    items.extend(consultations.into_iter().map(|row| {
        ActivityItem {
            activity_type: "consultation".to_string(),
            id:            row.id,
            title:         row.subject,
            timestamp:     row.created_at,
        }
    }));

    Ok(merge_recent_activity(items, cap))
}

fn range_name(range: TimeRange) -> &'static str {
    match range {
        TimeRange::Week => "week",
        TimeRange::Month => "month",
        TimeRange::Year => "year",
    }
}

/// First 80 characters of a comment for the feed
fn snippet(content: &str) -> String { content.chars().take(80).collect() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_short_content() {
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn test_snippet_truncates() {
        let long = "x".repeat(200);
        assert_eq!(snippet(&long).chars().count(), 80);
    }

    #[test]
    fn test_range_name() {
        assert_eq!(range_name(TimeRange::Week), "week");
        assert_eq!(range_name(TimeRange::Month), "month");
        assert_eq!(range_name(TimeRange::Year), "year");
    }

    #[test]
    fn test_stats_activity_cap_is_five() {
        assert_eq!(STATS_ACTIVITY_CAP, 5);
    }
}
