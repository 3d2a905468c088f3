//! # Notification Dispatch
//!
//! Best-effort email/SMS notifications fired after appointment status
//! changes. The row update has already committed when a notification is
//! attempted; a provider failure is logged and never surfaces as a
//! request failure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::AppointmentStatus;
use error::{AppError, Result};
use tracing::warn;

/// A single outbound notification channel.
///
/// `to` is whatever address the channel understands (an email address,
/// a phone number); `subject` is ignored by channels without one.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: Option<&str>, body: &str) -> Result<()>;
}

/// Notifier that POSTs the message to a provider webhook.
pub struct WebhookNotifier {
    client:   reqwest::Client,
    endpoint: String,
    channel:  &'static str,
}

impl WebhookNotifier {
    pub fn new(endpoint: String, channel: &'static str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            channel,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, to: &str, subject: Option<&str>, body: &str) -> Result<()> {
        let payload = serde_json::json!({
            "channel": self.channel,
            "to": to,
            "subject": subject,
            "body": body,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::internal(format!("Notification provider unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::internal(format!(
                "Notification provider returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}

/// Notifier that only logs; used in development and tests.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, to: &str, subject: Option<&str>, _body: &str) -> Result<()> {
        tracing::debug!(to = %to, subject = ?subject, "Notification skipped (noop notifier)");
        Ok(())
    }
}

/// Email + SMS pair used for appointment updates.
pub struct NotificationDispatcher {
    email: Box<dyn Notifier>,
    sms:   Box<dyn Notifier>,
}

impl NotificationDispatcher {
    pub fn new(email: Box<dyn Notifier>, sms: Box<dyn Notifier>) -> Self {
        Self {
            email,
            sms,
        }
    }

    /// A dispatcher that drops everything; used in development and tests.
    pub fn noop() -> Self { Self::new(Box::new(NoopNotifier), Box::new(NoopNotifier)) }

    /// Notify a user about an appointment status change.
    ///
    /// Both sends are best-effort: failures are logged at `warn` and the
    /// already-committed row update stands.
    pub async fn dispatch_appointment_update(
        &self,
        user: &entity::users::Model,
        status: AppointmentStatus,
        scheduled_for: DateTime<Utc>,
    ) {
        let (subject, body) = appointment_message(status, &user.name, scheduled_for);

        if let Err(e) = self.email.send(&user.email, Some(&subject), &body).await {
            warn!(user_id = %user.id, error = %e, "Appointment email notification failed");
        }

        if let Err(e) = self.sms.send(&user.email, None, &body).await {
            warn!(user_id = %user.id, error = %e, "Appointment SMS notification failed");
        }
    }
}

/// Build the subject and HTML body for an appointment status message.
pub fn appointment_message(
    status: AppointmentStatus,
    user_name: &str,
    scheduled_for: DateTime<Utc>,
) -> (String, String) {
    let when = scheduled_for.format("%B %e, %Y at %H:%M UTC");

    match status {
        AppointmentStatus::Scheduled => {
            (
                "Your appointment is scheduled".to_string(),
                format!(
                    "<p>Hi {},</p><p>Your appointment has been scheduled for <strong>{}</strong>.</p>",
                    user_name, when
                ),
            )
        },
        AppointmentStatus::Cancelled => {
            (
                "Your appointment was cancelled".to_string(),
                format!(
                    "<p>Hi {},</p><p>Your appointment on <strong>{}</strong> has been cancelled. Please contact us \
                     to reschedule.</p>",
                    user_name, when
                ),
            )
        },
        AppointmentStatus::Completed => {
            (
                "Thanks for meeting with us".to_string(),
                format!(
                    "<p>Hi {},</p><p>Your appointment on <strong>{}</strong> is complete. We will follow up with \
                     next steps shortly.</p>",
                    user_name, when
                ),
            )
        },
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_appointment_message_scheduled() {
        let when = Utc.with_ymd_and_hms(2026, 7, 14, 15, 30, 0).unwrap();
        let (subject, body) = appointment_message(AppointmentStatus::Scheduled, "Dana", when);

        assert_eq!(subject, "Your appointment is scheduled");
        assert!(body.contains("Dana"));
        assert!(body.contains("2026"));
        assert!(body.starts_with("<p>"));
    }

    #[test]
    fn test_appointment_message_cancelled_mentions_reschedule() {
        let when = Utc.with_ymd_and_hms(2026, 7, 14, 9, 0, 0).unwrap();
        let (subject, body) = appointment_message(AppointmentStatus::Cancelled, "Avery", when);

        assert!(subject.contains("cancelled"));
        assert!(body.contains("reschedule"));
    }

    #[test]
    fn test_appointment_message_completed() {
        let when = Utc.with_ymd_and_hms(2026, 7, 14, 9, 0, 0).unwrap();
        let (subject, _body) = appointment_message(AppointmentStatus::Completed, "Avery", when);

        assert!(subject.contains("Thanks"));
    }

    #[tokio::test]
    async fn test_noop_notifier_always_succeeds() {
        let notifier = NoopNotifier;
        assert!(notifier.send("a@b.c", Some("hi"), "<p>x</p>").await.is_ok());
    }
}
