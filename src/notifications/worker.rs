use coursehub_core::AppError;
use coursehub_models::CourseId;
use sqlx::PgPool;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info, instrument, warn};

use super::email::EmailService;

/// Drains the notification channel and e-mails every subscriber of the
/// updated course.
///
/// Delivery errors are logged per recipient; the worker only stops when the
/// channel closes.
pub struct NotificationWorker {
    db: PgPool,
    email: EmailService,
    receiver: UnboundedReceiver<CourseId>,
}

impl NotificationWorker {
    pub fn new(db: PgPool, email: EmailService, receiver: UnboundedReceiver<CourseId>) -> Self {
        Self {
            db,
            email,
            receiver,
        }
    }

    pub async fn run(mut self) {
        info!("Notification worker started");

        while let Some(course_id) = self.receiver.recv().await {
            if let Err(e) = self.notify_subscribers(course_id).await {
                error!(course_id = %course_id, error = ?e.error, "Failed to notify subscribers");
            }
        }

        info!("Notification channel closed, worker stopping");
    }

    /// Returns the number of e-mails handed to the transport.
    #[instrument(skip(self))]
    pub async fn notify_subscribers(&self, course_id: CourseId) -> Result<usize, AppError> {
        let Some(title) =
            sqlx::query_scalar::<_, String>("SELECT title FROM courses WHERE id = $1")
                .bind(course_id)
                .fetch_optional(&self.db)
                .await?
        else {
            warn!(course_id = %course_id, "Course disappeared before notification");
            return Ok(0);
        };

        let recipients = sqlx::query_scalar::<_, String>(
            r#"SELECT u.email
               FROM subscriptions s
               JOIN users u ON u.id = s.user_id
               WHERE s.course_id = $1 AND u.is_active = TRUE
               ORDER BY s.created_at"#,
        )
        .bind(course_id)
        .fetch_all(&self.db)
        .await?;

        let link = self.email.course_link(course_id);
        let mut sent = 0;

        for recipient in &recipients {
            match self
                .email
                .send_course_updated(recipient, &title, &link)
                .await
            {
                Ok(()) => sent += 1,
                Err(e) => {
                    warn!(course_id = %course_id, to = %recipient, error = ?e.error, "Course update e-mail failed");
                }
            }
        }

        info!(
            course_id = %course_id,
            subscribers = recipients.len(),
            sent,
            "Course update notifications processed"
        );

        Ok(sent)
    }
}
