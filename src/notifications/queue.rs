use std::fmt::Debug;

use coursehub_models::CourseId;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, warn};

use crate::metrics::track_notification_enqueued;

/// Submits "course updated" notifications for background delivery.
///
/// Fire-and-forget: callers get no result and no delivery guarantee.
pub trait NotificationQueue: Send + Sync + Debug {
    fn enqueue(&self, course_id: CourseId);
}

/// Queue backed by an unbounded tokio channel drained by
/// [`NotificationWorker`](super::NotificationWorker).
#[derive(Debug, Clone)]
pub struct ChannelNotificationQueue {
    sender: UnboundedSender<CourseId>,
}

impl ChannelNotificationQueue {
    pub fn new() -> (Self, UnboundedReceiver<CourseId>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl NotificationQueue for ChannelNotificationQueue {
    fn enqueue(&self, course_id: CourseId) {
        match self.sender.send(course_id) {
            Ok(()) => {
                track_notification_enqueued();
                debug!(course_id = %course_id, "Course update notification enqueued");
            }
            Err(_) => {
                warn!(course_id = %course_id, "Notification worker is gone, dropping notification");
            }
        }
    }
}
