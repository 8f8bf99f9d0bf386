//! Background notifications for course updates.
//!
//! Updating a course enqueues its id on a [`NotificationQueue`]. The
//! [`NotificationWorker`] spawned at startup drains the queue and e-mails
//! the course's subscribers through [`EmailService`].

pub mod email;
pub mod queue;
pub mod worker;

pub use email::EmailService;
pub use queue::{ChannelNotificationQueue, NotificationQueue};
pub use worker::NotificationWorker;
