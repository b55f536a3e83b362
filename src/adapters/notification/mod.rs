//! Notification Adapters
//!
//! Implementations of the Notifier port.
//!
//! - **LogNotifier** - writes alerts to the log only
//! - **RedisNotifier** - Redis PUBLISH on the topic channel
//! - **WebhookNotifier** - signed HTTP POST
//! - **InMemoryNotifier** - captures messages (testing)
//! - **TimedNotifier** - deadline wrapper around any of the above

mod in_memory_notifier;
mod log_notifier;
mod payload;
mod redis_notifier;
mod timed_notifier;
mod webhook_notifier;

pub use in_memory_notifier::{InMemoryNotifier, SentNotification};
pub use log_notifier::LogNotifier;
pub use payload::NotificationPayload;
pub use redis_notifier::RedisNotifier;
pub use timed_notifier::TimedNotifier;
pub use webhook_notifier::{sign_body, WebhookNotifier, SIGNATURE_HEADER};
