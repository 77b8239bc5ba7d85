// File: autosnap/src/services/mod.rs

pub mod notification;

pub use notification::{notification_subjects, NotificationPayload, NotificationSink, WebhookNotifier};
