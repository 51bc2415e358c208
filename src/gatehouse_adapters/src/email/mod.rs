pub mod postmark_notification_sender;
pub mod recording_notification_sender;
pub mod templates;
pub mod tracing_notification_sender;

pub use postmark_notification_sender::PostmarkNotificationSender;
pub use recording_notification_sender::RecordingNotificationSender;
pub use templates::{RenderedEmail, render};
pub use tracing_notification_sender::TracingNotificationSender;
