pub mod duration;
pub mod notification;
pub mod status;

pub use duration::TimerDuration;
pub use notification::NotificationMessage;
pub use status::TimerStatus;
