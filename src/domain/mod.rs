pub mod entity;
pub mod format;
pub mod outbound;
pub mod timer;
pub mod worker;

mod app;

pub use app::{ApplicationCore, ShutdownApplicationError};
pub use format::{Clock, DurationFormatter};
pub use timer::{CountdownTimer, TimerError};
