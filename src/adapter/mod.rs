pub mod config;
pub mod notify;

pub use notify::DesktopNotifier;
