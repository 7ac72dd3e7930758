use notify_rust::{Notification, Timeout};
use snafu::prelude::*;

use crate::domain::entity::NotificationMessage;
use crate::domain::outbound::{NotifyError, NotifyPort};

/// A [`NotifyPort`] implementation which shows XDG desktop notifications.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(app_name: String) -> Self {
        Self { app_name }
    }
}

#[async_trait::async_trait]
impl NotifyPort for DesktopNotifier {
    async fn notify(&self, message: &NotificationMessage) -> Result<(), NotifyError> {
        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(message.summary())
            .timeout(Timeout::Default);

        if let Some(body) = message.body() {
            notification.body(body);
        }

        let _ = whatever!(
            notification.show_async().await,
            "Could not show notification",
        );

        Ok(())
    }
}
