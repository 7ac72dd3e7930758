use snafu::prelude::*;

/// The message shown to the user once a countdown expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    summary: String,
    body: Option<String>,
}

impl NotificationMessage {
    /// Try to create a [`NotificationMessage`]. Blank bodies are dropped.
    ///
    /// # Errors
    ///
    /// This function will return an error if the summary is blank.
    pub fn try_new(
        summary: String,
        body: Option<String>,
    ) -> Result<Self, TryNewNotificationMessageError> {
        ensure!(!summary.trim().is_empty(), BlankSummarySnafu);
        let body = body.filter(|body| !body.trim().is_empty());
        Ok(Self { summary, body })
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// An error type of creating a [`NotificationMessage`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewNotificationMessageError {
    #[snafu(display("Summary of an expiry notification must not be blank"))]
    #[non_exhaustive]
    BlankSummary,
}
