//! Outgoing notifications
//!
//! Delivery is pluggable behind [`Mailer`]. [`LogMailer`] only records that a
//! notification was due; reset links are never written to the log.

use async_trait::async_trait;

use crate::BoxError;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, to: &str, reset_url: &str) -> Result<(), BoxError>;

    async fn send_leave_decision(
        &self,
        to: &str,
        leave_type: &str,
        status: &str,
        comments: Option<&str>,
    ) -> Result<(), BoxError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(&self, to: &str, _reset_url: &str) -> Result<(), BoxError> {
        tracing::info!(to = to, "Password reset link issued");
        Ok(())
    }

    async fn send_leave_decision(
        &self,
        to: &str,
        leave_type: &str,
        status: &str,
        comments: Option<&str>,
    ) -> Result<(), BoxError> {
        tracing::info!(
            to = to,
            leave_type = leave_type,
            status = status,
            has_comments = comments.is_some(),
            "Leave decision notification"
        );
        Ok(())
    }
}
