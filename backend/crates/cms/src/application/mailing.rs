//! Mailing Use Case
//!
//! Single messages and newsletter blasts. A blast runs through a bounded
//! pool of concurrent sends; each recipient is retried with exponential
//! backoff before it is reported as failed.

use std::sync::Arc;
use std::time::Duration;

use futures_util::{StreamExt, stream};

use crate::application::config::MailerConfig;
use crate::domain::repository::NewsletterRepository;
use crate::domain::services::{Mailer, OutgoingMail};
use crate::error::{CmsError, CmsResult};

/// Concurrency and retry limits for a bulk send
#[derive(Debug, Clone, Copy)]
pub struct BulkPolicy {
    pub concurrency: usize,
    pub retries: u32,
    pub backoff: Duration,
}

impl Default for BulkPolicy {
    fn default() -> Self {
        BulkPolicy::from(&MailerConfig::default())
    }
}

impl From<&MailerConfig> for BulkPolicy {
    fn from(config: &MailerConfig) -> Self {
        Self {
            concurrency: config.bulk_concurrency.max(1),
            retries: config.bulk_retries,
            backoff: config.retry_backoff,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRecipient {
    pub email: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct BulkReport {
    pub sent: usize,
    pub failed: Vec<FailedRecipient>,
}

pub struct MailingUseCase<R, M>
where
    R: NewsletterRepository,
    M: Mailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    policy: BulkPolicy,
}

impl<R, M> MailingUseCase<R, M>
where
    R: NewsletterRepository,
    M: Mailer + Sync,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, policy: BulkPolicy) -> Self {
        Self {
            repo,
            mailer,
            policy,
        }
    }

    /// Returns the message id
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> CmsResult<String> {
        if [to, subject, html].iter().any(|v| v.trim().is_empty()) {
            return Err(CmsError::validation("Missing required fields: to, subject, html"));
        }

        let mail = OutgoingMail::from_html(to.trim(), subject, html);
        let message_id = self.mailer.send(&mail).await.map_err(CmsError::Mail)?;

        tracing::info!(message_id = %message_id, "Email sent");
        Ok(message_id)
    }

    /// Send to every active subscriber
    pub async fn send_bulk(&self, subject: &str, html: &str) -> CmsResult<BulkReport> {
        if subject.trim().is_empty() || html.trim().is_empty() {
            return Err(CmsError::validation("Missing required fields: subject, html"));
        }

        let recipients = self.repo.list_subscribers(None).await?;
        let total = recipients.len();

        let outcomes: Vec<Result<(), FailedRecipient>> = stream::iter(recipients)
            .map(|subscriber| {
                let mail = OutgoingMail::from_html(subscriber.email.as_str(), subject, html);
                async move { self.deliver(mail).await }
            })
            .buffer_unordered(self.policy.concurrency)
            .collect()
            .await;

        let mut report = BulkReport::default();
        for outcome in outcomes {
            match outcome {
                Ok(()) => report.sent += 1,
                Err(failed) => report.failed.push(failed),
            }
        }

        tracing::info!(
            recipients = total,
            sent = report.sent,
            failed = report.failed.len(),
            "Bulk mailing finished"
        );
        Ok(report)
    }

    async fn deliver(&self, mail: OutgoingMail) -> Result<(), FailedRecipient> {
        let mut delay = self.policy.backoff;
        let mut attempt = 0;

        loop {
            match self.mailer.send(&mail).await {
                Ok(_) => return Ok(()),
                Err(e) if attempt < self.policy.retries => {
                    attempt += 1;
                    tracing::debug!(to = %mail.to, attempt, error = %e, "Retrying email");
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
                Err(e) => {
                    tracing::warn!(to = %mail.to, error = %e, "Email delivery failed");
                    return Err(FailedRecipient {
                        email: mail.to,
                        error: e.to_string(),
                    });
                }
            }
        }
    }
}
