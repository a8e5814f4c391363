//! Newsletter Use Case
//!
//! Public sign-up and the subscriber listing.

use std::sync::Arc;

use kernel::{Email, StoreError};

use crate::application::pagination::{total_pages, window};
use crate::domain::entities::Subscriber;
use crate::domain::repository::NewsletterRepository;
use crate::error::{CmsError, CmsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscription {
    Created,
    Reactivated,
}

/// One page of active subscribers
#[derive(Debug)]
pub struct SubscriberPage {
    pub subscribers: Vec<Subscriber>,
    pub page: i64,
    pub total_pages: i64,
    pub total_count: i64,
}

pub struct NewsletterUseCase<R>
where
    R: NewsletterRepository,
{
    repo: Arc<R>,
}

impl<R> NewsletterUseCase<R>
where
    R: NewsletterRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn subscribe(&self, raw_email: &str) -> CmsResult<(Subscriber, Subscription)> {
        let email = Email::new(raw_email)
            .map_err(|_| CmsError::validation("Valid email address is required"))?;

        if let Some(existing) = self.repo.find_subscriber(&email).await? {
            if existing.is_active {
                return Err(CmsError::AlreadySubscribed);
            }
            let subscriber = self.repo.reactivate_subscriber(existing.id).await?;
            tracing::info!(subscriber_id = subscriber.id, "Newsletter subscriber reactivated");
            return Ok((subscriber, Subscription::Reactivated));
        }

        // A concurrent sign-up for the same address loses the insert race
        let subscriber = self.repo.create_subscriber(&email).await.map_err(|e| match e {
            StoreError::Conflict(_) => CmsError::AlreadySubscribed,
            other => CmsError::Store(other),
        })?;

        tracing::info!(subscriber_id = subscriber.id, "Newsletter subscriber created");
        Ok((subscriber, Subscription::Created))
    }

    pub async fn list(&self, page: i64, limit: i64) -> CmsResult<SubscriberPage> {
        let subscribers = self.repo.list_subscribers(Some(window(page, limit))).await?;
        let total_count = self.repo.count_subscribers().await?;

        Ok(SubscriberPage {
            subscribers,
            page,
            total_pages: total_pages(total_count, limit),
            total_count,
        })
    }
}
