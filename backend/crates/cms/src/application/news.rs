//! News Use Case
//!
//! Articles own their images; replaced or deleted images are removed
//! from blob storage after the database write.

use std::collections::HashSet;
use std::sync::Arc;

use kernel::StoreError;

use crate::application::blobs::destroy_all;
use crate::application::pagination::{Listing, PageRequest, Pagination};
use crate::domain::entities::{ImageDraft, News, NewsDraft};
use crate::domain::repository::NewsRepository;
use crate::domain::services::BlobStore;
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "News not found";

/// Article fields as submitted. All five text fields are required.
#[derive(Debug, Default)]
pub struct NewsInput {
    pub title: Option<String>,
    pub text: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub excerpt: Option<String>,
    pub images: Vec<ImageDraft>,
}

impl NewsInput {
    fn into_draft(self) -> CmsResult<NewsDraft> {
        let required = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let (Some(title), Some(text), Some(date), Some(category), Some(excerpt)) = (
            required(self.title),
            required(self.text),
            required(self.date),
            required(self.category),
            required(self.excerpt),
        ) else {
            return Err(CmsError::validation("Missing required fields"));
        };

        if self.images.iter().any(|i| i.image_url.trim().is_empty()) {
            return Err(CmsError::validation("Image URL is required"));
        }

        Ok(NewsDraft {
            title,
            text,
            date,
            category,
            excerpt,
            images: self.images,
        })
    }
}

pub struct NewsUseCase<R, S>
where
    R: NewsRepository,
    S: BlobStore,
{
    repo: Arc<R>,
    blobs: Arc<S>,
}

impl<R, S> NewsUseCase<R, S>
where
    R: NewsRepository,
    S: BlobStore,
{
    pub fn new(repo: Arc<R>, blobs: Arc<S>) -> Self {
        Self { repo, blobs }
    }

    pub async fn list(&self, request: PageRequest) -> CmsResult<Listing<News>> {
        let items = self.repo.list_news(request.window()).await?;
        match request {
            PageRequest::All => Ok(Listing {
                total_items: items.len() as i64,
                items,
                pagination: None,
            }),
            PageRequest::Page { page, limit } => {
                let total = self.repo.count_news().await?;
                Ok(Listing {
                    items,
                    pagination: Some(Pagination::new(page, limit, total)),
                    total_items: total,
                })
            }
        }
    }

    pub async fn get(&self, id: i32) -> CmsResult<News> {
        self.repo
            .find_news(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))
    }

    pub async fn create(&self, input: NewsInput) -> CmsResult<News> {
        let news = self.repo.create_news(input.into_draft()?).await?;
        tracing::info!(news_id = news.id, images = news.images.len(), "News created");
        Ok(news)
    }

    pub async fn update(&self, id: i32, input: NewsInput) -> CmsResult<News> {
        let draft = input.into_draft()?;
        let existing = self.get(id).await?;

        let updated = self.repo.replace_news(id, draft).await.map_err(not_found)?;

        // Blobs still referenced by the new image list are kept
        let kept: HashSet<String> = updated.blob_ids().into_iter().collect();
        let stale = existing.blob_ids().into_iter().filter(|p| !kept.contains(p));
        let removed = destroy_all(self.blobs.as_ref(), stale).await;

        tracing::info!(news_id = id, blobs_removed = removed, "News updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> CmsResult<()> {
        let existing = self.get(id).await?;

        self.repo.delete_news(id).await.map_err(not_found)?;
        let removed = destroy_all(self.blobs.as_ref(), existing.blob_ids()).await;

        tracing::info!(news_id = id, blobs_removed = removed, "News deleted");
        Ok(())
    }
}

fn not_found(e: StoreError) -> CmsError {
    match e {
        StoreError::NotFound => CmsError::NotFound(NOT_FOUND),
        other => CmsError::Store(other),
    }
}
