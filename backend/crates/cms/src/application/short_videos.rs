//! Short Video Use Case

use std::sync::Arc;

use kernel::StoreError;

use crate::application::albums::trimmed;
use crate::domain::entities::{NewShortVideo, ShortVideo, ShortVideoChanges};
use crate::domain::repository::ShortVideoRepository;
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "Short video not found";

#[derive(Debug, Default)]
pub struct ShortVideoInput {
    pub video: Option<String>,
    pub video_public_id: Option<String>,
    pub title: Option<String>,
}

pub struct ShortVideoUseCase<R>
where
    R: ShortVideoRepository,
{
    repo: Arc<R>,
}

impl<R> ShortVideoUseCase<R>
where
    R: ShortVideoRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> CmsResult<Vec<ShortVideo>> {
        Ok(self.repo.list_videos().await?)
    }

    pub async fn get(&self, id: i32) -> CmsResult<ShortVideo> {
        self.repo
            .find_video(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))
    }

    pub async fn create(&self, input: ShortVideoInput) -> CmsResult<ShortVideo> {
        let video = trimmed(input.video).ok_or_else(|| CmsError::validation("Video URL is required"))?;
        let title = trimmed(input.title).ok_or_else(|| CmsError::validation("Title is required"))?;

        let created = self
            .repo
            .create_video(NewShortVideo {
                video,
                video_public_id: trimmed(input.video_public_id),
                title,
            })
            .await?;

        tracing::info!(video_id = created.id, "Short video created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, input: ShortVideoInput) -> CmsResult<ShortVideo> {
        let changes = ShortVideoChanges {
            video: trimmed(input.video),
            video_public_id: trimmed(input.video_public_id),
            title: trimmed(input.title),
        };

        let updated = self.repo.update_video(id, changes).await.map_err(not_found)?;
        tracing::info!(video_id = id, "Short video updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> CmsResult<()> {
        self.repo.delete_video(id).await.map_err(not_found)?;
        tracing::info!(video_id = id, "Short video deleted");
        Ok(())
    }
}

fn not_found(e: StoreError) -> CmsError {
    match e {
        StoreError::NotFound => CmsError::NotFound(NOT_FOUND),
        other => CmsError::Store(other),
    }
}
