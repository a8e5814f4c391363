//! Album Use Case
//!
//! Albums and the photos inside them.

use std::sync::Arc;

use kernel::StoreError;

use crate::domain::entities::{Album, AlbumSummary, ImageDraft, NewAlbum, NewPhoto, Photo};
use crate::domain::repository::AlbumRepository;
use crate::domain::services::BlobStore;
use crate::error::{CmsError, CmsResult};

const ALBUM_NOT_FOUND: &str = "Album not found";
const PHOTO_NOT_FOUND: &str = "Photo not found";

#[derive(Debug, Default)]
pub struct AlbumInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

pub struct AlbumUseCase<R, S>
where
    R: AlbumRepository,
    S: BlobStore,
{
    repo: Arc<R>,
    blobs: Arc<S>,
}

impl<R, S> AlbumUseCase<R, S>
where
    R: AlbumRepository,
    S: BlobStore,
{
    pub fn new(repo: Arc<R>, blobs: Arc<S>) -> Self {
        Self { repo, blobs }
    }

    pub async fn list(&self) -> CmsResult<Vec<AlbumSummary>> {
        Ok(self.repo.list_albums().await?)
    }

    pub async fn get(&self, id: i32) -> CmsResult<(Album, Vec<Photo>)> {
        self.repo
            .find_album(id)
            .await?
            .ok_or(CmsError::NotFound(ALBUM_NOT_FOUND))
    }

    pub async fn create(&self, input: AlbumInput, created_by: i32) -> CmsResult<Album> {
        let title = trimmed(input.title).ok_or_else(|| CmsError::validation("Title is required"))?;

        let album = self
            .repo
            .create_album(NewAlbum {
                title,
                description: trimmed(input.description),
                category: trimmed(input.category),
                created_by,
            })
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => {
                    CmsError::DuplicateTitle("Album with this title already exists")
                }
                other => CmsError::Store(other),
            })?;

        tracing::info!(album_id = album.id, created_by, "Album created");
        Ok(album)
    }

    pub async fn add_photo(&self, album_id: i32, image: ImageDraft) -> CmsResult<Photo> {
        if image.image_url.trim().is_empty() {
            return Err(CmsError::validation("Image URL is required"));
        }

        let photo = self
            .repo
            .add_photo(NewPhoto { album_id, image })
            .await
            .map_err(|e| match e {
                StoreError::NotFound => CmsError::NotFound(ALBUM_NOT_FOUND),
                other => CmsError::Store(other),
            })?;

        tracing::info!(album_id, photo_id = photo.id, "Photo added");
        Ok(photo)
    }

    /// The blob goes first; a storage failure keeps the row.
    pub async fn delete_photo(&self, id: i32) -> CmsResult<()> {
        let photo = self
            .repo
            .find_photo(id)
            .await?
            .ok_or(CmsError::NotFound(PHOTO_NOT_FOUND))?;

        if let Some(public_id) = &photo.public_id {
            self.blobs.destroy(public_id).await.map_err(CmsError::Storage)?;
        }

        self.repo.delete_photo(id).await.map_err(|e| match e {
            StoreError::NotFound => CmsError::NotFound(PHOTO_NOT_FOUND),
            other => CmsError::Store(other),
        })?;

        tracing::info!(photo_id = id, album_id = photo.album_id, "Photo deleted");
        Ok(())
    }
}

/// Trimmed value, `None` when blank
pub(crate) fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
