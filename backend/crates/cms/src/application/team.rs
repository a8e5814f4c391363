//! Team Use Case
//!
//! Deleting a member deactivates the row and removes the portrait blob.

use std::sync::Arc;

use kernel::StoreError;

use crate::application::blobs::destroy_all;
use crate::application::pagination::{Listing, PageRequest, Pagination};
use crate::domain::entities::{NewTeamMember, TeamMember, TeamMemberChanges};
use crate::domain::repository::TeamRepository;
use crate::domain::services::BlobStore;
use crate::error::{CmsError, CmsResult};

const NOT_FOUND: &str = "Team member not found";

#[derive(Debug, Default)]
pub struct TeamMemberInput {
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_public_id: Option<String>,
    pub is_founder: Option<bool>,
    pub display_order: Option<i32>,
}

pub struct TeamUseCase<R, S>
where
    R: TeamRepository,
    S: BlobStore,
{
    repo: Arc<R>,
    blobs: Arc<S>,
}

impl<R, S> TeamUseCase<R, S>
where
    R: TeamRepository,
    S: BlobStore,
{
    pub fn new(repo: Arc<R>, blobs: Arc<S>) -> Self {
        Self { repo, blobs }
    }

    pub async fn list(&self, request: PageRequest) -> CmsResult<Listing<TeamMember>> {
        let items = self.repo.list_team(request.window()).await?;
        match request {
            PageRequest::All => Ok(Listing {
                total_items: items.len() as i64,
                items,
                pagination: None,
            }),
            PageRequest::Page { page, limit } => {
                let total = self.repo.count_team().await?;
                Ok(Listing {
                    items,
                    pagination: Some(Pagination::new(page, limit, total)),
                    total_items: total,
                })
            }
        }
    }

    pub async fn get(&self, id: i32) -> CmsResult<TeamMember> {
        self.repo
            .find_team_member(id)
            .await?
            .ok_or(CmsError::NotFound(NOT_FOUND))
    }

    pub async fn create(&self, input: TeamMemberInput) -> CmsResult<TeamMember> {
        let present = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let (Some(name), Some(role), Some(description), Some(image)) = (
            present(input.name),
            present(input.role),
            present(input.description),
            present(input.image),
        ) else {
            return Err(CmsError::validation(
                "Name, role, description, and image are required",
            ));
        };

        let member = self
            .repo
            .create_team_member(NewTeamMember {
                name,
                role,
                description,
                image,
                image_public_id: present(input.image_public_id),
                is_founder: input.is_founder.unwrap_or(false),
                display_order: input.display_order.unwrap_or(0),
            })
            .await?;

        tracing::info!(member_id = member.id, "Team member created");
        Ok(member)
    }

    pub async fn update(&self, id: i32, changes: TeamMemberChanges) -> CmsResult<TeamMember> {
        let member = self
            .repo
            .update_team_member(id, changes)
            .await
            .map_err(not_found)?;

        tracing::info!(member_id = id, "Team member updated");
        Ok(member)
    }

    pub async fn delete(&self, id: i32) -> CmsResult<()> {
        let member = self.get(id).await?;

        let removed = destroy_all(self.blobs.as_ref(), member.image_public_id).await;
        self.repo
            .update_team_member(id, TeamMemberChanges::deactivate())
            .await
            .map_err(not_found)?;

        tracing::info!(member_id = id, blobs_removed = removed, "Team member deactivated");
        Ok(())
    }
}

fn not_found(e: StoreError) -> CmsError {
    match e {
        StoreError::NotFound => CmsError::NotFound(NOT_FOUND),
        other => CmsError::Store(other),
    }
}
