//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//! Method names carry the resource so one store can implement every trait.

use kernel::{Email, StoreResult};

use crate::domain::entities::{
    Album, AlbumSummary, NewAlbum, NewPhoto, NewShortVideo, NewTeamMember, News, NewsDraft, Photo,
    ReportPdf, ReportPdfDraft, ShortVideo, ShortVideoChanges, Subscriber, TeamMember,
    TeamMemberChanges,
};

/// Slice of an ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

/// News repository trait
#[trait_variant::make(NewsRepository: Send)]
pub trait LocalNewsRepository {
    /// Newest first; `None` returns everything
    async fn list_news(&self, window: Option<Window>) -> StoreResult<Vec<News>>;

    async fn count_news(&self) -> StoreResult<i64>;

    async fn find_news(&self, id: i32) -> StoreResult<Option<News>>;

    async fn create_news(&self, draft: NewsDraft) -> StoreResult<News>;

    /// Overwrite the article and replace all of its images
    async fn replace_news(&self, id: i32, draft: NewsDraft) -> StoreResult<News>;

    /// Delete the article and its images
    async fn delete_news(&self, id: i32) -> StoreResult<()>;
}

/// Album and photo repository trait
#[trait_variant::make(AlbumRepository: Send)]
pub trait LocalAlbumRepository {
    /// Newest first, with cover photo and photo count
    async fn list_albums(&self) -> StoreResult<Vec<AlbumSummary>>;

    async fn find_album(&self, id: i32) -> StoreResult<Option<(Album, Vec<Photo>)>>;

    /// `Conflict` when the title is taken
    async fn create_album(&self, album: NewAlbum) -> StoreResult<Album>;

    /// `NotFound` when the album does not exist
    async fn add_photo(&self, photo: NewPhoto) -> StoreResult<Photo>;

    async fn find_photo(&self, id: i32) -> StoreResult<Option<Photo>>;

    async fn delete_photo(&self, id: i32) -> StoreResult<()>;
}

/// Team member repository trait
#[trait_variant::make(TeamRepository: Send)]
pub trait LocalTeamRepository {
    /// Active members: founders first, then `display_order`, then newest
    async fn list_team(&self, window: Option<Window>) -> StoreResult<Vec<TeamMember>>;

    async fn count_team(&self) -> StoreResult<i64>;

    async fn find_team_member(&self, id: i32) -> StoreResult<Option<TeamMember>>;

    async fn create_team_member(&self, member: NewTeamMember) -> StoreResult<TeamMember>;

    async fn update_team_member(
        &self,
        id: i32,
        changes: TeamMemberChanges,
    ) -> StoreResult<TeamMember>;
}

/// Report PDF repository trait
#[trait_variant::make(ReportPdfRepository: Send)]
pub trait LocalReportPdfRepository {
    async fn list_reports(&self) -> StoreResult<Vec<ReportPdf>>;

    async fn find_report(&self, id: i32) -> StoreResult<Option<ReportPdf>>;

    /// `Conflict` when the title is taken
    async fn create_report(&self, draft: ReportPdfDraft) -> StoreResult<ReportPdf>;

    async fn update_report(&self, id: i32, draft: ReportPdfDraft) -> StoreResult<ReportPdf>;

    async fn delete_report(&self, id: i32) -> StoreResult<()>;
}

/// Short video repository trait
#[trait_variant::make(ShortVideoRepository: Send)]
pub trait LocalShortVideoRepository {
    async fn list_videos(&self) -> StoreResult<Vec<ShortVideo>>;

    async fn find_video(&self, id: i32) -> StoreResult<Option<ShortVideo>>;

    async fn create_video(&self, video: NewShortVideo) -> StoreResult<ShortVideo>;

    async fn update_video(&self, id: i32, changes: ShortVideoChanges) -> StoreResult<ShortVideo>;

    async fn delete_video(&self, id: i32) -> StoreResult<()>;
}

/// Newsletter subscriber repository trait
#[trait_variant::make(NewsletterRepository: Send)]
pub trait LocalNewsletterRepository {
    async fn find_subscriber(&self, email: &Email) -> StoreResult<Option<Subscriber>>;

    async fn create_subscriber(&self, email: &Email) -> StoreResult<Subscriber>;

    async fn reactivate_subscriber(&self, id: i32) -> StoreResult<Subscriber>;

    /// Active subscribers, newest first
    async fn list_subscribers(&self, window: Option<Window>) -> StoreResult<Vec<Subscriber>>;

    async fn count_subscribers(&self) -> StoreResult<i64>;
}
