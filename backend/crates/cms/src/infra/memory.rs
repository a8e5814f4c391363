//! In-memory content store
//!
//! Implements every repository trait with the PostgreSQL semantics that the
//! use cases rely on: unique album and report titles, ordering, windows and
//! `NotFound` on writes to missing rows.

use std::cmp::Reverse;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kernel::{Email, StoreError, StoreResult};

use crate::domain::entities::{
    Album, AlbumSummary, ImageDraft, NewAlbum, NewPhoto, NewShortVideo, NewTeamMember, News,
    NewsDraft, NewsImage, Photo, ReportPdf, ReportPdfDraft, ShortVideo, ShortVideoChanges,
    Subscriber, TeamMember, TeamMemberChanges,
};
use crate::domain::repository::{
    AlbumRepository, NewsRepository, NewsletterRepository, ReportPdfRepository,
    ShortVideoRepository, TeamRepository, Window,
};

#[derive(Default)]
struct State {
    next_id: i32,
    news: Vec<News>,
    albums: Vec<Album>,
    photos: Vec<Photo>,
    team: Vec<TeamMember>,
    reports: Vec<ReportPdf>,
    videos: Vec<ShortVideo>,
    subscribers: Vec<Subscriber>,
}

impl State {
    /// One counter shared by every resource
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn images(&mut self, news_id: i32, drafts: Vec<ImageDraft>) -> Vec<NewsImage> {
        drafts
            .into_iter()
            .zip(0i32..)
            .map(|(draft, order)| NewsImage {
                id: self.next_id(),
                news_id,
                image_url: draft.image_url,
                public_id: draft.public_id,
                caption: draft.caption,
                display_order: order,
            })
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCmsRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryCmsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Internal("content store lock poisoned".to_string()))
    }

    /// Mark a subscriber inactive. No HTTP route unsubscribes.
    pub fn deactivate_subscriber(&self, email: &Email) -> StoreResult<()> {
        let mut state = self.lock()?;
        let subscriber = state
            .subscribers
            .iter_mut()
            .find(|s| &s.email == email)
            .ok_or(StoreError::NotFound)?;
        subscriber.is_active = false;
        Ok(())
    }
}

/// Apply an optional window to an already ordered listing
fn windowed<T>(items: impl Iterator<Item = T>, window: Option<Window>) -> Vec<T> {
    match window {
        Some(w) => items
            .skip(usize::try_from(w.offset).unwrap_or(0))
            .take(usize::try_from(w.limit).unwrap_or(0))
            .collect(),
        None => items.collect(),
    }
}

// Rows are appended in creation order, so "newest first" is the reverse of
// the vector order.

impl NewsRepository for InMemoryCmsRepository {
    async fn list_news(&self, window: Option<Window>) -> StoreResult<Vec<News>> {
        let state = self.lock()?;
        Ok(windowed(state.news.iter().rev().cloned(), window))
    }

    async fn count_news(&self) -> StoreResult<i64> {
        Ok(self.lock()?.news.len() as i64)
    }

    async fn find_news(&self, id: i32) -> StoreResult<Option<News>> {
        Ok(self.lock()?.news.iter().find(|n| n.id == id).cloned())
    }

    async fn create_news(&self, draft: NewsDraft) -> StoreResult<News> {
        let mut state = self.lock()?;
        let id = state.next_id();
        let images = state.images(id, draft.images);
        let now = Utc::now();

        let news = News {
            id,
            title: draft.title,
            text: draft.text,
            date: draft.date,
            category: draft.category,
            excerpt: draft.excerpt,
            created_at: now,
            updated_at: now,
            images,
        };
        state.news.push(news.clone());
        Ok(news)
    }

    async fn replace_news(&self, id: i32, draft: NewsDraft) -> StoreResult<News> {
        let mut state = self.lock()?;
        let images = state.images(id, draft.images);
        let news = state
            .news
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound)?;

        news.title = draft.title;
        news.text = draft.text;
        news.date = draft.date;
        news.category = draft.category;
        news.excerpt = draft.excerpt;
        news.images = images;
        news.updated_at = Utc::now();
        Ok(news.clone())
    }

    async fn delete_news(&self, id: i32) -> StoreResult<()> {
        let mut state = self.lock()?;
        let before = state.news.len();
        state.news.retain(|n| n.id != id);
        if state.news.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

impl AlbumRepository for InMemoryCmsRepository {
    async fn list_albums(&self) -> StoreResult<Vec<AlbumSummary>> {
        let state = self.lock()?;
        Ok(state
            .albums
            .iter()
            .rev()
            .map(|album| {
                let photos = state.photos.iter().filter(|p| p.album_id == album.id);
                AlbumSummary {
                    album: album.clone(),
                    cover_url: photos.clone().next().map(|p| p.image_url.clone()),
                    photo_count: photos.count() as i64,
                }
            })
            .collect())
    }

    async fn find_album(&self, id: i32) -> StoreResult<Option<(Album, Vec<Photo>)>> {
        let state = self.lock()?;
        Ok(state.albums.iter().find(|a| a.id == id).map(|album| {
            let photos = state
                .photos
                .iter()
                .filter(|p| p.album_id == id)
                .cloned()
                .collect();
            (album.clone(), photos)
        }))
    }

    async fn create_album(&self, album: NewAlbum) -> StoreResult<Album> {
        let mut state = self.lock()?;
        if state.albums.iter().any(|a| a.title == album.title) {
            return Err(StoreError::Conflict("albums_title_key".to_string()));
        }

        let now = Utc::now();
        let album = Album {
            id: state.next_id(),
            title: album.title,
            description: album.description,
            category: album.category,
            created_by: album.created_by,
            created_at: now,
            updated_at: now,
        };
        state.albums.push(album.clone());
        Ok(album)
    }

    async fn add_photo(&self, photo: NewPhoto) -> StoreResult<Photo> {
        let mut state = self.lock()?;
        if !state.albums.iter().any(|a| a.id == photo.album_id) {
            return Err(StoreError::NotFound);
        }

        let photo = Photo {
            id: state.next_id(),
            album_id: photo.album_id,
            image_url: photo.image.image_url,
            public_id: photo.image.public_id,
            caption: photo.image.caption,
            created_at: Utc::now(),
        };
        state.photos.push(photo.clone());
        Ok(photo)
    }

    async fn find_photo(&self, id: i32) -> StoreResult<Option<Photo>> {
        Ok(self.lock()?.photos.iter().find(|p| p.id == id).cloned())
    }

    async fn delete_photo(&self, id: i32) -> StoreResult<()> {
        let mut state = self.lock()?;
        let before = state.photos.len();
        state.photos.retain(|p| p.id != id);
        if state.photos.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

impl TeamRepository for InMemoryCmsRepository {
    async fn list_team(&self, window: Option<Window>) -> StoreResult<Vec<TeamMember>> {
        let state = self.lock()?;
        let mut active: Vec<TeamMember> =
            state.team.iter().filter(|m| m.is_active).cloned().collect();
        active.sort_by_key(|m| {
            (
                !m.is_founder,
                m.display_order,
                Reverse(m.created_at),
                Reverse(m.id),
            )
        });
        Ok(windowed(active.into_iter(), window))
    }

    async fn count_team(&self) -> StoreResult<i64> {
        Ok(self.lock()?.team.iter().filter(|m| m.is_active).count() as i64)
    }

    async fn find_team_member(&self, id: i32) -> StoreResult<Option<TeamMember>> {
        Ok(self.lock()?.team.iter().find(|m| m.id == id).cloned())
    }

    async fn create_team_member(&self, member: NewTeamMember) -> StoreResult<TeamMember> {
        let mut state = self.lock()?;
        let now = Utc::now();
        let member = TeamMember {
            id: state.next_id(),
            name: member.name,
            role: member.role,
            description: member.description,
            image: member.image,
            image_public_id: member.image_public_id,
            is_founder: member.is_founder,
            display_order: member.display_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.team.push(member.clone());
        Ok(member)
    }

    async fn update_team_member(
        &self,
        id: i32,
        changes: TeamMemberChanges,
    ) -> StoreResult<TeamMember> {
        let mut state = self.lock()?;
        let member = state
            .team
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound)?;
        changes.apply_to(member);
        Ok(member.clone())
    }
}

impl ReportPdfRepository for InMemoryCmsRepository {
    async fn list_reports(&self) -> StoreResult<Vec<ReportPdf>> {
        Ok(self.lock()?.reports.iter().rev().cloned().collect())
    }

    async fn find_report(&self, id: i32) -> StoreResult<Option<ReportPdf>> {
        Ok(self.lock()?.reports.iter().find(|r| r.id == id).cloned())
    }

    async fn create_report(&self, draft: ReportPdfDraft) -> StoreResult<ReportPdf> {
        let mut state = self.lock()?;
        if state.reports.iter().any(|r| r.title == draft.title) {
            return Err(StoreError::Conflict("report_pdfs_title_key".to_string()));
        }

        let now = Utc::now();
        let report = ReportPdf {
            id: state.next_id(),
            title: draft.title,
            cover_url: draft.cover_url,
            pdf_url: draft.pdf_url,
            description: draft.description,
            created_at: now,
            updated_at: now,
        };
        state.reports.push(report.clone());
        Ok(report)
    }

    async fn update_report(&self, id: i32, draft: ReportPdfDraft) -> StoreResult<ReportPdf> {
        let mut state = self.lock()?;
        if state.reports.iter().any(|r| r.id != id && r.title == draft.title) {
            return Err(StoreError::Conflict("report_pdfs_title_key".to_string()));
        }

        let report = state
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;
        report.title = draft.title;
        report.cover_url = draft.cover_url;
        report.pdf_url = draft.pdf_url;
        report.description = draft.description;
        report.updated_at = Utc::now();
        Ok(report.clone())
    }

    async fn delete_report(&self, id: i32) -> StoreResult<()> {
        let mut state = self.lock()?;
        let before = state.reports.len();
        state.reports.retain(|r| r.id != id);
        if state.reports.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

impl ShortVideoRepository for InMemoryCmsRepository {
    async fn list_videos(&self) -> StoreResult<Vec<ShortVideo>> {
        Ok(self.lock()?.videos.iter().rev().cloned().collect())
    }

    async fn find_video(&self, id: i32) -> StoreResult<Option<ShortVideo>> {
        Ok(self.lock()?.videos.iter().find(|v| v.id == id).cloned())
    }

    async fn create_video(&self, video: NewShortVideo) -> StoreResult<ShortVideo> {
        let mut state = self.lock()?;
        let now = Utc::now();
        let video = ShortVideo {
            id: state.next_id(),
            video: video.video,
            video_public_id: video.video_public_id,
            title: video.title,
            created_at: now,
            updated_at: now,
        };
        state.videos.push(video.clone());
        Ok(video)
    }

    async fn update_video(&self, id: i32, changes: ShortVideoChanges) -> StoreResult<ShortVideo> {
        let mut state = self.lock()?;
        let video = state
            .videos
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(StoreError::NotFound)?;
        changes.apply_to(video);
        Ok(video.clone())
    }

    async fn delete_video(&self, id: i32) -> StoreResult<()> {
        let mut state = self.lock()?;
        let before = state.videos.len();
        state.videos.retain(|v| v.id != id);
        if state.videos.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

impl NewsletterRepository for InMemoryCmsRepository {
    async fn find_subscriber(&self, email: &Email) -> StoreResult<Option<Subscriber>> {
        Ok(self
            .lock()?
            .subscribers
            .iter()
            .find(|s| &s.email == email)
            .cloned())
    }

    async fn create_subscriber(&self, email: &Email) -> StoreResult<Subscriber> {
        let mut state = self.lock()?;
        if state.subscribers.iter().any(|s| &s.email == email) {
            return Err(StoreError::Conflict(
                "newsletter_subscribers_email_key".to_string(),
            ));
        }

        let now = Utc::now();
        let subscriber = Subscriber {
            id: state.next_id(),
            email: email.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.subscribers.push(subscriber.clone());
        Ok(subscriber)
    }

    async fn reactivate_subscriber(&self, id: i32) -> StoreResult<Subscriber> {
        let mut state = self.lock()?;
        let subscriber = state
            .subscribers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(StoreError::NotFound)?;
        subscriber.is_active = true;
        subscriber.updated_at = Utc::now();
        Ok(subscriber.clone())
    }

    async fn list_subscribers(&self, window: Option<Window>) -> StoreResult<Vec<Subscriber>> {
        let state = self.lock()?;
        let active = state.subscribers.iter().rev().filter(|s| s.is_active).cloned();
        Ok(windowed(active, window))
    }

    async fn count_subscribers(&self) -> StoreResult<i64> {
        Ok(self.lock()?.subscribers.iter().filter(|s| s.is_active).count() as i64)
    }
}
