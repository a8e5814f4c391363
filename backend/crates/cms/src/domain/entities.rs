//! Domain Entities
//!
//! Content records as stored, plus the drafts and change sets written by
//! the use cases.

use chrono::{DateTime, Utc};
use kernel::Email;

// ============================================================================
// News
// ============================================================================

#[derive(Debug, Clone)]
pub struct NewsImage {
    pub id: i32,
    pub news_id: i32,
    pub image_url: String,
    pub public_id: Option<String>,
    pub caption: Option<String>,
    pub display_order: i32,
}

/// News article with its images in display order
#[derive(Debug, Clone)]
pub struct News {
    pub id: i32,
    pub title: String,
    pub text: String,
    /// Free-form display date chosen by the editor
    pub date: String,
    pub category: String,
    pub excerpt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<NewsImage>,
}

impl News {
    pub fn cover(&self) -> Option<&NewsImage> {
        self.images.first()
    }

    /// Blob ids owned by this article
    pub fn blob_ids(&self) -> Vec<String> {
        self.images.iter().filter_map(|i| i.public_id.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ImageDraft {
    pub image_url: String,
    pub public_id: Option<String>,
    pub caption: Option<String>,
}

/// Full article content. Images get `display_order` from their position.
#[derive(Debug, Clone)]
pub struct NewsDraft {
    pub title: String,
    pub text: String,
    pub date: String,
    pub category: String,
    pub excerpt: String,
    pub images: Vec<ImageDraft>,
}

// ============================================================================
// Albums
// ============================================================================

#[derive(Debug, Clone)]
pub struct Album {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Album row for listings
#[derive(Debug, Clone)]
pub struct AlbumSummary {
    pub album: Album,
    pub cover_url: Option<String>,
    pub photo_count: i64,
}

#[derive(Debug, Clone)]
pub struct Photo {
    pub id: i32,
    pub album_id: i32,
    pub image_url: String,
    pub public_id: Option<String>,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAlbum {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_by: i32,
}

#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub album_id: i32,
    pub image: ImageDraft,
}

// ============================================================================
// Team
// ============================================================================

#[derive(Debug, Clone)]
pub struct TeamMember {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub description: String,
    pub image: String,
    pub image_public_id: Option<String>,
    pub is_founder: bool,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub name: String,
    pub role: String,
    pub description: String,
    pub image: String,
    pub image_public_id: Option<String>,
    pub is_founder: bool,
    pub display_order: i32,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct TeamMemberChanges {
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_public_id: Option<String>,
    pub is_founder: Option<bool>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl TeamMemberChanges {
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Self::default()
        }
    }

    pub fn apply_to(self, member: &mut TeamMember) {
        if let Some(name) = self.name {
            member.name = name;
        }
        if let Some(role) = self.role {
            member.role = role;
        }
        if let Some(description) = self.description {
            member.description = description;
        }
        if let Some(image) = self.image {
            member.image = image;
        }
        if let Some(public_id) = self.image_public_id {
            member.image_public_id = Some(public_id);
        }
        if let Some(is_founder) = self.is_founder {
            member.is_founder = is_founder;
        }
        if let Some(order) = self.display_order {
            member.display_order = order;
        }
        if let Some(active) = self.is_active {
            member.is_active = active;
        }
        member.updated_at = Utc::now();
    }
}

// ============================================================================
// Report PDFs
// ============================================================================

#[derive(Debug, Clone)]
pub struct ReportPdf {
    pub id: i32,
    pub title: String,
    pub cover_url: Option<String>,
    pub pdf_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated report fields: trimmed, blanks already turned into `None`.
#[derive(Debug, Clone)]
pub struct ReportPdfDraft {
    pub title: String,
    pub cover_url: Option<String>,
    pub pdf_url: String,
    pub description: Option<String>,
}

// ============================================================================
// Short videos
// ============================================================================

#[derive(Debug, Clone)]
pub struct ShortVideo {
    pub id: i32,
    pub video: String,
    pub video_public_id: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewShortVideo {
    pub video: String,
    pub video_public_id: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, Default)]
pub struct ShortVideoChanges {
    pub video: Option<String>,
    pub video_public_id: Option<String>,
    pub title: Option<String>,
}

impl ShortVideoChanges {
    pub fn apply_to(self, video: &mut ShortVideo) {
        if let Some(url) = self.video {
            video.video = url;
        }
        if let Some(public_id) = self.video_public_id {
            video.video_public_id = Some(public_id);
        }
        if let Some(title) = self.title {
            video.title = title;
        }
        video.updated_at = Utc::now();
    }
}

// ============================================================================
// Newsletter
// ============================================================================

#[derive(Debug, Clone)]
pub struct Subscriber {
    pub id: i32,
    pub email: Email,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
