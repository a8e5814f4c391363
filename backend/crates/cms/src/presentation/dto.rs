//! Data Transfer Objects
//!
//! Field names follow what the admin UI and public pages already read:
//! mostly camelCase, with `created_at`/`updated_at` kept snake_case on the
//! older resources and snake_case throughout report PDFs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::pagination::Pagination;
use crate::domain::entities::{
    Album, AlbumSummary, ImageDraft, News, NewsImage, Photo, ReportPdf, ShortVideo, Subscriber,
    TeamMember,
};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    #[serde(default)]
    pub image_url: String,
    pub public_id: Option<String>,
    pub caption: Option<String>,
}

impl From<ImageRequest> for ImageDraft {
    fn from(req: ImageRequest) -> Self {
        Self {
            image_url: req.image_url,
            public_id: req.public_id.filter(|p| !p.is_empty()),
            caption: req.caption,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsRequest {
    pub title: Option<String>,
    pub text: Option<String>,
    pub date: Option<String>,
    pub category: Option<String>,
    pub excerpt: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageRequest>,
}

#[derive(Debug, Deserialize)]
pub struct AlbumRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub image_public_id: Option<String>,
    pub is_founder: Option<bool>,
    pub display_order: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ReportPdfRequest {
    pub title: Option<String>,
    pub cover_url: Option<String>,
    pub pdf_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortVideoRequest {
    pub video: Option<String>,
    pub video_public_id: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct SendEmailRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkEmailRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub html: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUploadRequest {
    #[serde(default)]
    pub public_id: String,
}

// ============================================================================
// News
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsImageView {
    pub id: i32,
    pub news_id: i32,
    pub image_url: String,
    pub public_id: Option<String>,
    pub caption: Option<String>,
    pub display_order: i32,
}

impl From<&NewsImage> for NewsImageView {
    fn from(image: &NewsImage) -> Self {
        Self {
            id: image.id,
            news_id: image.news_id,
            image_url: image.image_url.clone(),
            public_id: image.public_id.clone(),
            caption: image.caption.clone(),
            display_order: image.display_order,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NewsView {
    pub id: i32,
    pub title: String,
    pub text: String,
    pub date: String,
    pub category: String,
    pub excerpt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "newsImages")]
    pub news_images: Vec<NewsImageView>,
}

impl From<&News> for NewsView {
    fn from(news: &News) -> Self {
        Self {
            id: news.id,
            title: news.title.clone(),
            text: news.text.clone(),
            date: news.date.clone(),
            category: news.category.clone(),
            excerpt: news.excerpt.clone(),
            created_at: news.created_at,
            updated_at: news.updated_at,
            news_images: news.images.iter().map(NewsImageView::from).collect(),
        }
    }
}

/// Listing row: the article plus its cover as `image`/`imagePublicId`
#[derive(Debug, Serialize)]
pub struct NewsListItem {
    #[serde(flatten)]
    pub news: NewsView,
    pub image: Option<String>,
    #[serde(rename = "imagePublicId")]
    pub image_public_id: Option<String>,
}

impl From<&News> for NewsListItem {
    fn from(news: &News) -> Self {
        let cover = news.cover();
        Self {
            news: NewsView::from(news),
            image: cover.map(|i| i.image_url.clone()),
            image_public_id: cover.and_then(|i| i.public_id.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsListResponse {
    pub news: Vec<NewsListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<i64>,
}

// ============================================================================
// Albums
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumView {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Album> for AlbumView {
    fn from(album: &Album) -> Self {
        Self {
            id: album.id,
            title: album.title.clone(),
            description: album.description.clone(),
            category: album.category.clone(),
            created_by: album.created_by,
            created_at: album.created_at,
            updated_at: album.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverView {
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct PhotoCount {
    pub photos: i64,
}

#[derive(Debug, Serialize)]
pub struct AlbumSummaryView {
    #[serde(flatten)]
    pub album: AlbumView,
    /// Zero or one cover photo
    pub photos: Vec<CoverView>,
    #[serde(rename = "_count")]
    pub count: PhotoCount,
}

impl From<&AlbumSummary> for AlbumSummaryView {
    fn from(summary: &AlbumSummary) -> Self {
        Self {
            album: AlbumView::from(&summary.album),
            photos: summary
                .cover_url
                .iter()
                .map(|url| CoverView {
                    image_url: url.clone(),
                })
                .collect(),
            count: PhotoCount {
                photos: summary.photo_count,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoView {
    pub id: i32,
    pub album_id: i32,
    pub image_url: String,
    pub public_id: Option<String>,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Photo> for PhotoView {
    fn from(photo: &Photo) -> Self {
        Self {
            id: photo.id,
            album_id: photo.album_id,
            image_url: photo.image_url.clone(),
            public_id: photo.public_id.clone(),
            caption: photo.caption.clone(),
            created_at: photo.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AlbumDetailView {
    #[serde(flatten)]
    pub album: AlbumView,
    pub photos: Vec<PhotoView>,
}

// ============================================================================
// Team
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberView {
    pub id: i32,
    pub name: String,
    pub role: String,
    pub description: String,
    pub image: String,
    pub image_public_id: Option<String>,
    pub is_founder: bool,
    pub display_order: i32,
    pub is_active: bool,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl From<&TeamMember> for TeamMemberView {
    fn from(member: &TeamMember) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            role: member.role.clone(),
            description: member.description.clone(),
            image: member.image.clone(),
            image_public_id: member.image_public_id.clone(),
            is_founder: member.is_founder,
            display_order: member.display_order,
            is_active: member.is_active,
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamListResponse {
    pub team: Vec<TeamMemberView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_items: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberResponse {
    pub success: bool,
    pub team_member: TeamMemberView,
}

// ============================================================================
// Report PDFs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ReportPdfView {
    pub id: i32,
    pub title: String,
    pub cover_url: Option<String>,
    pub pdf_url: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&ReportPdf> for ReportPdfView {
    fn from(report: &ReportPdf) -> Self {
        Self {
            id: report.id,
            title: report.title.clone(),
            cover_url: report.cover_url.clone(),
            pdf_url: report.pdf_url.clone(),
            description: report.description.clone(),
            created_at: report.created_at,
            updated_at: report.updated_at,
        }
    }
}

// ============================================================================
// Short videos
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortVideoView {
    pub id: i32,
    pub video: String,
    pub video_public_id: Option<String>,
    pub title: String,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl From<&ShortVideo> for ShortVideoView {
    fn from(video: &ShortVideo) -> Self {
        Self {
            id: video.id,
            video: video.video.clone(),
            video_public_id: video.video_public_id.clone(),
            title: video.title.clone(),
            created_at: video.created_at,
            updated_at: video.updated_at,
        }
    }
}

// ============================================================================
// Newsletter and mail
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberView {
    pub id: i32,
    pub email: String,
    pub is_active: bool,
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Subscriber> for SubscriberView {
    fn from(subscriber: &Subscriber) -> Self {
        Self {
            id: subscriber.id,
            email: subscriber.email.as_str().to_string(),
            is_active: subscriber.is_active,
            created_at: subscriber.created_at,
            updated_at: subscriber.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: &'static str,
    pub subscriber: SubscriberView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberPagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

#[derive(Debug, Serialize)]
pub struct SubscriberListResponse {
    pub success: bool,
    pub subscribers: Vec<SubscriberView>,
    pub pagination: SubscriberPagination,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub message_id: String,
}

#[derive(Debug, Serialize)]
pub struct FailedRecipientView {
    pub email: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct BulkEmailResponse {
    pub success: bool,
    pub sent: usize,
    pub failed: Vec<FailedRecipientView>,
}

// ============================================================================
// Uploads and generic replies
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub image_url: String,
    pub public_id: String,
    pub file_type: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: &'static str,
}
