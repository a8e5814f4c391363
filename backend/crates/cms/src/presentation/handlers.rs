//! HTTP Handlers

use std::sync::Arc;

use auth::{ADMINS, Authenticated, CONTENT_EDITORS, SessionResolver, authorize};
use axum::Json;
use axum::extract::{FromRef, Multipart, Path, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::backend::CmsBackend;
use crate::application::config::{CmsConfig, DonationInfo};
use crate::application::mailing::{BulkPolicy, MailingUseCase};
use crate::application::pagination::{Listing, PageQuery};
use crate::application::{
    AlbumInput, AlbumUseCase, NewsInput, NewsUseCase, NewsletterUseCase, ReportPdfInput,
    ReportPdfUseCase, ShortVideoInput, ShortVideoUseCase, Subscription, TeamMemberInput,
    TeamUseCase, UploadFile, UploadUseCase,
};
use crate::domain::entities::{ImageDraft, TeamMember, TeamMemberChanges};
use crate::error::{CmsError, CmsResult};
use crate::presentation::dto::{
    AlbumDetailView, AlbumRequest, AlbumSummaryView, AlbumView, BulkEmailRequest,
    BulkEmailResponse, DeleteUploadRequest, FailedRecipientView, ImageRequest, MessageResponse,
    NewsListItem, NewsListResponse, NewsRequest, NewsView, PhotoView, ReportPdfRequest,
    ReportPdfView, SendEmailRequest, SendEmailResponse, ShortVideoRequest, ShortVideoView,
    SubscribeRequest, SubscribeResponse, SubscriberListResponse, SubscriberPagination,
    SubscriberView, SuccessResponse, TeamListResponse, TeamMemberRequest, TeamMemberResponse,
    TeamMemberView, UploadResponse,
};

/// Shared state for CMS handlers
pub struct CmsAppState<B: CmsBackend> {
    pub repo: Arc<B::Repo>,
    pub blobs: Arc<B::Blobs>,
    pub mailer: Arc<B::Mailer>,
    pub files: Arc<B::Files>,
    pub config: Arc<CmsConfig>,
    pub bulk: BulkPolicy,
    pub resolver: SessionResolver,
}

// Manual impl: the backend marker type itself need not be Clone
impl<B: CmsBackend> Clone for CmsAppState<B> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            blobs: self.blobs.clone(),
            mailer: self.mailer.clone(),
            files: self.files.clone(),
            config: self.config.clone(),
            bulk: self.bulk,
            resolver: self.resolver.clone(),
        }
    }
}

impl<B: CmsBackend> FromRef<CmsAppState<B>> for SessionResolver {
    fn from_ref(state: &CmsAppState<B>) -> Self {
        state.resolver.clone()
    }
}

impl<B: CmsBackend> CmsAppState<B> {
    fn news(&self) -> NewsUseCase<B::Repo, B::Blobs> {
        NewsUseCase::new(self.repo.clone(), self.blobs.clone())
    }

    fn albums(&self) -> AlbumUseCase<B::Repo, B::Blobs> {
        AlbumUseCase::new(self.repo.clone(), self.blobs.clone())
    }

    fn team(&self) -> TeamUseCase<B::Repo, B::Blobs> {
        TeamUseCase::new(self.repo.clone(), self.blobs.clone())
    }

    fn reports(&self) -> ReportPdfUseCase<B::Repo, B::Files> {
        ReportPdfUseCase::new(self.repo.clone(), self.files.clone())
    }

    fn videos(&self) -> ShortVideoUseCase<B::Repo> {
        ShortVideoUseCase::new(self.repo.clone())
    }

    fn newsletter(&self) -> NewsletterUseCase<B::Repo> {
        NewsletterUseCase::new(self.repo.clone())
    }

    fn mailing(&self) -> MailingUseCase<B::Repo, B::Mailer> {
        MailingUseCase::new(self.repo.clone(), self.mailer.clone(), self.bulk)
    }

    fn uploads(&self) -> UploadUseCase<B::Blobs> {
        UploadUseCase::new(self.blobs.clone(), self.config.upload_folder.clone())
    }
}

// ============================================================================
// News
// ============================================================================

/// GET /api/news
pub async fn list_news<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(_): Authenticated,
    Query(query): Query<PageQuery>,
) -> CmsResult<Json<NewsListResponse>> {
    let listing = state
        .news()
        .list(query.resolve(state.config.news_page_size))
        .await?;

    let Listing {
        items,
        pagination,
        total_items,
    } = listing;
    let all = pagination.is_none();

    Ok(Json(NewsListResponse {
        news: items.iter().map(NewsListItem::from).collect(),
        pagination,
        total_items: all.then_some(total_items),
    }))
}

/// POST /api/news (admin|editor)
pub async fn create_news<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Json(req): Json<NewsRequest>,
) -> CmsResult<(StatusCode, Json<NewsView>)> {
    authorize(&principal, CONTENT_EDITORS)?;

    let news = state.news().create(news_input(req)).await?;
    Ok((StatusCode::CREATED, Json(NewsView::from(&news))))
}

/// GET /api/news/{id}
pub async fn get_news<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(_): Authenticated,
    Path(id): Path<String>,
) -> CmsResult<Json<NewsView>> {
    let news = state.news().get(parse_id(&id)?).await?;
    Ok(Json(NewsView::from(&news)))
}

/// GET /api/news/public/{id}
pub async fn get_public_news<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Path(id): Path<String>,
) -> CmsResult<Json<NewsView>> {
    let news = state.news().get(parse_id(&id)?).await?;
    Ok(Json(NewsView::from(&news)))
}

/// PUT /api/news/{id} (admin|editor)
pub async fn update_news<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(req): Json<NewsRequest>,
) -> CmsResult<Json<NewsView>> {
    authorize(&principal, CONTENT_EDITORS)?;

    let news = state.news().update(parse_id(&id)?, news_input(req)).await?;
    Ok(Json(NewsView::from(&news)))
}

/// DELETE /api/news/{id} (admin|editor)
pub async fn delete_news<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> CmsResult<Json<MessageResponse>> {
    authorize(&principal, CONTENT_EDITORS)?;

    state.news().delete(parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "News deleted successfully",
    }))
}

// ============================================================================
// Albums and photos
// ============================================================================

/// GET /api/albums
pub async fn list_albums<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
) -> CmsResult<Json<Vec<AlbumSummaryView>>> {
    let albums = state.albums().list().await?;
    Ok(Json(albums.iter().map(AlbumSummaryView::from).collect()))
}

/// POST /api/albums (admin|editor)
pub async fn create_album<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Json(req): Json<AlbumRequest>,
) -> CmsResult<(StatusCode, Json<AlbumView>)> {
    authorize(&principal, CONTENT_EDITORS)?;

    let album = state
        .albums()
        .create(
            AlbumInput {
                title: req.title,
                description: req.description,
                category: req.category,
            },
            principal.id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AlbumView::from(&album))))
}

/// GET /api/albums/{id}
pub async fn get_album<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Path(id): Path<String>,
) -> CmsResult<Json<AlbumDetailView>> {
    let (album, photos) = state.albums().get(parse_id(&id)?).await?;
    Ok(Json(AlbumDetailView {
        album: AlbumView::from(&album),
        photos: photos.iter().map(PhotoView::from).collect(),
    }))
}

/// POST /api/albums/{id}/photos (admin|editor)
pub async fn add_photo<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(req): Json<ImageRequest>,
) -> CmsResult<(StatusCode, Json<PhotoView>)> {
    authorize(&principal, CONTENT_EDITORS)?;

    let photo = state
        .albums()
        .add_photo(parse_id(&id)?, ImageDraft::from(req))
        .await?;
    Ok((StatusCode::CREATED, Json(PhotoView::from(&photo))))
}

/// DELETE /api/photos/{id} (admin|editor)
pub async fn delete_photo<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> CmsResult<Json<MessageResponse>> {
    authorize(&principal, CONTENT_EDITORS)?;

    state.albums().delete_photo(parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "Photo deleted successfully",
    }))
}

// ============================================================================
// Team
// ============================================================================

/// GET /api/team
pub async fn list_team<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(_): Authenticated,
    Query(query): Query<PageQuery>,
) -> CmsResult<Json<TeamListResponse>> {
    let Listing {
        items,
        pagination,
        total_items,
    } = state
        .team()
        .list(query.resolve(state.config.team_page_size))
        .await?;
    let all = pagination.is_none();

    Ok(Json(TeamListResponse {
        team: items.iter().map(TeamMemberView::from).collect(),
        pagination,
        total_items: all.then_some(total_items),
    }))
}

/// POST /api/team (admin|editor)
pub async fn create_team_member<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Json(req): Json<TeamMemberRequest>,
) -> CmsResult<(StatusCode, Json<TeamMemberView>)> {
    authorize(&principal, CONTENT_EDITORS)?;

    let member = state
        .team()
        .create(TeamMemberInput {
            name: req.name,
            role: req.role,
            description: req.description,
            image: req.image,
            image_public_id: req.image_public_id,
            is_founder: req.is_founder,
            display_order: req.display_order,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TeamMemberView::from(&member))))
}

/// GET /api/team/{id}
pub async fn get_team_member<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(_): Authenticated,
    Path(id): Path<String>,
) -> CmsResult<Json<TeamMemberResponse>> {
    let member = state.team().get(parse_id(&id)?).await?;
    Ok(Json(team_member_response(&member)))
}

/// PUT /api/team/{id} (admin|editor)
pub async fn update_team_member<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(req): Json<TeamMemberRequest>,
) -> CmsResult<Json<TeamMemberResponse>> {
    authorize(&principal, CONTENT_EDITORS)?;

    let changes = TeamMemberChanges {
        name: req.name,
        role: req.role,
        description: req.description,
        image: req.image,
        image_public_id: req.image_public_id,
        is_founder: req.is_founder,
        display_order: req.display_order,
        is_active: None,
    };
    let member = state.team().update(parse_id(&id)?, changes).await?;
    Ok(Json(team_member_response(&member)))
}

/// DELETE /api/team/{id} (admin|editor)
pub async fn delete_team_member<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> CmsResult<Json<SuccessResponse>> {
    authorize(&principal, CONTENT_EDITORS)?;

    state.team().delete(parse_id(&id)?).await?;
    Ok(Json(SuccessResponse {
        success: true,
        message: "Team member deleted successfully",
    }))
}

// ============================================================================
// Report PDFs
// ============================================================================

/// GET /api/report-pdfs
pub async fn list_reports<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
) -> CmsResult<Json<Vec<ReportPdfView>>> {
    let reports = state.reports().list().await?;
    Ok(Json(reports.iter().map(ReportPdfView::from).collect()))
}

/// POST /api/report-pdfs (admin|editor)
pub async fn create_report<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Json(req): Json<ReportPdfRequest>,
) -> CmsResult<(StatusCode, Json<ReportPdfView>)> {
    authorize(&principal, CONTENT_EDITORS)?;

    let report = state.reports().create(report_input(req)).await?;
    Ok((StatusCode::CREATED, Json(ReportPdfView::from(&report))))
}

/// GET /api/report-pdfs/{id}
pub async fn get_report<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Path(id): Path<String>,
) -> CmsResult<Json<ReportPdfView>> {
    let report = state.reports().get(parse_id(&id)?).await?;
    Ok(Json(ReportPdfView::from(&report)))
}

/// PUT /api/report-pdfs/{id} (admin|editor)
pub async fn update_report<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(req): Json<ReportPdfRequest>,
) -> CmsResult<Json<ReportPdfView>> {
    authorize(&principal, CONTENT_EDITORS)?;

    let report = state
        .reports()
        .update(parse_id(&id)?, report_input(req))
        .await?;
    Ok(Json(ReportPdfView::from(&report)))
}

/// DELETE /api/report-pdfs/{id} (admin|editor)
pub async fn delete_report<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> CmsResult<Json<MessageResponse>> {
    authorize(&principal, CONTENT_EDITORS)?;

    state.reports().delete(parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "Report PDF deleted successfully",
    }))
}

/// GET /api/report-pdfs/{id}/view
///
/// Streams the stored PDF inline under a file name derived from the title.
pub async fn view_report<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Path(id): Path<String>,
) -> CmsResult<Response> {
    let download = state.reports().download(parse_id(&id)?).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        header_value(&format!("inline; filename=\"{}\"", download.file_name))?,
    );
    if let Some(length) = download.file.content_length {
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    }
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    Ok((StatusCode::OK, headers, download.file.body).into_response())
}

// ============================================================================
// Short videos
// ============================================================================

/// GET /api/short-videos
pub async fn list_videos<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
) -> CmsResult<Json<Vec<ShortVideoView>>> {
    let videos = state.videos().list().await?;
    Ok(Json(videos.iter().map(ShortVideoView::from).collect()))
}

/// POST /api/short-videos (admin|editor)
pub async fn create_video<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Json(req): Json<ShortVideoRequest>,
) -> CmsResult<(StatusCode, Json<ShortVideoView>)> {
    authorize(&principal, CONTENT_EDITORS)?;

    let video = state.videos().create(video_input(req)).await?;
    Ok((StatusCode::CREATED, Json(ShortVideoView::from(&video))))
}

/// GET /api/short-videos/{id}
pub async fn get_video<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(_): Authenticated,
    Path(id): Path<String>,
) -> CmsResult<Json<ShortVideoView>> {
    let video = state.videos().get(parse_id(&id)?).await?;
    Ok(Json(ShortVideoView::from(&video)))
}

/// PUT /api/short-videos/{id} (admin|editor)
pub async fn update_video<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(req): Json<ShortVideoRequest>,
) -> CmsResult<Json<ShortVideoView>> {
    authorize(&principal, CONTENT_EDITORS)?;

    let video = state
        .videos()
        .update(parse_id(&id)?, video_input(req))
        .await?;
    Ok(Json(ShortVideoView::from(&video)))
}

/// DELETE /api/short-videos/{id} (admin)
pub async fn delete_video<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> CmsResult<Json<MessageResponse>> {
    authorize(&principal, ADMINS)?;

    state.videos().delete(parse_id(&id)?).await?;
    Ok(Json(MessageResponse {
        message: "Short video deleted successfully",
    }))
}

// ============================================================================
// Newsletter and mail
// ============================================================================

/// POST /api/newsletter
pub async fn subscribe<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Json(req): Json<SubscribeRequest>,
) -> CmsResult<(StatusCode, Json<SubscribeResponse>)> {
    let (subscriber, outcome) = state.newsletter().subscribe(&req.email).await?;

    let (status, message) = match outcome {
        Subscription::Created => (StatusCode::CREATED, "Successfully subscribed to newsletter"),
        Subscription::Reactivated => (StatusCode::OK, "Successfully resubscribed to newsletter"),
    };

    Ok((
        status,
        Json(SubscribeResponse {
            success: true,
            message,
            subscriber: SubscriberView::from(&subscriber),
        }),
    ))
}

/// GET /api/newsletter (admin|editor)
pub async fn list_subscribers<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Query(query): Query<PageQuery>,
) -> CmsResult<Json<SubscriberListResponse>> {
    authorize(&principal, CONTENT_EDITORS)?;

    let (page, limit) = query.resolve_paged(state.config.newsletter_page_size);
    let result = state.newsletter().list(page, limit).await?;

    Ok(Json(SubscriberListResponse {
        success: true,
        subscribers: result.subscribers.iter().map(SubscriberView::from).collect(),
        pagination: SubscriberPagination {
            current_page: result.page,
            total_pages: result.total_pages,
            total_count: result.total_count,
            has_next: result.page < result.total_pages,
            has_prev: result.page > 1,
        },
    }))
}

/// POST /api/send-email (admin)
pub async fn send_email<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Json(req): Json<SendEmailRequest>,
) -> CmsResult<Json<SendEmailResponse>> {
    authorize(&principal, ADMINS)?;

    let message_id = state
        .mailing()
        .send(&req.to, &req.subject, &req.html)
        .await?;
    Ok(Json(SendEmailResponse {
        success: true,
        message_id,
    }))
}

/// POST /api/send-email/bulk (admin)
pub async fn send_bulk_email<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Json(req): Json<BulkEmailRequest>,
) -> CmsResult<Json<BulkEmailResponse>> {
    authorize(&principal, ADMINS)?;

    let report = state.mailing().send_bulk(&req.subject, &req.html).await?;
    Ok(Json(BulkEmailResponse {
        success: report.failed.is_empty(),
        sent: report.sent,
        failed: report
            .failed
            .into_iter()
            .map(|f| FailedRecipientView {
                email: f.email,
                error: f.error,
            })
            .collect(),
    }))
}

// ============================================================================
// Uploads and donation info
// ============================================================================

/// POST /api/upload (admin|editor), multipart field `file`
pub async fn upload<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    mut multipart: Multipart,
) -> CmsResult<Json<UploadResponse>> {
    authorize(&principal, CONTENT_EDITORS)?;

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CmsError::validation(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_string();
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| CmsError::validation(e.body_text()))?;

        file = Some(UploadFile {
            bytes: bytes.to_vec(),
            content_type,
            file_name,
        });
        break;
    }

    let file = file
        .filter(|f| !f.bytes.is_empty())
        .ok_or_else(|| CmsError::validation("No file provided"))?;
    let output = state.uploads().upload(file).await?;

    Ok(Json(UploadResponse {
        success: true,
        image_url: output.blob.url,
        public_id: output.blob.public_id,
        file_type: output.kind.file_type(),
    }))
}

/// DELETE /api/upload (admin|editor)
pub async fn delete_upload<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
    Authenticated(principal): Authenticated,
    Json(req): Json<DeleteUploadRequest>,
) -> CmsResult<Json<SuccessResponse>> {
    authorize(&principal, CONTENT_EDITORS)?;

    state.uploads().delete(&req.public_id).await?;
    Ok(Json(SuccessResponse {
        success: true,
        message: "Image deleted",
    }))
}

/// GET /api/donation-info
pub async fn donation_info<B: CmsBackend>(
    State(state): State<CmsAppState<B>>,
) -> Json<DonationInfo> {
    Json(state.config.donation.clone())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_id(raw: &str) -> CmsResult<i32> {
    raw.parse().map_err(|_| CmsError::InvalidId)
}

fn header_value(value: &str) -> CmsResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| CmsError::Internal(format!("invalid header value: {e}")))
}

fn news_input(req: NewsRequest) -> NewsInput {
    NewsInput {
        title: req.title,
        text: req.text,
        date: req.date,
        category: req.category,
        excerpt: req.excerpt,
        images: req.images.into_iter().map(ImageDraft::from).collect(),
    }
}

fn report_input(req: ReportPdfRequest) -> ReportPdfInput {
    ReportPdfInput {
        title: req.title,
        cover_url: req.cover_url,
        pdf_url: req.pdf_url,
        description: req.description,
    }
}

fn video_input(req: ShortVideoRequest) -> ShortVideoInput {
    ShortVideoInput {
        video: req.video,
        video_public_id: req.video_public_id,
        title: req.title,
    }
}

fn team_member_response(member: &TeamMember) -> TeamMemberResponse {
    TeamMemberResponse {
        success: true,
        team_member: TeamMemberView::from(member),
    }
}
