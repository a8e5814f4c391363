//! CMS Router
//!
//! Paths are relative to `/api`.

use std::sync::Arc;

use auth::SessionResolver;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
};

use crate::application::backend::CmsBackend;
use crate::application::config::CmsConfig;
use crate::application::mailing::BulkPolicy;
use crate::infra::{CloudinaryBlobStore, HttpFileFetcher, PgCmsRepository, SmtpMailer};
use crate::presentation::handlers::{self, CmsAppState};

/// PostgreSQL, Cloudinary, SMTP and plain HTTPS for PDFs
pub struct ProductionBackend;

impl CmsBackend for ProductionBackend {
    type Repo = PgCmsRepository;
    type Blobs = CloudinaryBlobStore;
    type Mailer = SmtpMailer;
    type Files = HttpFileFetcher;
}

/// Adapter instances for one backend
pub struct CmsServices<B: CmsBackend> {
    pub repo: B::Repo,
    pub blobs: B::Blobs,
    pub mailer: B::Mailer,
    pub files: B::Files,
}

impl<B: CmsBackend> CmsAppState<B> {
    pub fn new(
        services: CmsServices<B>,
        config: CmsConfig,
        bulk: BulkPolicy,
        resolver: SessionResolver,
    ) -> Self {
        Self {
            repo: Arc::new(services.repo),
            blobs: Arc::new(services.blobs),
            mailer: Arc::new(services.mailer),
            files: Arc::new(services.files),
            config: Arc::new(config),
            bulk,
            resolver,
        }
    }
}

/// Create the CMS router with the production adapters
pub fn cms_router(
    services: CmsServices<ProductionBackend>,
    config: CmsConfig,
    bulk: BulkPolicy,
    resolver: SessionResolver,
) -> Router {
    cms_router_generic(services, config, bulk, resolver)
}

/// Create a CMS router for any backend
pub fn cms_router_generic<B: CmsBackend>(
    services: CmsServices<B>,
    config: CmsConfig,
    bulk: BulkPolicy,
    resolver: SessionResolver,
) -> Router {
    let upload_limit = config.max_upload_bytes;
    let state = CmsAppState::<B>::new(services, config, bulk, resolver);

    Router::new()
        // News
        .route(
            "/news",
            get(handlers::list_news::<B>).post(handlers::create_news::<B>),
        )
        .route("/news/public/{id}", get(handlers::get_public_news::<B>))
        .route(
            "/news/{id}",
            get(handlers::get_news::<B>)
                .put(handlers::update_news::<B>)
                .delete(handlers::delete_news::<B>),
        )
        // Albums and photos
        .route(
            "/albums",
            get(handlers::list_albums::<B>).post(handlers::create_album::<B>),
        )
        .route("/albums/{id}", get(handlers::get_album::<B>))
        .route("/albums/{id}/photos", post(handlers::add_photo::<B>))
        .route("/photos/{id}", delete(handlers::delete_photo::<B>))
        // Team
        .route(
            "/team",
            get(handlers::list_team::<B>).post(handlers::create_team_member::<B>),
        )
        .route(
            "/team/{id}",
            get(handlers::get_team_member::<B>)
                .put(handlers::update_team_member::<B>)
                .delete(handlers::delete_team_member::<B>),
        )
        // Report PDFs
        .route(
            "/report-pdfs",
            get(handlers::list_reports::<B>).post(handlers::create_report::<B>),
        )
        .route(
            "/report-pdfs/{id}",
            get(handlers::get_report::<B>)
                .put(handlers::update_report::<B>)
                .delete(handlers::delete_report::<B>),
        )
        .route("/report-pdfs/{id}/view", get(handlers::view_report::<B>))
        // Short videos
        .route(
            "/short-videos",
            get(handlers::list_videos::<B>).post(handlers::create_video::<B>),
        )
        .route(
            "/short-videos/{id}",
            get(handlers::get_video::<B>)
                .put(handlers::update_video::<B>)
                .delete(handlers::delete_video::<B>),
        )
        // Newsletter and mail
        .route(
            "/newsletter",
            get(handlers::list_subscribers::<B>).post(handlers::subscribe::<B>),
        )
        .route("/send-email", post(handlers::send_email::<B>))
        .route("/send-email/bulk", post(handlers::send_bulk_email::<B>))
        // Uploads and donation info
        .route(
            "/upload",
            post(handlers::upload::<B>)
                .delete(handlers::delete_upload::<B>)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/donation-info", get(handlers::donation_info::<B>))
        .with_state(state)
}
