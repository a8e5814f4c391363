//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::{Email, StoreError, StoreResult};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entities::{
    Album, AlbumSummary, ImageDraft, NewAlbum, NewPhoto, NewShortVideo, NewTeamMember, News,
    NewsDraft, NewsImage, Photo, ReportPdf, ReportPdfDraft, ShortVideo, ShortVideoChanges,
    Subscriber, TeamMember, TeamMemberChanges,
};
use crate::domain::repository::{
    AlbumRepository, NewsRepository, NewsletterRepository, ReportPdfRepository,
    ShortVideoRepository, TeamRepository, Window,
};

const NEWS_COLUMNS: &str = "id, title, text, date, category, excerpt, created_at, updated_at";
const IMAGE_COLUMNS: &str = "id, news_id, image_url, public_id, caption, display_order";
const ALBUM_COLUMNS: &str = "id, title, description, category, created_by, created_at, updated_at";
const PHOTO_COLUMNS: &str = "id, album_id, image_url, public_id, caption, created_at";
const TEAM_COLUMNS: &str = "id, name, role, description, image, image_public_id, is_founder, \
                            display_order, is_active, created_at, updated_at";
const REPORT_COLUMNS: &str = "id, title, cover_url, pdf_url, description, created_at, updated_at";
const VIDEO_COLUMNS: &str = "id, video, video_public_id, title, created_at, updated_at";
const SUBSCRIBER_COLUMNS: &str = "id, email, is_active, created_at, updated_at";

/// PostgreSQL-backed content store
#[derive(Clone)]
pub struct PgCmsRepository {
    pool: PgPool,
}

impl PgCmsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach images to articles, keeping the article order
    async fn with_images(&self, rows: Vec<NewsRow>) -> StoreResult<Vec<News>> {
        let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
        let images = sqlx::query_as::<_, NewsImageRow>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM news_images WHERE news_id = ANY($1) \
             ORDER BY display_order ASC, id ASC"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_news: HashMap<i32, Vec<NewsImage>> = HashMap::new();
        for image in images {
            let image = image.into_image();
            by_news.entry(image.news_id).or_default().push(image);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let images = by_news.remove(&row.id).unwrap_or_default();
                row.into_news(images)
            })
            .collect())
    }
}

async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    news_id: i32,
    images: Vec<ImageDraft>,
) -> StoreResult<Vec<NewsImage>> {
    let mut stored = Vec::with_capacity(images.len());
    for (order, image) in (0i32..).zip(images) {
        let row = sqlx::query_as::<_, NewsImageRow>(&format!(
            r#"
            INSERT INTO news_images (news_id, image_url, public_id, caption, display_order)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {IMAGE_COLUMNS}
            "#
        ))
        .bind(news_id)
        .bind(image.image_url)
        .bind(image.public_id)
        .bind(image.caption)
        .bind(order)
        .fetch_one(&mut **tx)
        .await?;
        stored.push(row.into_image());
    }
    Ok(stored)
}

fn limit_offset(window: Option<Window>) -> (Option<i64>, i64) {
    match window {
        Some(w) => (Some(w.limit), w.offset),
        None => (None, 0),
    }
}

// ============================================================================
// News
// ============================================================================

impl NewsRepository for PgCmsRepository {
    async fn list_news(&self, window: Option<Window>) -> StoreResult<Vec<News>> {
        let (limit, offset) = limit_offset(window);
        let rows = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        self.with_images(rows).await
    }

    async fn count_news(&self) -> StoreResult<i64> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(&self.pool)
            .await?)
    }

    async fn find_news(&self, id: i32) -> StoreResult<Option<News>> {
        let row = sqlx::query_as::<_, NewsRow>(&format!(
            "SELECT {NEWS_COLUMNS} FROM news WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_images(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn create_news(&self, draft: NewsDraft) -> StoreResult<News> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, NewsRow>(&format!(
            r#"
            INSERT INTO news (title, text, date, category, excerpt)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {NEWS_COLUMNS}
            "#
        ))
        .bind(draft.title)
        .bind(draft.text)
        .bind(draft.date)
        .bind(draft.category)
        .bind(draft.excerpt)
        .fetch_one(&mut *tx)
        .await?;

        let images = insert_images(&mut tx, row.id, draft.images).await?;
        tx.commit().await?;

        Ok(row.into_news(images))
    }

    async fn replace_news(&self, id: i32, draft: NewsDraft) -> StoreResult<News> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, NewsRow>(&format!(
            r#"
            UPDATE news SET
                title = $2,
                text = $3,
                date = $4,
                category = $5,
                excerpt = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {NEWS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(draft.title)
        .bind(draft.text)
        .bind(draft.date)
        .bind(draft.category)
        .bind(draft.excerpt)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound)?;

        sqlx::query("DELETE FROM news_images WHERE news_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let images = insert_images(&mut tx, id, draft.images).await?;
        tx.commit().await?;

        Ok(row.into_news(images))
    }

    async fn delete_news(&self, id: i32) -> StoreResult<()> {
        // news_images rows cascade
        let deleted = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Albums
// ============================================================================

impl AlbumRepository for PgCmsRepository {
    async fn list_albums(&self) -> StoreResult<Vec<AlbumSummary>> {
        let rows = sqlx::query_as::<_, AlbumSummaryRow>(
            r#"
            SELECT a.id, a.title, a.description, a.category, a.created_by,
                   a.created_at, a.updated_at,
                   (SELECT p.image_url FROM photos p WHERE p.album_id = a.id
                     ORDER BY p.created_at ASC, p.id ASC LIMIT 1) AS cover_url,
                   (SELECT COUNT(*) FROM photos p WHERE p.album_id = a.id) AS photo_count
            FROM albums a
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AlbumSummaryRow::into_summary).collect())
    }

    async fn find_album(&self, id: i32) -> StoreResult<Option<(Album, Vec<Photo>)>> {
        let Some(album) = sqlx::query_as::<_, AlbumRow>(&format!(
            "SELECT {ALBUM_COLUMNS} FROM albums WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let photos = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE album_id = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some((
            album.into_album(),
            photos.into_iter().map(PhotoRow::into_photo).collect(),
        )))
    }

    async fn create_album(&self, album: NewAlbum) -> StoreResult<Album> {
        let row = sqlx::query_as::<_, AlbumRow>(&format!(
            r#"
            INSERT INTO albums (title, description, category, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {ALBUM_COLUMNS}
            "#
        ))
        .bind(album.title)
        .bind(album.description)
        .bind(album.category)
        .bind(album.created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_album())
    }

    async fn add_photo(&self, photo: NewPhoto) -> StoreResult<Photo> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            INSERT INTO photos (album_id, image_url, public_id, caption)
            SELECT $1, $2, $3, $4
            WHERE EXISTS (SELECT 1 FROM albums WHERE id = $1)
            RETURNING {PHOTO_COLUMNS}
            "#
        ))
        .bind(photo.album_id)
        .bind(photo.image.image_url)
        .bind(photo.image.public_id)
        .bind(photo.image.caption)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row.into_photo())
    }

    async fn find_photo(&self, id: i32) -> StoreResult<Option<Photo>> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PhotoRow::into_photo))
    }

    async fn delete_photo(&self, id: i32) -> StoreResult<()> {
        let deleted = sqlx::query("DELETE FROM photos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Team
// ============================================================================

impl TeamRepository for PgCmsRepository {
    async fn list_team(&self, window: Option<Window>) -> StoreResult<Vec<TeamMember>> {
        let (limit, offset) = limit_offset(window);
        let rows = sqlx::query_as::<_, TeamMemberRow>(&format!(
            r#"
            SELECT {TEAM_COLUMNS} FROM team_members
            WHERE is_active
            ORDER BY is_founder DESC, display_order ASC, created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TeamMemberRow::into_member).collect())
    }

    async fn count_team(&self) -> StoreResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE is_active")
                .fetch_one(&self.pool)
                .await?,
        )
    }

    async fn find_team_member(&self, id: i32) -> StoreResult<Option<TeamMember>> {
        let row = sqlx::query_as::<_, TeamMemberRow>(&format!(
            "SELECT {TEAM_COLUMNS} FROM team_members WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TeamMemberRow::into_member))
    }

    async fn create_team_member(&self, member: NewTeamMember) -> StoreResult<TeamMember> {
        let row = sqlx::query_as::<_, TeamMemberRow>(&format!(
            r#"
            INSERT INTO team_members
                (name, role, description, image, image_public_id, is_founder, display_order)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(member.name)
        .bind(member.role)
        .bind(member.description)
        .bind(member.image)
        .bind(member.image_public_id)
        .bind(member.is_founder)
        .bind(member.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_member())
    }

    async fn update_team_member(
        &self,
        id: i32,
        changes: TeamMemberChanges,
    ) -> StoreResult<TeamMember> {
        let row = sqlx::query_as::<_, TeamMemberRow>(&format!(
            r#"
            UPDATE team_members SET
                name = COALESCE($2, name),
                role = COALESCE($3, role),
                description = COALESCE($4, description),
                image = COALESCE($5, image),
                image_public_id = COALESCE($6, image_public_id),
                is_founder = COALESCE($7, is_founder),
                display_order = COALESCE($8, display_order),
                is_active = COALESCE($9, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.name)
        .bind(changes.role)
        .bind(changes.description)
        .bind(changes.image)
        .bind(changes.image_public_id)
        .bind(changes.is_founder)
        .bind(changes.display_order)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row.into_member())
    }
}

// ============================================================================
// Report PDFs
// ============================================================================

impl ReportPdfRepository for PgCmsRepository {
    async fn list_reports(&self) -> StoreResult<Vec<ReportPdf>> {
        let rows = sqlx::query_as::<_, ReportPdfRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM report_pdfs ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ReportPdfRow::into_report).collect())
    }

    async fn find_report(&self, id: i32) -> StoreResult<Option<ReportPdf>> {
        let row = sqlx::query_as::<_, ReportPdfRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM report_pdfs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ReportPdfRow::into_report))
    }

    async fn create_report(&self, draft: ReportPdfDraft) -> StoreResult<ReportPdf> {
        let row = sqlx::query_as::<_, ReportPdfRow>(&format!(
            r#"
            INSERT INTO report_pdfs (title, cover_url, pdf_url, description)
            VALUES ($1, $2, $3, $4)
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(draft.title)
        .bind(draft.cover_url)
        .bind(draft.pdf_url)
        .bind(draft.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_report())
    }

    async fn update_report(&self, id: i32, draft: ReportPdfDraft) -> StoreResult<ReportPdf> {
        let row = sqlx::query_as::<_, ReportPdfRow>(&format!(
            r#"
            UPDATE report_pdfs SET
                title = $2,
                cover_url = $3,
                pdf_url = $4,
                description = $5,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {REPORT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(draft.title)
        .bind(draft.cover_url)
        .bind(draft.pdf_url)
        .bind(draft.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row.into_report())
    }

    async fn delete_report(&self, id: i32) -> StoreResult<()> {
        let deleted = sqlx::query("DELETE FROM report_pdfs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Short videos
// ============================================================================

impl ShortVideoRepository for PgCmsRepository {
    async fn list_videos(&self) -> StoreResult<Vec<ShortVideo>> {
        let rows = sqlx::query_as::<_, ShortVideoRow>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM short_videos ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ShortVideoRow::into_video).collect())
    }

    async fn find_video(&self, id: i32) -> StoreResult<Option<ShortVideo>> {
        let row = sqlx::query_as::<_, ShortVideoRow>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM short_videos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ShortVideoRow::into_video))
    }

    async fn create_video(&self, video: NewShortVideo) -> StoreResult<ShortVideo> {
        let row = sqlx::query_as::<_, ShortVideoRow>(&format!(
            r#"
            INSERT INTO short_videos (video, video_public_id, title)
            VALUES ($1, $2, $3)
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(video.video)
        .bind(video.video_public_id)
        .bind(video.title)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_video())
    }

    async fn update_video(&self, id: i32, changes: ShortVideoChanges) -> StoreResult<ShortVideo> {
        let row = sqlx::query_as::<_, ShortVideoRow>(&format!(
            r#"
            UPDATE short_videos SET
                video = COALESCE($2, video),
                video_public_id = COALESCE($3, video_public_id),
                title = COALESCE($4, title),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(changes.video)
        .bind(changes.video_public_id)
        .bind(changes.title)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row.into_video())
    }

    async fn delete_video(&self, id: i32) -> StoreResult<()> {
        let deleted = sqlx::query("DELETE FROM short_videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Newsletter
// ============================================================================

impl NewsletterRepository for PgCmsRepository {
    async fn find_subscriber(&self, email: &Email) -> StoreResult<Option<Subscriber>> {
        let row = sqlx::query_as::<_, SubscriberRow>(&format!(
            "SELECT {SUBSCRIBER_COLUMNS} FROM newsletter_subscribers WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SubscriberRow::into_subscriber))
    }

    async fn create_subscriber(&self, email: &Email) -> StoreResult<Subscriber> {
        let row = sqlx::query_as::<_, SubscriberRow>(&format!(
            "INSERT INTO newsletter_subscribers (email) VALUES ($1) RETURNING {SUBSCRIBER_COLUMNS}"
        ))
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_subscriber())
    }

    async fn reactivate_subscriber(&self, id: i32) -> StoreResult<Subscriber> {
        let row = sqlx::query_as::<_, SubscriberRow>(&format!(
            r#"
            UPDATE newsletter_subscribers SET is_active = TRUE, updated_at = NOW()
            WHERE id = $1
            RETURNING {SUBSCRIBER_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        Ok(row.into_subscriber())
    }

    async fn list_subscribers(&self, window: Option<Window>) -> StoreResult<Vec<Subscriber>> {
        let (limit, offset) = limit_offset(window);
        let rows = sqlx::query_as::<_, SubscriberRow>(&format!(
            r#"
            SELECT {SUBSCRIBER_COLUMNS} FROM newsletter_subscribers
            WHERE is_active
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(SubscriberRow::into_subscriber).collect())
    }

    async fn count_subscribers(&self) -> StoreResult<i64> {
        Ok(
            sqlx::query_scalar("SELECT COUNT(*) FROM newsletter_subscribers WHERE is_active")
                .fetch_one(&self.pool)
                .await?,
        )
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct NewsRow {
    id: i32,
    title: String,
    text: String,
    date: String,
    category: String,
    excerpt: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl NewsRow {
    fn into_news(self, images: Vec<NewsImage>) -> News {
        News {
            id: self.id,
            title: self.title,
            text: self.text,
            date: self.date,
            category: self.category,
            excerpt: self.excerpt,
            created_at: self.created_at,
            updated_at: self.updated_at,
            images,
        }
    }
}

#[derive(sqlx::FromRow)]
struct NewsImageRow {
    id: i32,
    news_id: i32,
    image_url: String,
    public_id: Option<String>,
    caption: Option<String>,
    display_order: i32,
}

impl NewsImageRow {
    fn into_image(self) -> NewsImage {
        NewsImage {
            id: self.id,
            news_id: self.news_id,
            image_url: self.image_url,
            public_id: self.public_id,
            caption: self.caption,
            display_order: self.display_order,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AlbumRow {
    id: i32,
    title: String,
    description: Option<String>,
    category: Option<String>,
    created_by: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AlbumRow {
    fn into_album(self) -> Album {
        Album {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AlbumSummaryRow {
    #[sqlx(flatten)]
    album: AlbumRow,
    cover_url: Option<String>,
    photo_count: i64,
}

impl AlbumSummaryRow {
    fn into_summary(self) -> AlbumSummary {
        AlbumSummary {
            album: self.album.into_album(),
            cover_url: self.cover_url,
            photo_count: self.photo_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PhotoRow {
    id: i32,
    album_id: i32,
    image_url: String,
    public_id: Option<String>,
    caption: Option<String>,
    created_at: DateTime<Utc>,
}

impl PhotoRow {
    fn into_photo(self) -> Photo {
        Photo {
            id: self.id,
            album_id: self.album_id,
            image_url: self.image_url,
            public_id: self.public_id,
            caption: self.caption,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct TeamMemberRow {
    id: i32,
    name: String,
    role: String,
    description: String,
    image: String,
    image_public_id: Option<String>,
    is_founder: bool,
    display_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TeamMemberRow {
    fn into_member(self) -> TeamMember {
        TeamMember {
            id: self.id,
            name: self.name,
            role: self.role,
            description: self.description,
            image: self.image,
            image_public_id: self.image_public_id,
            is_founder: self.is_founder,
            display_order: self.display_order,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ReportPdfRow {
    id: i32,
    title: String,
    cover_url: Option<String>,
    pdf_url: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReportPdfRow {
    fn into_report(self) -> ReportPdf {
        ReportPdf {
            id: self.id,
            title: self.title,
            cover_url: self.cover_url,
            pdf_url: self.pdf_url,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ShortVideoRow {
    id: i32,
    video: String,
    video_public_id: Option<String>,
    title: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ShortVideoRow {
    fn into_video(self) -> ShortVideo {
        ShortVideo {
            id: self.id,
            video: self.video,
            video_public_id: self.video_public_id,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    id: i32,
    email: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SubscriberRow {
    fn into_subscriber(self) -> Subscriber {
        Subscriber {
            id: self.id,
            email: Email::from_db(self.email),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
