//! Router tests for the CMS crate

#[cfg(test)]
mod support {
    use std::time::Duration;

    use auth::{AuthConfig, Principal, SessionResolver, TokenCodec, UserRole};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::application::backend::CmsBackend;
    use crate::application::config::CmsConfig;
    use crate::application::mailing::BulkPolicy;
    use crate::infra::{InMemoryBlobStore, InMemoryCmsRepository, RecordingMailer, StaticFileFetcher};
    use crate::presentation::router::{CmsServices, cms_router_generic};

    pub struct TestBackend;

    impl CmsBackend for TestBackend {
        type Repo = InMemoryCmsRepository;
        type Blobs = InMemoryBlobStore;
        type Mailer = RecordingMailer;
        type Files = StaticFileFetcher;
    }

    /// Router plus handles on the in-memory adapters behind it
    pub struct Harness {
        pub app: Router,
        pub repo: InMemoryCmsRepository,
        pub blobs: InMemoryBlobStore,
        pub mailer: RecordingMailer,
        pub files: StaticFileFetcher,
        auth: AuthConfig,
    }

    impl Harness {
        pub fn new() -> Self {
            let auth = AuthConfig::with_random_secret();
            let repo = InMemoryCmsRepository::new();
            let blobs = InMemoryBlobStore::new();
            let mailer = RecordingMailer::new();
            let files = StaticFileFetcher::new();

            let services = CmsServices::<TestBackend> {
                repo: repo.clone(),
                blobs: blobs.clone(),
                mailer: mailer.clone(),
                files: files.clone(),
            };
            let bulk = BulkPolicy {
                concurrency: 2,
                retries: 1,
                backoff: Duration::from_millis(1),
            };
            let router = cms_router_generic::<TestBackend>(
                services,
                CmsConfig::development(),
                bulk,
                SessionResolver::from_config(&auth),
            );

            Self {
                app: Router::new().nest("/api", router),
                repo,
                blobs,
                mailer,
                files,
                auth,
            }
        }

        pub fn bearer(&self, role: UserRole) -> String {
            let token = TokenCodec::new(&self.auth)
                .issue(&Principal::new(7, role))
                .unwrap();
            format!("Bearer {token}")
        }

        pub fn admin(&self) -> String {
            self.bearer(UserRole::Admin)
        }

        pub fn editor(&self) -> String {
            self.bearer(UserRole::Editor)
        }

        pub async fn send(&self, req: Request<Body>) -> Response<Body> {
            self.app.clone().oneshot(req).await.unwrap()
        }
    }

    pub fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::empty()).unwrap()
    }

    pub fn delete(uri: &str, auth: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, auth)
            .body(Body::empty())
            .unwrap()
    }

    pub fn json_request(
        method: &str,
        uri: &str,
        auth: Option<&str>,
        body: serde_json::Value,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    pub const BOUNDARY: &str = "cms-test-boundary";

    pub fn multipart_file(
        auth: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(header::AUTHORIZATION, auth)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    pub async fn body_json(res: Response<Body>) -> serde_json::Value {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    pub async fn body_bytes(res: Response<Body>) -> Vec<u8> {
        res.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    pub fn article(title: &str, images: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "title": title,
            "text": "Body text",
            "date": "2025-03-01",
            "category": "Events",
            "excerpt": "Short summary",
            "images": images,
        })
    }
}

#[cfg(test)]
mod news_router_tests {
    use super::support::*;
    use auth::UserRole;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_editor_creates_news_with_ordered_images() {
        let h = Harness::new();

        let res = h
            .send(json_request(
                "POST",
                "/api/news",
                Some(&h.editor()),
                article(
                    "Clinic opening",
                    json!([
                        { "imageUrl": "https://img.test/a.jpg", "publicId": "nho-news/a" },
                        { "imageUrl": "https://img.test/b.jpg", "caption": "Ribbon" }
                    ]),
                ),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body = body_json(res).await;
        assert_eq!(body["title"], "Clinic opening");
        assert!(body.get("created_at").is_some());
        let images = body["newsImages"].as_array().unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0]["displayOrder"], 0);
        assert_eq!(images[0]["publicId"], "nho-news/a");
        assert_eq!(images[1]["displayOrder"], 1);
        assert_eq!(images[1]["caption"], "Ribbon");
    }

    #[tokio::test]
    async fn test_news_writes_require_a_content_role() {
        let h = Harness::new();

        let res = h
            .send(json_request("POST", "/api/news", None, article("x", json!([]))))
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(res).await["error"], "Unauthorized");

        let viewer = h.bearer(UserRole::from_code("viewer"));
        let res = h
            .send(json_request("POST", "/api/news", Some(&viewer), article("x", json!([]))))
            .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(res).await["error"],
            "Forbidden: requires one of admin, editor"
        );
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let h = Harness::new();

        let res = h
            .send(json_request(
                "POST",
                "/api/news",
                Some(&h.admin()),
                json!({ "title": "Only a title" }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_list_paginates_newest_first() {
        let h = Harness::new();
        for n in 1..=3 {
            let res = h
                .send(json_request(
                    "POST",
                    "/api/news",
                    Some(&h.editor()),
                    article(&format!("Story {n}"), json!([])),
                ))
                .await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }

        let res = h
            .send(get("/api/news?page=2&limit=2", Some(&h.editor())))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        let news = body["news"].as_array().unwrap();
        assert_eq!(news.len(), 1);
        assert_eq!(news[0]["title"], "Story 1");
        assert_eq!(body["pagination"]["currentPage"], 2);
        assert_eq!(body["pagination"]["totalPages"], 2);
        assert_eq!(body["pagination"]["totalItems"], 3);
        assert_eq!(body["pagination"]["hasNext"], false);
        assert_eq!(body["pagination"]["hasPrev"], true);
        assert!(body.get("totalItems").is_none());

        let res = h.send(get("/api/news?all=true", Some(&h.editor()))).await;
        let body = body_json(res).await;
        assert_eq!(body["news"].as_array().unwrap().len(), 3);
        assert_eq!(body["news"][0]["title"], "Story 3");
        assert_eq!(body["totalItems"], 3);
        assert!(body.get("pagination").is_none());
    }

    #[tokio::test]
    async fn test_list_with_maximum_limit_is_single_page() {
        let h = Harness::new();
        for n in 1..=2 {
            h.send(json_request(
                "POST",
                "/api/news",
                Some(&h.editor()),
                article(&format!("Story {n}"), json!([])),
            ))
            .await;
        }

        let res = h
            .send(get("/api/news?limit=9223372036854775807", Some(&h.editor())))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["news"].as_array().unwrap().len(), 2);
        assert_eq!(body["pagination"]["totalPages"], 1);
        assert_eq!(body["pagination"]["itemsPerPage"], i64::MAX);
        assert_eq!(body["pagination"]["hasNext"], false);

        let res = h
            .send(get("/api/news?page=2&limit=9223372036854775807", Some(&h.editor())))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert!(body["news"].as_array().unwrap().is_empty());
        assert_eq!(body["pagination"]["hasPrev"], true);
    }

    #[tokio::test]
    async fn test_listing_exposes_cover_image() {
        let h = Harness::new();
        h.send(json_request(
            "POST",
            "/api/news",
            Some(&h.editor()),
            article(
                "With cover",
                json!([{ "imageUrl": "https://img.test/cover.jpg", "publicId": "nho-news/cover" }]),
            ),
        ))
        .await;

        let res = h.send(get("/api/news", Some(&h.editor()))).await;
        let body = body_json(res).await;
        assert_eq!(body["news"][0]["image"], "https://img.test/cover.jpg");
        assert_eq!(body["news"][0]["imagePublicId"], "nho-news/cover");
    }

    #[tokio::test]
    async fn test_update_destroys_only_stale_blobs() {
        let h = Harness::new();
        let res = h
            .send(json_request(
                "POST",
                "/api/news",
                Some(&h.editor()),
                article(
                    "Gallery",
                    json!([
                        { "imageUrl": "https://img.test/a.jpg", "publicId": "nho-news/a" },
                        { "imageUrl": "https://img.test/b.jpg", "publicId": "nho-news/b" }
                    ]),
                ),
            ))
            .await;
        let id = body_json(res).await["id"].as_i64().unwrap();

        let res = h
            .send(json_request(
                "PUT",
                &format!("/api/news/{id}"),
                Some(&h.editor()),
                article(
                    "Gallery",
                    json!([
                        { "imageUrl": "https://img.test/b.jpg", "publicId": "nho-news/b" },
                        { "imageUrl": "https://img.test/c.jpg", "publicId": "nho-news/c" }
                    ]),
                ),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["newsImages"][0]["publicId"], "nho-news/b");
        assert_eq!(body["newsImages"][0]["displayOrder"], 0);
        assert_eq!(h.blobs.destroyed(), vec!["nho-news/a".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_removes_blobs_and_article() {
        let h = Harness::new();
        let res = h
            .send(json_request(
                "POST",
                "/api/news",
                Some(&h.editor()),
                article(
                    "Short lived",
                    json!([{ "imageUrl": "https://img.test/a.jpg", "publicId": "nho-news/a" }]),
                ),
            ))
            .await;
        let id = body_json(res).await["id"].as_i64().unwrap();

        let res = h.send(delete(&format!("/api/news/{id}"), &h.editor())).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["message"], "News deleted successfully");
        assert_eq!(h.blobs.destroyed(), vec!["nho-news/a".to_string()]);

        let res = h.send(get(&format!("/api/news/public/{id}"), None)).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["error"], "News not found");
    }

    #[tokio::test]
    async fn test_public_article_needs_no_session() {
        let h = Harness::new();
        let res = h
            .send(json_request(
                "POST",
                "/api/news",
                Some(&h.editor()),
                article("Open to all", json!([])),
            ))
            .await;
        let id = body_json(res).await["id"].as_i64().unwrap();

        let res = h.send(get(&format!("/api/news/public/{id}"), None)).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["title"], "Open to all");

        let res = h.send(get(&format!("/api/news/{id}"), None)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

#[cfg(test)]
mod album_router_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    async fn create_album(h: &Harness, title: &str) -> i64 {
        let res = h
            .send(json_request(
                "POST",
                "/api/albums",
                Some(&h.editor()),
                json!({ "title": title, "description": "Field trip" }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        body_json(res).await["id"].as_i64().unwrap()
    }

    async fn add_photo(h: &Harness, album: i64, url: &str, public_id: &str) -> i64 {
        let res = h
            .send(json_request(
                "POST",
                &format!("/api/albums/{album}/photos"),
                Some(&h.editor()),
                json!({ "imageUrl": url, "publicId": public_id }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        body_json(res).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_album_title_rejected() {
        let h = Harness::new();
        create_album(&h, "Summer camp").await;

        let res = h
            .send(json_request(
                "POST",
                "/api/albums",
                Some(&h.editor()),
                json!({ "title": "Summer camp" }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await["error"],
            "Album with this title already exists"
        );
    }

    #[tokio::test]
    async fn test_album_listing_counts_photos_and_picks_cover() {
        let h = Harness::new();
        let album = create_album(&h, "Harvest").await;
        add_photo(&h, album, "https://img.test/first.jpg", "albums/first").await;
        add_photo(&h, album, "https://img.test/second.jpg", "albums/second").await;

        let res = h.send(get("/api/albums", None)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body[0]["title"], "Harvest");
        assert_eq!(body[0]["createdBy"], 7);
        assert_eq!(body[0]["_count"]["photos"], 2);
        assert_eq!(body[0]["photos"][0]["imageUrl"], "https://img.test/first.jpg");

        let res = h.send(get(&format!("/api/albums/{album}"), None)).await;
        let body = body_json(res).await;
        assert_eq!(body["photos"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_photo_for_missing_album_is_not_found() {
        let h = Harness::new();

        let res = h
            .send(json_request(
                "POST",
                "/api/albums/999/photos",
                Some(&h.editor()),
                json!({ "imageUrl": "https://img.test/x.jpg" }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["error"], "Album not found");
    }

    #[tokio::test]
    async fn test_photo_delete_checks_id_and_existence() {
        let h = Harness::new();

        let res = h.send(delete("/api/photos/abc", &h.editor())).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"], "Invalid id");

        let res = h.send(delete("/api/photos/404", &h.editor())).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["error"], "Photo not found");
    }

    #[tokio::test]
    async fn test_photo_kept_when_blob_delete_fails() {
        let h = Harness::new();
        let album = create_album(&h, "Stubborn").await;
        let photo = add_photo(&h, album, "https://img.test/p.jpg", "albums/p").await;
        h.blobs.fail_destroy("albums/p");

        let res = h
            .send(delete(&format!("/api/photos/{photo}"), &h.editor()))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_GATEWAY);

        let res = h.send(get(&format!("/api/albums/{album}"), None)).await;
        assert_eq!(body_json(res).await["photos"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_photo_delete_destroys_blob() {
        let h = Harness::new();
        let album = create_album(&h, "Tidy").await;
        let photo = add_photo(&h, album, "https://img.test/p.jpg", "albums/p").await;

        let res = h
            .send(delete(&format!("/api/photos/{photo}"), &h.editor()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["message"], "Photo deleted successfully");
        assert_eq!(h.blobs.destroyed(), vec!["albums/p".to_string()]);
    }
}

#[cfg(test)]
mod team_router_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    async fn create_member(h: &Harness, name: &str, founder: bool, order: i32) -> i64 {
        let res = h
            .send(json_request(
                "POST",
                "/api/team",
                Some(&h.editor()),
                json!({
                    "name": name,
                    "role": "Coordinator",
                    "description": "Runs programs",
                    "image": format!("https://img.test/{name}.jpg"),
                    "imagePublicId": format!("team/{name}"),
                    "isFounder": founder,
                    "displayOrder": order,
                }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        body_json(res).await["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_founders_listed_first_then_display_order() {
        let h = Harness::new();
        create_member(&h, "staff", false, 0).await;
        create_member(&h, "second", true, 2).await;
        create_member(&h, "first", true, 1).await;

        let res = h.send(get("/api/team?all=true", Some(&h.editor()))).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        let names: Vec<&str> = body["team"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["first", "second", "staff"]);
        assert_eq!(body["totalItems"], 3);
    }

    #[tokio::test]
    async fn test_create_requires_core_fields() {
        let h = Harness::new();

        let res = h
            .send(json_request(
                "POST",
                "/api/team",
                Some(&h.editor()),
                json!({ "name": "No image", "role": "Volunteer", "description": "Helps" }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await["error"],
            "Name, role, description, and image are required"
        );
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let h = Harness::new();
        let id = create_member(&h, "ana", false, 3).await;

        let res = h
            .send(json_request(
                "PUT",
                &format!("/api/team/{id}"),
                Some(&h.editor()),
                json!({ "role": "Director" }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["teamMember"]["role"], "Director");
        assert_eq!(body["teamMember"]["name"], "ana");
        assert_eq!(body["teamMember"]["displayOrder"], 3);
    }

    #[tokio::test]
    async fn test_delete_deactivates_and_removes_portrait() {
        let h = Harness::new();
        let id = create_member(&h, "leaving", false, 0).await;

        let res = h.send(delete(&format!("/api/team/{id}"), &h.editor())).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Team member deleted successfully");
        assert_eq!(h.blobs.destroyed(), vec!["team/leaving".to_string()]);

        let res = h.send(get("/api/team", Some(&h.editor()))).await;
        let body = body_json(res).await;
        assert!(body["team"].as_array().unwrap().is_empty());
        assert_eq!(body["pagination"]["totalItems"], 0);

        let res = h
            .send(get(&format!("/api/team/{id}"), Some(&h.editor())))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["teamMember"]["isActive"], false);
    }
}

#[cfg(test)]
mod report_router_tests {
    use super::support::*;
    use axum::http::{StatusCode, header};
    use serde_json::json;

    const PDF_URL: &str = "https://files.test/annual-2024.pdf";

    async fn create_report(h: &Harness, title: &str, pdf_url: &str) -> i64 {
        let res = h
            .send(json_request(
                "POST",
                "/api/report-pdfs",
                Some(&h.editor()),
                json!({ "title": title, "pdf_url": pdf_url, "cover_url": "  " }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = body_json(res).await;
        assert!(body["cover_url"].is_null());
        body["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_view_streams_pdf_inline() {
        let h = Harness::new();
        h.files.serve(PDF_URL, b"%PDF-1.7 test".to_vec());
        let id = create_report(&h, "Annual Report 2024", PDF_URL).await;

        let res = h
            .send(get(&format!("/api/report-pdfs/{id}/view"), None))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let headers = res.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "inline; filename=\"annual-report-2024.pdf\""
        );
        assert_eq!(headers[header::CONTENT_LENGTH], "13");
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "public, max-age=31536000, immutable"
        );
        assert_eq!(body_bytes(res).await, b"%PDF-1.7 test".to_vec());
    }

    #[tokio::test]
    async fn test_view_passes_upstream_error_status() {
        let h = Harness::new();
        h.files.fail(PDF_URL, 404);
        let id = create_report(&h, "Gone", PDF_URL).await;

        let res = h
            .send(get(&format!("/api/report-pdfs/{id}/view"), None))
            .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["error"], "Failed to fetch PDF file");
    }

    #[tokio::test]
    async fn test_duplicate_report_title_rejected() {
        let h = Harness::new();
        create_report(&h, "Audit", PDF_URL).await;

        let res = h
            .send(json_request(
                "POST",
                "/api/report-pdfs",
                Some(&h.editor()),
                json!({ "title": "Audit", "pdf_url": PDF_URL }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await["error"],
            "Report PDF with this title already exists"
        );
    }

    #[tokio::test]
    async fn test_missing_report_is_not_found() {
        let h = Harness::new();

        let res = h.send(get("/api/report-pdfs/12", None)).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(res).await["error"], "Report PDF not found");
    }
}

#[cfg(test)]
mod short_video_router_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_only_admins_delete_videos() {
        let h = Harness::new();
        let res = h
            .send(json_request(
                "POST",
                "/api/short-videos",
                Some(&h.editor()),
                json!({ "video": "https://vid.test/a.mp4", "title": "Teaser" }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let id = body_json(res).await["id"].as_i64().unwrap();

        let res = h
            .send(delete(&format!("/api/short-videos/{id}"), &h.editor()))
            .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(res).await["error"],
            "Forbidden: requires one of admin"
        );

        let res = h
            .send(delete(&format!("/api/short-videos/{id}"), &h.admin()))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            body_json(res).await["message"],
            "Short video deleted successfully"
        );

        let res = h.send(get("/api/short-videos", None)).await;
        assert!(body_json(res).await.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_video_requires_url_and_title() {
        let h = Harness::new();

        let res = h
            .send(json_request(
                "POST",
                "/api/short-videos",
                Some(&h.editor()),
                json!({ "title": "No video" }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"], "Video URL is required");
    }
}

#[cfg(test)]
mod newsletter_router_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use kernel::Email;
    use serde_json::json;

    fn subscribe(email: &str) -> axum::http::Request<axum::body::Body> {
        json_request("POST", "/api/newsletter", None, json!({ "email": email }))
    }

    #[tokio::test]
    async fn test_subscribe_normalizes_and_rejects_duplicates() {
        let h = Harness::new();

        let res = h.send(subscribe("  Donor@Example.org ")).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body = body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Successfully subscribed to newsletter");
        assert_eq!(body["subscriber"]["email"], "donor@example.org");
        assert_eq!(body["subscriber"]["isActive"], true);

        let res = h.send(subscribe("donor@example.org")).await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_subscribe_rejects_invalid_address() {
        let h = Harness::new();

        let res = h.send(subscribe("not-an-address")).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await["error"],
            "Valid email address is required"
        );
    }

    #[tokio::test]
    async fn test_inactive_subscriber_is_reactivated() {
        let h = Harness::new();
        h.send(subscribe("back@example.org")).await;
        h.repo
            .deactivate_subscriber(&Email::new("back@example.org").unwrap())
            .unwrap();

        let res = h.send(subscribe("back@example.org")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["message"], "Successfully resubscribed to newsletter");
        assert_eq!(body["subscriber"]["isActive"], true);
    }

    #[tokio::test]
    async fn test_subscriber_listing_is_for_editors() {
        let h = Harness::new();
        for n in 0..3 {
            h.send(subscribe(&format!("reader{n}@example.org"))).await;
        }

        let res = h.send(get("/api/newsletter", None)).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let res = h
            .send(get("/api/newsletter?page=1&limit=2", Some(&h.editor())))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["subscribers"].as_array().unwrap().len(), 2);
        assert_eq!(body["subscribers"][0]["email"], "reader2@example.org");
        assert_eq!(body["pagination"]["totalCount"], 3);
        assert_eq!(body["pagination"]["totalPages"], 2);
        assert_eq!(body["pagination"]["hasNext"], true);
        assert_eq!(body["pagination"]["hasPrev"], false);

        let res = h
            .send(get("/api/newsletter?limit=9223372036854775807", Some(&h.editor())))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["subscribers"].as_array().unwrap().len(), 3);
        assert_eq!(body["pagination"]["totalPages"], 1);
        assert_eq!(body["pagination"]["hasNext"], false);
    }
}

#[cfg(test)]
mod mail_router_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_email_requires_admin_and_fields() {
        let h = Harness::new();
        let mail = json!({ "to": "board@example.org", "subject": "Minutes", "html": "<p>Hi</p>" });

        let res = h
            .send(json_request("POST", "/api/send-email", Some(&h.editor()), mail.clone()))
            .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        let res = h
            .send(json_request(
                "POST",
                "/api/send-email",
                Some(&h.admin()),
                json!({ "to": "board@example.org" }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await["error"],
            "Missing required fields: to, subject, html"
        );

        let res = h
            .send(json_request("POST", "/api/send-email", Some(&h.admin()), mail))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["messageId"], "<1@recording.test>");
        assert_eq!(h.mailer.sent()[0].to, "board@example.org");
    }

    #[tokio::test]
    async fn test_send_failure_is_internal_error() {
        let h = Harness::new();
        h.mailer.fail_always("down@example.org");

        let res = h
            .send(json_request(
                "POST",
                "/api/send-email",
                Some(&h.admin()),
                json!({ "to": "down@example.org", "subject": "s", "html": "<p>x</p>" }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(res).await["error"], "Failed to send email");
    }

    #[tokio::test]
    async fn test_bulk_send_retries_and_reports_failures() {
        let h = Harness::new();
        for email in ["ok@example.org", "flaky@example.org", "dead@example.org"] {
            let res = h
                .send(json_request("POST", "/api/newsletter", None, json!({ "email": email })))
                .await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }
        h.mailer.fail_times("flaky@example.org", 1);
        h.mailer.fail_always("dead@example.org");

        let res = h
            .send(json_request(
                "POST",
                "/api/send-email/bulk",
                Some(&h.admin()),
                json!({ "subject": "Spring update", "html": "<p>News</p>" }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["sent"], 2);
        let failed = body["failed"].as_array().unwrap();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0]["email"], "dead@example.org");
        assert!(!failed[0]["error"].as_str().unwrap().is_empty());

        assert_eq!(h.mailer.attempts("ok@example.org"), 1);
        assert_eq!(h.mailer.attempts("flaky@example.org"), 2);
        assert_eq!(h.mailer.attempts("dead@example.org"), 2);
    }

    #[tokio::test]
    async fn test_bulk_send_requires_fields() {
        let h = Harness::new();

        let res = h
            .send(json_request(
                "POST",
                "/api/send-email/bulk",
                Some(&h.admin()),
                json!({ "subject": "No body" }),
            ))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await["error"],
            "Missing required fields: subject, html"
        );
    }
}

#[cfg(test)]
mod upload_router_tests {
    use super::support::*;
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::domain::services::BlobKind;

    #[tokio::test]
    async fn test_rejects_unsupported_file_type() {
        let h = Harness::new();

        let res = h
            .send(multipart_file(&h.editor(), "notes.txt", "text/plain", b"hello"))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(res).await["error"],
            "Only image and PDF files are allowed"
        );
        assert!(h.blobs.uploads().is_empty());
    }

    #[tokio::test]
    async fn test_image_upload_goes_to_folder() {
        let h = Harness::new();

        let res = h
            .send(multipart_file(&h.editor(), "photo.png", "image/png", b"\x89PNG"))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["fileType"], "image");
        assert_eq!(body["publicId"], "nho-news/blob-1");
        assert_eq!(body["imageUrl"], "https://blobs.test/image/nho-news/blob-1");
    }

    #[tokio::test]
    async fn test_pdf_detected_by_file_name() {
        let h = Harness::new();

        let res = h
            .send(multipart_file(
                &h.editor(),
                "Report.PDF",
                "application/octet-stream",
                b"%PDF-1.4",
            ))
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["fileType"], "pdf");
        let uploads = h.blobs.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].kind, BlobKind::Raw);
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let h = Harness::new();

        let res = h
            .send(multipart_file(&h.editor(), "empty.png", "image/png", b""))
            .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"], "No file provided");
    }

    #[tokio::test]
    async fn test_delete_upload_requires_public_id() {
        let h = Harness::new();

        let res = h
            .send(json_request("DELETE", "/api/upload", Some(&h.editor()), json!({})))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(res).await["error"], "publicId is required");

        let res = h
            .send(json_request(
                "DELETE",
                "/api/upload",
                Some(&h.editor()),
                json!({ "publicId": "nho-news/blob-9" }),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_json(res).await["message"], "Image deleted");
        assert_eq!(h.blobs.destroyed(), vec!["nho-news/blob-9".to_string()]);
    }
}

#[cfg(test)]
mod donation_router_tests {
    use super::support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_donation_info_shape() {
        let h = Harness::new();

        let res = h.send(get("/api/donation-info", None)).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body = body_json(res).await;
        assert!(body["bankingInfo"].get("bankName").is_some());
        assert!(body["bankingInfo"].get("accountNumber").is_some());
        let banks = body["intermediaryBanks"].as_array().unwrap();
        assert_eq!(banks.len(), 3);
        assert!(banks[0].get("chips").is_some());
    }
}
