//! Integration tests for the ESCOtech site, run against an in-memory upstream API.


use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, redirect::Policy, Client, StatusCode};

use crate::client::ApiClient;
use crate::config::Config;
use crate::{create_router, AppState};
use mock_api::{lock, MockApi, ADMIN_EMAIL, ADMIN_PASSWORD, VALID_TOKEN};

const ADMIN_COOKIE: &str = "adminToken=valid-token";

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    upstream: Arc<MockApi>,
}

impl TestFixture {
    async fn new() -> Self {
        let upstream = MockApi::new();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind upstream");
        let upstream_addr = listener.local_addr().expect("Failed to get upstream addr");
        let router = upstream.router();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self::start(format!("http://{}/api", upstream_addr), upstream).await
    }

    /// Site whose upstream refuses every connection.
    async fn offline() -> Self {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        drop(listener);

        Self::start(format!("http://{}/api", addr), MockApi::new()).await
    }

    async fn start(api_url: String, upstream: Arc<MockApi>) -> Self {
        let config = Config {
            api_url: api_url.clone(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            static_dir: "./static".into(),
            unread_poll_interval: Duration::from_secs(3600),
            http_timeout: Duration::from_secs(5),
            secure_cookies: false,
        };
        let api = ApiClient::new(api_url, config.http_timeout).unwrap();
        let app = create_router(AppState::new(config, api));

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        TestFixture {
            client: Client::builder().redirect(Policy::none()).build().unwrap(),
            base_url: format!("http://{}", addr),
            upstream,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn admin_get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .header(header::COOKIE, ADMIN_COOKIE)
            .send()
            .await
            .unwrap()
    }

    async fn admin_post(&self, path: &str) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header(header::COOKIE, ADMIN_COOKIE)
            .send()
            .await
            .unwrap()
    }
}

fn location(resp: &reqwest::Response) -> &str {
    resp.headers()[header::LOCATION].to_str().unwrap()
}

// ==================== PUBLIC SITE ====================

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture.client.get(fixture.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_static_and_health_without_network() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let config = Config {
        api_url: "http://127.0.0.1:9/api".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "warn".to_string(),
        static_dir: "./static".into(),
        unread_poll_interval: Duration::from_secs(3600),
        http_timeout: Duration::from_secs(1),
        secure_cookies: false,
    };
    let api = ApiClient::new(config.api_url.clone(), config.http_timeout).unwrap();
    let app = create_router(AppState::new(config, api));

    let resp = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = app
        .oneshot(Request::get("/static/css/site.css").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_home_shows_api_content() {
    let fixture = TestFixture::new().await;

    let resp = fixture.client.get(fixture.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();

    assert!(body.contains("Hillside Villas"));
    assert!(body.contains("href=\"/project/1\""));
    assert!(body.contains("Road Design"));
    // the CEO is not listed on the team section
    assert!(body.contains("Eric Mugisha"));
    assert!(!body.contains("Alice Uwase"));
}

#[tokio::test]
async fn test_home_category_filter() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/?category=commercial"))
        .send()
        .await
        .unwrap();
    let body = resp.text().await.unwrap();
    assert!(body.contains("Nyarugenge Plaza"));
    assert!(!body.contains("Hillside Villas"));
}

#[tokio::test]
async fn test_home_falls_back_when_api_is_down() {
    let fixture = TestFixture::offline().await;

    let resp = fixture.client.get(fixture.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();

    assert!(body.contains("Modern Residential Complex"));
    assert!(body.contains("All Civil Related Works Design &amp; Construction"));
    assert!(body.contains("Evariste DUSABIMANA"));
    // built-in projects have no detail page
    assert!(!body.contains("href=\"/project/"));
}

#[tokio::test]
async fn test_contact_with_only_full_name() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/contact"))
        .form(&[("fullName", "Jane Doe"), ("email", ""), ("phone", ""), ("message", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Message sent successfully! We&#x27;ll get back to you soon."));
    // the form is cleared
    assert!(!body.contains("value=\"Jane Doe\""));

    let contacts = lock(&fixture.upstream.contacts).clone();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["fullName"], "Jane Doe");
    assert!(contacts[0].get("email").is_none());
    assert!(contacts[0].get("message").is_none());
}

#[tokio::test]
async fn test_contact_accepts_any_success_status() {
    let fixture = TestFixture::new().await;
    fixture.upstream.contact_unacknowledged.store(true, Ordering::SeqCst);

    let resp = fixture
        .client
        .post(fixture.url("/contact"))
        .form(&[("fullName", "Jane Doe"), ("message", "Quote please")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Message sent successfully!"));
    assert_eq!(lock(&fixture.upstream.contacts).len(), 1);
}

#[tokio::test]
async fn test_contact_requires_full_name() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/contact"))
        .form(&[("fullName", "  "), ("email", "jane@example.com"), ("message", "Hello")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Full name is required"));
    // entered values survive the rejection
    assert!(body.contains("value=\"jane@example.com\""));
    assert!(lock(&fixture.upstream.contacts).is_empty());
}

#[tokio::test]
async fn test_project_detail() {
    let fixture = TestFixture::new().await;

    let resp = fixture.client.get(fixture.url("/project/1")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Hillside Villas"));
    assert!(body.contains("Back to Projects"));

    let resp = fixture.client.get(fixture.url("/project/999")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.text().await.unwrap().contains("Project Not Found"));

    let resp = fixture.client.get(fixture.url("/project/abc")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_public_path_is_not_found() {
    let fixture = TestFixture::new().await;

    let resp = fixture.client.get(fixture.url("/nope")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ==================== AUTH ====================

#[tokio::test]
async fn test_guard_redirects_without_token() {
    let fixture = TestFixture::new().await;

    let resp = fixture.client.get(fixture.url("/admin")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/login");
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_guard_clears_rejected_token() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/admin/projects"))
        .header(header::COOKIE, "adminToken=expired")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/login");
    let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("adminToken=;"));
}

#[tokio::test]
async fn test_login_sets_cookie_and_opens_dashboard() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/admin/login"))
        .form(&[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin");
    let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("adminToken={}", VALID_TOKEN)));
    assert!(cookie.contains("HttpOnly"));

    let resp = fixture.admin_get("/admin").await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Welcome back, Site Admin"));
    assert!(body.contains("You have 1 unread message"));
    assert!(body.contains("Grace Ineza"));
}

#[tokio::test]
async fn test_login_rejected() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/admin/login"))
        .form(&[("email", ADMIN_EMAIL), ("password", "wrong")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
    let body = resp.text().await.unwrap();
    assert!(body.contains("Invalid email or password"));
    assert!(body.contains(&format!("value=\"{}\"", ADMIN_EMAIL)));
}

#[tokio::test]
async fn test_login_page_redirects_when_signed_in() {
    let fixture = TestFixture::new().await;

    let resp = fixture.admin_get("/admin/login").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let fixture = TestFixture::new().await;

    let resp = fixture.admin_post("/admin/logout").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/login");
    let cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("adminToken=;"));
}

#[tokio::test]
async fn test_unknown_admin_path_goes_to_dashboard() {
    let fixture = TestFixture::new().await;

    let resp = fixture.admin_get("/admin/reports").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin");
}

// ==================== ADMIN RESOURCES ====================

#[tokio::test]
async fn test_project_list_search_and_sort() {
    let fixture = TestFixture::new().await;

    let resp = fixture.admin_get("/admin/projects").await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("2 total projects"));
    assert!(body.contains("Hillside Villas"));

    let body = fixture
        .admin_get("/admin/projects?q=plaza")
        .await
        .text()
        .await
        .unwrap();
    assert!(body.contains("Nyarugenge Plaza"));
    assert!(!body.contains("Hillside Villas"));

    let body = fixture
        .admin_get("/admin/projects?sort=title&dir=desc")
        .await
        .text()
        .await
        .unwrap();
    let plaza = body.find("Nyarugenge Plaza").unwrap();
    let villas = body.find("Hillside Villas").unwrap();
    assert!(plaza < villas);
}

#[tokio::test]
async fn test_delete_project() {
    let fixture = TestFixture::new().await;
    fixture.admin_get("/admin/projects").await;

    let resp = fixture.admin_post("/admin/projects/1/delete").await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Project deleted"));
    assert!(!body.contains("Hillside Villas"));
    assert!(body.contains("Nyarugenge Plaza"));
    assert!(body.contains("1 total projects"));

    assert_eq!(fixture.upstream.deletes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_delete_keeps_project() {
    let fixture = TestFixture::new().await;
    fixture.upstream.fail_deletes.store(true, Ordering::SeqCst);
    fixture.admin_get("/admin/projects").await;

    let resp = fixture.admin_post("/admin/projects/1/delete").await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Project is linked to an invoice"));
    assert!(body.contains("Hillside Villas"));
    assert!(body.contains("2 total projects"));

    assert_eq!(fixture.upstream.deletes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_create_team_member_fills_order() {
    let fixture = TestFixture::new().await;
    fixture.admin_get("/admin/team").await;

    let photo = reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
        .file_name("photo.jpg")
        .mime_str("image/jpeg")
        .unwrap();
    let form = reqwest::multipart::Form::new()
        .text("name", "Diane Umutoni")
        .text("role", "Quantity Surveyor")
        .text("description", "Costing and bills of quantities")
        .text("order", "")
        .part("image", photo);

    let resp = fixture
        .client
        .post(fixture.url("/admin/team"))
        .header(header::COOKIE, ADMIN_COOKIE)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Team member &quot;Diane Umutoni&quot; created"));
    assert!(body.contains("3 team members"));

    let created = lock(&fixture.upstream.created_forms).clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["order"], "3");
    assert_eq!(created[0]["isCEO"], "false");
}

#[tokio::test]
async fn test_create_team_member_requires_photo() {
    let fixture = TestFixture::new().await;

    let form = reqwest::multipart::Form::new()
        .text("name", "Diane Umutoni")
        .text("role", "Quantity Surveyor")
        .text("description", "Costing");

    let resp = fixture
        .client
        .post(fixture.url("/admin/team"))
        .header(header::COOKIE, ADMIN_COOKIE)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Photo is required"));
    assert!(body.contains("value=\"Diane Umutoni\""));
    assert!(lock(&fixture.upstream.created_forms).is_empty());
}

#[tokio::test]
async fn test_edit_form_prefills_values() {
    let fixture = TestFixture::new().await;

    let resp = fixture.admin_get("/admin/projects/2/edit").await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Edit Project"));
    assert!(body.contains("value=\"Nyarugenge Plaza\""));
    assert!(body.contains("action=\"/admin/projects/2\""));
}

fn image_part(file_name: &str) -> reqwest::multipart::Part {
    reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
        .file_name(file_name.to_string())
        .mime_str("image/jpeg")
        .unwrap()
}

impl TestFixture {
    async fn admin_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header(header::COOKIE, ADMIN_COOKIE)
            .multipart(form)
            .send()
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn test_create_project_sends_multipart_fields() {
    let fixture = TestFixture::new().await;
    fixture.admin_get("/admin/projects").await;

    let form = reqwest::multipart::Form::new()
        .text("title", "Kigali Heights Tower")
        .text("description", "Twelve storey office block")
        .text("category", "commercial")
        .text("location", "Kimihurura")
        .text("featured", "on")
        .part("image", image_part("tower.jpg"));
    let resp = fixture.admin_multipart("/admin/projects", form).await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Project &quot;Kigali Heights Tower&quot; created"));
    assert!(body.contains("3 total projects"));

    let created = lock(&fixture.upstream.created_forms).clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0]["title"], "Kigali Heights Tower");
    assert_eq!(created[0]["description"], "Twelve storey office block");
    assert_eq!(created[0]["category"], "commercial");
    assert_eq!(created[0]["location"], "Kimihurura");
    assert_eq!(created[0]["featured"], "true");
    assert_eq!(created[0]["image"], "tower.jpg");
}

#[tokio::test]
async fn test_update_project_keeps_image_without_new_file() {
    let fixture = TestFixture::new().await;
    fixture.admin_get("/admin/projects").await;

    // a browser sends an empty file part when no file is chosen
    let empty_file = reqwest::multipart::Part::bytes(Vec::new())
        .file_name("")
        .mime_str("application/octet-stream")
        .unwrap();
    let form = reqwest::multipart::Form::new()
        .text("title", "Hillside Villas Phase II")
        .text("description", "Second phase")
        .text("category", "residential")
        .text("location", "Rebero")
        .part("image", empty_file);
    let resp = fixture.admin_multipart("/admin/projects/1", form).await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Project &quot;Hillside Villas Phase II&quot; updated"));
    assert!(body.contains("2 total projects"));

    let updated = lock(&fixture.upstream.updated_forms).clone();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0]["featured"], "false");
    assert!(!updated[0].contains_key("image"));

    let projects = lock(&fixture.upstream.projects).clone();
    assert_eq!(projects[0]["title"], "Hillside Villas Phase II");
    assert_eq!(projects[0]["image"], "/uploads/project-1.jpg");
}

#[tokio::test]
async fn test_update_team_member_resorts_by_order() {
    let fixture = TestFixture::new().await;
    let body = fixture.admin_get("/admin/team").await.text().await.unwrap();
    assert!(body.find("Alice Uwase").unwrap() < body.find("Eric Mugisha").unwrap());

    let form = reqwest::multipart::Form::new()
        .text("name", "Alice Uwase")
        .text("role", "Managing Director")
        .text("description", "Leads the firm")
        .text("order", "5")
        .text("isCEO", "on");
    let resp = fixture.admin_multipart("/admin/team/1", form).await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Team member &quot;Alice Uwase&quot; updated"));
    // the notice names Alice first; her row now comes after Eric's
    assert!(body.rfind("Alice Uwase").unwrap() > body.find("Eric Mugisha").unwrap());

    let updated = lock(&fixture.upstream.updated_forms).clone();
    assert_eq!(updated[0]["order"], "5");
    assert_eq!(updated[0]["isCEO"], "true");
    assert!(!updated[0].contains_key("image"));
}

#[tokio::test]
async fn test_create_member_leaves_order_to_server_when_list_fails() {
    let fixture = TestFixture::new().await;
    fixture.upstream.fail_team_list.store(true, Ordering::SeqCst);

    let form = reqwest::multipart::Form::new()
        .text("name", "Diane Umutoni")
        .text("role", "Quantity Surveyor")
        .text("description", "Costing")
        .text("order", "")
        .part("image", image_part("diane.jpg"));
    let resp = fixture.admin_multipart("/admin/team", form).await;
    assert_eq!(resp.status(), 200);

    let created = lock(&fixture.upstream.created_forms).clone();
    assert_eq!(created.len(), 1);
    assert!(!created[0].contains_key("order"));
}

#[tokio::test]
async fn test_service_create_and_update_send_json() {
    let fixture = TestFixture::new().await;
    fixture.admin_get("/admin/services").await;

    let form = reqwest::multipart::Form::new()
        .text("title", "Structural Design")
        .text("description", "Concrete and steel structures")
        .text("features", "Foundations\n\n  Steel frames  \n")
        .text("order", "");
    let resp = fixture.admin_multipart("/admin/services", form).await;
    assert_eq!(resp.status(), 200);
    assert!(resp
        .text()
        .await
        .unwrap()
        .contains("Service &quot;Structural Design&quot; created"));

    let form = reqwest::multipart::Form::new()
        .text("title", "Road Design")
        .text("description", "Highways and feeder roads")
        .text("features", "Surveying\nDrainage")
        .text("order", "");
    let resp = fixture.admin_multipart("/admin/services/1", form).await;
    assert_eq!(resp.status(), 200);

    let bodies = lock(&fixture.upstream.service_bodies).clone();
    assert_eq!(
        bodies[0],
        serde_json::json!({
            "title": "Structural Design",
            "description": "Concrete and steel structures",
            "features": ["Foundations", "Steel frames"],
            "order": 2
        })
    );
    // a blank order keeps the current one
    assert_eq!(bodies[1]["features"], serde_json::json!(["Surveying", "Drainage"]));
    assert_eq!(bodies[1]["order"], 1);
}

// ==================== MESSAGES ====================

#[tokio::test]
async fn test_messages_list_and_toggle() {
    let fixture = TestFixture::new().await;

    let body = fixture.admin_get("/admin/messages").await.text().await.unwrap();
    assert!(body.contains("1 unread of 2 total"));
    // newest first
    assert!(body.find("Grace Ineza").unwrap() < body.find("Jean Bosco").unwrap());

    assert!(body.contains("name=\"isRead\" value=\"true\""));

    let resp = fixture
        .client
        .post(fixture.url("/admin/messages/2/toggle-read"))
        .header(header::COOKIE, ADMIN_COOKIE)
        .form(&[("isRead", "true")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Message marked as read"));
    assert!(body.contains("0 unread of 2 total"));
    assert_eq!(fixture.upstream.patches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_opening_message_marks_it_read() {
    let fixture = TestFixture::new().await;

    let resp = fixture.admin_get("/admin/messages/2").await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Grace Ineza"));
    assert!(body.contains("Mark as unread"));
    assert!(body.contains("Not provided"));

    // the read flag is sent in the background
    for _ in 0..20 {
        if fixture.upstream.patches.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert_eq!(fixture.upstream.patches.load(Ordering::SeqCst), 1);
    let messages = lock(&fixture.upstream.messages).clone();
    assert_eq!(messages[1]["isRead"], true);
}

#[tokio::test]
async fn test_mark_unread_after_background_read_failed() {
    let fixture = TestFixture::new().await;
    fixture.upstream.fail_next_patch.store(true, Ordering::SeqCst);
    fixture.admin_get("/admin/messages").await;

    let body = fixture.admin_get("/admin/messages/2").await.text().await.unwrap();
    assert!(body.contains("Mark as unread"));
    assert!(body.contains("name=\"isRead\" value=\"false\""));
    for _ in 0..20 {
        if fixture.upstream.patches.load(Ordering::SeqCst) > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    assert_eq!(fixture.upstream.patches.load(Ordering::SeqCst), 1);

    let resp = fixture
        .client
        .post(fixture.url("/admin/messages/2/toggle-read"))
        .header(header::COOKIE, ADMIN_COOKIE)
        .form(&[("isRead", "false")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Message marked as unread"));

    let messages = lock(&fixture.upstream.messages).clone();
    assert_eq!(messages[1]["isRead"], false);
}

#[tokio::test]
async fn test_delete_message() {
    let fixture = TestFixture::new().await;
    fixture.admin_get("/admin/messages").await;

    let resp = fixture.admin_post("/admin/messages/1/delete").await;
    assert_eq!(resp.status(), 200);
    let body = resp.text().await.unwrap();
    assert!(body.contains("Message deleted"));
    assert!(!body.contains("Jean Bosco"));
    assert!(body.contains("1 unread of 1 total"));
}
