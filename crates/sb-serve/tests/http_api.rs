//! End-to-end HTTP tests: full router, real SQLite file, no network.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use sb_core::Capabilities;
use sb_core::error::STORE_SETUP_GUIDANCE;
use sb_serve::middleware::auth::AuthSettings;
use sb_serve::middleware::correlation::HEADER_NAME;
use sb_serve::AppState;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const USER: &str = "user-1";

struct TestApp {
    _dir: TempDir,
    router: Router,
}

fn state_in(dir: &TempDir, capabilities: Capabilities, auth: AuthSettings) -> AppState {
    let db_path = dir
        .path()
        .join("skillbridge.db")
        .to_string_lossy()
        .into_owned();
    AppState {
        db_path,
        capabilities,
        auth,
    }
}

fn test_app_with(capabilities: Capabilities, auth: AuthSettings) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir, capabilities, auth);
    sb_db::schema::open_and_migrate(&state.db_path).unwrap();
    TestApp {
        router: sb_serve::app(state),
        _dir: dir,
    }
}

fn test_app() -> TestApp {
    test_app_with(Capabilities::default(), AuthSettings::default())
}

struct Reply {
    status: StatusCode,
    correlation_id: Option<String>,
    text: String,
}

impl Reply {
    fn json(&self) -> Value {
        serde_json::from_str(&self.text).unwrap()
    }
}

impl TestApp {
    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> Reply {
        self.send_as(Some(USER), method, uri, body).await
    }

    async fn send_as(
        &self,
        user: Option<&str>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Reply {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        self.send_request(builder.body(body).unwrap()).await
    }

    async fn send_request(&self, request: Request<Body>) -> Reply {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let correlation_id = response
            .headers()
            .get(HEADER_NAME)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Reply {
            status,
            correlation_id,
            text: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    async fn create_learning(&self, topic: &str, category: &str) -> String {
        let reply = self
            .send(
                Method::POST,
                "/api/learning",
                Some(json!({ "topic": topic, "category": category })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED);
        reply.json()["id"].as_str().unwrap().to_string()
    }
}

// ---------------------------------------------------------------------------
// Scenario and round trips
// ---------------------------------------------------------------------------

#[tokio::test]
async fn learning_then_applied_skill_scenario() {
    let app = test_app();

    let created = app
        .send(
            Method::POST,
            "/api/learning",
            Some(json!({ "topic": "Go channels", "category": "concurrency" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(
        created.json(),
        json!({ "id": "1", "topic": "Go channels", "category": "concurrency", "source": "" })
    );

    let applied = app
        .send(
            Method::POST,
            "/api/learning/1/applied",
            Some(json!({ "type": "practice" })),
        )
        .await;
    assert_eq!(applied.status, StatusCode::CREATED);
    let applied = applied.json();
    assert_eq!(applied["learningId"], "1");
    assert_eq!(applied["type"], "practice");
    assert_eq!(applied["notes"], "");
    assert_eq!(applied["applied_action"], "");
    assert!(applied["id"].is_string());

    let detail = app.send(Method::GET, "/api/learning/1", None).await;
    assert_eq!(detail.status, StatusCode::OK);
    let detail = detail.json();
    assert_eq!(detail["learning"]["appliedCount"], 1);
    assert_eq!(detail["learning"]["status"], "APPLIED");
    let skills = detail["appliedSkills"].as_array().unwrap();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0]["type"], "practice");
    assert!(skills[0]["createdTime"].is_string());
}

#[tokio::test]
async fn created_learning_reads_back_trimmed_and_pending() {
    let app = test_app();
    let created = app
        .send(
            Method::POST,
            "/api/learning",
            Some(json!({ "topic": " Ownership ", "category": " rust", "source": " the book " })),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let id = created.json()["id"].as_str().unwrap().to_string();

    let detail = app
        .send(Method::GET, &format!("/api/learning/{id}"), None)
        .await
        .json();
    let learning = &detail["learning"];
    assert_eq!(learning["id"], id.as_str());
    assert_eq!(learning["topic"], "Ownership");
    assert_eq!(learning["category"], "rust");
    assert_eq!(learning["source"], "the book");
    assert_eq!(learning["appliedCount"], 0);
    assert_eq!(learning["status"], "PENDING");
    assert_eq!(detail["appliedSkills"], json!([]));
}

#[tokio::test]
async fn list_reports_counts_and_status() {
    let app = test_app();
    let first = app.create_learning("traits", "rust").await;
    let second = app.create_learning("select", "go").await;
    for skill_type in ["practice", "project"] {
        let reply = app
            .send(
                Method::POST,
                &format!("/api/learning/{first}/applied"),
                Some(json!({ "type": skill_type })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::CREATED);
    }

    let list = app.send(Method::GET, "/api/learning", None).await;
    assert_eq!(list.status, StatusCode::OK);
    let list = list.json();
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], first.as_str());
    assert_eq!(rows[0]["appliedCount"], 2);
    assert_eq!(rows[0]["status"], "APPLIED");
    assert_eq!(rows[1]["id"], second.as_str());
    assert_eq!(rows[1]["appliedCount"], 0);
    assert_eq!(rows[1]["status"], "PENDING");
    assert!(rows[0]["createdTime"].is_string());
}

// ---------------------------------------------------------------------------
// Validation and missing rows
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_learning_without_required_fields_is_rejected() {
    let app = test_app();
    for body in [
        json!({ "topic": "", "category": "rust" }),
        json!({ "category": "rust" }),
        json!({ "topic": "traits", "category": "   " }),
    ] {
        let reply = app.send(Method::POST, "/api/learning", Some(body)).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            reply.json(),
            json!({ "error": "topic and category are required" })
        );
    }

    let empty = app.send(Method::POST, "/api/learning", None).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let list = app.send(Method::GET, "/api/learning", None).await.json();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/learning")
        .header("x-user-id", USER)
        .body(Body::from("{\"topic\": "))
        .unwrap();
    let reply = app.send_request(request).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(
        reply.json()["error"]
            .as_str()
            .unwrap()
            .starts_with("invalid request body")
    );
}

#[tokio::test]
async fn non_integer_ids_are_bad_requests() {
    let app = test_app();
    let cases = [
        (Method::GET, "/api/learning/abc", "Invalid learning ID"),
        (Method::DELETE, "/api/learning/1x", "Invalid learning ID"),
        (Method::POST, "/api/learning/x/applied", "Invalid learning ID"),
        (Method::PUT, "/api/applied/one", "Invalid applied skill ID"),
        (Method::DELETE, "/api/applied/one", "Invalid applied skill ID"),
    ];
    for (method, uri, message) in cases {
        let reply = app
            .send(method, uri, Some(json!({ "type": "practice" })))
            .await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(reply.json(), json!({ "error": message }));
    }
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let app = test_app();
    let get = app.send(Method::GET, "/api/learning/41", None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(get.json(), json!({ "error": "Learning not found" }));

    let delete = app.send(Method::DELETE, "/api/learning/41", None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let applied = app
        .send(
            Method::POST,
            "/api/learning/41/applied",
            Some(json!({ "type": "practice" })),
        )
        .await;
    assert_eq!(applied.status, StatusCode::NOT_FOUND);
    assert_eq!(applied.json(), json!({ "error": "Learning not found" }));

    let put = app
        .send(
            Method::PUT,
            "/api/applied/41",
            Some(json!({ "type": "practice" })),
        )
        .await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);
    assert_eq!(put.json(), json!({ "error": "Applied skill not found" }));
}

#[tokio::test]
async fn applied_skill_requires_type() {
    let app = test_app();
    let id = app.create_learning("closures", "rust").await;
    let reply = app
        .send(
            Method::POST,
            &format!("/api/learning/{id}/applied"),
            Some(json!({ "notes": "no type" })),
        )
        .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.json(), json!({ "error": "type is required" }));
}

#[tokio::test]
async fn missing_rows_win_over_unreadable_bodies() {
    let app = test_app();
    for (method, uri, message) in [
        (Method::POST, "/api/learning/999/applied", "Learning not found"),
        (Method::PUT, "/api/applied/999", "Applied skill not found"),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("x-user-id", USER)
            .body(Body::from("{"))
            .unwrap();
        let reply = app.send_request(request).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(reply.json(), json!({ "error": message }));
    }
}

#[tokio::test]
async fn unreadable_body_under_existing_parent_is_a_bad_request() {
    let app = test_app();
    let id = app.create_learning("parsing", "rust").await;
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("/api/learning/{id}/applied"))
        .header("x-user-id", USER)
        .body(Body::from("{"))
        .unwrap();
    let reply = app.send_request(request).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn scalar_field_values_are_read_as_text() {
    let app = test_app();
    let reply = app
        .send(
            Method::POST,
            "/api/learning",
            Some(json!({ "topic": 5, "category": "numbers" })),
        )
        .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.json()["topic"], "5");
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn put_replaces_type_and_blanks_missing_notes() {
    let app = test_app();
    let learning = app.create_learning("unsafe", "rust").await;
    let created = app
        .send(
            Method::POST,
            &format!("/api/learning/{learning}/applied"),
            Some(json!({ "type": "practice", "notes": "ffi bindings", "appliedAction": "wrapped libc" })),
        )
        .await
        .json();
    assert_eq!(created["applied_action"], "wrapped libc");
    let applied = created["id"].as_str().unwrap().to_string();

    let updated = app
        .send(
            Method::PUT,
            &format!("/api/applied/{applied}"),
            Some(json!({ "type": " project " })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(
        updated.json(),
        json!({ "id": applied.as_str(), "type": "project", "notes": "" })
    );

    let detail = app
        .send(Method::GET, &format!("/api/learning/{learning}"), None)
        .await
        .json();
    let skill = &detail["appliedSkills"][0];
    assert_eq!(skill["type"], "project");
    assert_eq!(skill["notes"], "");
    assert_eq!(skill["applied_action"], "wrapped libc");
}

#[tokio::test]
async fn delete_learning_cascades() {
    let app = test_app();
    let learning = app.create_learning("tokio", "rust").await;
    let applied = app
        .send(
            Method::POST,
            &format!("/api/learning/{learning}/applied"),
            Some(json!({ "type": "practice" })),
        )
        .await
        .json();
    let applied = applied["id"].as_str().unwrap().to_string();

    let deleted = app
        .send(Method::DELETE, &format!("/api/learning/{learning}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json(), json!({ "success": true }));

    let get = app
        .send(Method::GET, &format!("/api/learning/{learning}"), None)
        .await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);

    let orphan = app
        .send(Method::DELETE, &format!("/api/applied/{applied}"), None)
        .await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_applied_skill_returns_learning_to_pending() {
    let app = test_app();
    let learning = app.create_learning("serde", "rust").await;
    let applied = app
        .send(
            Method::POST,
            &format!("/api/learning/{learning}/applied"),
            Some(json!({ "type": "practice" })),
        )
        .await
        .json();
    let applied = applied["id"].as_str().unwrap().to_string();

    let deleted = app
        .send(Method::DELETE, &format!("/api/applied/{applied}"), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.json(), json!({ "success": true }));

    let detail = app
        .send(Method::GET, &format!("/api/learning/{learning}"), None)
        .await
        .json();
    assert_eq!(detail["learning"]["status"], "PENDING");
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn root_answers_with_liveness_text() {
    let app = test_app();
    let reply = app.send_as(None, Method::GET, "/", None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text, "SkillBridge API is running");
}

#[tokio::test]
async fn unknown_and_over_long_paths_are_not_found() {
    let app = test_app();
    app.create_learning("routing", "http").await;
    for (method, uri) in [
        (Method::GET, "/api/unknown"),
        (Method::GET, "/api/learning/"),
        (Method::GET, "/api/learning/1/x"),
        (Method::POST, "/api/learning/1/applied/2"),
        (Method::DELETE, "/api/learning/1/applied"),
        (Method::PATCH, "/api/learning"),
        (Method::GET, "/api/applied/1"),
    ] {
        let reply = app.send(method, uri, None).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(reply.json(), json!({ "error": "Not found" }), "{uri}");
    }
}

#[tokio::test]
async fn applied_mutations_can_be_switched_off() {
    let app = test_app_with(
        Capabilities {
            applied_action: false,
            applied_mutations: false,
        },
        AuthSettings::default(),
    );
    let learning = app.create_learning("borrowing", "rust").await;
    let created = app
        .send(
            Method::POST,
            &format!("/api/learning/{learning}/applied"),
            Some(json!({ "type": "practice", "applied_action": "ignored" })),
        )
        .await
        .json();
    assert!(created.get("applied_action").is_none());
    let applied = created["id"].as_str().unwrap().to_string();

    for method in [Method::PUT, Method::DELETE] {
        let reply = app
            .send(
                method,
                &format!("/api/applied/{applied}"),
                Some(json!({ "type": "x" })),
            )
            .await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.json(), json!({ "error": "Not found" }));
    }
}

// ---------------------------------------------------------------------------
// Cross-cutting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn api_requires_forwarded_user() {
    let app = test_app();
    for user in [None, Some("  ")] {
        let reply = app.send_as(user, Method::GET, "/api/learning", None).await;
        assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
        assert_eq!(reply.json(), json!({ "error": "Unauthorized" }));
    }

    let missing = app
        .send_as(None, Method::GET, "/api/nothing-here", None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disabled_auth_accepts_anonymous_requests() {
    let app = test_app_with(Capabilities::default(), AuthSettings::disabled());
    let reply = app.send_as(None, Method::GET, "/api/learning", None).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_a_correlation_id() {
    let app = test_app();
    let generated = app.send(Method::GET, "/api/learning", None).await;
    assert!(generated.correlation_id.unwrap().starts_with("req_"));

    let request = Request::builder()
        .uri("/nowhere")
        .header(HEADER_NAME, "trace-me")
        .body(Body::empty())
        .unwrap();
    let echoed = app.send_request(request).await;
    assert_eq!(echoed.correlation_id.as_deref(), Some("trace-me"));
}

#[tokio::test]
async fn unprovisioned_store_returns_setup_guidance() {
    let dir = tempfile::tempdir().unwrap();
    let state = state_in(&dir, Capabilities::default(), AuthSettings::default());
    let app = TestApp {
        router: sb_serve::app(state),
        _dir: dir,
    };
    let reply = app.send(Method::GET, "/api/learning", None).await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.json(), json!({ "error": STORE_SETUP_GUIDANCE }));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = test_app();
    let reply = app
        .send_as(None, Method::GET, "/api/openapi.json", None)
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.json()["paths"]["/api/learning/{id}/applied"].is_object());
}

#[tokio::test]
async fn users_cannot_reach_each_others_learnings() {
    let app = test_app();
    let learning = app.create_learning("ownership", "rust").await;
    let uri = format!("/api/learning/{learning}");
    let other = Some("user-2");

    let get = app.send_as(other, Method::GET, &uri, None).await;
    assert_eq!(get.status, StatusCode::NOT_FOUND);
    assert_eq!(get.json(), json!({ "error": "Learning not found" }));

    let list = app.send_as(other, Method::GET, "/api/learning", None).await;
    assert_eq!(list.json(), json!([]));

    let applied = app
        .send_as(
            other,
            Method::POST,
            &format!("{uri}/applied"),
            Some(json!({ "type": "practice" })),
        )
        .await;
    assert_eq!(applied.status, StatusCode::NOT_FOUND);

    let delete = app.send_as(other, Method::DELETE, &uri, None).await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let owner = app.send(Method::GET, &uri, None).await;
    assert_eq!(owner.status, StatusCode::OK);
}
