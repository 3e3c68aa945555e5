use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use gametrack_back::{
    routes,
    testing::{MockMetadataSource, json_state, rawg_game},
};

struct TestApp {
    dir: TempDir,
    router: Router,
}

impl TestApp {
    fn new(metadata: Option<MockMetadataSource>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let router = routes::router(json_state(dir.path(), metadata));
        Self { dir, router }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str, user: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().uri(uri);
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn json(&self, method: &str, uri: &str, user: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(user) = user {
            builder = builder.header("x-user-id", user);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }
}

#[tokio::test]
async fn healthcheck_reports_ok_on_fresh_documents() {
    let app = TestApp::new(None);

    let (status, body) = app.get("/healthcheck", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn collection_requires_authenticated_user() {
    let app = TestApp::new(None);

    let (status, body) = app.get("/collection", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let (status, _) = app
        .json("POST", "/collection", None, json!({ "gameId": "42", "status": "playing" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(!app.dir.path().join("user_data.json").exists());
}

#[tokio::test]
async fn wishlist_then_completed_keeps_a_single_entry() {
    let app = TestApp::new(None);

    let (status, body) = app
        .json("POST", "/collection", Some("u1"), json!({ "gameId": "42", "status": "wishlist" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["gameId"], json!("42"));
    assert_eq!(body["userId"], json!("u1"));
    assert_eq!(
        body["stats"],
        json!({ "total": 1, "playing": 0, "completed": 0, "wishlist": 1, "dropped": 0 })
    );

    let (status, body) = app
        .json("POST", "/collection", Some("u1"), json!({ "gameId": 42, "status": "completed" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Game added with status: completed"));
    assert_eq!(
        body["stats"],
        json!({ "total": 1, "playing": 0, "completed": 1, "wishlist": 0, "dropped": 0 })
    );

    let raw = std::fs::read_to_string(app.dir.path().join("user_data.json")).unwrap();
    let document: Value = serde_json::from_str(&raw).unwrap();
    let games = document["u1"]["games"].as_array().unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0]["status"], json!("completed"));
    assert!(games[0]["completedAt"].is_string());
    assert_eq!(document["u1"]["stats"]["completed"], json!(1));
}

#[tokio::test]
async fn invalid_collection_payloads_are_rejected_without_writing() {
    let app = TestApp::new(None);

    let (status, body) = app
        .json("POST", "/collection", Some("u1"), json!({ "gameId": "42", "status": "invalid" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("status must be one of: playing, completed, wishlist, dropped")
    );

    let (status, body) = app
        .json("POST", "/collection", Some("u1"), json!({ "gameId": "42" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("gameId and status are required"));

    let request = Request::builder()
        .method("POST")
        .uri("/collection")
        .header("x-user-id", "u1")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = app.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert!(!app.dir.path().join("user_data.json").exists());
}

#[tokio::test]
async fn collections_are_isolated_per_user() {
    let app = TestApp::new(None);

    app.json("POST", "/collection", Some("alice"), json!({ "gameId": "1", "status": "playing" }))
        .await;
    app.json("POST", "/collection", Some("bob"), json!({ "gameId": "2", "status": "dropped" }))
        .await;

    let (status, body) = app.get("/collection", Some("alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games"].as_array().unwrap().len(), 1);
    assert_eq!(body["games"][0]["gameId"], json!("1"));
    assert_eq!(body["stats"]["dropped"], json!(0));
}

#[tokio::test]
async fn collection_listing_backfills_unknown_games() {
    let metadata = MockMetadataSource::new();
    metadata.add_game(rawg_game(3328, "The Witcher 3"));
    let app = TestApp::new(Some(metadata.clone()));

    app.json("POST", "/collection", Some("u1"), json!({ "gameId": "3328", "status": "playing" }))
        .await;

    let (status, body) = app.get("/collection", Some("u1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["games"][0]["title"], json!("The Witcher 3"));
    assert_eq!(body["games"][0]["status"], json!("playing"));
    assert_eq!(body["stats"]["total"], json!(1));

    let (status, body) = app.get("/catalog?id=3328", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rawg_slug"], json!("the-witcher-3"));

    app.get("/collection", Some("u1")).await;
    assert_eq!(metadata.detail_requests(), vec![3328]);
}

#[tokio::test]
async fn unreadable_collection_document_is_an_internal_error() {
    let app = TestApp::new(None);
    std::fs::write(app.dir.path().join("user_data.json"), "[1, 2").unwrap();

    let (status, body) = app.get("/collection", Some("u1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal server error" }));
}

#[tokio::test]
async fn catalog_crud_lifecycle() {
    let app = TestApp::new(None);

    let (status, body) = app.json("POST", "/catalog", None, json!({ "id": "3498" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("id and title are required"));

    let (status, body) = app
        .json(
            "POST",
            "/catalog",
            None,
            json!({ "id": "3498", "title": "GTA V", "rawg_slug": "gta-v", "genre": "action" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game"]["id"], json!("3498"));
    assert_eq!(body["game"]["genre"], json!("action"));

    let (status, body) = app
        .json("POST", "/catalog", None, json!({ "id": "3498", "title": "Dup" }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        json!("Game with this ID already exists. Use PUT to update.")
    );

    let (status, _) = app.json("PUT", "/catalog", None, json!({ "title": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .json("PUT", "/catalog", None, json!({ "id": "9", "title": "x" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Game not found"));

    let (status, body) = app
        .json("PUT", "/catalog", None, json!({ "id": 3498, "title": "Grand Theft Auto V" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["game"]["title"], json!("Grand Theft Auto V"));
    assert_eq!(body["game"]["genre"], json!("action"));
    assert!(body["game"]["last_updated_at"].is_string());

    let (status, body) = app.get("/catalog", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], json!(1));
    assert_eq!(body["games"][0]["id"], json!("3498"));

    let (status, _) = app.delete("/catalog").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.delete("/catalog?id=3498").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!("3498"));

    let (status, _) = app.delete("/catalog?id=3498").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/catalog?id=3498", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn discovery_routes_proxy_the_metadata_source() {
    let metadata = MockMetadataSource::new();
    metadata.add_game(rawg_game(1, "Hades"));
    metadata.add_game(rawg_game(2, "Hollow Knight"));
    let app = TestApp::new(Some(metadata));

    let (status, body) = app.get("/rawg/search?q=hades", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(1));
    assert_eq!(body["results"][0]["name"], json!("Hades"));

    let (status, _) = app.get("/rawg/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.get("/rawg/popular?page=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"].as_array().unwrap().len(), 2);

    let (status, body) = app.get("/rawg/games/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], json!("Hollow Knight"));

    let (status, _) = app.get("/rawg/games/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn discovery_without_api_key_is_unavailable() {
    let app = TestApp::new(None);

    let (status, body) = app.get("/rawg/popular", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("missing API key"));
}

#[tokio::test]
async fn collection_entries_keep_client_fields() {
    let app = TestApp::new(None);

    let (status, _) = app
        .json(
            "POST",
            "/collection",
            Some("u1"),
            json!({ "gameId": "42", "status": "completed", "completedAt": "", "rating": 5, "notes": "fun" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get("/collection", Some("u1")).await;
    assert_eq!(status, StatusCode::OK);
    let entry = &body["games"][0];
    assert_eq!(entry["rating"], json!(5));
    assert_eq!(entry["notes"], json!("fun"));
    assert!(!entry["completedAt"].as_str().unwrap().is_empty());
}
