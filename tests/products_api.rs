use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use mpepo_kitchen::{AppConfig, app};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn setup(extra: &[(&str, &str)]) -> Router {
    let config = AppConfig::from_lookup(|key| {
        if key == "STORAGE_BACKEND" {
            return Some("memory".to_string());
        }
        extra
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .unwrap();

    app::build(&config).await.unwrap()
}

async fn api_call(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_string(&v).unwrap())
        }
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        json!(null)
    } else {
        serde_json::from_slice(&bytes).unwrap_or(json!(null))
    };
    (status, json)
}

fn burger() -> Value {
    json!({
        "name": "Nshima Plate",
        "description": "Nshima with beef stew",
        "price": 9.5,
        "image_url": "https://cdn.test/nshima.png",
        "category": "Mains",
        "is_available": true
    })
}

// ── Create ──

#[tokio::test]
async fn create_assigns_id_and_ignores_client_id() {
    let app = setup(&[]).await;

    let mut payload = burger();
    payload["id"] = json!(500);
    let (s, created) = api_call(&app, "POST", "/api/products", Some(payload)).await;

    assert_eq!(s, StatusCode::OK);
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Nshima Plate");
    assert_eq!(created["category"], "Mains");

    let (s, _) = api_call(&app, "GET", "/api/products/500", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_applies_defaults() {
    let app = setup(&[]).await;

    let (s, created) = api_call(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Tea", "price": 1.25 })),
    )
    .await;

    assert_eq!(s, StatusCode::OK);
    assert_eq!(created["description"], "");
    assert_eq!(created["image_url"], "");
    assert_eq!(created["category"], "Uncategorized");
    assert_eq!(created["is_available"], true);
}

#[tokio::test]
async fn duplicate_name_is_rejected_without_new_row() {
    let app = setup(&[]).await;

    let (s, _) = api_call(&app, "POST", "/api/products", Some(burger())).await;
    assert_eq!(s, StatusCode::OK);

    let (s, body) = api_call(&app, "POST", "/api/products", Some(burger())).await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product name already registered");

    let (_, list) = api_call(&app, "GET", "/api/products", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn invalid_payloads_are_unprocessable() {
    let app = setup(&[]).await;

    let (s, body) = api_call(&app, "POST", "/api/products", Some(json!({ "price": 2.0 }))).await;
    assert_eq!(s, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].as_str().unwrap().contains("name"));

    let (s, _) = api_call(
        &app,
        "POST",
        "/api/products",
        Some(json!({ "name": "Tea", "price": "two" })),
    )
    .await;
    assert_eq!(s, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, list) = api_call(&app, "GET", "/api/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn collection_answers_with_trailing_slash() {
    let app = setup(&[]).await;

    let (s, created) = api_call(&app, "POST", "/api/products/", Some(burger())).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(created["id"], 1);

    let (s, list) = api_call(&app, "GET", "/api/products/", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn oversized_body_is_payload_too_large() {
    let app = setup(&[("MAX_BODY_SIZE", "64")]).await;

    let mut payload = burger();
    payload["description"] = json!("x".repeat(200));
    let (s, body) = api_call(&app, "POST", "/api/products", Some(payload)).await;

    assert_eq!(s, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn missing_content_type_is_unsupported_media_type() {
    let app = setup(&[]).await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/products")
        .body(Body::from(burger().to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (_, list) = api_call(&app, "GET", "/api/products", None).await;
    assert_eq!(list, json!([]));
}

// ── Read ──

#[tokio::test]
async fn get_missing_product_is_not_found() {
    let app = setup(&[]).await;

    let (s, body) = api_call(&app, "GET", "/api/products/42", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = setup(&[]).await;

    let (s, body) = api_call(&app, "GET", "/api/products/abc", None).await;
    assert_eq!(s, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn list_returns_exactly_the_persisted_rows() {
    let app = setup(&[]).await;

    for name in ["Tea", "Samosa", "Chips"] {
        let (s, _) = api_call(
            &app,
            "POST",
            "/api/products",
            Some(json!({ "name": name, "price": 3.0 })),
        )
        .await;
        assert_eq!(s, StatusCode::OK);
    }
    let (s, _) = api_call(&app, "DELETE", "/api/products/2", None).await;
    assert_eq!(s, StatusCode::OK);

    let (s, list) = api_call(&app, "GET", "/api/products", None).await;
    assert_eq!(s, StatusCode::OK);
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Tea", "Chips"]);

    let (_, again) = api_call(&app, "GET", "/api/products", None).await;
    assert_eq!(list, again);
}

// ── Update ──

#[tokio::test]
async fn update_replaces_every_field() {
    let app = setup(&[]).await;
    let (_, created) = api_call(&app, "POST", "/api/products", Some(burger())).await;
    let id = created["id"].as_i64().unwrap();

    let (s, updated) = api_call(
        &app,
        "PUT",
        &format!("/api/products/{}", id),
        Some(json!({ "name": "Nshima Plate XL", "price": 11.0, "is_available": false })),
    )
    .await;

    assert_eq!(s, StatusCode::OK);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Nshima Plate XL");
    assert_eq!(updated["price"], 11.0);
    assert_eq!(updated["description"], "");
    assert_eq!(updated["image_url"], "");
    assert_eq!(updated["category"], "Uncategorized");
    assert_eq!(updated["is_available"], false);

    let (_, fetched) = api_call(&app, "GET", &format!("/api/products/{}", id), None).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_missing_product_is_not_found() {
    let app = setup(&[]).await;

    let (s, _) = api_call(&app, "PUT", "/api/products/7", Some(burger())).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_onto_another_products_name_is_rejected() {
    let app = setup(&[]).await;
    let (_, first) = api_call(&app, "POST", "/api/products", Some(json!({ "name": "A", "price": 1.0 }))).await;
    let (_, second) = api_call(&app, "POST", "/api/products", Some(json!({ "name": "B", "price": 2.0 }))).await;

    let (s, body) = api_call(
        &app,
        "PUT",
        &format!("/api/products/{}", second["id"]),
        Some(json!({ "name": "A", "price": 2.0 })),
    )
    .await;
    assert_eq!(s, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Product name already registered");

    let (_, unchanged) = api_call(&app, "GET", &format!("/api/products/{}", second["id"]), None).await;
    assert_eq!(unchanged["name"], "B");
    let (_, kept) = api_call(&app, "GET", &format!("/api/products/{}", first["id"]), None).await;
    assert_eq!(kept["name"], "A");
}

// ── Delete ──

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = setup(&[]).await;
    let (_, created) = api_call(&app, "POST", "/api/products", Some(burger())).await;
    let uri = format!("/api/products/{}", created["id"]);

    let (s, body) = api_call(&app, "DELETE", &uri, None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (s, _) = api_call(&app, "GET", &uri, None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);

    let (s, _) = api_call(&app, "DELETE", &uri, None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);
}

// ── Mock endpoints ──

#[tokio::test]
async fn mock_root_reports_running() {
    let app = setup(&[]).await;

    let (s, body) = api_call(&app, "GET", "/", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["message"], "Mpepo Kitchen API is running!");
}

#[tokio::test]
async fn mock_lists_three_hardcoded_products() {
    let app = setup(&[]).await;

    let (s, list) = api_call(&app, "GET", "/products", None).await;
    assert_eq!(s, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 3);
    assert_eq!(list[0]["name"], "Chicken Burger");
    assert_eq!(list[1]["price"], 15.99);
    assert_eq!(list[2]["category"], "Sides");
}

#[tokio::test]
async fn mock_is_separate_from_persistent_catalog() {
    let app = setup(&[]).await;

    let (s, _) = api_call(&app, "POST", "/api/products", Some(burger())).await;
    assert_eq!(s, StatusCode::OK);

    let (_, mock) = api_call(&app, "GET", "/products", None).await;
    assert_eq!(mock.as_array().unwrap().len(), 3);

    let (s, _) = api_call(&app, "POST", "/products", Some(burger())).await;
    assert_eq!(s, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn mock_missing_id_returns_error_object_with_ok_status() {
    let app = setup(&[]).await;

    let (s, found) = api_call(&app, "GET", "/products/2", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(found["name"], "Vegetable Pizza");

    let (s, body) = api_call(&app, "GET", "/products/99", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Product not found" }));
}

#[tokio::test]
async fn mock_endpoints_can_be_disabled() {
    let app = setup(&[("MOCK_API_ENABLED", "false")]).await;

    let (s, _) = api_call(&app, "GET", "/products", None).await;
    assert_eq!(s, StatusCode::NOT_FOUND);

    let (s, _) = api_call(&app, "GET", "/api/products", None).await;
    assert_eq!(s, StatusCode::OK);
}

// ── Health & CORS ──

#[tokio::test]
async fn health_probes_report_storage() {
    let app = setup(&[]).await;

    let (s, body) = api_call(&app, "GET", "/health", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (s, body) = api_call(&app, "GET", "/health/ready", None).await;
    assert_eq!(s, StatusCode::OK);
    assert_eq!(body["storage"], "memory");
}

#[tokio::test]
async fn default_cors_echoes_any_origin_with_credentials() {
    let app = setup(&[]).await;

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/products")
        .header(header::ORIGIN, "http://flutter.local:5000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    let headers = resp.headers();
    assert_eq!(
        headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://flutter.local:5000"
    );
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn configured_cors_rejects_unknown_origin() {
    let app = setup(&[("CORS_ALLOWED_ORIGINS", "https://kitchen.example")]).await;

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/products")
        .header(header::ORIGIN, "https://evil.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();

    assert!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
