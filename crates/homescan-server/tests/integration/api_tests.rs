use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use homescan_core::NOT_MENTIONED;

use crate::common::{TEST_AUTH_TOKEN, setup_test_app};

fn scrape_request(auth: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let builder = Request::post("/scrape").header("content-type", "application/json");
    let builder = match auth {
        Some(value) => builder.header("authorization", value),
        None => builder,
    };
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn authorized(body: serde_json::Value) -> Request<Body> {
    scrape_request(Some(format!("Bearer {TEST_AUTH_TOKEN}").as_str()), body)
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_returns_200() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["message"], "API is running successfully");
}

#[tokio::test]
async fn openapi_document_is_public() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(
            Request::get("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert!(json["paths"]["/scrape"].is_object());
}

#[tokio::test]
async fn missing_authorization_returns_401_without_fetching() {
    let app = setup_test_app().await;
    let url = app.site_url("/");

    let response = app
        .router
        .clone()
        .oneshot(scrape_request(None, serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = json_body(response).await;
    assert_eq!(json["detail"], "Authorization header is missing.");
    assert_eq!(app.site_hits(), 0);
    assert_eq!(app.model_hits(), 0);
}

#[tokio::test]
async fn wrong_token_returns_401_without_fetching() {
    let app = setup_test_app().await;
    let url = app.site_url("/");

    for header in ["Bearer wrong-token", TEST_AUTH_TOKEN, "bearer test-secret-token"] {
        let response = app
            .router
            .clone()
            .oneshot(scrape_request(Some(header), serde_json::json!({ "url": url })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["detail"], "Invalid secret key.");
    }
    assert_eq!(app.site_hits(), 0);
}

#[tokio::test]
async fn scrape_returns_company_profile() {
    let app = setup_test_app().await;
    let url = app.site_url("/");

    let response = app
        .router
        .clone()
        .oneshot(authorized(serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    for field in ["industry", "company_size", "location"] {
        let value = json[field].as_str().unwrap();
        assert!(!value.is_empty());
        assert_ne!(value, NOT_MENTIONED);
    }
    assert_eq!(json["industry"], "Fintech");
    assert_eq!(json["location"], "Berlin, Germany");
    assert_eq!(app.site_hits(), 1);
    assert_eq!(app.model_hits(), 1);
}

#[tokio::test]
async fn non_ascii_values_are_escaped_on_the_wire_and_decode_intact() {
    let app = setup_test_app().await;
    let url = app.site_url("/swiss");

    let response = app
        .router
        .clone()
        .oneshot(authorized(serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_ascii());
    assert!(
        bytes
            .windows(br"Z\u00fcrich".len())
            .any(|w| w == br"Z\u00fcrich")
    );

    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["location"], "Zürich, Schweiz");
    assert_eq!(json["industry"], "Horlogerie");
}

#[tokio::test]
async fn page_without_information_returns_sentinels() {
    let app = setup_test_app().await;
    let url = app.site_url("/blank");

    let response = app
        .router
        .clone()
        .oneshot(authorized(serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(
        json,
        serde_json::json!({
            "industry": NOT_MENTIONED,
            "company_size": NOT_MENTIONED,
            "location": NOT_MENTIONED,
        })
    );
}

#[tokio::test]
async fn no_content_page_returns_204_with_detail() {
    let app = setup_test_app().await;
    let url = app.site_url("/empty");

    let response = app
        .router
        .clone()
        .oneshot(authorized(serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers()["x-error-detail"],
        "No content available at the URL."
    );
    assert_eq!(app.model_hits(), 0);
}

#[tokio::test]
async fn non_html_page_returns_415_without_model_call() {
    let app = setup_test_app().await;
    let url = app.site_url("/data.json");

    let response = app
        .router
        .clone()
        .oneshot(authorized(serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = json_body(response).await;
    assert_eq!(json["error"], "unsupported_media_type");
    assert_eq!(
        json["detail"],
        "Unsupported media type: application/json. The URL must point to an HTML page."
    );
    assert_eq!(app.site_hits(), 1);
    assert_eq!(app.model_hits(), 0);
}

#[tokio::test]
async fn upstream_http_error_returns_400() {
    let app = setup_test_app().await;
    let url = app.site_url("/gone");

    let response = app
        .router
        .clone()
        .oneshot(authorized(serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["detail"], "Error fetching URL.");
    assert_eq!(app.model_hits(), 0);
}

#[tokio::test]
async fn unreachable_host_returns_400_without_leaking_detail() {
    let app = setup_test_app().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);

    let response = app
        .router
        .oneshot(authorized(
            serde_json::json!({ "url": format!("http://{closed}/") }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "fetch_failed");
    assert_eq!(json["detail"], "Error fetching URL.");
}

#[tokio::test]
async fn malformed_url_returns_400() {
    let app = setup_test_app().await;

    for url in ["not a url", "example.com", "ftp://example.com/file"] {
        let response = app
            .router
            .clone()
            .oneshot(authorized(serde_json::json!({ "url": url })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "url: {url}");
        let json = json_body(response).await;
        assert_eq!(json["error"], "invalid_input");
    }
    assert_eq!(app.site_hits(), 0);
}

#[tokio::test]
async fn malformed_body_returns_400() {
    let app = setup_test_app().await;

    let response = app
        .router
        .oneshot(authorized(serde_json::json!({ "link": "https://example.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "invalid_input");
}

#[tokio::test]
async fn model_failure_returns_500_without_leaking_detail() {
    let app = setup_test_app().await;
    let url = app.site_url("/outage");

    let response = app
        .router
        .clone()
        .oneshot(authorized(serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = json_body(response).await;
    assert_eq!(json["error"], "extraction_failed");
    assert_eq!(json["detail"], "AI extraction failed");
    assert_eq!(app.model_hits(), 1);
}
