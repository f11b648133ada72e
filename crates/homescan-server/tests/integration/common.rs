use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::http::{StatusCode, header};
use axum::routing::{get, post};

use homescan_server::config::ServerConfig;
use homescan_server::routes;
use homescan_server::state::AppState;

pub const TEST_AUTH_TOKEN: &str = "test-secret-token";

pub const FINTECH_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Ledgerly</title><style>h1 { color: navy }</style></head>
<body>
  <h1>Ledgerly</h1>
  <p>We are a fintech company based in Berlin with 50 employees.</p>
  <script>console.log("tracking")</script>
</body>
</html>"#;

pub const SWISS_PAGE: &str =
    "<html><body><h1>Uhrwerk</h1><p>Family watchmaker in Zürich since 1921.</p></body></html>";

pub const BLANK_PAGE: &str = "<html><body><h1>Welcome!</h1><p>Coming soon.</p></body></html>";

/// Test app plus hit counters for the stub upstream site and model endpoint.
pub struct TestApp {
    pub router: Router,
    pub site: SocketAddr,
    pub site_hits: Arc<AtomicUsize>,
    pub model_hits: Arc<AtomicUsize>,
}

impl TestApp {
    pub fn site_url(&self, path: &str) -> String {
        format!("http://{}{path}", self.site)
    }

    pub fn site_hits(&self) -> usize {
        self.site_hits.load(Ordering::SeqCst)
    }

    pub fn model_hits(&self) -> usize {
        self.model_hits.load(Ordering::SeqCst)
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().expect("Failed to read stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub server crashed");
    });
    addr
}

/// A tiny website with an HTML homepage and a few failure modes.
async fn spawn_site(hits: Arc<AtomicUsize>) -> SocketAddr {
    let counted = |hits: Arc<AtomicUsize>, status: StatusCode, ct: &'static str, body: &'static str| {
        get(move || {
            hits.fetch_add(1, Ordering::SeqCst);
            async move { (status, [(header::CONTENT_TYPE, ct)], body) }
        })
    };

    let empty_hits = hits.clone();
    let app = Router::new()
        .route(
            "/",
            counted(hits.clone(), StatusCode::OK, "text/html; charset=utf-8", FINTECH_PAGE),
        )
        .route(
            "/swiss",
            counted(hits.clone(), StatusCode::OK, "text/html; charset=utf-8", SWISS_PAGE),
        )
        .route(
            "/blank",
            counted(hits.clone(), StatusCode::OK, "text/html", BLANK_PAGE),
        )
        .route(
            "/data.json",
            counted(hits.clone(), StatusCode::OK, "application/json", "{\"ok\":true}"),
        )
        .route(
            "/outage",
            counted(hits.clone(), StatusCode::OK, "text/html", "<p>BROKEN</p>"),
        )
        .route(
            "/gone",
            counted(hits.clone(), StatusCode::GONE, "text/html", "<p>gone</p>"),
        )
        .route(
            "/empty",
            get(move || {
                empty_hits.fetch_add(1, Ordering::SeqCst);
                async { StatusCode::NO_CONTENT }
            }),
        );

    serve(app).await
}

/// An OpenAI-compatible endpoint that "reads" the system prompts: it reports
/// the fintech profile when the page text mentions it and empty fields
/// otherwise.
async fn spawn_model(hits: Arc<AtomicUsize>) -> SocketAddr {
    let app = Router::new().route(
        "/chat/completions",
        post(move |axum::Json(body): axum::Json<serde_json::Value>| {
            hits.fetch_add(1, Ordering::SeqCst);
            async move {
                let prompt = body["messages"].to_string();
                let profile = if prompt.contains("fintech company based in Berlin") {
                    serde_json::json!({
                        "industry": "Fintech",
                        "company_size": "medium",
                        "location": "Berlin, Germany"
                    })
                } else if prompt.contains("Family watchmaker") {
                    serde_json::json!({
                        "industry": "Horlogerie",
                        "company_size": "small",
                        "location": "Zürich, Schweiz"
                    })
                } else if prompt.contains("BROKEN") {
                    return (
                        StatusCode::SERVICE_UNAVAILABLE,
                        axum::Json(serde_json::json!({"error": {"message": "overloaded"}})),
                    );
                } else {
                    serde_json::json!({"industry": "", "company_size": "", "location": ""})
                };
                (
                    StatusCode::OK,
                    axum::Json(serde_json::json!({
                        "choices": [{"message": {"role": "assistant", "content": profile.to_string()}}]
                    })),
                )
            }
        }),
    );

    serve(app).await
}

pub async fn setup_test_app() -> TestApp {
    let site_hits = Arc::new(AtomicUsize::new(0));
    let model_hits = Arc::new(AtomicUsize::new(0));
    let site = spawn_site(site_hits.clone()).await;
    let model = spawn_model(model_hits.clone()).await;

    let model_base_url = format!("http://{model}");
    let config = ServerConfig::from_lookup(|key: &str| {
        match key {
            "MODEL_NAME" => Some("stub-model".to_string()),
            "MODEL_API_KEY" => Some("stub-key".to_string()),
            "AUTHORIZATION_TOKEN" => Some(TEST_AUTH_TOKEN.to_string()),
            "MODEL_BASE_URL" => Some(model_base_url.clone()),
            "ALLOW_PRIVATE_URLS" => Some("true".to_string()),
            _ => None,
        }
    })
    .expect("Failed to build test config");

    let state = Arc::new(AppState::from_config(&config).expect("Failed to build app state"));

    TestApp {
        router: routes::router(state),
        site,
        site_hits,
        model_hits,
    }
}
