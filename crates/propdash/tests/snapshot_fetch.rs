use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::routing::get;
use axum::Router;
use propdash::config::BackendConfig;
use propdash::portfolio::{
    fetch_snapshot, portfolio_router, EstimationPolicy, FetchError, PortfolioBackend,
    PortfolioService, PortfolioSource, RestBackend, FULL_OUTAGE_MESSAGE,
};
use serde_json::{json, Value};
use tokio::sync::Barrier;
use tower::ServiceExt;

#[derive(Default)]
struct StubBackend {
    responses: HashMap<PortfolioSource, Result<Value, FetchError>>,
}

impl StubBackend {
    fn with(mut self, source: PortfolioSource, response: Result<Value, FetchError>) -> Self {
        self.responses.insert(source, response);
        self
    }

    fn offline() -> Self {
        PortfolioSource::ordered()
            .into_iter()
            .fold(Self::default(), |backend, source| {
                backend.with(
                    source,
                    Err(FetchError::Other("TypeError: Failed to fetch".to_string())),
                )
            })
    }
}

#[async_trait]
impl PortfolioBackend for StubBackend {
    async fn fetch_source(&self, source: PortfolioSource) -> Result<Value, FetchError> {
        self.responses
            .get(&source)
            .cloned()
            .unwrap_or(Ok(Value::Null))
    }
}

#[tokio::test]
async fn healthy_backend_produces_clean_snapshot() {
    let backend = StubBackend::default()
        .with(
            PortfolioSource::Properties,
            Ok(json!({ "results": [{ "status": "occupied", "rent": 1800 }] })),
        )
        .with(PortfolioSource::Tenants, Ok(json!([{ "rent": "$1,800" }])))
        .with(PortfolioSource::Tasks, Ok(json!({ "count": 2, "items": [{}, {}] })))
        .with(PortfolioSource::Reminders, Ok(json!([])));

    let snapshot = fetch_snapshot(&backend).await;

    assert_eq!(snapshot.properties.len(), 1);
    assert_eq!(snapshot.tasks.len(), 2);
    assert_eq!(snapshot.metrics.task_count, 2);
    assert_eq!(snapshot.metrics.financials.revenue, 3600.0);
    assert_eq!(snapshot.metrics.occupancy.rate, 100);
    assert!(snapshot.errors.is_empty());
    assert!(snapshot.failures.is_empty());
    assert_eq!(snapshot.error_summary, "");
}

#[tokio::test]
async fn partial_failures_keep_other_sources() {
    let backend = StubBackend::default()
        .with(PortfolioSource::Properties, Ok(json!([{ "status": "vacant" }])))
        .with(
            PortfolioSource::Tenants,
            Err(FetchError::Network {
                url: "http://backend/tenants/".to_string(),
                detail: "connection refused".to_string(),
            }),
        )
        .with(
            PortfolioSource::Tasks,
            Err(FetchError::Status {
                url: "http://backend/tasks/".to_string(),
                status: 500,
            }),
        );

    let snapshot = fetch_snapshot(&backend).await;

    assert_eq!(snapshot.metrics.property_count, 1);
    assert!(snapshot.tenants.is_empty());
    assert!(snapshot.tasks.is_empty());
    assert_eq!(
        snapshot.errors,
        vec![
            "tenants: Failed to fetch http://backend/tenants/: connection refused".to_string(),
            "tasks: Request failed with status 500".to_string(),
        ]
    );
    assert_eq!(
        snapshot.error_summary,
        "Live data for tenants is temporarily unavailable. Showing sample portfolio metrics for those sources. \
Issue loading tasks: Request failed with status 500."
    );
}

#[tokio::test]
async fn total_outage_still_resolves() {
    let snapshot = fetch_snapshot(&StubBackend::offline()).await;

    assert_eq!(snapshot.errors.len(), 4);
    assert_eq!(snapshot.errors[0], "properties: Failed to fetch");
    assert_eq!(snapshot.error_summary, FULL_OUTAGE_MESSAGE);
    assert_eq!(snapshot.metrics.property_count, 0);
    assert!(!snapshot.metrics.financials.estimated);
}

#[tokio::test]
async fn server_errors_behind_network_named_host_are_not_outages() {
    let backend = PortfolioSource::ordered()
        .into_iter()
        .fold(StubBackend::default(), |backend, source| {
            backend.with(
                source,
                Err(FetchError::Status {
                    url: format!("https://network-api.example.com/api/{}/", source.key()),
                    status: 500,
                }),
            )
        });

    let snapshot = fetch_snapshot(&backend).await;

    assert_ne!(snapshot.error_summary, FULL_OUTAGE_MESSAGE);
    assert!(snapshot
        .error_summary
        .starts_with("Issue loading properties: Request failed with status 500."));
    assert_eq!(snapshot.error_summary.matches("Issue loading").count(), 4);
}

struct RendezvousBackend {
    barrier: Barrier,
}

#[async_trait]
impl PortfolioBackend for RendezvousBackend {
    async fn fetch_source(&self, source: PortfolioSource) -> Result<Value, FetchError> {
        match tokio::time::timeout(Duration::from_secs(2), self.barrier.wait()).await {
            Ok(_) => Ok(json!([{ "source": source.key() }])),
            Err(_) => Err(FetchError::Other(format!(
                "{source} was never joined by the other requests"
            ))),
        }
    }
}

#[tokio::test]
async fn all_four_requests_are_in_flight_together() {
    let backend = RendezvousBackend {
        barrier: Barrier::new(4),
    };

    let snapshot = fetch_snapshot(&backend).await;

    assert!(snapshot.errors.is_empty(), "{:?}", snapshot.errors);
    assert_eq!(snapshot.properties.len(), 1);
    assert_eq!(snapshot.tenants.len(), 1);
    assert_eq!(snapshot.tasks.len(), 1);
    assert_eq!(snapshot.reminders.len(), 1);
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake backend runs");
    });
    format!("http://{addr}/api")
}

fn backend_config(base_url: String, api_token: Option<&str>) -> BackendConfig {
    BackendConfig {
        base_url,
        api_token: api_token.map(str::to_string),
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn rest_backend_reads_every_source_over_http() {
    let app = Router::new()
        .route(
            "/api/properties/",
            get(|headers: axum::http::HeaderMap| async move {
                let authorized = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    == Some("Bearer test-token");
                if authorized {
                    (
                        StatusCode::OK,
                        axum::Json(json!({ "results": [{ "status": "occupied", "monthly_rent": 1500 }] })),
                    )
                } else {
                    (StatusCode::UNAUTHORIZED, axum::Json(json!({ "detail": "auth" })))
                }
            }),
        )
        .route("/api/tenants/", get(|| async { axum::Json(json!([{ "rent": 1500 }])) }))
        .route(
            "/api/tasks/",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/api/reminders/", get(|| async { "not json" }));

    let base_url = serve(app).await;
    let backend = RestBackend::new(&backend_config(base_url, Some("test-token")))
        .expect("client builds");

    let snapshot = fetch_snapshot(&backend).await;

    assert_eq!(snapshot.properties.len(), 1);
    assert_eq!(snapshot.tenants.len(), 1);
    assert_eq!(snapshot.metrics.financials.revenue, 3000.0);
    assert_eq!(snapshot.failures.len(), 2);
    assert_eq!(snapshot.failures[0].key, "tasks");
    assert!(snapshot.failures[0].message.contains("status 500"));
    assert_eq!(snapshot.failures[1].key, "reminders");
    assert!(snapshot.failures[1].message.starts_with("Invalid response body"));
    assert!(!snapshot.failures[1].message.contains("127.0.0.1"));
    assert!(snapshot.error_summary.starts_with("Issue loading tasks:"));
}

#[tokio::test]
async fn unreachable_backend_reports_full_outage() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let backend = RestBackend::new(&backend_config(format!("http://{addr}/api"), None))
        .expect("client builds");
    let snapshot = fetch_snapshot(&backend).await;

    assert_eq!(snapshot.failures.len(), 4);
    assert_eq!(snapshot.error_summary, FULL_OUTAGE_MESSAGE);
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn router_serves_snapshot_and_metrics() {
    let service = Arc::new(PortfolioService::new(
        Arc::new(StubBackend::offline()),
        EstimationPolicy::default(),
    ));
    let app = portfolio_router(service);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/portfolio/snapshot")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["errorSummary"], json!(FULL_OUTAGE_MESSAGE));
    assert_eq!(body["metrics"]["propertyCount"], json!(0));
    assert!(body["generatedAt"].is_string());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/portfolio/metrics")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "properties": [{}, {}], "tenants": { "count": 1, "items": [{}] } })
                        .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["propertyCount"], json!(2));
    assert_eq!(body["financials"]["estimated"], json!(true));
    assert_eq!(body["formatted"]["revenue"], json!("$1,500"));
    assert_eq!(body["formatted"]["net"], json!("$400"));
}
