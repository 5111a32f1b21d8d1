//! `HttpFetcher` against a local page server
//!
//! Each test binds an axum app on an ephemeral port that serves a content
//! page, an error page and a page that stalls past the client timeout.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{response::Html, routing::get, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower::ServiceExt;
use truthguard_classifiers::{LogitModel, TextTokenizer, TokenizerConfig, TruthClassifier};
use truthguard_core::{Error, Result, TokenizedInput};
use truthguard_server::{
    create_router, AppState, CorsConfig, FetchConfig, HttpFetcher, InferenceService, TextFetcher,
};
use url::Url;

const ARTICLE_PAGE: &str = r#"<html><head><script>track()</script></head><body>
<nav>Home | About</nav>
<article><h1>Climate change</h1><p>is real.</p></article>
<footer>Copyright</footer>
</body></html>"#;

const STALL: Duration = Duration::from_secs(3);

async fn spawn_page_server() -> SocketAddr {
    let app = Router::new()
        .route("/article", get(|| async { Html(ARTICLE_PAGE) }))
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(STALL).await;
                Html("<article>too late</article>")
            }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn page_url(addr: SocketAddr, path: &str) -> Url {
    Url::parse(&format!("http://{}{}", addr, path)).unwrap()
}

fn fetcher(timeout_secs: u64) -> HttpFetcher {
    HttpFetcher::new(&FetchConfig {
        timeout_secs,
        ..Default::default()
    })
    .unwrap()
}

fn upstream_message(err: Error) -> String {
    match err {
        Error::UpstreamFetch(msg) => msg,
        other => panic!("Expected UpstreamFetch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_returns_article_text() {
    let addr = spawn_page_server().await;

    let text = fetcher(5).fetch(&page_url(addr, "/article")).await.unwrap();
    assert_eq!(text, "Climate change is real.");
}

#[tokio::test]
async fn test_fetch_timeout_names_the_cause() {
    let addr = spawn_page_server().await;

    let start = Instant::now();
    let err = fetcher(1)
        .fetch(&page_url(addr, "/slow"))
        .await
        .unwrap_err();

    assert!(start.elapsed() < STALL, "timeout did not fire");
    let msg = upstream_message(err);
    assert!(msg.contains("timed out"), "{}", msg);
}

#[tokio::test]
async fn test_fetch_non_success_status() {
    let addr = spawn_page_server().await;

    let err = fetcher(5)
        .fetch(&page_url(addr, "/broken"))
        .await
        .unwrap_err();

    let msg = upstream_message(err);
    assert!(msg.contains("500"), "{}", msg);
}

#[tokio::test]
async fn test_fetch_connection_refused_keeps_source_chain() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let err = fetcher(5)
        .fetch(&page_url(addr, "/article"))
        .await
        .unwrap_err();

    let msg = upstream_message(err);
    assert!(msg.to_lowercase().contains("refused"), "{}", msg);
}

/// Constant-logit model counting its calls
struct FixedModel {
    call_count: AtomicU32,
}

impl LogitModel for FixedModel {
    fn forward(&self, _input: &TokenizedInput) -> Result<f32> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(1.5)
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

fn router_with_http_fetcher(model: Arc<FixedModel>, timeout_secs: u64) -> Router {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../truthguard-classifiers/tests/fixtures/tokenizer.json");
    let tokenizer = Arc::new(TextTokenizer::from_file(path, &TokenizerConfig::default()).unwrap());

    let classifier = TruthClassifier::new(tokenizer, model);
    let fetcher: Arc<dyn TextFetcher> = Arc::new(fetcher(timeout_secs));
    let state = AppState::new(InferenceService::new(classifier, fetcher), None);
    create_router(state, &CorsConfig::default())
}

async fn predict_url(router: Router, url: &Url) -> (StatusCode, Value) {
    let body = serde_json::json!({ "url": url.as_str() }).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_predict_url_over_http() {
    let addr = spawn_page_server().await;
    let model = Arc::new(FixedModel {
        call_count: AtomicU32::new(0),
    });

    let router = router_with_http_fetcher(model.clone(), 5);
    let (status, body) = predict_url(router, &page_url(addr, "/article")).await;

    assert_eq!(status, StatusCode::OK);
    let p = body["probability"].as_f64().unwrap();
    assert!((p - 0.8175744761936437).abs() < 1e-9, "{}", p);
    assert_eq!(model.call_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_predict_url_timeout_over_http() {
    let addr = spawn_page_server().await;
    let model = Arc::new(FixedModel {
        call_count: AtomicU32::new(0),
    });

    let router = router_with_http_fetcher(model.clone(), 1);
    let (status, body) = predict_url(router, &page_url(addr, "/slow")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("scrape error:"), "{}", detail);
    assert!(detail.contains("timed out"), "{}", detail);
    assert_eq!(model.call_count.load(Ordering::SeqCst), 0);
}
