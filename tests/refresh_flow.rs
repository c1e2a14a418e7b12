use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use actix_web::{
    http::StatusCode, test, web, App, HttpResponse, HttpServer,
};
use serde_json::{json, Value};
use url::Url;

use oi_monitor::{
    configuration::{AppState, Config, State},
    provider::HTTP,
    renderer::{PollingRenderer, RefreshOutcome},
    server,
};

struct Backend {
    update: Mutex<(StatusCode, String)>,
    coins: Mutex<(StatusCode, String)>,
    coins_calls: AtomicUsize,
}

impl Backend {
    fn new() -> Backend {
        Backend {
            update: Mutex::new((
                StatusCode::OK,
                json!({"status": "success", "message": "update triggered"})
                    .to_string(),
            )),
            coins: Mutex::new((StatusCode::OK, coins_body().to_string())),
            coins_calls: AtomicUsize::new(0),
        }
    }

    fn set_update(&self, status: StatusCode, body: Value) {
        *self.update.lock().unwrap() = (status, body.to_string());
    }

    fn set_coins_raw(&self, status: StatusCode, body: &str) {
        *self.coins.lock().unwrap() = (status, body.to_owned());
    }
}

// Shaped like the backend's real answer: list-form changes, extra fields.
fn coins_body() -> Value {
    json!({
        "status": "success",
        "message": "ok",
        "cache_update_time": "2026-10-19 08:00:00",
        "data": [
            {
                "symbol": "BTCUSDT",
                "current_open_interest": 2500000.0,
                "current_open_interest_formatted": "2.50M",
                "changes": [
                    {"interval": "5m", "ratio": 0.3},
                    {"interval": "15m", "ratio": 1.25},
                    {"interval": "1h", "ratio": -0.5}
                ]
            },
            {
                "symbol": "ETHUSDT",
                "current_open_interest": 1500.0,
                "changes": {"15m": 0.0, "30m": null}
            }
        ]
    })
}

async fn update(backend: web::Data<Arc<Backend>>) -> HttpResponse {
    let (status, body) = backend.update.lock().unwrap().clone();
    HttpResponse::build(status)
        .content_type("application/json")
        .body(body)
}

async fn coins(backend: web::Data<Arc<Backend>>) -> HttpResponse {
    backend.coins_calls.fetch_add(1, Ordering::SeqCst);
    let (status, body) = backend.coins.lock().unwrap().clone();
    HttpResponse::build(status)
        .content_type("application/json")
        .body(body)
}

fn start_backend(backend: Arc<Backend>) -> SocketAddr {
    let data = web::Data::new(backend);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .route("/api/update", web::get().to(update))
            .route("/api/coins", web::get().to(coins))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.disable_signals().run());
    addr
}

fn config(addr: SocketAddr) -> Config {
    Config {
        api_host: Url::parse(&format!("http://{}/", addr)).unwrap(),
        server_host: String::from("127.0.0.1"),
        port: 0,
        allowed_origins: vec![String::from("*")],
        static_dir: String::from("static"),
        refresh_interval: 300,
        message_timeout: 3000,
        timeout: Some(5),
    }
}

fn renderer(addr: SocketAddr) -> PollingRenderer<HTTP> {
    let http = HTTP::new(config(addr)).unwrap();
    PollingRenderer::new(http, Duration::from_secs(3))
}

#[actix_web::test]
async fn refresh_fetches_and_renders_backend_data() {
    let backend = Arc::new(Backend::new());
    let renderer = renderer(start_backend(Arc::clone(&backend)));

    let outcome = renderer.trigger_refresh(false).await;

    assert_eq!(outcome, RefreshOutcome::Updated { records: 2 });

    let page = renderer.page();
    let rows = page.rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].cells[0].text, "BTCUSDT");
    assert_eq!(rows[0].cells[1].text, "2.50M");
    assert_eq!(rows[0].cells[2].text, "1.25");
    assert_eq!(rows[0].cells[4].text, "-0.50");
    assert_eq!(rows[1].cells[1].text, "1.50K");
    assert_eq!(rows[1].cells[2].text, "0.00");
    assert_eq!(rows[1].cells[3].text, "N/A");
    assert!(page.to_html().contains("server data: 2026-10-19 08:00:00"));
}

#[actix_web::test]
async fn rejected_update_skips_fetch_and_keeps_cache() {
    let backend = Arc::new(Backend::new());
    let renderer = renderer(start_backend(Arc::clone(&backend)));

    renderer.trigger_refresh(false).await;
    backend.set_update(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"status": "error", "message": "binance unreachable"}),
    );

    let outcome = renderer.trigger_refresh(false).await;

    assert_eq!(
        outcome,
        RefreshOutcome::Failed {
            error: String::from("Update rejected: binance unreachable"),
            served_stale: true,
        }
    );
    assert_eq!(backend.coins_calls.load(Ordering::SeqCst), 1);
    assert_eq!(renderer.state().len().await, 2);
    assert_eq!(renderer.page().rows().len(), 2);
    assert!(!renderer.state().is_refreshing());
}

#[actix_web::test]
async fn malformed_body_is_a_failure() {
    let backend = Arc::new(Backend::new());
    backend.set_coins_raw(StatusCode::OK, "<html>bad gateway</html>");
    let renderer = renderer(start_backend(Arc::clone(&backend)));

    let outcome = renderer.trigger_refresh(false).await;

    assert!(matches!(
        outcome,
        RefreshOutcome::Failed {
            served_stale: false,
            ..
        }
    ));
    assert!(renderer.state().is_empty().await);
    assert_eq!(
        renderer.page().message().map(|m| m.text.clone()),
        Some(String::from("Failed to load data"))
    );
}

#[actix_web::test]
async fn unreachable_backend_is_a_failure() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let renderer = renderer(addr);
    let outcome = renderer.trigger_refresh(true).await;

    assert!(matches!(outcome, RefreshOutcome::Failed { .. }));
    assert!(renderer
        .page()
        .message()
        .unwrap()
        .text
        .starts_with("Data update failed: "));
    assert!(!renderer.state().is_refreshing());
    assert!(!renderer.page().is_loading());
}

#[actix_web::test]
async fn routes_serve_page_filter_and_status() {
    let backend = Arc::new(Backend::new());
    let addr = start_backend(Arc::clone(&backend));
    let state = AppState::new(State::new(config(addr)).unwrap());

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(server::routes),
    )
    .await;

    let req = test::TestRequest::post().uri("/refresh").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<td>BTCUSDT</td>"));
    assert!(html.contains("Data updated"));

    let req = test::TestRequest::get().uri("/filter?symbol=eth").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<td>ETHUSDT</td>"));
    assert!(!html.contains("<td>BTCUSDT</td>"));
    assert!(html.contains(r#"value="eth""#));

    let req = test::TestRequest::get().uri("/api/status").to_request();
    let status: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(status["records"], 2);
    assert_eq!(status["shown"], 1);
    assert_eq!(status["refreshing"], false);

    let req = test::TestRequest::get().uri("/api/cached-coins").to_request();
    let cached: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(cached.as_array().map(Vec::len), Some(2));

    let req = test::TestRequest::post().uri("/api/refresh").to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome["outcome"], "updated");
    assert_eq!(outcome["records"], 2);

    let req = test::TestRequest::get().uri("/api/version").to_request();
    let version: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(version["name"], "oi-monitor");
}
