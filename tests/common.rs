use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use telegram_sender::adapters::telegram::TelegramDispatcher;
use telegram_sender::services::broadcast_service::BroadcastService;
use tokio::net::TcpListener;

pub const TEST_TOKEN: &str = "123456:test-token";

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("telegram_sender=debug".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().init();
    });
}

/// A stand-in for the Bot API whose answer depends on the `chat_id` it receives.
///
/// - `@bad`: `400 {"ok":false,"error_code":400,"description":"Bad Request"}`
/// - `@blocked`: `403` with the "bot was blocked" error
/// - `@float-code`: `400 {"ok":false,"error_code":400.0,"description":"Bad Request"}`
/// - `@html`: `502` with an HTML body
/// - `@no-ok`: `502 {"error_code":502,"description":"Bad Gateway"}`
/// - `@null`: `200` with the JSON body `null`
/// - `@ok-500`: `500 {"ok":true}`
/// - `@slow`: success after 200ms
/// - anything else: `200 {"ok":true,"result":{...}}`
///
/// A token other than [`TEST_TOKEN`] gets `401 Unauthorized` for every chat.
#[derive(Debug)]
pub struct FakeBotApi {
    pub base_url: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl FakeBotApi {
    pub async fn spawn() -> Self {
        setup_tracing();
        let received = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().route("/{bot}/sendMessage", post(send_message)).with_state(Arc::clone(&received));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url: format!("http://{addr}"), received }
    }

    /// Request bodies received so far, in arrival order.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn service(&self) -> BroadcastService {
        BroadcastService::new(Arc::new(TelegramDispatcher::default()), self.base_url.as_str())
    }
}

async fn send_message(
    State(received): State<Arc<Mutex<Vec<Value>>>>,
    Path(bot): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    received.lock().unwrap().push(body.clone());

    if bot != format!("bot{TEST_TOKEN}") {
        return rejection(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    match body["chat_id"].as_str() {
        Some("@bad") => rejection(StatusCode::BAD_REQUEST, "Bad Request"),
        Some("@blocked") => rejection(StatusCode::FORBIDDEN, "Forbidden: bot was blocked by the user"),
        Some("@float-code") => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error_code": 400.0, "description": "Bad Request" })),
        )
            .into_response(),
        Some("@no-ok") => {
            (StatusCode::BAD_GATEWAY, Json(json!({ "error_code": 502, "description": "Bad Gateway" }))).into_response()
        }
        Some("@html") => (StatusCode::BAD_GATEWAY, "<html><body>502 Bad Gateway</body></html>").into_response(),
        Some("@null") => (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], "null").into_response(),
        Some("@ok-500") => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "ok": true }))).into_response(),
        Some("@slow") => {
            tokio::time::sleep(Duration::from_millis(200)).await;
            delivered(&body)
        }
        _ => delivered(&body),
    }
}

fn rejection(status: StatusCode, description: &str) -> Response {
    (status, Json(json!({ "ok": false, "error_code": status.as_u16(), "description": description }))).into_response()
}

fn delivered(body: &Value) -> Response {
    Json(json!({
        "ok": true,
        "result": { "message_id": 1, "chat": { "id": body["chat_id"] }, "text": body["text"] }
    }))
    .into_response()
}

/// A base URL nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
