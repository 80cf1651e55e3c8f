//! Webhook HTTP endpoint.
//!
//! Telegram POSTs updates here. Every outcome answers `200 OK` so the
//! platform never redelivers an update; the JSON body says whether the
//! update was handled (`{"ok": true}`) or failed (`{"ok": false, "error"}`).

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use tracing::{debug, warn};

use super::dispatcher::{Ack, AppState, handle_message};
use super::update;
use crate::texts;

/// Header Telegram uses to echo the webhook secret.
pub const SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

#[derive(Clone)]
struct WebhookState {
    app: AppState,
    secret: Option<Arc<str>>,
}

/// Build the router: `path` accepts updates, `/` answers liveness checks.
pub fn router(app: AppState, path: &str, secret: Option<String>) -> Router {
    let state = WebhookState {
        app,
        secret: secret.map(Arc::from),
    };

    let router = Router::new().route(path, post(receive).fallback(alive));
    let router = if path == "/" {
        router
    } else {
        router.route("/", get(alive))
    };

    router.with_state(state)
}

async fn alive() -> &'static str {
    texts::ALIVE
}

async fn receive(State(state): State<WebhookState>, headers: HeaderMap, body: Bytes) -> Response {
    if let Some(expected) = state.secret.as_deref() {
        let presented = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
        if presented != Some(expected) {
            warn!("Rejected webhook call with missing or wrong secret token");
            return Json(Ack::failed("unauthorized")).into_response();
        }
    }

    let Some(msg) = update::decode(&body) else {
        debug!("Ignoring non-actionable update ({} bytes)", body.len());
        return "OK".into_response();
    };

    Json(handle_message(&state.app, &msg).await).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::bot::dispatcher::tests::{SAMPLE, SENDER, seeded_store, state_with};
    use crate::database::memory::MemoryStore;

    fn update_body(text: &str) -> Body {
        Body::from(
            json!({
                "update_id": 1,
                "message": {
                    "chat": { "id": SENDER },
                    "from": { "id": SENDER, "first_name": "Budi", "username": "budis" },
                    "text": text
                }
            })
            .to_string(),
        )
    }

    async fn call(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn post(body: Body) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/webhook")
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    async fn test_non_post_is_alive() {
        let (app, store, _) = state_with(MemoryStore::new(), None);

        for (method, uri) in [(Method::GET, "/api/webhook"), (Method::PUT, "/api/webhook"), (Method::GET, "/")] {
            let request = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
            let (status, body) = call(router(app.clone(), "/api/webhook", None), request).await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, texts::ALIVE);
        }
        assert_eq!(store.reads(), 0);
    }

    #[tokio::test]
    async fn test_empty_and_textless_updates_are_acknowledged() {
        let (app, store, messenger) = state_with(MemoryStore::new(), None);

        for body in [Body::empty(), Body::from("{}"), Body::from("{\"message\":{\"chat\":{\"id\":1},\"from\":{\"id\":1}}}")] {
            let (status, text) = call(router(app.clone(), "/api/webhook", None), post(body)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(text, "OK");
        }

        assert_eq!(store.reads(), 0);
        assert!(messenger.sent().is_empty());
    }

    #[tokio::test]
    async fn test_submission_round_trip() {
        let (app, store, messenger) = state_with(seeded_store(true), None);

        let (status, body) = call(router(app, "/api/webhook", None), post(update_body(SAMPLE))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "ok": true }));
        assert_eq!(store.appended().len(), 1);
        assert_eq!(messenger.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_internal_error_still_returns_ok_status() {
        let store = seeded_store(true);
        store.fail_appends();
        let (app, _, _) = state_with(store, None);

        let (status, body) = call(router(app, "/api/webhook", None), post(update_body(SAMPLE))).await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["ok"], json!(false));
        assert!(body["error"].as_str().unwrap().contains("append refused"));
    }

    #[tokio::test]
    async fn test_secret_token_enforced() {
        let (app, store, _) = state_with(seeded_store(true), None);
        let router = router(app, "/api/webhook", Some("s3cret".into()));

        let (status, body) = call(router.clone(), post(update_body("/start"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["ok"], json!(false));

        let mut request = post(update_body("/daftar"));
        request
            .headers_mut()
            .insert(SECRET_HEADER, "s3cret".parse().unwrap());
        let (_, body) = call(router, request).await;
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({ "ok": true }));
        assert_eq!(store.reads(), 1);
    }
}
