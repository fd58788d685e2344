//! HTTP surface: Telegram webhook, synchronous web chat and status probes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::agent::LeadAgent;
use crate::channels::Channel;
use crate::channels::telegram::parse_update;
use crate::conversation::OutboundMessage;

/// Shared state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<LeadAgent>,
    /// Where webhook replies go. `None` when no bot token is configured.
    pub telegram: Option<Arc<dyn Channel>>,
    pub company_name: String,
}

/// Body of `POST /web-chat`.
#[derive(Debug, Deserialize)]
pub struct WebChatRequest {
    pub session_id: String,
    pub message: String,
}

/// Reply of `POST /web-chat`: the messages produced by one input.
#[derive(Debug, Serialize, Deserialize)]
pub struct WebChatResponse {
    pub messages: Vec<OutboundMessage>,
}

/// GET /
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": format!("{} bot is running", state.company_name),
    }))
}

/// GET /health
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "lead-assist" }))
}

/// POST /webhook
///
/// Always acknowledges with `{"ok": true}` so Telegram does not redeliver.
/// Payloads without a chat id are ignored.
async fn webhook(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let ack = Json(json!({ "ok": true }));

    let update: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed webhook payload");
            return ack;
        }
    };

    let Some(inbound) = parse_update(&update) else {
        tracing::debug!("Webhook update without chat id, ignoring");
        return ack;
    };

    let reply = state.agent.process(&inbound.session_id, &inbound.text).await;

    match &state.telegram {
        Some(channel) => {
            if let Err(e) = channel.send(&inbound.session_id, &reply).await {
                tracing::error!(session_id = %inbound.session_id, error = %e, "Failed to send reply");
            }
        }
        None => {
            tracing::warn!(
                session_id = %inbound.session_id,
                "Webhook update received but no Telegram channel is configured"
            );
        }
    }

    ack
}

/// POST /web-chat
async fn web_chat(
    State(state): State<AppState>,
    Json(req): Json<WebChatRequest>,
) -> impl IntoResponse {
    if req.session_id.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "session_id must not be empty" })),
        )
            .into_response();
    }

    let reply = state.agent.process(&req.session_id, &req.message).await;
    Json(WebChatResponse {
        messages: vec![reply],
    })
    .into_response()
}

/// Build the application router with permissive CORS and request tracing.
pub fn app_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .route("/web-chat", post(web_chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrandConfig;
    use crate::conversation::ConversationEngine;
    use crate::error::ChannelError;
    use crate::locale::Catalog;
    use crate::store::{LibSqlBackend, SessionStore};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    /// Captures replies instead of calling Telegram.
    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<(String, OutboundMessage)>>,
    }

    #[async_trait]
    impl Channel for RecordingChannel {
        fn name(&self) -> &str {
            "recording"
        }

        async fn send(
            &self,
            session_id: &str,
            message: &OutboundMessage,
        ) -> Result<(), ChannelError> {
            self.sent
                .lock()
                .await
                .push((session_id.to_string(), message.clone()));
            Ok(())
        }

        async fn health_check(&self) -> Result<(), ChannelError> {
            Ok(())
        }
    }

    async fn setup() -> (Router, Arc<RecordingChannel>, Arc<LibSqlBackend>) {
        let store = Arc::new(LibSqlBackend::new_memory().await.unwrap());
        let catalog = Arc::new(Catalog::new(&BrandConfig::default()).unwrap());
        let agent = Arc::new(LeadAgent::new(
            store.clone(),
            ConversationEngine::new(catalog),
        ));
        let channel = Arc::new(RecordingChannel::default());
        let state = AppState {
            agent,
            telegram: Some(channel.clone()),
            company_name: "AMHR Marketing".to_string(),
        };
        (app_routes(state), channel, store)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn root_reports_running() {
        let (app, _, _) = setup().await;
        let resp = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["message"], "AMHR Marketing bot is running");
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, _, _) = setup().await;
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(resp).await;
        assert_eq!(json, json!({ "status": "ok", "service": "lead-assist" }));
    }

    #[tokio::test]
    async fn web_chat_returns_single_message() {
        let (app, _, _) = setup().await;
        let resp = app
            .oneshot(post_json(
                "/web-chat",
                json!({ "session_id": "web-1", "message": "/start" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["options"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn web_chat_rejects_empty_session() {
        let (app, _, _) = setup().await;
        let resp = app
            .oneshot(post_json(
                "/web-chat",
                json!({ "session_id": " ", "message": "hi" }),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn web_chat_missing_fields_is_client_error() {
        let (app, _, _) = setup().await;
        let resp = app
            .oneshot(post_json("/web-chat", json!({ "message": "hi" })))
            .await
            .unwrap();
        assert!(resp.status().is_client_error());
    }

    #[tokio::test]
    async fn webhook_processes_and_replies() {
        let (app, channel, store) = setup().await;
        let resp = app
            .oneshot(post_json(
                "/webhook",
                json!({ "update_id": 1, "message": { "chat": { "id": 123 }, "text": "EN" } }),
            ))
            .await
            .unwrap();
        assert_eq!(body_json(resp).await, json!({ "ok": true }));

        let sent = channel.sent.lock().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "123");
        assert!(sent[0].1.text.contains("Full Name"));

        let record = store.load("123").await.unwrap();
        assert_eq!(record.step, crate::conversation::Step::AwaitingName);
    }

    #[tokio::test]
    async fn webhook_without_chat_id_is_noop() {
        let (app, channel, _) = setup().await;
        let resp = app
            .oneshot(post_json("/webhook", json!({ "update_id": 2 })))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, json!({ "ok": true }));
        assert!(channel.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn webhook_malformed_body_is_acknowledged() {
        let (app, channel, _) = setup().await;
        let req = Request::builder()
            .method("POST")
            .uri("/webhook")
            .body(Body::from("not json"))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(body_json(resp).await, json!({ "ok": true }));
        assert!(channel.sent.lock().await.is_empty());
    }

    #[tokio::test]
    async fn cors_preflight_is_allowed() {
        let (app, _, _) = setup().await;
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/web-chat")
            .header("origin", "https://example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
