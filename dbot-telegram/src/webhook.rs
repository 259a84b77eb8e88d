//! Webhook receiver: decodes Telegram updates posted to `/webhook`, hands each message to the
//! handler chain on a spawned task, and acknowledges immediately so Telegram never re-delivers.

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use dbot_core::Message;
use handler_chain::HandlerChain;
use serde::Serialize;
use teloxide::{requests::Requester, types::Update};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, instrument, warn};

use crate::adapters::update_to_core;
use crate::config::TelegramConfig;

/// Path Telegram posts updates to.
pub const WEBHOOK_PATH: &str = "/webhook";
/// Body of the liveness endpoint.
pub const HEALTH_TEXT: &str = "Telegram DeepFloyd IF Bot is running!";

#[derive(Clone)]
struct WebhookState {
    chain: HandlerChain,
}

#[derive(Serialize)]
struct AckResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Builds the HTTP router: `GET /` liveness, `POST /webhook` updates, 405 for other methods on
/// the webhook path, 404 elsewhere.
pub fn webhook_router(chain: HandlerChain) -> Router {
    Router::new()
        .route("/", get(health))
        .route(
            WEBHOOK_PATH,
            post(receive_update).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(WebhookState { chain })
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    HEALTH_TEXT
}

async fn receive_update(State(state): State<WebhookState>, body: Bytes) -> Response {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, body_len = body.len(), "Rejected webhook body that is not a Telegram update");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("invalid update: {}", e),
                }),
            )
                .into_response();
        }
    };

    match update_to_core(&update) {
        Some(message) => {
            info!(
                update_id = update.id.0,
                user_id = message.user.id,
                chat_id = message.chat.id,
                message_content = %message.content,
                "Received message"
            );
            dispatch(state.chain.clone(), message);
        }
        None => debug!(update_id = update.id.0, "Ignoring non-message update"),
    }

    (StatusCode::OK, Json(AckResponse { status: "ok" })).into_response()
}

/// Runs the chain on its own task so the webhook response does not wait for generation.
fn dispatch(chain: HandlerChain, message: Message) {
    tokio::spawn(async move {
        info!(
            user_id = message.user.id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: processing message (handler chain started)"
        );
        if let Err(e) = chain.handle(&message).await {
            error!(error = %e, user_id = message.user.id, chat_id = message.chat.id, "Handler chain failed");
        }
    });
}

async fn method_not_allowed() -> Response {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response()
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
        .into_response()
}

/// Public webhook URL for a hostname: `https://{host}/webhook`.
pub fn webhook_url(hostname: &str) -> Result<reqwest::Url> {
    let raw = format!("https://{}{}", hostname, WEBHOOK_PATH);
    reqwest::Url::parse(&raw).with_context(|| format!("Invalid webhook URL: {}", raw))
}

/// Registers the webhook with Telegram. Without a hostname nothing is registered and the
/// webhook has to be configured out of band.
#[instrument(skip(bot))]
pub async fn register_webhook(bot: &teloxide::Bot, hostname: Option<&str>) -> Result<()> {
    let Some(hostname) = hostname else {
        warn!("No public hostname configured (RENDER_EXTERNAL_HOSTNAME); skipping webhook registration");
        return Ok(());
    };
    let url = webhook_url(hostname)?;
    bot.set_webhook(url.clone())
        .await
        .with_context(|| format!("Failed to set webhook to {}", url))?;
    info!(url = %url, "Webhook set");
    Ok(())
}

/// Registers the webhook, binds `0.0.0.0:{port}` and serves until the server stops.
#[instrument(skip(bot, chain, config), fields(port = config.port))]
pub async fn run_webhook(
    bot: &teloxide::Bot,
    chain: HandlerChain,
    config: &TelegramConfig,
) -> Result<()> {
    register_webhook(bot, config.webhook_hostname.as_deref()).await?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    info!(port = config.port, "Webhook server listening");

    axum::serve(listener, webhook_router(chain))
        .await
        .context("Webhook server failed")?;
    Ok(())
}
