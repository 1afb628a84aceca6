use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

use crate::modules::webhooks::use_cases::receive_webhook::inbound::http as receive_http;
use crate::shell::state::AppState;

pub const WEBHOOK_PATH: &str = "/xendit/webhook";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            WEBHOOK_PATH,
            post(receive_http::handle).fallback(receive_http::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
