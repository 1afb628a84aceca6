use axum::{
    body::Bytes, extract::State, extract::rejection::BytesRejection, http::StatusCode,
    response::IntoResponse,
};

use crate::modules::webhooks::core::events::XenditWebhook;
use crate::shell::state::AppState;

pub const RECEIVED: &str = "Webhook received and saved";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const UNREADABLE_BODY: &str = "Error reading request body";
pub const UNPARSEABLE_BODY: &str = "Error parsing webhook payload";
pub const INTERNAL_ERROR: &str = "Internal server error";

// Content-Type is not checked, the payload is parsed as JSON regardless.
pub async fn handle(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> impl IntoResponse {
    let body = match body {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read webhook body");
            return (StatusCode::BAD_REQUEST, UNREADABLE_BODY).into_response();
        }
    };

    let webhook = match XenditWebhook::from_slice(&body) {
        Ok(w) => w,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse webhook payload");
            return (StatusCode::BAD_REQUEST, UNPARSEABLE_BODY).into_response();
        }
    };

    match state.receive_handler.handle(webhook).await {
        Ok(_) => (StatusCode::OK, RECEIVED).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR).into_response(),
    }
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}

#[cfg(test)]
mod receive_webhook_http_inbound_tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
        routing::post,
    };
    use http_body_util::BodyExt;
    use rstest::rstest;
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::modules::webhooks::use_cases::receive_webhook::handler::ReceiveWebhookHandler;
    use crate::shared::infrastructure::webhook_store::in_memory::InMemoryWebhookStore;
    use crate::shell::state::AppState;
    use crate::tests::fixtures::webhooks::xendit_webhook::invoice_paid_json;

    use super::*;

    fn make_test_state(store: Arc<InMemoryWebhookStore>) -> AppState {
        AppState {
            receive_handler: Arc::new(ReceiveWebhookHandler::new(store)),
        }
    }

    fn make_offline_store_state() -> AppState {
        let mut store = InMemoryWebhookStore::new();
        store.toggle_offline();
        make_test_state(Arc::new(store))
    }

    fn app(state: AppState) -> Router {
        Router::new()
            .route(
                "/xendit/webhook",
                post(handle).fallback(method_not_allowed),
            )
            .with_state(state)
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn it_should_return_200_and_store_a_valid_webhook() {
        let store = Arc::new(InMemoryWebhookStore::new());

        let response = app(make_test_state(store.clone()))
            .oneshot(
                Request::post("/xendit/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(invoice_paid_json()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, RECEIVED);
        assert_eq!(store.total().await, 1);
    }

    #[tokio::test]
    async fn it_should_accept_a_body_without_content_type() {
        let store = Arc::new(InMemoryWebhookStore::new());

        let response = app(make_test_state(store.clone()))
            .oneshot(
                Request::post("/xendit/webhook")
                    .body(Body::from(r#"{"id":"xyz","status":"PAID"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.total().await, 1);
    }

    #[rstest]
    #[case::not_json("not-json")]
    #[case::empty("")]
    #[case::wrong_type(r#"{"id":"abc","amount":"1000"}"#)]
    #[case::empty_array("[]")]
    #[case::positional_array(r#"["pos-id","pos-ext"]"#)]
    #[case::null("null")]
    #[tokio::test]
    async fn it_should_return_400_on_invalid_json(#[case] body: &'static str) {
        let store = Arc::new(InMemoryWebhookStore::new());

        let response = app(make_test_state(store.clone()))
            .oneshot(
                Request::post("/xendit/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, UNPARSEABLE_BODY);
        assert_eq!(store.total().await, 0);
    }

    #[tokio::test]
    async fn it_should_return_400_when_the_body_cannot_be_read() {
        let store = Arc::new(InMemoryWebhookStore::new());
        let oversized = vec![b' '; 3 * 1024 * 1024];

        let response = app(make_test_state(store.clone()))
            .oneshot(
                Request::post("/xendit/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(oversized))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, UNREADABLE_BODY);
        assert_eq!(store.total().await, 0);
    }

    #[rstest]
    #[case::get(Method::GET)]
    #[case::put(Method::PUT)]
    #[case::delete(Method::DELETE)]
    #[tokio::test]
    async fn it_should_return_405_on_other_methods(#[case] method: Method) {
        let store = Arc::new(InMemoryWebhookStore::new());

        let response = app(make_test_state(store.clone()))
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/xendit/webhook")
                    .body(Body::from(invoice_paid_json()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body_text(response).await, METHOD_NOT_ALLOWED);
        assert_eq!(store.total().await, 0);
    }

    #[tokio::test]
    async fn it_should_return_500_without_details_when_store_is_offline() {
        let response = app(make_offline_store_state())
            .oneshot(
                Request::post("/xendit/webhook")
                    .header("content-type", "application/json")
                    .body(Body::from(invoice_paid_json()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, INTERNAL_ERROR);
    }
}
