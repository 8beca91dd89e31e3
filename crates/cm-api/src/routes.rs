//! Route definitions
//!
//! Defines all HTTP API endpoints.

use axum::{
    Router,
    routing::get,
};

use crate::handlers::{
    create_contact, delete_contact, get_contact, health, list_contacts, update_contact,
};
use crate::server::AppState;

/// Create the API router
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Contacts collection
        .route("/api/contacts", get(list_contacts).post(create_contact))
        // Single contact
        .route(
            "/api/contacts/{id}",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::server::app;
    use crate::store::ContactStore;

    fn seeded_app(allowed_origins: Option<&[String]>) -> axum::Router {
        app(Arc::new(ContactStore::seeded()), allowed_origins)
    }

    #[tokio::test]
    async fn test_health() {
        let response = seeded_app(None)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_put_with_mismatched_id() {
        let request = Request::put("/api/contacts/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"id":2,"contactName":"Grace Hopper"}"#))
            .unwrap();

        let response = seeded_app(None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Request id 1 does not match contact id 2");
    }

    /// Send `request` and return the status with the decoded JSON body
    async fn json_error(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = seeded_app(None).oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&body)
            .unwrap_or_else(|e| panic!("non-JSON error body {:?}: {}", body, e));
        (status, json)
    }

    #[tokio::test]
    async fn test_extractor_rejections_have_json_bodies() {
        let cases = [
            (
                Request::get("/api/contacts/abc").body(Body::empty()).unwrap(),
                StatusCode::BAD_REQUEST,
            ),
            (
                Request::delete("/api/contacts/-1").body(Body::empty()).unwrap(),
                StatusCode::BAD_REQUEST,
            ),
            (
                Request::post("/api/contacts")
                    .body(Body::from(r#"{"contactName":"Ada"}"#))
                    .unwrap(),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                Request::post("/api/contacts")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"id":"seven"}"#))
                    .unwrap(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                Request::put("/api/contacts/1")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{"))
                    .unwrap(),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (request, expected) in cases {
            let uri = request.uri().clone();
            let (status, json) = json_error(request).await;
            assert_eq!(status, expected, "{}", uri);
            let message = json["error"].as_str().unwrap_or_default();
            assert!(!message.is_empty(), "{}: {}", uri, json);
        }
    }

    #[tokio::test]
    async fn test_cors_allow_list() {
        let origins = vec!["http://localhost:4200".to_string()];
        let app = seeded_app(Some(&origins));

        let allowed = app
            .clone()
            .oneshot(
                Request::get("/api/contacts")
                    .header(header::ORIGIN, "http://localhost:4200")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:4200"
        );

        let denied = app
            .oneshot(
                Request::get("/api/contacts")
                    .header(header::ORIGIN, "http://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(
            denied
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
