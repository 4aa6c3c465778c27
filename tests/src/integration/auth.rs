//! # Admin Gate Behavior
//!
//! The moderation surface rejects every request without the exact credential
//! pair, and every rejection looks identical from outside.

#[cfg(test)]
mod tests {
    use crate::support::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde_json::json;

    const ADMIN_ROUTES: [&str; 2] = ["/admin", "/admin/pending"];

    fn get_with_auth(uri: &str, value: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())
            .expect("request")
    }

    fn basic(identity: &str, secret: &str) -> String {
        format!("Basic {}", BASE64.encode(format!("{identity}:{secret}")))
    }

    #[tokio::test]
    async fn test_admin_routes_reject_missing_credentials() {
        let app = test_app();
        for uri in ADMIN_ROUTES {
            let response = send(&app.router, get(uri)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }

        for uri in ["/admin/approve", "/admin/reject"] {
            let response = send(&app.router, post_json(uri, &json!({ "id": "x" }))).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_every_rejection_is_indistinguishable() {
        let app = test_app();

        let bad_headers = [
            basic("admin", "wrong"),
            basic("wrong", "hunter2"),
            basic("Admin", "hunter2"),
            basic("admin", "hunter2 "),
            "Bearer sometoken".to_string(),
            "Basic not!base64".to_string(),
            format!("Basic {}", BASE64.encode("no-colon-here")),
        ];

        let mut bodies = Vec::new();
        for value in &bad_headers {
            let response = send(&app.router, get_with_auth("/admin/pending", value)).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(body_json(response).await);
        }

        // Same body for every failure mode, and no hint of which check failed.
        for body in &bodies {
            assert_eq!(body, &bodies[0]);
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn test_rejection_advertises_basic_realm() {
        let app = test_app();
        let response = send(&app.router, get("/admin/pending")).await;
        let challenge = response.headers()[header::WWW_AUTHENTICATE]
            .to_str()
            .unwrap()
            .to_string();
        assert!(challenge.starts_with("Basic realm="));
    }

    #[tokio::test]
    async fn test_correct_credentials_admit() {
        let app = test_app();
        for uri in ADMIN_ROUTES {
            let response = send(&app.router, get_authed(uri)).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_public_surface_needs_no_credentials() {
        let app = test_app();
        for uri in ["/signals", "/health"] {
            let response = send(&app.router, get(uri)).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }
}
