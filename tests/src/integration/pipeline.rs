//! # Moderation Pipeline Flows
//!
//! End-to-end behavior of the two-queue state machine through HTTP:
//!
//! 1. A valid submission lands in pending, never directly in public view
//! 2. Approval moves exactly one record, stamps it, and publishes it
//! 3. Rejection discards without trace
//! 4. Moderation actions address records by id, with 404 for unknown ids

#[cfg(test)]
mod tests {
    use crate::support::*;
    use axum::http::{header, StatusCode};
    use serde_json::json;

    fn valid_payload() -> serde_json::Value {
        json!({
            "title": "March downtown",
            "startTime": "2024-05-01T18:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_submission_enters_pending_only() {
        let app = test_app();

        let id = submit_ok(&app.router, &valid_payload()).await;
        assert!(id.starts_with("sig-"));

        let public = body_json(send(&app.router, get("/signals")).await).await;
        assert_eq!(public.as_array().unwrap().len(), 0);

        let pending = body_json(send(&app.router, get_authed("/admin/pending")).await).await;
        let pending = pending.as_array().unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0]["id"], id.as_str());
        assert_eq!(pending[0]["status"], "pending");
        assert!(pending[0]["submittedAt"].is_string());
        assert!(pending[0].get("approvedAt").is_none());
    }

    #[tokio::test]
    async fn test_approval_publishes_and_stamps() {
        let app = test_app();
        let id = submit_ok(&app.router, &valid_payload()).await;

        let response = send(
            &app.router,
            post_json_authed("/admin/approve", &json!({ "id": id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let public = body_json(send(&app.router, get("/signals")).await).await;
        let public = public.as_array().unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0]["id"], id.as_str());
        assert_eq!(public[0]["status"], "approved");
        assert!(public[0]["approvedAt"].is_string());

        let pending = body_json(send(&app.router, get_authed("/admin/pending")).await).await;
        assert_eq!(pending.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_rejection_discards_without_trace() {
        let app = test_app();
        let id = submit_ok(&app.router, &valid_payload()).await;

        let response = send(
            &app.router,
            post_json_authed("/admin/reject", &json!({ "id": id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let public = body_json(send(&app.router, get("/signals")).await).await;
        assert_eq!(public.as_array().unwrap().len(), 0);
        let pending = body_json(send(&app.router, get_authed("/admin/pending")).await).await;
        assert_eq!(pending.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let app = test_app();
        submit_ok(&app.router, &valid_payload()).await;

        for uri in ["/admin/approve", "/admin/reject"] {
            let response = send(
                &app.router,
                post_json_authed(uri, &json!({ "id": "sig-does-not-exist" })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_approval_is_terminal() {
        let app = test_app();
        let id = submit_ok(&app.router, &valid_payload()).await;

        let first = send(
            &app.router,
            post_json_authed("/admin/approve", &json!({ "id": id })),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        // The record is no longer pending, so further actions miss.
        let again = send(
            &app.router,
            post_json_authed("/admin/approve", &json!({ "id": id })),
        )
        .await;
        assert_eq!(again.status(), StatusCode::NOT_FOUND);

        let rejected = send(
            &app.router,
            post_json_authed("/admin/reject", &json!({ "id": id })),
        )
        .await;
        assert_eq!(rejected.status(), StatusCode::NOT_FOUND);

        let public = body_json(send(&app.router, get("/signals")).await).await;
        assert_eq!(public.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submissions_rejected() {
        let app = test_app();

        let cases = [
            json!({ "startTime": "2024-05-01T18:00:00Z" }),
            json!({ "title": "   ", "startTime": "2024-05-01T18:00:00Z" }),
            json!({ "title": "March" }),
            json!({ "title": "March", "startTime": "whenever" }),
            json!(["not", "an", "object"]),
        ];

        for payload in &cases {
            let response = send(&app.router, post_json("/signals", payload)).await;
            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "payload should be rejected: {payload}"
            );
        }

        let pending = body_json(send(&app.router, get_authed("/admin/pending")).await).await;
        assert_eq!(pending.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_unrecognized_fields_pass_through() {
        let app = test_app();
        let id = submit_ok(
            &app.router,
            &json!({
                "title": "Cleanup day",
                "startTime": "2024-06-10T09:00",
                "location": { "lat": 52.5, "lng": 13.4 },
                "organizerNote": "bring gloves"
            }),
        )
        .await;

        send(
            &app.router,
            post_json_authed("/admin/approve", &json!({ "id": id })),
        )
        .await;

        let public = body_json(send(&app.router, get("/signals")).await).await;
        let record = &public.as_array().unwrap()[0];
        assert_eq!(record["location"]["lat"], 52.5);
        assert_eq!(record["organizerNote"], "bring gloves");
    }

    #[tokio::test]
    async fn test_client_cannot_forge_moderation_fields() {
        let app = test_app();
        submit_ok(
            &app.router,
            &json!({
                "title": "Sneaky",
                "startTime": "2024-05-01T18:00:00Z",
                "status": "approved",
                "approvedAt": "2020-01-01T00:00:00Z"
            }),
        )
        .await;

        let public = body_json(send(&app.router, get("/signals")).await).await;
        assert_eq!(public.as_array().unwrap().len(), 0);

        let pending = body_json(send(&app.router, get_authed("/admin/pending")).await).await;
        let record = &pending.as_array().unwrap()[0];
        assert_eq!(record["status"], "pending");
        assert!(record.get("approvedAt").is_none());
    }

    #[tokio::test]
    async fn test_moderation_action_requires_id() {
        let app = test_app();
        for uri in ["/admin/approve", "/admin/reject"] {
            let response = send(&app.router, post_json_authed(uri, &json!({}))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_dashboard_renders_queue() {
        let app = test_app();
        submit_ok(&app.router, &valid_payload()).await;

        let response = send(&app.router, get_authed("/admin")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/html"));

        let html = body_text(response).await;
        assert!(html.contains("March downtown"));
        assert!(html.contains("1 pending"));
    }

    #[tokio::test]
    async fn test_health_endpoint_is_public() {
        let app = test_app();
        let response = send(&app.router, get("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
