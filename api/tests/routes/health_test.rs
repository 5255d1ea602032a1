#[cfg(test)]
mod tests {
    use crate::helpers::{json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn health_check_is_public() {
        let (app, _db) = make_test_app().await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(AxumBody::empty())
            .unwrap();

        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], "OK");
    }

    #[tokio::test]
    #[serial]
    async fn protected_routes_require_a_token() {
        let (app, _db) = make_test_app().await;

        for uri in [
            "/api/courses/1/progress",
            "/api/quizzes/1",
            "/api/me/certificates",
        ] {
            let req = Request::builder()
                .method("GET")
                .uri(uri)
                .body(AxumBody::empty())
                .unwrap();
            let response = app.clone().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    #[serial]
    async fn tokens_signed_with_another_secret_are_rejected() {
        let (app, _db) = make_test_app().await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/me/certificates")
            .header("Authorization", "Bearer not.a.token")
            .body(AxumBody::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Authentication required");
    }
}
