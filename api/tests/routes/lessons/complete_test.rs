#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use db::models::{lesson_prerequisite::Model as PrerequisiteModel, user::Role};
    use db::test_utils::{seed_course, seed_course_with_schedule};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    fn complete_request(lesson_id: i64, auth: &str, body: AxumBody) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/lessons/{lesson_id}/complete"))
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .body(body)
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn completing_without_body_counts_toward_course() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 4).await;
        let auth = bearer(seeded.student.id, Role::Student);

        let response = app
            .oneshot(complete_request(seeded.lessons[0].id, &auth, AxumBody::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["progress"]["completed"], true);
        assert!(json["data"]["progress"]["completed_at"].is_string());
        assert_eq!(json["data"]["course_progress"], 25);
    }

    #[tokio::test]
    #[serial]
    async fn telemetry_is_stored_with_completion() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 3).await;
        let auth = bearer(seeded.student.id, Role::Student);

        let body = json!({ "time_spent": 300, "watched_duration": 280, "last_position": 295 });
        let response = app
            .oneshot(complete_request(
                seeded.lessons[0].id,
                &auth,
                AxumBody::from(body.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let progress = &json["data"]["progress"];
        assert_eq!(progress["time_spent"], 300);
        assert_eq!(progress["watched_duration"], 280);
        assert_eq!(progress["last_position"], 295);
        assert!(progress["drop_off_point"].is_null());
        assert_eq!(json["data"]["course_progress"], 33);
    }

    #[tokio::test]
    #[serial]
    async fn negative_telemetry_is_rejected() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 1).await;
        let auth = bearer(seeded.student.id, Role::Student);

        let body = json!({ "time_spent": -5 });
        let response = app
            .oneshot(complete_request(
                seeded.lessons[0].id,
                &auth,
                AxumBody::from(body.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(json["data"]["code"], "INVALID_REQUEST");
        assert_eq!(json["message"], "time_spent must not be negative");
    }

    #[tokio::test]
    #[serial]
    async fn malformed_body_is_rejected() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 1).await;
        let auth = bearer(seeded.student.id, Role::Student);

        let response = app
            .oneshot(complete_request(
                seeded.lessons[0].id,
                &auth,
                AxumBody::from("{not json"),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["data"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    #[serial]
    async fn missing_prerequisite_blocks_completion() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 2).await;
        PrerequisiteModel::create(&db, seeded.lessons[1].id, seeded.lessons[0].id)
            .await
            .unwrap();
        let auth = bearer(seeded.student.id, Role::Student);

        let response = app
            .clone()
            .oneshot(complete_request(seeded.lessons[1].id, &auth, AxumBody::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
        let json = json_body(response).await;
        assert_eq!(json["data"]["code"], "PREREQUISITES_INCOMPLETE");

        let response = app
            .clone()
            .oneshot(complete_request(seeded.lessons[0].id, &auth, AxumBody::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(complete_request(seeded.lessons[1].id, &auth, AxumBody::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["course_progress"], 100);
    }

    #[tokio::test]
    #[serial]
    async fn scheduled_lesson_is_not_yet_available() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course_with_schedule(&db, 1, Some(Utc::now() + Duration::days(2))).await;
        let auth = bearer(seeded.student.id, Role::Student);

        let response = app
            .oneshot(complete_request(seeded.lessons[0].id, &auth, AxumBody::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
        let json = json_body(response).await;
        assert_eq!(json["data"]["code"], "NOT_YET_AVAILABLE");
    }

    #[tokio::test]
    #[serial]
    async fn unenrolled_and_unknown_lessons() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 1).await;

        let instructor = bearer(seeded.instructor.id, Role::Instructor);
        let response = app
            .clone()
            .oneshot(complete_request(seeded.lessons[0].id, &instructor, AxumBody::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let student = bearer(seeded.student.id, Role::Student);
        let response = app
            .oneshot(complete_request(4242, &student, AxumBody::empty()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
