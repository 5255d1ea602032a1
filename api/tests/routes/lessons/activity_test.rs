#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use db::models::{
        enrollment::Entity as EnrollmentEntity,
        user::Role,
    };
    use db::test_utils::seed_course_with_schedule;
    use sea_orm::EntityTrait;
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    fn activity_request(lesson_id: i64, auth: &str, body: Value) -> Request<AxumBody> {
        Request::builder()
            .method("PUT")
            .uri(format!("/api/lessons/{lesson_id}/progress"))
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .body(AxumBody::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn activity_is_recorded_on_unreleased_lessons_without_completing() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course_with_schedule(&db, 2, Some(Utc::now() + Duration::days(1))).await;
        let auth = bearer(seeded.student.id, Role::Student);

        let response = app
            .clone()
            .oneshot(activity_request(
                seeded.lessons[0].id,
                &auth,
                json!({ "time_spent": 40, "drop_off_point": 38 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["completed"], false);
        assert!(json["data"]["completed_at"].is_null());
        assert_eq!(json["data"]["drop_off_point"], 38);

        let response = app
            .oneshot(activity_request(
                seeded.lessons[0].id,
                &auth,
                json!({ "last_position": 12 }),
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["time_spent"], 40);
        assert_eq!(json["data"]["last_position"], 12);

        let enrollment = EnrollmentEntity::find_by_id((seeded.student.id, seeded.course.id))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(enrollment.progress, 0);
    }

    #[tokio::test]
    #[serial]
    async fn activity_requires_enrollment() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course_with_schedule(&db, 1, None).await;
        let auth = bearer(seeded.instructor.id, Role::Instructor);

        let response = app
            .oneshot(activity_request(seeded.lessons[0].id, &auth, json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = json_body(response).await;
        assert_eq!(json["data"]["code"], "NOT_ENROLLED");
    }
}
