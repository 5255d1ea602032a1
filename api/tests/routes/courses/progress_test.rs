#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use db::models::{
        lesson::Model as LessonModel, lesson_prerequisite::Model as PrerequisiteModel,
        user::Role,
    };
    use db::test_utils::seed_course;
    use serial_test::serial;
    use tower::ServiceExt;

    fn progress_request(course_id: i64, auth: &str) -> Request<AxumBody> {
        Request::builder()
            .method("GET")
            .uri(format!("/api/courses/{course_id}/progress"))
            .header("Authorization", auth)
            .body(AxumBody::empty())
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn progress_lists_lessons_with_lock_reasons() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 2).await;
        PrerequisiteModel::create(&db, seeded.lessons[1].id, seeded.lessons[0].id)
            .await
            .unwrap();
        let later = LessonModel::create(
            &db,
            seeded.module.id,
            "Released next week",
            3,
            Some(Utc::now() + Duration::days(7)),
        )
        .await
        .unwrap();

        let auth = bearer(seeded.student.id, Role::Student);
        let response = app
            .oneshot(progress_request(seeded.course.id, &auth))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let data = &json["data"];
        assert_eq!(data["course_id"], seeded.course.id);
        assert_eq!(data["total_lessons"], 3);
        assert_eq!(data["completed_lessons"], 0);
        assert_eq!(data["percent"], 0);

        let lessons = data["lessons"].as_array().unwrap();
        assert_eq!(lessons.len(), 3);
        assert_eq!(lessons[0]["lesson_id"], seeded.lessons[0].id);
        assert_eq!(lessons[0]["locked"], false);
        assert_eq!(lessons[1]["locked"], true);
        assert_eq!(lessons[1]["lock_reason"], "PREREQUISITES_INCOMPLETE");
        assert_eq!(lessons[2]["lesson_id"], later.id);
        assert_eq!(lessons[2]["lock_reason"], "NOT_YET_AVAILABLE");
    }

    #[tokio::test]
    #[serial]
    async fn progress_requires_enrollment() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 1).await;

        let auth = bearer(seeded.instructor.id, Role::Instructor);
        let response = app
            .oneshot(progress_request(seeded.course.id, &auth))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["code"], "NOT_ENROLLED");
    }
}
