#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode, header},
    };
    use chrono::{TimeZone, Utc};
    use db::models::user::Role;
    use db::progress::{Telemetry, mark_lesson_complete};
    use db::test_utils::{SeededCourse, seed_course};
    use sea_orm::DatabaseConnection;
    use serial_test::serial;
    use tower::ServiceExt;

    async fn complete_all(db: &DatabaseConnection, seeded: &SeededCourse) {
        for (i, lesson) in seeded.lessons.iter().enumerate() {
            let at = Utc.with_ymd_and_hms(2025, 3, 10 + i as u32, 12, 0, 0).unwrap();
            mark_lesson_complete(db, seeded.student.id, lesson.id, &Telemetry::default(), at)
                .await
                .unwrap();
        }
    }

    fn get(uri: &str, auth: &str) -> Request<AxumBody> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("Authorization", auth)
            .body(AxumBody::empty())
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn completed_course_is_listed() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 2).await;
        let auth = bearer(seeded.student.id, Role::Student);

        let response = app.clone().oneshot(get("/api/me/certificates", &auth)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert!(json["data"].as_array().unwrap().is_empty());

        complete_all(&db, &seeded).await;

        let response = app.oneshot(get("/api/me/certificates", &auth)).await.unwrap();
        let json = json_body(response).await;
        let certificates = json["data"].as_array().unwrap();
        assert_eq!(certificates.len(), 1);
        assert_eq!(certificates[0]["course_id"], seeded.course.id);
        assert_eq!(certificates[0]["course_title"], "Rust 101");
        assert_eq!(certificates[0]["student_name"], "Sam Student");
        assert_eq!(certificates[0]["instructor_name"], "Ada Instructor");
        assert_eq!(certificates[0]["completion_date"], "2025-03-11T12:00:00+00:00");
        assert_eq!(certificates[0]["total_lessons"], 2);
        assert_eq!(certificates[0]["completed_lessons"], 2);
    }

    #[tokio::test]
    #[serial]
    async fn download_returns_html_attachment() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 1).await;
        complete_all(&db, &seeded).await;
        let auth = bearer(seeded.student.id, Role::Student);

        let uri = format!("/api/me/certificates/{}/download", seeded.course.id);
        let response = app.oneshot(get(&uri, &auth)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"CERT-"));
        assert!(disposition.ends_with(".html\""));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("Sam Student"));
        assert!(html.contains("Rust 101"));
        assert!(html.contains("Ada Instructor"));
    }

    #[tokio::test]
    #[serial]
    async fn download_of_incomplete_course_fails() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 2).await;
        let auth = bearer(seeded.student.id, Role::Student);

        let uri = format!("/api/me/certificates/{}/download", seeded.course.id);
        let response = app.oneshot(get(&uri, &auth)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PRECONDITION_FAILED);
        let json = json_body(response).await;
        assert_eq!(json["data"]["code"], "COURSE_INCOMPLETE");
    }

    #[tokio::test]
    #[serial]
    async fn download_requires_enrollment_and_existing_course() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 1).await;

        let instructor = bearer(seeded.instructor.id, Role::Instructor);
        let uri = format!("/api/me/certificates/{}/download", seeded.course.id);
        let response = app.clone().oneshot(get(&uri, &instructor)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let student = bearer(seeded.student.id, Role::Student);
        let response = app
            .oneshot(get("/api/me/certificates/31337/download", &student))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
