#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use db::models::{
        course::Model as CourseModel,
        course_module::Model as CourseModuleModel,
        lesson::Model as LessonModel,
        user::{Model as UserModel, Role},
    };
    use sea_orm::DatabaseConnection;
    use serial_test::serial;
    use tower::ServiceExt;

    struct TestData {
        student: UserModel,
        published: CourseModel,
        draft: CourseModel,
    }

    async fn setup(db: &DatabaseConnection) -> TestData {
        let instructor = UserModel::create(
            db,
            "teach",
            "teach@test.com",
            "Tess Teacher",
            Role::Instructor,
        )
        .await
        .unwrap();
        let student = UserModel::create(
            db,
            "learner",
            "learner@test.com",
            "Lee Learner",
            Role::Student,
        )
        .await
        .unwrap();
        let published = CourseModel::create(db, instructor.id, "Async Rust", None, true)
            .await
            .unwrap();
        let draft = CourseModel::create(db, instructor.id, "Unsafe Rust", None, false)
            .await
            .unwrap();
        let module = CourseModuleModel::create(db, published.id, "Futures", 1).await.unwrap();
        LessonModel::create(db, module.id, "Polling", 1, None).await.unwrap();

        TestData {
            student,
            published,
            draft,
        }
    }

    fn enroll_request(course_id: i64, auth: &str) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/courses/{course_id}/enroll"))
            .header("Authorization", auth)
            .body(AxumBody::empty())
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn enroll_creates_active_enrollment() {
        let (app, db) = make_test_app().await;
        let data = setup(&db).await;
        let auth = bearer(data.student.id, Role::Student);

        let response = app
            .oneshot(enroll_request(data.published.id, &auth))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["user_id"], data.student.id);
        assert_eq!(json["data"]["course_id"], data.published.id);
        assert_eq!(json["data"]["status"], "active");
        assert_eq!(json["data"]["progress"], 0);
    }

    #[tokio::test]
    #[serial]
    async fn enrolling_twice_conflicts() {
        let (app, db) = make_test_app().await;
        let data = setup(&db).await;
        let auth = bearer(data.student.id, Role::Student);

        let first = app
            .clone()
            .oneshot(enroll_request(data.published.id, &auth))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .oneshot(enroll_request(data.published.id, &auth))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        let json = json_body(second).await;
        assert_eq!(json["data"]["code"], "ALREADY_ENROLLED");
    }

    #[tokio::test]
    #[serial]
    async fn unpublished_and_missing_courses_are_not_found() {
        let (app, db) = make_test_app().await;
        let data = setup(&db).await;
        let auth = bearer(data.student.id, Role::Student);

        let response = app
            .clone()
            .oneshot(enroll_request(data.draft.id, &auth))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(enroll_request(9999, &auth)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_body(response).await;
        assert_eq!(json["data"]["code"], "NOT_FOUND");
    }
}
