#[cfg(test)]
mod tests {
    use crate::helpers::{bearer, json_body, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use db::models::{
        quiz::Model as QuizModel,
        quiz_option::Model as OptionModel,
        quiz_question::{Model as QuestionModel, QuestionType},
        user::Role,
    };
    use db::test_utils::{SeededCourse, seed_course};
    use sea_orm::DatabaseConnection;
    use serde_json::{Value, json};
    use serial_test::serial;
    use tower::ServiceExt;

    struct TestData {
        seeded: SeededCourse,
        quiz: QuizModel,
        questions: Vec<QuestionModel>,
    }

    /// Five points over four questions, one of each type.
    async fn setup(db: &DatabaseConnection) -> TestData {
        let seeded = seed_course(db, 1).await;
        let quiz = QuizModel::create(db, seeded.lessons[0].id, "Checkpoint", 60)
            .await
            .unwrap();

        let mc = QuestionModel::create(db, quiz.id, "2 + 2?", QuestionType::MultipleChoice, 2, 1)
            .await
            .unwrap();
        OptionModel::create(db, mc.id, "3", false).await.unwrap();
        OptionModel::create(db, mc.id, "4", true).await.unwrap();

        let tf = QuestionModel::create(db, quiz.id, "Rust has a GC", QuestionType::TrueFalse, 1, 2)
            .await
            .unwrap();
        OptionModel::create(db, tf.id, "true", false).await.unwrap();
        OptionModel::create(db, tf.id, "false", true).await.unwrap();

        let short = QuestionModel::create(
            db,
            quiz.id,
            "Name the crab",
            QuestionType::ShortAnswer,
            1,
            3,
        )
        .await
        .unwrap();
        OptionModel::create(db, short.id, "Ferris", true).await.unwrap();

        let essay = QuestionModel::create(
            db,
            quiz.id,
            "Explain lifetimes",
            QuestionType::Essay,
            1,
            4,
        )
        .await
        .unwrap();

        TestData {
            seeded,
            quiz,
            questions: vec![mc, tf, short, essay],
        }
    }

    fn submit_request(quiz_id: i64, auth: &str, body: Value) -> Request<AxumBody> {
        Request::builder()
            .method("POST")
            .uri(format!("/api/quizzes/{quiz_id}/attempts"))
            .header("Authorization", auth)
            .header("Content-Type", "application/json")
            .body(AxumBody::from(body.to_string()))
            .unwrap()
    }

    fn list_request(quiz_id: i64, auth: &str) -> Request<AxumBody> {
        Request::builder()
            .method("GET")
            .uri(format!("/api/quizzes/{quiz_id}/attempts"))
            .header("Authorization", auth)
            .body(AxumBody::empty())
            .unwrap()
    }

    #[tokio::test]
    #[serial]
    async fn submission_is_graded_and_stored() {
        let (app, db) = make_test_app().await;
        let data = setup(&db).await;
        let auth = bearer(data.seeded.student.id, Role::Student);
        let q = &data.questions;

        let body = json!({
            "time_spent": 120,
            "answers": [
                { "question_id": q[0].id, "answer": "4" },
                { "question_id": q[1].id, "answer": "true" },
                { "question_id": q[2].id, "answer": "  fErRiS " },
                { "question_id": q[3].id, "answer": "They are scopes." }
            ]
        });
        let response = app.oneshot(submit_request(data.quiz.id, &auth, body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        let data_json = &json["data"];
        assert_eq!(data_json["score"], 60);
        assert_eq!(data_json["passed"], true);
        assert_eq!(data_json["total_questions"], 4);
        assert_eq!(data_json["correct_answers"], 2);
        assert_eq!(data_json["attempt"]["time_spent"], 120);
        assert_eq!(data_json["attempt"]["quiz_id"], data.quiz.id);

        let answers = data_json["answers"].as_array().unwrap();
        assert_eq!(answers.len(), 4);
        assert_eq!(answers[0]["points_awarded"], 2);
        assert_eq!(answers[1]["is_correct"], false);
        assert_eq!(answers[2]["is_correct"], true);
        assert_eq!(answers[3]["is_correct"], false);
    }

    #[tokio::test]
    #[serial]
    async fn empty_submission_scores_zero() {
        let (app, db) = make_test_app().await;
        let data = setup(&db).await;
        let auth = bearer(data.seeded.student.id, Role::Student);

        let response = app
            .oneshot(submit_request(data.quiz.id, &auth, json!({ "answers": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = json_body(response).await;
        assert_eq!(json["data"]["score"], 0);
        assert_eq!(json["data"]["passed"], false);
        assert_eq!(json["data"]["attempt"]["time_spent"], 0);
    }

    #[tokio::test]
    #[serial]
    async fn attempts_are_listed_newest_first() {
        let (app, db) = make_test_app().await;
        let data = setup(&db).await;
        let auth = bearer(data.seeded.student.id, Role::Student);
        let mc = data.questions[0].id;

        let first = app
            .clone()
            .oneshot(submit_request(
                data.quiz.id,
                &auth,
                json!({ "answers": [{ "question_id": mc, "answer": "3" }] }),
            ))
            .await
            .unwrap();
        let first_id = json_body(first).await["data"]["attempt"]["id"].clone();

        let second = app
            .clone()
            .oneshot(submit_request(
                data.quiz.id,
                &auth,
                json!({ "answers": [{ "question_id": mc, "answer": "4" }] }),
            ))
            .await
            .unwrap();
        let second_id = json_body(second).await["data"]["attempt"]["id"].clone();

        let response = app.oneshot(list_request(data.quiz.id, &auth)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let attempts = json["data"].as_array().unwrap();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0]["id"], second_id);
        assert_eq!(attempts[0]["score"], 40);
        assert_eq!(attempts[1]["id"], first_id);
        assert_eq!(attempts[1]["score"], 0);
    }

    #[tokio::test]
    #[serial]
    async fn submission_rejections() {
        let (app, db) = make_test_app().await;
        let data = setup(&db).await;

        let student = bearer(data.seeded.student.id, Role::Student);
        let response = app
            .clone()
            .oneshot(submit_request(
                data.quiz.id,
                &student,
                json!({ "answers": [], "time_spent": -1 }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(submit_request(9999, &student, json!({ "answers": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let outsider = bearer(data.seeded.instructor.id, Role::Instructor);
        let response = app
            .oneshot(submit_request(data.quiz.id, &outsider, json!({ "answers": [] })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = json_body(response).await;
        assert_eq!(json["data"]["code"], "NOT_ENROLLED");
    }
}
