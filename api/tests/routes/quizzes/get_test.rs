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
    use db::test_utils::seed_course;
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn quiz_hides_answers_from_students() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 1).await;
        let quiz = QuizModel::create(&db, seeded.lessons[0].id, "Warmup", 50)
            .await
            .unwrap();

        let short = QuestionModel::create(
            &db,
            quiz.id,
            "Keyword for borrowing",
            QuestionType::ShortAnswer,
            1,
            2,
        )
        .await
        .unwrap();
        OptionModel::create(&db, short.id, "ref", true).await.unwrap();
        let mc = QuestionModel::create(
            &db,
            quiz.id,
            "Pick the smart pointer",
            QuestionType::MultipleChoice,
            1,
            1,
        )
        .await
        .unwrap();
        OptionModel::create(&db, mc.id, "Box", true).await.unwrap();
        OptionModel::create(&db, mc.id, "u8", false).await.unwrap();

        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/quizzes/{}", quiz.id))
            .header("Authorization", bearer(seeded.student.id, Role::Student))
            .body(AxumBody::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        let data = &json["data"];
        assert_eq!(data["title"], "Warmup");
        assert_eq!(data["passing_score"], 50);

        let questions = data["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0]["id"], mc.id);
        assert_eq!(questions[0]["question_type"], "multiple_choice");
        let options = questions[0]["options"].as_array().unwrap();
        assert_eq!(options.len(), 2);
        assert!(options.iter().all(|o| o.get("is_correct").is_none()));

        assert_eq!(questions[1]["question_type"], "short_answer");
        assert!(questions[1]["options"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    #[serial]
    async fn unknown_quiz_is_not_found() {
        let (app, db) = make_test_app().await;
        let seeded = seed_course(&db, 1).await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/quizzes/77")
            .header("Authorization", bearer(seeded.student.id, Role::Student))
            .body(AxumBody::empty())
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
