use db::models::{quiz_answer::Model as AnswerModel, quiz_attempt::Model as AttemptModel};
use db::quiz_grading::{GradedAttempt, SubmittedAnswer};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    pub answers: Vec<AnswerRequest>,

    #[serde(default)]
    #[validate(range(min = 0, message = "time_spent must not be negative"))]
    pub time_spent: i64,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: i64,
    pub answer: String,
}

impl From<AnswerRequest> for SubmittedAnswer {
    fn from(a: AnswerRequest) -> Self {
        SubmittedAnswer {
            question_id: a.question_id,
            answer: a.answer,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub question_id: i64,
    pub answer: String,
    pub is_correct: bool,
    pub points_awarded: i32,
}

impl From<AnswerModel> for AnswerResponse {
    fn from(a: AnswerModel) -> Self {
        Self {
            question_id: a.question_id,
            answer: a.answer,
            is_correct: a.is_correct,
            points_awarded: a.points_awarded,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AttemptResponse {
    pub id: i64,
    pub quiz_id: i64,
    pub score: i32,
    pub passed: bool,
    pub time_spent: i64,
    pub completed_at: String,
}

impl From<AttemptModel> for AttemptResponse {
    fn from(a: AttemptModel) -> Self {
        Self {
            id: a.id,
            quiz_id: a.quiz_id,
            score: a.score,
            passed: a.passed,
            time_spent: a.time_spent,
            completed_at: a.completed_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GradedAttemptResponse {
    pub attempt: AttemptResponse,
    pub score: i32,
    pub passed: bool,
    pub total_questions: usize,
    pub correct_answers: usize,
    pub answers: Vec<AnswerResponse>,
}

impl From<GradedAttempt> for GradedAttemptResponse {
    fn from(g: GradedAttempt) -> Self {
        Self {
            attempt: AttemptResponse::from(g.attempt),
            score: g.score,
            passed: g.passed,
            total_questions: g.total_questions,
            correct_answers: g.correct_answers,
            answers: g.answers.into_iter().map(AnswerResponse::from).collect(),
        }
    }
}
