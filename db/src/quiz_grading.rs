//! Quiz grading.
//!
//! Scoring is a pure function over the quiz's questions and the submitted
//! answers ([`score_answers`]); [`grade_attempt`] loads the quiz, scores the
//! submission and persists the attempt with its answers in one transaction.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::models::{
    lesson::Entity as LessonEntity,
    quiz::{Entity as QuizEntity, Model as QuizModel},
    quiz_answer::{ActiveModel as AnswerActiveModel, Model as AnswerModel},
    quiz_attempt::{
        ActiveModel as AttemptActiveModel, Column as AttemptCol, Entity as AttemptEntity,
        Model as AttemptModel,
    },
    quiz_option::{Entity as OptionEntity, Model as OptionModel},
    quiz_question::{Column as QuestionCol, Entity as QuestionEntity, QuestionType},
};
use crate::progress::require_active_enrollment;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SubmittedAnswer {
    pub question_id: i64,
    pub answer: String,
}

/// A question reduced to what scoring needs.
#[derive(Debug, Clone)]
pub struct GradableQuestion {
    pub id: i64,
    pub question_type: QuestionType,
    pub points: i32,
    /// Texts of every option flagged correct.
    pub correct_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAnswer {
    pub question_id: i64,
    pub answer: String,
    pub is_correct: bool,
    pub points_awarded: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub total_points: i64,
    pub earned_points: i64,
    /// `round(100 * earned / total)`, 0 when the quiz carries no points.
    pub score: i32,
    pub correct_answers: usize,
    pub answers: Vec<ScoredAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradedAttempt {
    pub attempt: AttemptModel,
    pub answers: Vec<AnswerModel>,
    pub score: i32,
    pub passed: bool,
    pub total_questions: usize,
    pub correct_answers: usize,
}

/// Quiz as shown to a student: correctness flags are never included.
#[derive(Debug, Clone, Serialize)]
pub struct StudentQuiz {
    pub id: i64,
    pub lesson_id: i64,
    pub title: String,
    pub passing_score: i32,
    pub questions: Vec<StudentQuestion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentQuestion {
    pub id: i64,
    pub prompt: String,
    pub question_type: QuestionType,
    pub points: i32,
    pub position: i32,
    /// Empty for short-answer and essay questions, whose options are the answers.
    pub options: Vec<StudentOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentOption {
    pub id: i64,
    pub text: String,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether `submitted` is a correct answer for a question of `question_type`.
///
/// Any of several correct options is accepted. Essays are never correct.
pub fn is_correct(
    question_type: QuestionType,
    submitted: &str,
    correct_options: &[String],
) -> bool {
    match question_type {
        QuestionType::MultipleChoice | QuestionType::TrueFalse => {
            correct_options.iter().any(|o| o == submitted)
        }
        QuestionType::ShortAnswer => {
            let submitted = normalize(submitted);
            correct_options.iter().any(|o| normalize(o) == submitted)
        }
        QuestionType::Essay => false,
    }
}

/// Scores a submission against the full question set.
///
/// Unanswered questions still count towards the total. Answers naming unknown
/// questions, and repeat answers to an already answered question, are kept but
/// earn nothing.
pub fn score_answers(questions: &[GradableQuestion], answers: &[SubmittedAnswer]) -> Score {
    let by_id: HashMap<i64, &GradableQuestion> = questions.iter().map(|q| (q.id, q)).collect();
    let total_points: i64 = questions.iter().map(|q| i64::from(q.points)).sum();

    let mut seen = HashSet::new();
    let scored: Vec<ScoredAnswer> = answers
        .iter()
        .map(|a| {
            let question = by_id
                .get(&a.question_id)
                .filter(|_| seen.insert(a.question_id));
            let (is_correct, points_awarded) = match question {
                Some(q) if is_correct(q.question_type, &a.answer, &q.correct_options) => {
                    (true, q.points)
                }
                _ => (false, 0),
            };
            ScoredAnswer {
                question_id: a.question_id,
                answer: a.answer.clone(),
                is_correct,
                points_awarded,
            }
        })
        .collect();

    let earned_points: i64 = scored.iter().map(|a| i64::from(a.points_awarded)).sum();
    let score = if total_points > 0 {
        (100.0 * earned_points as f64 / total_points as f64).round() as i32
    } else {
        0
    };

    Score {
        total_points,
        earned_points,
        score,
        correct_answers: scored.iter().filter(|a| a.is_correct).count(),
        answers: scored,
    }
}

/// Grades and stores one attempt at `quiz_id` by `student_id`.
pub async fn grade_attempt(
    db: &DatabaseConnection,
    quiz_id: i64,
    student_id: i64,
    answers: &[SubmittedAnswer],
    time_spent: i64,
    now: DateTime<Utc>,
) -> CoreResult<GradedAttempt> {
    let result = grade_in_transaction(db, quiz_id, student_id, answers, time_spent, now).await;

    match &result {
        Ok(graded) => info!(
            quiz_id,
            student_id,
            score = graded.score,
            passed = graded.passed,
            "Quiz attempt graded"
        ),
        Err(CoreError::Database(e)) => {
            error!(quiz_id, student_id, error = %e, "Quiz grading failed")
        }
        Err(e) => warn!(quiz_id, student_id, code = e.code(), "Quiz attempt rejected"),
    }

    result
}

async fn grade_in_transaction(
    db: &DatabaseConnection,
    quiz_id: i64,
    student_id: i64,
    answers: &[SubmittedAnswer],
    time_spent: i64,
    now: DateTime<Utc>,
) -> CoreResult<GradedAttempt> {
    let txn = db.begin().await?;

    let quiz = QuizEntity::find_by_id(quiz_id)
        .one(&txn)
        .await?
        .ok_or(CoreError::NotFound("quiz"))?;
    require_quiz_enrollment(&txn, &quiz, student_id).await?;

    let questions = load_questions(&txn, quiz.id).await?;
    let gradable: Vec<GradableQuestion> = questions
        .iter()
        .map(|(q, options)| GradableQuestion {
            id: q.id,
            question_type: q.question_type,
            points: q.points,
            correct_options: options
                .iter()
                .filter(|o| o.is_correct)
                .map(|o| o.text.clone())
                .collect(),
        })
        .collect();

    let score = score_answers(&gradable, answers);
    let passed = score.score >= quiz.passing_score;

    let attempt = AttemptActiveModel {
        quiz_id: Set(quiz.id),
        user_id: Set(student_id),
        score: Set(score.score),
        passed: Set(passed),
        time_spent: Set(time_spent),
        completed_at: Set(now),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let mut stored = Vec::with_capacity(score.answers.len());
    for answer in &score.answers {
        let row = AnswerActiveModel {
            attempt_id: Set(attempt.id),
            question_id: Set(answer.question_id),
            answer: Set(answer.answer.clone()),
            is_correct: Set(answer.is_correct),
            points_awarded: Set(answer.points_awarded),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        stored.push(row);
    }

    txn.commit().await?;

    Ok(GradedAttempt {
        attempt,
        answers: stored,
        score: score.score,
        passed,
        total_questions: questions.len(),
        correct_answers: score.correct_answers,
    })
}

/// The quiz with its questions and options, stripped of correctness flags.
pub async fn quiz_for_student<C>(db: &C, student_id: i64, quiz_id: i64) -> CoreResult<StudentQuiz>
where
    C: ConnectionTrait,
{
    let quiz = QuizEntity::find_by_id(quiz_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("quiz"))?;
    require_quiz_enrollment(db, &quiz, student_id).await?;

    let questions = load_questions(db, quiz.id)
        .await?
        .into_iter()
        .map(|(q, options)| {
            let options = match q.question_type {
                QuestionType::MultipleChoice | QuestionType::TrueFalse => options
                    .into_iter()
                    .map(|o| StudentOption { id: o.id, text: o.text })
                    .collect(),
                QuestionType::ShortAnswer | QuestionType::Essay => Vec::new(),
            };
            StudentQuestion {
                id: q.id,
                prompt: q.prompt,
                question_type: q.question_type,
                points: q.points,
                position: q.position,
                options,
            }
        })
        .collect();

    Ok(StudentQuiz {
        id: quiz.id,
        lesson_id: quiz.lesson_id,
        title: quiz.title,
        passing_score: quiz.passing_score,
        questions,
    })
}

/// The student's attempts at a quiz, newest first.
pub async fn list_attempts<C>(
    db: &C,
    student_id: i64,
    quiz_id: i64,
) -> CoreResult<Vec<AttemptModel>>
where
    C: ConnectionTrait,
{
    QuizEntity::find_by_id(quiz_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("quiz"))?;

    Ok(AttemptEntity::find()
        .filter(AttemptCol::QuizId.eq(quiz_id))
        .filter(AttemptCol::UserId.eq(student_id))
        .order_by_desc(AttemptCol::CompletedAt)
        .order_by_desc(AttemptCol::Id)
        .all(db)
        .await?)
}

async fn require_quiz_enrollment<C>(db: &C, quiz: &QuizModel, student_id: i64) -> CoreResult<()>
where
    C: ConnectionTrait,
{
    let lesson = LessonEntity::find_by_id(quiz.lesson_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("lesson"))?;
    let course_id = lesson
        .course_id(db)
        .await?
        .ok_or(CoreError::NotFound("course"))?;

    require_active_enrollment(db, student_id, course_id).await?;
    Ok(())
}

async fn load_questions<C>(
    db: &C,
    quiz_id: i64,
) -> Result<Vec<(crate::models::quiz_question::Model, Vec<OptionModel>)>, sea_orm::DbErr>
where
    C: ConnectionTrait,
{
    QuestionEntity::find()
        .filter(QuestionCol::QuizId.eq(quiz_id))
        .order_by_asc(QuestionCol::Position)
        .order_by_asc(QuestionCol::Id)
        .find_with_related(OptionEntity)
        .all(db)
        .await
}
