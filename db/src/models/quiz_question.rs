use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, Set};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quiz_questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: i64,
    #[sea_orm(column_type = "Text")]
    pub prompt: String,
    pub question_type: QuestionType,
    /// Points awarded for a correct answer.
    pub points: i32,
    pub position: i32,
}

/// How a submitted answer is matched against the correct option.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Display,
    EnumString,
    Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "quiz_question_type")]
#[strum(serialize_all = "snake_case")]
pub enum QuestionType {
    /// Exact match on the option text.
    #[sea_orm(string_value = "multiple_choice")]
    MultipleChoice,

    /// Exact match on the option text.
    #[sea_orm(string_value = "true_false")]
    TrueFalse,

    /// Case-insensitive, trimmed match.
    #[sea_orm(string_value = "short_answer")]
    ShortAnswer,

    /// Never auto-graded.
    #[sea_orm(string_value = "essay")]
    Essay,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz::Entity",
        from = "Column::QuizId",
        to = "super::quiz::Column::Id"
    )]
    Quiz,

    #[sea_orm(has_many = "super::quiz_option::Entity")]
    Options,
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::quiz_option::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Options.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(
        db: &C,
        quiz_id: i64,
        prompt: &str,
        question_type: QuestionType,
        points: i32,
        position: i32,
    ) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            quiz_id: Set(quiz_id),
            prompt: Set(prompt.to_owned()),
            question_type: Set(question_type),
            points: Set(points),
            position: Set(position),
            ..Default::default()
        }
        .insert(db)
        .await
    }
}
