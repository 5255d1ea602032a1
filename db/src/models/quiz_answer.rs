use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A single submitted answer within an attempt.
///
/// `question_id` is not constrained: answers naming questions outside the quiz
/// are kept and scored as incorrect.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quiz_answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    #[sea_orm(column_type = "Text")]
    pub answer: String,
    pub is_correct: bool,
    pub points_awarded: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz_attempt::Entity",
        from = "Column::AttemptId",
        to = "super::quiz_attempt::Column::Id"
    )]
    Attempt,
}

impl Related<super::quiz_attempt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attempt.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
