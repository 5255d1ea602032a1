use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, Set};

/// Join table: `lesson_id` cannot be completed until `prerequisite_id` is.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lesson_prerequisites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub lesson_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub prerequisite_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lesson::Entity",
        from = "Column::LessonId",
        to = "super::lesson::Column::Id"
    )]
    Lesson,
    #[sea_orm(
        belongs_to = "super::lesson::Entity",
        from = "Column::PrerequisiteId",
        to = "super::lesson::Column::Id"
    )]
    Prerequisite,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(db: &C, lesson_id: i64, prerequisite_id: i64) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        ActiveModel {
            lesson_id: Set(lesson_id),
            prerequisite_id: Set(prerequisite_id),
        }
        .insert(db)
        .await
    }
}
