use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, QueryOrder, Set};
use serde::Serialize;

/// Smallest orderable unit of course content.
///
/// A lesson may be gated by prerequisite lessons (see `lesson_prerequisite`) and
/// by a release timestamp.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Owning module (foreign key to `course_modules`).
    pub module_id: i64,
    pub title: String,
    /// Ordering within the module.
    pub position: i32,
    pub duration_minutes: Option<i32>,
    /// The lesson cannot be completed before this instant.
    pub scheduled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course_module::Entity",
        from = "Column::ModuleId",
        to = "super::course_module::Column::Id"
    )]
    Module,

    #[sea_orm(has_many = "super::lesson_progress::Entity")]
    Progress,

    #[sea_orm(has_many = "super::quiz::Entity")]
    Quizzes,
}

impl Related<super::course_module::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Module.def()
    }
}

impl Related<super::lesson_progress::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Progress.def()
    }
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quizzes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create<C>(
        db: &C,
        module_id: i64,
        title: &str,
        position: i32,
        scheduled_at: Option<DateTime<Utc>>,
    ) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let now = Utc::now();
        ActiveModel {
            module_id: Set(module_id),
            title: Set(title.to_owned()),
            position: Set(position),
            duration_minutes: Set(None),
            scheduled_at: Set(scheduled_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    /// Resolves the course this lesson belongs to through its module.
    pub async fn course_id<C>(&self, db: &C) -> Result<Option<i64>, DbErr>
    where
        C: ConnectionTrait,
    {
        Ok(super::course_module::Entity::find_by_id(self.module_id)
            .one(db)
            .await?
            .map(|m| m.course_id))
    }

    /// Ids of the lessons that must be completed before this one.
    pub async fn prerequisite_ids<C>(&self, db: &C) -> Result<Vec<i64>, DbErr>
    where
        C: ConnectionTrait,
    {
        use super::lesson_prerequisite::{Column as PrereqCol, Entity as Prereq};

        Ok(Prereq::find()
            .filter(PrereqCol::LessonId.eq(self.id))
            .order_by_asc(PrereqCol::PrerequisiteId)
            .all(db)
            .await?
            .into_iter()
            .map(|p| p.prerequisite_id)
            .collect())
    }
}

/// Every lesson across all modules of a course, ordered by module position and
/// then lesson position.
pub async fn lessons_in_course<C>(db: &C, course_id: i64) -> Result<Vec<Model>, DbErr>
where
    C: ConnectionTrait,
{
    use super::course_module::{Column as ModuleCol, Entity as CourseModule};

    let modules = CourseModule::find()
        .filter(ModuleCol::CourseId.eq(course_id))
        .order_by_asc(ModuleCol::Position)
        .order_by_asc(ModuleCol::Id)
        .all(db)
        .await?;

    let mut lessons = Vec::new();
    for module in modules {
        let mut in_module = Entity::find()
            .filter(Column::ModuleId.eq(module.id))
            .order_by_asc(Column::Position)
            .order_by_asc(Column::Id)
            .all(db)
            .await?;
        lessons.append(&mut in_module);
    }

    Ok(lessons)
}
