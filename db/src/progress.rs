//! Lesson completion and course progress.
//!
//! Completing a lesson checks, in order: the lesson exists, the student holds an
//! active enrollment in its course, every prerequisite is completed, and the
//! lesson is released. Only then is the progress row upserted and the
//! enrollment percentage recounted from scratch. The whole sequence runs in a
//! single transaction, so a failed precondition leaves nothing behind.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::models::{
    course::Entity as CourseEntity,
    enrollment::{
        ActiveModel as EnrollmentActiveModel, Entity as EnrollmentEntity, EnrollmentStatus,
        Model as EnrollmentModel,
    },
    lesson::{self, Entity as LessonEntity},
    lesson_prerequisite::{Column as PrereqCol, Entity as PrereqEntity},
    lesson_progress::{
        ActiveModel as ProgressActiveModel, Column as ProgressCol, Entity as ProgressEntity,
        Model as ProgressModel,
    },
    user::Entity as UserEntity,
};

/// Optional viewing telemetry sent with a completion or activity event.
///
/// `None` leaves the stored value untouched; nothing here can clear a field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Telemetry {
    pub time_spent: Option<i64>,
    pub last_position: Option<i64>,
    pub watched_duration: Option<i64>,
    pub drop_off_point: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionOutcome {
    pub progress: ProgressModel,
    /// Recounted course-level percentage for the enrollment.
    pub course_progress: i32,
}

/// Why a lesson cannot be completed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockReason {
    PrerequisitesIncomplete,
    NotYetAvailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct LessonStatus {
    pub lesson_id: i64,
    pub module_id: i64,
    pub title: String,
    pub position: i32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub locked: bool,
    pub lock_reason: Option<LockReason>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseProgress {
    pub course_id: i64,
    pub total_lessons: u64,
    pub completed_lessons: u64,
    pub percent: i32,
    pub lessons: Vec<LessonStatus>,
}

/// `round(100 * completed / total)`, or 0 for an empty course.
pub fn progress_percent(completed: u64, total: u64) -> i32 {
    if total == 0 {
        return 0;
    }
    (100.0 * completed as f64 / total as f64).round() as i32
}

/// Marks `lesson_id` complete for `student_id` and recounts the course percentage.
///
/// Repeated calls are idempotent for `completed_at`: the first completion time
/// is kept and only newly supplied telemetry is merged in.
pub async fn mark_lesson_complete(
    db: &DatabaseConnection,
    student_id: i64,
    lesson_id: i64,
    telemetry: &Telemetry,
    now: DateTime<Utc>,
) -> CoreResult<CompletionOutcome> {
    let result = complete_in_transaction(db, student_id, lesson_id, telemetry, now).await;

    match &result {
        Ok(outcome) => info!(
            student_id,
            lesson_id,
            course_progress = outcome.course_progress,
            "Lesson completed"
        ),
        Err(CoreError::Database(e)) => {
            error!(student_id, lesson_id, error = %e, "Lesson completion failed")
        }
        Err(e) => warn!(student_id, lesson_id, code = e.code(), "Lesson completion rejected"),
    }

    result
}

async fn complete_in_transaction(
    db: &DatabaseConnection,
    student_id: i64,
    lesson_id: i64,
    telemetry: &Telemetry,
    now: DateTime<Utc>,
) -> CoreResult<CompletionOutcome> {
    let txn = db.begin().await?;

    let lesson = LessonEntity::find_by_id(lesson_id)
        .one(&txn)
        .await?
        .ok_or(CoreError::NotFound("lesson"))?;
    let course_id = lesson
        .course_id(&txn)
        .await?
        .ok_or(CoreError::NotFound("course"))?;

    require_active_enrollment(&txn, student_id, course_id).await?;

    let prerequisites = lesson.prerequisite_ids(&txn).await?;
    if !prerequisites.is_empty() {
        let done = completed_lesson_ids(&txn, student_id, &prerequisites).await?;
        let missing: Vec<i64> = prerequisites
            .into_iter()
            .filter(|id| !done.contains(id))
            .collect();
        if !missing.is_empty() {
            return Err(CoreError::PrerequisitesIncomplete { missing });
        }
    }

    if let Some(available_at) = lesson.scheduled_at {
        if available_at > now {
            return Err(CoreError::NotYetAvailable { available_at });
        }
    }

    let progress = upsert_progress(&txn, student_id, lesson_id, telemetry, true, now).await?;
    let course_progress = recompute_enrollment_progress(&txn, student_id, course_id, now).await?;

    txn.commit().await?;

    Ok(CompletionOutcome {
        progress,
        course_progress,
    })
}

/// Records viewing activity on a lesson without completing it.
///
/// Only existence and enrollment are checked; prerequisites and release time do
/// not apply to activity. The enrollment percentage is left untouched.
pub async fn record_lesson_activity<C>(
    db: &C,
    student_id: i64,
    lesson_id: i64,
    telemetry: &Telemetry,
    now: DateTime<Utc>,
) -> CoreResult<ProgressModel>
where
    C: ConnectionTrait,
{
    let lesson = LessonEntity::find_by_id(lesson_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("lesson"))?;
    let course_id = lesson
        .course_id(db)
        .await?
        .ok_or(CoreError::NotFound("course"))?;

    require_active_enrollment(db, student_id, course_id).await?;

    let progress = upsert_progress(db, student_id, lesson_id, telemetry, false, now).await?;
    info!(student_id, lesson_id, "Lesson activity recorded");
    Ok(progress)
}

/// Enrolls a student in a published course.
///
/// A cancelled enrollment is reactivated; an active one is a conflict.
pub async fn enroll(
    db: &DatabaseConnection,
    student_id: i64,
    course_id: i64,
    now: DateTime<Utc>,
) -> CoreResult<EnrollmentModel> {
    let txn = db.begin().await?;

    UserEntity::find_by_id(student_id)
        .one(&txn)
        .await?
        .ok_or(CoreError::NotFound("user"))?;

    let course = CourseEntity::find_by_id(course_id)
        .one(&txn)
        .await?
        .filter(|c| c.published)
        .ok_or(CoreError::NotFound("course"))?;

    match EnrollmentEntity::find_by_id((student_id, course.id)).one(&txn).await? {
        Some(existing) if existing.is_active() => return Err(CoreError::AlreadyEnrolled),
        Some(existing) => {
            let mut active = existing.into_active_model();
            active.status = Set(EnrollmentStatus::Active);
            active.updated_at = Set(now);
            active.update(&txn).await?;
        }
        None => {
            EnrollmentActiveModel {
                user_id: Set(student_id),
                course_id: Set(course.id),
                progress: Set(0),
                status: Set(EnrollmentStatus::Active),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?;
        }
    }

    recompute_enrollment_progress(&txn, student_id, course.id, now).await?;

    let enrollment = EnrollmentEntity::find_by_id((student_id, course.id))
        .one(&txn)
        .await?
        .ok_or(CoreError::NotFound("enrollment"))?;

    txn.commit().await?;

    info!(student_id, course_id, "Student enrolled");
    Ok(enrollment)
}

/// Per-lesson completion and lock state for an enrolled student.
pub async fn course_progress<C>(
    db: &C,
    student_id: i64,
    course_id: i64,
    now: DateTime<Utc>,
) -> CoreResult<CourseProgress>
where
    C: ConnectionTrait,
{
    CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("course"))?;
    require_active_enrollment(db, student_id, course_id).await?;

    let lessons = lesson::lessons_in_course(db, course_id).await?;
    let lesson_ids: Vec<i64> = lessons.iter().map(|l| l.id).collect();

    let rows: HashMap<i64, ProgressModel> = ProgressEntity::find()
        .filter(ProgressCol::UserId.eq(student_id))
        .filter(ProgressCol::LessonId.is_in(lesson_ids.clone()))
        .all(db)
        .await?
        .into_iter()
        .map(|row| (row.lesson_id, row))
        .collect();

    let mut prerequisites: HashMap<i64, Vec<i64>> = HashMap::new();
    for edge in PrereqEntity::find()
        .filter(PrereqCol::LessonId.is_in(lesson_ids))
        .all(db)
        .await?
    {
        prerequisites
            .entry(edge.lesson_id)
            .or_default()
            .push(edge.prerequisite_id);
    }

    let prerequisite_ids: Vec<i64> = prerequisites.values().flatten().copied().collect();
    let completed_prerequisites = completed_lesson_ids(db, student_id, &prerequisite_ids).await?;

    let statuses: Vec<LessonStatus> = lessons
        .into_iter()
        .map(|lesson| {
            let row = rows.get(&lesson.id);
            let completed = row.is_some_and(|r| r.completed);

            let lock_reason = if completed {
                None
            } else if prerequisites
                .get(&lesson.id)
                .is_some_and(|ids| ids.iter().any(|id| !completed_prerequisites.contains(id)))
            {
                Some(LockReason::PrerequisitesIncomplete)
            } else if lesson.scheduled_at.is_some_and(|at| at > now) {
                Some(LockReason::NotYetAvailable)
            } else {
                None
            };

            LessonStatus {
                lesson_id: lesson.id,
                module_id: lesson.module_id,
                title: lesson.title,
                position: lesson.position,
                completed,
                completed_at: row.and_then(|r| r.completed_at),
                locked: lock_reason.is_some(),
                lock_reason,
            }
        })
        .collect();

    let total_lessons = statuses.len() as u64;
    let completed_lessons = statuses.iter().filter(|s| s.completed).count() as u64;

    Ok(CourseProgress {
        course_id,
        total_lessons,
        completed_lessons,
        percent: progress_percent(completed_lessons, total_lessons),
        lessons: statuses,
    })
}

/// Fails with [`CoreError::NotEnrolled`] unless the student holds an active
/// enrollment in the course.
pub(crate) async fn require_active_enrollment<C>(
    db: &C,
    student_id: i64,
    course_id: i64,
) -> CoreResult<EnrollmentModel>
where
    C: ConnectionTrait,
{
    EnrollmentEntity::find_by_id((student_id, course_id))
        .one(db)
        .await?
        .filter(EnrollmentModel::is_active)
        .ok_or(CoreError::NotEnrolled)
}

/// The subset of `lesson_ids` the student has completed.
pub(crate) async fn completed_lesson_ids<C>(
    db: &C,
    student_id: i64,
    lesson_ids: &[i64],
) -> Result<HashSet<i64>, sea_orm::DbErr>
where
    C: ConnectionTrait,
{
    if lesson_ids.is_empty() {
        return Ok(HashSet::new());
    }

    Ok(ProgressEntity::find()
        .filter(ProgressCol::UserId.eq(student_id))
        .filter(ProgressCol::LessonId.is_in(lesson_ids.to_vec()))
        .filter(ProgressCol::Completed.eq(true))
        .all(db)
        .await?
        .into_iter()
        .map(|row| row.lesson_id)
        .collect())
}

/// Recounts completed lessons for the enrollment and persists the percentage.
async fn recompute_enrollment_progress<C>(
    db: &C,
    student_id: i64,
    course_id: i64,
    now: DateTime<Utc>,
) -> CoreResult<i32>
where
    C: ConnectionTrait,
{
    let lesson_ids: Vec<i64> = lesson::lessons_in_course(db, course_id)
        .await?
        .into_iter()
        .map(|l| l.id)
        .collect();
    let total = lesson_ids.len() as u64;

    let completed = if lesson_ids.is_empty() {
        0
    } else {
        ProgressEntity::find()
            .filter(ProgressCol::UserId.eq(student_id))
            .filter(ProgressCol::LessonId.is_in(lesson_ids))
            .filter(ProgressCol::Completed.eq(true))
            .count(db)
            .await?
    };

    let percent = progress_percent(completed, total);

    let enrollment = EnrollmentEntity::find_by_id((student_id, course_id))
        .one(db)
        .await?
        .ok_or(CoreError::NotEnrolled)?;
    let mut active = enrollment.into_active_model();
    active.progress = Set(percent);
    active.updated_at = Set(now);
    active.update(db).await?;

    Ok(percent)
}

async fn upsert_progress<C>(
    db: &C,
    student_id: i64,
    lesson_id: i64,
    telemetry: &Telemetry,
    complete: bool,
    now: DateTime<Utc>,
) -> Result<ProgressModel, sea_orm::DbErr>
where
    C: ConnectionTrait,
{
    let existing = ProgressEntity::find_by_id((student_id, lesson_id))
        .one(db)
        .await?;

    match existing {
        Some(row) => {
            let already_completed_at = row.completed_at;
            let mut active = row.into_active_model();
            if complete {
                active.completed = Set(true);
                if already_completed_at.is_none() {
                    active.completed_at = Set(Some(now));
                }
            }
            merge_telemetry(&mut active, telemetry);
            active.updated_at = Set(now);
            active.update(db).await
        }
        None => {
            let mut active = ProgressActiveModel {
                user_id: Set(student_id),
                lesson_id: Set(lesson_id),
                completed: Set(complete),
                completed_at: Set(complete.then_some(now)),
                time_spent: Set(None),
                last_position: Set(None),
                watched_duration: Set(None),
                drop_off_point: Set(None),
                created_at: Set(now),
                updated_at: Set(now),
            };
            merge_telemetry(&mut active, telemetry);
            active.insert(db).await
        }
    }
}

fn merge_telemetry(active: &mut ProgressActiveModel, telemetry: &Telemetry) {
    if let Some(v) = telemetry.time_spent {
        active.time_spent = Set(Some(v));
    }
    if let Some(v) = telemetry.last_position {
        active.last_position = Set(Some(v));
    }
    if let Some(v) = telemetry.watched_duration {
        active.watched_duration = Set(Some(v));
    }
    if let Some(v) = telemetry.drop_off_point {
        active.drop_off_point = Set(Some(v));
    }
}
