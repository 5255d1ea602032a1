//! Certificate eligibility.
//!
//! Certificates are never stored. A student qualifies for a course once every
//! lesson across all of its modules is completed; the completion date is the
//! latest completion among those lessons. Courses without lessons never qualify.

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use serde::Serialize;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::models::{
    course::{Entity as CourseEntity, Model as CourseModel},
    enrollment::{Column as EnrollmentCol, Entity as EnrollmentEntity},
    lesson,
    lesson_progress::{Column as ProgressCol, Entity as ProgressEntity},
    user::{Entity as UserEntity, Model as UserModel},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateDescriptor {
    pub course_id: i64,
    pub course_title: String,
    pub student_name: String,
    pub instructor_name: String,
    pub completion_date: DateTime<Utc>,
    pub total_lessons: u64,
    pub completed_lessons: u64,
}

/// Every course the student has fully completed, in enrollment order.
pub async fn list_eligible_certificates<C>(
    db: &C,
    student_id: i64,
) -> CoreResult<Vec<CertificateDescriptor>>
where
    C: ConnectionTrait,
{
    let student = UserEntity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("user"))?;

    let enrollments = EnrollmentEntity::find()
        .filter(EnrollmentCol::UserId.eq(student_id))
        .order_by_asc(EnrollmentCol::CreatedAt)
        .order_by_asc(EnrollmentCol::CourseId)
        .all(db)
        .await?;

    let mut certificates = Vec::new();
    for enrollment in enrollments {
        let Some(course) = CourseEntity::find_by_id(enrollment.course_id).one(db).await? else {
            continue;
        };
        if let Some(descriptor) = evaluate(db, &student, &course).await? {
            certificates.push(descriptor);
        }
    }

    debug!(student_id, count = certificates.len(), "Eligible certificates listed");
    Ok(certificates)
}

/// The certificate for one course, or `None` while it is not fully completed.
pub async fn certificate_for_course<C>(
    db: &C,
    student_id: i64,
    course_id: i64,
) -> CoreResult<Option<CertificateDescriptor>>
where
    C: ConnectionTrait,
{
    let student = UserEntity::find_by_id(student_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("user"))?;
    let course = CourseEntity::find_by_id(course_id)
        .one(db)
        .await?
        .ok_or(CoreError::NotFound("course"))?;

    EnrollmentEntity::find_by_id((student_id, course_id))
        .one(db)
        .await?
        .ok_or(CoreError::NotEnrolled)?;

    evaluate(db, &student, &course).await
}

async fn evaluate<C>(
    db: &C,
    student: &UserModel,
    course: &CourseModel,
) -> CoreResult<Option<CertificateDescriptor>>
where
    C: ConnectionTrait,
{
    let lesson_ids: Vec<i64> = lesson::lessons_in_course(db, course.id)
        .await?
        .into_iter()
        .map(|l| l.id)
        .collect();
    if lesson_ids.is_empty() {
        return Ok(None);
    }
    let total_lessons = lesson_ids.len() as u64;

    let completed = ProgressEntity::find()
        .filter(ProgressCol::UserId.eq(student.id))
        .filter(ProgressCol::LessonId.is_in(lesson_ids))
        .filter(ProgressCol::Completed.eq(true))
        .all(db)
        .await?;
    let completed_lessons = completed.len() as u64;

    if completed_lessons != total_lessons {
        return Ok(None);
    }
    let Some(completion_date) = completed.iter().map(|p| p.effective_completed_at()).max() else {
        return Ok(None);
    };

    let instructor_name = UserEntity::find_by_id(course.instructor_id)
        .one(db)
        .await?
        .map(|u| u.display_name)
        .unwrap_or_default();

    Ok(Some(CertificateDescriptor {
        course_id: course.id,
        course_title: course.title.clone(),
        student_name: student.display_name.clone(),
        instructor_name,
        completion_date,
        total_lessons,
        completed_lessons,
    }))
}
