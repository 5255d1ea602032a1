use chrono::{DateTime, Utc};
use migration::Migrator;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::models::{
    course::Model as CourseModel,
    course_module::Model as CourseModuleModel,
    enrollment::Model as EnrollmentModel,
    lesson::Model as LessonModel,
    user::{Model as UserModel, Role},
};

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory db");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// A published course with one module of `lessons`, an instructor, and one
/// enrolled student.
pub struct SeededCourse {
    pub instructor: UserModel,
    pub student: UserModel,
    pub course: CourseModel,
    pub module: CourseModuleModel,
    pub lessons: Vec<LessonModel>,
}

pub async fn seed_course(db: &DatabaseConnection, lesson_count: usize) -> SeededCourse {
    seed_course_with_schedule(db, lesson_count, None).await
}

/// Like [`seed_course`], with every lesson released at `scheduled_at`.
pub async fn seed_course_with_schedule(
    db: &DatabaseConnection,
    lesson_count: usize,
    scheduled_at: Option<DateTime<Utc>>,
) -> SeededCourse {
    let instructor = UserModel::create(
        db,
        "instructor",
        "instructor@test.com",
        "Ada Instructor",
        Role::Instructor,
    )
    .await
    .expect("create instructor");
    let student = UserModel::create(db, "student", "student@test.com", "Sam Student", Role::Student)
        .await
        .expect("create student");
    let course = CourseModel::create(
        db,
        instructor.id,
        "Rust 101",
        Some("Ownership and borrowing"),
        true,
    )
    .await
    .expect("create course");
    let module = CourseModuleModel::create(db, course.id, "Basics", 1)
        .await
        .expect("create module");

    let mut lessons = Vec::with_capacity(lesson_count);
    for i in 0..lesson_count {
        let lesson = LessonModel::create(
            db,
            module.id,
            &format!("Lesson {}", i + 1),
            i as i32 + 1,
            scheduled_at,
        )
        .await
        .expect("create lesson");
        lessons.push(lesson);
    }

    EnrollmentModel::create(db, student.id, course.id)
        .await
        .expect("create enrollment");

    SeededCourse {
        instructor,
        student,
        course,
        module,
        lessons,
    }
}
