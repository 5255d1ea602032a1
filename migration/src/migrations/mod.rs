pub mod m202510010001_create_users;
pub mod m202510010002_create_courses;
pub mod m202510010003_create_lessons;
pub mod m202510010004_create_enrollments;
pub mod m202510010005_create_lesson_progress;
pub mod m202510010006_create_quizzes;
pub mod m202510010007_create_quiz_attempts;
