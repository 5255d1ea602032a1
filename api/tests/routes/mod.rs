pub mod courses;
pub mod health_test;
pub mod lessons;
pub mod me;
pub mod quizzes;
