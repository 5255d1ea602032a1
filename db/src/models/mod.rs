pub mod course;
pub mod course_module;
pub mod enrollment;
pub mod lesson;
pub mod lesson_prerequisite;
pub mod lesson_progress;
pub mod quiz;
pub mod quiz_answer;
pub mod quiz_attempt;
pub mod quiz_option;
pub mod quiz_question;
pub mod user;

pub use course::Entity as Course;
pub use course_module::Entity as CourseModule;
pub use enrollment::Entity as Enrollment;
pub use lesson::Entity as Lesson;
pub use lesson_prerequisite::Entity as LessonPrerequisite;
pub use lesson_progress::Entity as LessonProgress;
pub use quiz::Entity as Quiz;
pub use quiz_answer::Entity as QuizAnswer;
pub use quiz_attempt::Entity as QuizAttempt;
pub use quiz_option::Entity as QuizOption;
pub use quiz_question::Entity as QuizQuestion;
pub use user::Entity as User;
