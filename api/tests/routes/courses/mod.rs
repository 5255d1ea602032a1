pub mod enroll_test;
pub mod progress_test;
