pub mod attempts_test;
pub mod get_test;
