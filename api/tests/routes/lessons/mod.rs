pub mod complete_test;
pub mod activity_test;
