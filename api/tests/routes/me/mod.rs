pub mod certificates_test;
