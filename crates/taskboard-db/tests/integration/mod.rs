mod common;
mod label_tests;
mod task_tests;
mod user_tests;
