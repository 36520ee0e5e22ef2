pub mod config;
pub mod database;
mod error;
pub mod label_repository;
pub mod task_repository;
pub mod task_status_repository;
pub mod user_repository;

pub use config::DatabaseConfig;
pub use database::Database;
pub use label_repository::LabelRepository;
pub use task_repository::TaskRepository;
pub use task_status_repository::TaskStatusRepository;
pub use user_repository::UserRepository;
