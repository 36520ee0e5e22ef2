pub mod error;
pub mod label_service;
pub mod models;
pub mod password;
pub mod patch;
pub mod seed;
pub mod task_service;
pub mod task_status_service;
pub mod traits;
pub mod user_service;
pub mod validation;


pub use error::AppError;
pub use label_service::LabelService;
pub use models::{
    Label, LabelPatch, NewLabel, NewTask, NewTaskStatus, NewUser, Task, TaskFilter, TaskPatch,
    TaskStatus, TaskStatusPatch, User, UserPatch,
};
pub use patch::Patch;
pub use seed::{SeedConfig, SeedReport, seed_defaults};
pub use task_service::TaskService;
pub use task_status_service::TaskStatusService;
pub use traits::{LabelStore, TaskStatusStore, TaskStore, UserStore};
pub use user_service::UserService;
