use taskboard_core::{LabelService, TaskService, TaskStatusService, UserService};
use taskboard_db::{
    Database, LabelRepository, TaskRepository, TaskStatusRepository, UserRepository,
};

use crate::auth::TokenIssuer;

/// Shared application state, available to all route handlers via `State<Arc<AppState>>`.
pub struct AppState {
    pub db: Database,
    pub tokens: TokenIssuer,
}

impl AppState {
    pub fn users(&self) -> UserService<UserRepository> {
        UserService::new(self.db.user_repo())
    }

    pub fn task_statuses(&self) -> TaskStatusService<TaskStatusRepository> {
        TaskStatusService::new(self.db.task_status_repo())
    }

    pub fn labels(&self) -> LabelService<LabelRepository> {
        LabelService::new(self.db.label_repo())
    }

    pub fn tasks(
        &self,
    ) -> TaskService<TaskRepository, TaskStatusRepository, UserRepository, LabelRepository> {
        TaskService::new(
            self.db.task_repo(),
            self.db.task_status_repo(),
            self.db.user_repo(),
            self.db.label_repo(),
        )
    }
}
