//! Response payloads

use chrono::{DateTime, Utc};
use serde::Serialize;
use todo_core::domain::{PageInfo, Task, TaskPage, TaskStatus};
use todo_shared::TaskId;

#[derive(Debug, Serialize)]
pub struct TaskDto {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub done_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            status: task.status(),
            title: task.title,
            description: task.description,
            done_at: task.completed_at,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListTasksResponse {
    pub data: Vec<TaskDto>,
    pub pagination: PageInfo,
}

impl From<TaskPage> for ListTasksResponse {
    fn from(page: TaskPage) -> Self {
        Self {
            data: page.tasks.into_iter().map(TaskDto::from).collect(),
            pagination: page.page_info,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
