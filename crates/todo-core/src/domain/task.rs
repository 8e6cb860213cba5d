// ============================================================================
// Todo Core - Task Entity
// File: crates/todo-core/src/domain/task.rs
// Description: Task entity, derived status and page metadata
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_shared::{TaskId, UserId};

/// Lifecycle state derived from `completed_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Active,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Active => "active",
            TaskStatus::Completed => "completed",
        }
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn status(&self) -> TaskStatus {
        if self.is_completed() {
            TaskStatus::Completed
        } else {
            TaskStatus::Active
        }
    }
}

/// Fields for a task about to be created. Validated at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
}

/// Partial content edit. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl TaskChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total_pages: u32,
    pub current_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub limit: u32,
}

/// One page of a caller's tasks.
#[derive(Debug, Clone)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub page_info: PageInfo,
}
