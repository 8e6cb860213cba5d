//! Request payloads and their field rules

use serde::Deserialize;
use todo_core::domain::{NewTask, TaskChanges};
use todo_shared::constants::{DESCRIPTION_MAX_LENGTH, TITLE_MAX_LENGTH};
use todo_shared::Pagination;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "a valid email address is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTodoRequest {
    #[validate(length(min = 1, max = TITLE_MAX_LENGTH, message = "title must be 1 to 100 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = DESCRIPTION_MAX_LENGTH, message = "description must be at most 200 characters"))]
    pub description: String,
}

impl From<CreateTodoRequest> for NewTask {
    fn from(request: CreateTodoRequest) -> Self {
        NewTask {
            title: request.title,
            description: request.description,
        }
    }
}

/// Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTodoRequest {
    #[validate(length(min = 1, max = TITLE_MAX_LENGTH, message = "title must be 1 to 100 characters"))]
    pub title: Option<String>,
    #[validate(length(max = DESCRIPTION_MAX_LENGTH, message = "description must be at most 200 characters"))]
    pub description: Option<String>,
}

impl From<UpdateTodoRequest> for TaskChanges {
    fn from(request: UpdateTodoRequest) -> Self {
        TaskChanges {
            title: request.title,
            description: request.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SetDoneRequest {
    pub is_done: bool,
}

/// Raw list query. Values are kept as strings so that malformed input falls
/// back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub include_done: Option<String>,
}

impl ListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::from_query(self.page.as_deref(), self.limit.as_deref())
    }

    pub fn include_done(&self) -> bool {
        matches!(self.include_done.as_deref().map(str::trim), Some("true" | "1"))
    }
}
