use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Uniform response envelope: `code` 0 on success, -1 on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 0,
            message: String::from("success"),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Display) -> Self {
        Self {
            code: -1,
            message: message.to_string(),
            data: None,
        }
    }
}
