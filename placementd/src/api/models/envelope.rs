//! The uniform response envelope.
//!
//! Every successful response is wrapped as `{"success": true, "message": ...,
//! "data": ...}`; list responses additionally carry a `pagination` block.
//! Error responses are produced by [`crate::errors::Error`] with the same
//! envelope shape and `"success": false`.

use super::pagination::PageMeta;
use serde::{Deserialize, Serialize};

/// Success envelope for single-object and action responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// Success envelope for paginated list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiListResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> ApiListResponse<T> {
    pub fn new(message: impl Into<String>, data: Vec<T>, pagination: PageMeta) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::pagination::Pagination;

    #[test]
    fn test_envelope_shape() {
        let envelope = ApiResponse::new("Created", serde_json::json!({"id": 1}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "Created");
        assert_eq!(value["data"]["id"], 1);
    }

    #[test]
    fn test_list_envelope_shape() {
        let pagination = Pagination {
            page: Some(2),
            limit: Some(10),
        };
        let envelope = ApiListResponse::new("OK", vec![1, 2, 3], PageMeta::new(&pagination, 23));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["pagination"]["page"], 2);
        assert_eq!(value["pagination"]["total"], 23);
        assert_eq!(value["pagination"]["pages"], 3);
        assert_eq!(value["data"].as_array().unwrap().len(), 3);
    }
}
