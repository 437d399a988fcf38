//! HTTP request handlers.

pub mod catalog;
pub mod health;
pub mod load_data;
pub mod search;

pub use catalog::catalog_handler;
pub use health::health_handler;
pub use load_data::load_data_handler;
pub use search::search_handler;

use crate::error::{ApiError, ApiResult};

/// Trimmed value of a required field; absent and blank are both missing.
pub(crate) fn required(value: Option<String>, name: &'static str) -> ApiResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ApiError::MissingField(name)),
    }
}
