//! Error types for the search gateway repository.

mod connect_error;
mod search_error;

pub use connect_error::ConnectError;
pub use search_error::SearchError;
