//! # Search Gateway Shared
//!
//! Plain data types that flow between the gateway's HTTP layer, the ingest
//! loader and the search engine repository.

mod document;
mod query;
mod response;

pub use document::{field_as_str, Record};
pub use query::MatchQuery;
pub use response::MatchResult;
