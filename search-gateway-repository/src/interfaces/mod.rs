//! Interface definitions for the search engine.
//!
//! This module defines the abstract `SearchEngineClient` and
//! `SearchEngineConnector` traits that allow for dependency injection and
//! swappable search backend implementations.

mod search_engine_client;
mod search_engine_connector;

pub use search_engine_client::SearchEngineClient;
pub use search_engine_connector::SearchEngineConnector;
