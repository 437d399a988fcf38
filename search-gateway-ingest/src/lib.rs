//! # Search Gateway Ingest
//!
//! This crate turns uploaded JSON documents into records and loads them into
//! the search engine.
//!
//! ## Flow
//!
//! 1. **Parse**: the whole upload is decoded as a JSON array of objects
//!    before anything is sent, so a malformed document indexes nothing.
//! 2. **Load**: every record becomes one `index` action and the actions go
//!    out in a single bulk request, in input order.

pub mod errors;
pub mod loader;

pub use errors::IngestError;
pub use loader::{parse_records, read_records, BatchLoader};
