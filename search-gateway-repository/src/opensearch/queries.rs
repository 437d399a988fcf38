//! OpenSearch request body builders.
//!
//! This module builds the JSON bodies sent to the engine for match queries
//! and bulk index requests.

use serde_json::{json, Map, Value};

use search_gateway_shared::{MatchQuery, Record};

/// Build a single-field match query.
///
/// The value is analyzed by the engine according to the field's mapping:
/// `text` fields match on tokens, `keyword` fields match exactly.
pub fn build_match_query(query: &MatchQuery, size: usize) -> Value {
    let mut clause = Map::new();
    clause.insert(query.field.clone(), Value::String(query.value.clone()));

    json!({
        "query": {
            "match": clause
        },
        "size": size
    })
}

/// Build the NDJSON lines of a bulk index request.
///
/// Each record produces an action line targeting `index` followed by the
/// record itself as the document source. Input order is preserved.
pub fn build_bulk_body(index: &str, records: &[Record]) -> Vec<Value> {
    let mut body = Vec::with_capacity(records.len() * 2);

    for record in records {
        body.push(json!({ "index": { "_index": index } }));
        body.push(Value::Object(record.clone()));
    }

    body
}
