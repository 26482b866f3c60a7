//! Typed JSON messages written to stdout
//!
//! Every message is an object with a `type` discriminator, one per line.

use crate::error::Error;
use crate::schema::CollectionSchema;
use crate::source::CollectionInfo;
use crate::types::LogLevel;
use serde_json::{json, Value};

/// A schema for one collection
pub fn schema_message(schema: &CollectionSchema) -> Value {
    json!({
        "type": "SCHEMA",
        "schema": schema
    })
}

/// The collections a catalog exposes
pub fn collections_message(collections: &[CollectionInfo]) -> Value {
    json!({
        "type": "COLLECTIONS",
        "collections": collections
    })
}

/// Outcome of a connection check
pub fn connection_status(outcome: Result<(), &Error>) -> Value {
    match outcome {
        Ok(()) => json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {
                "status": "SUCCEEDED",
                "message": "Connection successful"
            }
        }),
        Err(e) => json!({
            "type": "CONNECTION_STATUS",
            "connectionStatus": {
                "status": "FAILED",
                "message": format!("Connection failed: {e}")
            }
        }),
    }
}

/// A log line
pub fn log_message(level: LogLevel, message: impl Into<String>) -> Value {
    json!({
        "type": "LOG",
        "log": {
            "level": level.as_str(),
            "message": message.into()
        }
    })
}
