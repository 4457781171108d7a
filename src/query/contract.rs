//! Validation of inbound lookup requests.
//!
//! Request bodies are decoded as JSON, checked against a JSON Schema for the
//! query contract, then bound to `VendorQuery`. Anything that fails here is a
//! `MalformedQueryError` and never reaches the engine.

use crate::query::types::VendorQuery;
use anyhow::{Result, anyhow};
use jsonschema::JSONSchema;
use serde_json::{Value, json};
use std::fmt;
use std::sync::LazyLock;

static QUERY_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "vendor_qualification_request",
        "type": "object",
        "properties": {
            "software_category": { "type": ["string", "null"] },
            "capabilities": {
                "type": ["array", "null"],
                "items": { "type": "string" }
            }
        },
        "additionalProperties": true
    })
});

/// Request could not be turned into a `VendorQuery`.
#[derive(Debug)]
pub enum MalformedQueryError {
    /// Body is not JSON at all.
    Encoding(serde_json::Error),
    /// JSON that violates the request schema; one message per violation.
    Contract(Vec<String>),
    /// Schema-valid JSON that still would not bind.
    Shape(serde_json::Error),
}

impl fmt::Display for MalformedQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedQueryError::Encoding(err) => {
                write!(f, "request body is not valid JSON: {err}")
            }
            MalformedQueryError::Contract(violations) => write!(
                f,
                "request does not match the query contract: {}",
                violations.join("; ")
            ),
            MalformedQueryError::Shape(err) => {
                write!(f, "request could not be read as a vendor query: {err}")
            }
        }
    }
}

impl std::error::Error for MalformedQueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MalformedQueryError::Encoding(err) | MalformedQueryError::Shape(err) => Some(err),
            MalformedQueryError::Contract(_) => None,
        }
    }
}

/// Compiled request schema.
pub struct QueryContract {
    compiled: JSONSchema,
}

impl fmt::Debug for QueryContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryContract")
            .field("schema", Self::schema())
            .finish()
    }
}

impl QueryContract {
    pub fn new() -> Result<Self> {
        let compiled = JSONSchema::compile(&QUERY_SCHEMA)
            .map_err(|err| anyhow!("compiling vendor query schema: {err}"))?;
        Ok(Self { compiled })
    }

    /// The raw JSON Schema for the request body.
    pub fn schema() -> &'static Value {
        &QUERY_SCHEMA
    }

    /// Decode, validate, and bind a request body.
    pub fn parse(&self, body: &[u8]) -> Result<VendorQuery, MalformedQueryError> {
        let value: Value = serde_json::from_slice(body).map_err(MalformedQueryError::Encoding)?;
        self.parse_value(value)
    }

    /// Validate and bind an already-decoded request.
    pub fn parse_value(&self, value: Value) -> Result<VendorQuery, MalformedQueryError> {
        if let Err(errors) = self.compiled.validate(&value) {
            let violations = errors.map(|err| err.to_string()).collect();
            return Err(MalformedQueryError::Contract(violations));
        }
        serde_json::from_value(value).map_err(MalformedQueryError::Shape)
    }
}
