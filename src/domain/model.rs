use serde::{Deserialize, Serialize};

// Every record leaves the transform step carrying exactly this field.
pub const COLOUR_KEY: &str = "colour";
pub const COLOUR_VALUE: &str = "blue";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub processed_records: Vec<Record>,
    pub updated_count: usize,
}
