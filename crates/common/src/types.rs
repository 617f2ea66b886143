//! Request and response types for the pgforge API

use serde::{Deserialize, Serialize};

/// Desired cluster shape, consumed once per `/generate` call to produce the
/// Terraform variables file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterRequest {
    pub postgres_version: String,
    pub instance_type: String,
    pub num_replicas: i64,
    pub max_connections: i64,
    pub shared_buffers: String,
}

/// Acknowledgment-only response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Status plus sanitized tool output, one entry per line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputLinesResponse {
    pub status: String,
    pub output: Vec<String>,
}

/// Status plus raw tool output as a single string
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOutputResponse {
    pub status: String,
    pub output: String,
}

/// Orchestrated apply acknowledgment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub status: String,
    pub message: String,
}
