/*
[INPUT]:  Task resource schema definitions and serde requirements
[OUTPUT]: Task records as the backend sends them
[POS]:    Data layer - type definitions for task API communication
[UPDATE]: When the task schema changes
*/

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::enums::{TaskStatus, TaskType};

/// One entry of the backend task collection.
///
/// Only the fields the panel consumes are typed; everything else the server
/// attaches (timestamps, tracebacks, owner info) is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    #[serde(default)]
    pub metadata: Map<String, Value>,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub cancellable: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TaskRecord {
    /// Build a record with empty metadata and no extra fields.
    pub fn new(
        id: impl Into<String>,
        task_type: TaskType,
        status: TaskStatus,
        percentage: f64,
    ) -> Self {
        Self {
            id: id.into(),
            task_type,
            status,
            metadata: Map::new(),
            percentage,
            cancellable: false,
            extra: Map::new(),
        }
    }
}
