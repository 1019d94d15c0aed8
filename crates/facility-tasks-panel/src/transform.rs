/*
[INPUT]:  Raw task records from the task resource
[OUTPUT]: Trimmed task entries held in the panel store
[POS]:    Task domain - record normalization (pure)
[UPDATE]: When the panel needs more or fewer task fields
*/

use facility_tasks_adapter::{TaskRecord, TaskStatus, TaskType};
use serde::Serialize;
use serde_json::{Map, Value};

/// Task as the panel keeps it: exactly the fields the UI consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub metadata: Map<String, Value>,
    pub percentage: f64,
    pub cancellable: bool,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            task_type: record.task_type,
            status: record.status,
            metadata: record.metadata,
            percentage: record.percentage,
            cancellable: record.cancellable,
        }
    }
}

/// Normalize a task sequence, preserving order and length.
pub fn transform_tasks<I, T>(tasks: I) -> Vec<Task>
where
    I: IntoIterator<Item = T>,
    T: Into<Task>,
{
    tasks.into_iter().map(Into::into).collect()
}
