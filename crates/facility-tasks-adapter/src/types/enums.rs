/*
[INPUT]:  Task resource schema definitions and serde requirements
[OUTPUT]: Typed Rust enums for task kind and lifecycle status
[POS]:    Data layer - type definitions for task API communication
[UPDATE]: When the backend adds task kinds or statuses
*/

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of job tracked by the backend task queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    #[serde(rename = "localimport", alias = "LOCALIMPORT")]
    LocalImport,
    #[serde(rename = "localexport", alias = "LOCALEXPORT")]
    LocalExport,
    #[serde(rename = "remoteimport", alias = "REMOTEIMPORT")]
    RemoteImport,
    #[serde(rename = "deletechannel", alias = "DELETECHANNEL")]
    DeleteChannel,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskType::LocalImport => "localimport",
            TaskType::LocalExport => "localexport",
            TaskType::RemoteImport => "remoteimport",
            TaskType::DeleteChannel => "deletechannel",
            TaskType::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Lifecycle state reported by the backend. The set is owned by the server;
/// anything unrecognised maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "QUEUED", alias = "queued")]
    Queued,
    #[serde(rename = "SCHEDULED", alias = "scheduled")]
    Scheduled,
    #[serde(rename = "RUNNING", alias = "running")]
    Running,
    #[serde(rename = "COMPLETED", alias = "completed")]
    Completed,
    #[serde(rename = "FAILED", alias = "failed")]
    Failed,
    #[serde(rename = "CANCELING", alias = "canceling")]
    Canceling,
    #[serde(rename = "CANCELED", alias = "canceled", alias = "CANCELLED")]
    Canceled,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TaskStatus::Queued => "QUEUED",
            TaskStatus::Scheduled => "SCHEDULED",
            TaskStatus::Running => "RUNNING",
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Canceling => "CANCELING",
            TaskStatus::Canceled => "CANCELED",
            TaskStatus::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_type_accepts_both_cases() {
        let lower: TaskType = serde_json::from_str("\"remoteimport\"").unwrap();
        let upper: TaskType = serde_json::from_str("\"REMOTEIMPORT\"").unwrap();
        assert_eq!(lower, TaskType::RemoteImport);
        assert_eq!(upper, TaskType::RemoteImport);
    }

    #[test]
    fn test_unrecognised_values_map_to_unknown() {
        let kind: TaskType = serde_json::from_str("\"diskcleanup\"").unwrap();
        let status: TaskStatus = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(kind, TaskType::Unknown);
        assert_eq!(status, TaskStatus::Unknown);
    }
}
