/*
[INPUT]:  Job submission parameters
[OUTPUT]: Serializable request bodies for task endpoints
[POS]:    Data layer - type definitions for task API communication
[UPDATE]: When submission endpoints change their body shape
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveTaskRequest {
    pub drive_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTaskRequest {
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelTaskRequest {
    pub task_id: String,
}
