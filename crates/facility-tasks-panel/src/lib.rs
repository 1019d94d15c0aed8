/*
[INPUT]:  Public API exports for the facility-tasks-panel crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod bridge;
pub mod cancel;
pub mod config;
pub mod pages;
pub mod poller;
pub mod routes;
pub mod scheduler;
pub mod store;
pub mod transform;
pub mod trigger;
pub mod wizard;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use cancel::cancel_task;
pub use config::PanelConfig;
pub use poller::{DiscardReason, PollOutcome, fetch_current_tasks, poll_tasks, refresh_task_list};
pub use routes::{PageName, RouteTable, navigate};
pub use scheduler::PollScheduler;
pub use store::{Mutation, PanelState, Store, WizardState};
pub use transform::{Task, transform_tasks};
pub use trigger::{
    TriggerOutcome, trigger_channel_delete_task, trigger_local_content_export_task,
    trigger_local_content_import_task, trigger_remote_content_import_task,
};
