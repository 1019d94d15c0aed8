/*
[INPUT]:  Task resource schema and serde requirements
[OUTPUT]: Typed Rust structs/enums with serialization support
[POS]:    Data layer - type definitions for task API communication
[UPDATE]: When the task schema changes or new types are added
*/

pub mod enums;
pub mod models;
pub mod requests;

pub use enums::*;
pub use models::*;
pub use requests::*;
