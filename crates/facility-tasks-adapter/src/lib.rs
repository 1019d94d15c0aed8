/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public facility task adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod http;
pub mod resource;
pub mod types;

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    DEFAULT_BASE_URL,
    FacilityClient,
    FacilityError,
    ResponseStatus,
    Result,
};

pub use resource::TaskResource;

// Re-export all types
pub use types::*;
