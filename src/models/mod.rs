//! Data models for the timetable backend.
//!
//! `raw` mirrors the upstream document, `snapshot` holds the built index and
//! `response` matches the JSON served to clients.

mod raw;
mod response;
mod snapshot;

pub use raw::*;
pub use response::*;
pub use snapshot::*;
