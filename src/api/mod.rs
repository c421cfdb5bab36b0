//! HTTP API module.
//!
//! Every handler loads the current snapshot once and uses only that snapshot.

mod classes;
mod health;
mod lessons;

pub use classes::*;
pub use health::*;
pub use lessons::*;
