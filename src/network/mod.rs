//! Network layer - chain connections and referenda fetching
//!
//! The Network actor receives connect/fetch commands and sends back responses.

pub mod actor;
pub mod loader;

pub use actor::NetworkActor;
