//! Process-side glue for the minefield rules engine: configuration, the shared controller,
//! and the collaborators that locate players, draw tiles and deliver messages.

pub use collaborators::*;
pub use config::*;
pub use error::*;
pub use host::*;
pub use scene::*;

mod collaborators;
mod config;
mod error;
mod host;
pub mod messages;
mod scene;
