//! Settings for the two maintenance commands.
//!
//! There is no configuration file: every setting has a fixed default that
//! matches the deployment layout, and each can be overridden from the CLI.

mod model;
pub mod types;


// Re-export public API
pub use model::{PatchSettings, SyncSettings, Upstream};
pub use types::SyncMode;
