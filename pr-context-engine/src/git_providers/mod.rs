//! Code-hosting provider clients.
//!
//! Only GitHub is reviewed today; the client authenticates with a statically
//! configured service token, never with the caller's session credential.

pub mod github;
pub mod types;

pub use github::{GitHubClient, GitHubConfig};
pub use types::*;
