//! CLI command implementations.

mod init;
mod serve;

pub use init::cmd_init;
pub use serve::cmd_serve;
