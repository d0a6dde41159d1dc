//! CLI command implementations.

mod levels;
mod pipe;
mod write;

pub use levels::cmd_levels;
pub use pipe::cmd_pipe;
pub use write::cmd_write;
