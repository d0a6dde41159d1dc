//! Pieces of a log line that are rendered independently of routing: the bounded message
//! text, the node prefix, the thread tag, and the timestamp.

mod bounded;
mod node;
mod thread;
mod timestamp;

pub use bounded::{BoundedText, MAX_TEXT_LEN, render_bounded};
pub use node::{CONTROLLER_NODE, NO_NODE, node_prefix};
pub use thread::thread_tag;
#[cfg(unix)]
pub(crate) use thread::native_thread_id;
pub use timestamp::{TIMESTAMP_FORMAT, format_timestamp};
