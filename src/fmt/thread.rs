//! Per-thread tag used to correlate interleaved output from concurrent workers.

/// `pthread_self()` widened to `usize`, the handle the cancellation module signals.
#[cfg(unix)]
#[allow(unsafe_code, clippy::cast_possible_truncation)]
pub(crate) fn native_thread_id() -> usize {
    // SAFETY: pthread_self has no preconditions and cannot fail.
    let id = unsafe { libc::pthread_self() };
    id as usize
}

/// Lowercase hex of the native thread id, zero-padded to at least 8 digits.
///
/// A tag seen in the log names the same thread a cancellation request would target.
#[cfg(unix)]
#[must_use]
pub fn thread_tag() -> String {
    format!("{:08x}", native_thread_id())
}

/// Non-unix targets have no stable native handle in std; hash the `ThreadId` instead.
#[cfg(not(unix))]
#[must_use]
pub fn thread_tag() -> String {
    use std::hash::{DefaultHasher, Hash, Hasher};

    let mut hasher = DefaultHasher::new();
    std::thread::current().id().hash(&mut hasher);
    format!("{:08x}", hasher.finish() & 0xffff_ffff)
}
