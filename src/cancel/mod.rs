//! Signal-assisted cooperative cancellation of worker threads.
//!
//! A worker blocked in `read(2)` on a serial port cannot poll a flag. Sending it
//! [`CANCEL_SIGNAL`] interrupts the syscall with `EINTR` (the handler is installed
//! without `SA_RESTART`), and the handler marks the receiving thread as cancelled.
//! The worker then returns [`Error::Cancelled`](crate::Error::Cancelled) from its next
//! [`checkpoint`] and unwinds normally through `?`, running every destructor on the way.
//!
//! Masking with [`disable_cancellation`] holds a request pending. Standard signals do not
//! queue, so any number of requests during the masked window collapse into one delivery
//! when [`enable_cancellation`] unmasks.
//!
//! Signal handlers must be async-signal-safe, so the handler only stores into a
//! thread-local `Cell` and never allocates or locks.

#![allow(unsafe_code)]

use crate::fmt::native_thread_id;
use crate::internal;
use std::cell::Cell;
use std::io;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

/// The reserved signal. Nothing else in the process may install a handler for it.
pub const CANCEL_SIGNAL: libc::c_int = libc::SIGUSR1;

static INSTALLED: AtomicBool = AtomicBool::new(false);
static INSTALL_RESULT: OnceLock<Result<(), i32>> = OnceLock::new();

thread_local! {
    static CANCEL_REQUESTED: Cell<bool> = const { Cell::new(false) };
    static SIGNALS_RECEIVED: Cell<u32> = const { Cell::new(0) };
}

extern "C" fn on_cancel_signal(_signum: libc::c_int) {
    // try_with: a signal landing during thread teardown must not panic inside the handler.
    let _ = CANCEL_REQUESTED.try_with(|flag| flag.set(true));
    let _ = SIGNALS_RECEIVED.try_with(|count| count.set(count.get().saturating_add(1)));
}

/// Native id of a live thread, usable as a cancellation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThreadHandle(usize);

impl ThreadHandle {
    /// The calling thread.
    #[must_use]
    pub fn current() -> Self {
        Self(native_thread_id())
    }

    /// The thread behind `handle`. Borrowing the `JoinHandle` guarantees the thread
    /// has not been joined yet, so its id cannot have been reused.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn of<T>(handle: &JoinHandle<T>) -> Self {
        use std::os::unix::thread::JoinHandleExt;
        Self(handle.as_pthread_t() as usize)
    }

    /// Same rendering as the thread tag on log lines.
    #[must_use]
    pub fn tag(self) -> String {
        format!("{:08x}", self.0)
    }
}

/// Registers the process-wide handler for [`CANCEL_SIGNAL`]. Idempotent.
///
/// # Errors
/// The OS error from `sigaction`, remembered and returned again on later calls.
pub fn install_handler() -> Result<(), crate::Error> {
    let result = INSTALL_RESULT.get_or_init(|| {
        // SAFETY: the sigaction struct is fully initialized before use, and the
        // handler only touches const-initialized thread-locals.
        let rc = unsafe {
            let mut action: libc::sigaction = std::mem::zeroed();
            action.sa_sigaction =
                on_cancel_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
            // No SA_RESTART: blocked syscalls must come back with EINTR.
            action.sa_flags = 0;
            libc::sigemptyset(&raw mut action.sa_mask);
            libc::sigaction(CANCEL_SIGNAL, &raw const action, std::ptr::null_mut())
        };
        if rc == 0 {
            INSTALLED.store(true, Ordering::Release);
            internal::debug("CANCEL", "Cancellation handler installed");
            Ok(())
        } else {
            let err = io::Error::last_os_error();
            internal::error("CANCEL", &format!("sigaction failed: {err}"));
            Err(err.raw_os_error().unwrap_or(libc::EINVAL))
        }
    });
    match *result {
        Ok(()) => Ok(()),
        Err(code) => Err(crate::Error::Signal(io::Error::from_raw_os_error(code))),
    }
}

#[must_use]
pub fn is_handler_installed() -> bool {
    INSTALLED.load(Ordering::Acquire)
}

fn set_mask(how: libc::c_int) -> Result<(), crate::Error> {
    // SAFETY: the set is initialized by sigemptyset before it is read.
    let rc = unsafe {
        let mut set: libc::sigset_t = std::mem::zeroed();
        libc::sigemptyset(&raw mut set);
        libc::sigaddset(&raw mut set, CANCEL_SIGNAL);
        libc::pthread_sigmask(how, &raw const set, std::ptr::null_mut())
    };
    if rc == 0 {
        Ok(())
    } else {
        Err(crate::Error::Signal(io::Error::from_raw_os_error(rc)))
    }
}

/// Blocks [`CANCEL_SIGNAL`] for the calling thread; requests stay pending.
///
/// # Errors
/// The error from `pthread_sigmask`.
pub fn disable_cancellation() -> Result<(), crate::Error> {
    set_mask(libc::SIG_BLOCK)
}

/// Unblocks [`CANCEL_SIGNAL`] for the calling thread.
///
/// A pending request is delivered before `pthread_sigmask` returns, so this reports
/// it right away.
///
/// # Errors
/// [`Error::Cancelled`](crate::Error::Cancelled) when a request is pending or was
/// already delivered; the error from `pthread_sigmask` otherwise.
pub fn enable_cancellation() -> Result<(), crate::Error> {
    set_mask(libc::SIG_UNBLOCK)?;
    checkpoint()
}

/// Cancellation point. Once cancelled, a thread stays cancelled.
///
/// # Errors
/// [`Error::Cancelled`](crate::Error::Cancelled) after a request reached this thread.
pub fn checkpoint() -> Result<(), crate::Error> {
    if is_cancel_requested() {
        Err(crate::Error::Cancelled)
    } else {
        Ok(())
    }
}

#[must_use]
pub fn is_cancel_requested() -> bool {
    CANCEL_REQUESTED.with(Cell::get)
}

/// How many times the handler ran on the calling thread.
#[must_use]
pub fn signals_received() -> u32 {
    SIGNALS_RECEIVED.with(Cell::get)
}

/// Asks `target` to stop. Fire-and-forget: returns once the signal is sent.
///
/// Before [`install_handler`] this does nothing, because the default action of
/// the signal would kill the whole process. A thread that already exited is a no-op.
///
/// # Errors
/// Any `pthread_kill` failure other than "no such thread".
#[allow(clippy::cast_possible_truncation)]
pub fn request_cancel(target: ThreadHandle) -> Result<(), crate::Error> {
    if !is_handler_installed() {
        internal::warn(
            "CANCEL",
            &format!("Cancel of {} ignored: handler not installed", target.tag()),
        );
        return Ok(());
    }

    // SAFETY: ThreadHandle values come from live threads (see ThreadHandle::of);
    // ESRCH covers threads that have since exited.
    let rc = unsafe { libc::pthread_kill(target.0 as libc::pthread_t, CANCEL_SIGNAL) };
    match rc {
        0 => {
            internal::debug("CANCEL", &format!("Cancel sent to {}", target.tag()));
            Ok(())
        }
        libc::ESRCH => {
            internal::debug("CANCEL", &format!("Thread {} already gone", target.tag()));
            Ok(())
        }
        code => Err(crate::Error::Signal(io::Error::from_raw_os_error(code))),
    }
}

/// Treats an interrupted syscall as a cancellation point.
///
/// Returns `Ok(None)` when `result` was `EINTR` without a pending cancellation, so
/// the caller can retry.
///
/// # Errors
/// [`Error::Cancelled`](crate::Error::Cancelled) if this thread was cancelled, or the
/// original I/O error.
pub fn interruptible<T>(result: io::Result<T>) -> Result<Option<T>, crate::Error> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::Interrupted => checkpoint().map(|()| None),
        Err(e) => Err(e.into()),
    }
}
