//! Tests for signal-assisted cooperative cancellation.

#![cfg(unix)]

use nodelog::cancel::{
    ThreadHandle, checkpoint, disable_cancellation, enable_cancellation, install_handler,
    interruptible, is_cancel_requested, is_handler_installed, request_cancel, signals_received,
};
use std::io::Read;
use std::os::unix::net::UnixStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

struct SetOnDrop(Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[test]
fn install_is_idempotent() {
    install_handler().unwrap();
    install_handler().unwrap();
    assert!(is_handler_installed());
}

#[test]
fn fresh_thread_is_not_cancelled() {
    install_handler().unwrap();
    thread::spawn(|| {
        assert!(!is_cancel_requested());
        assert_eq!(signals_received(), 0);
        checkpoint().unwrap();
    })
    .join()
    .unwrap();
}

#[test]
fn masked_requests_collapse_into_one_delivery() {
    install_handler().unwrap();

    let (ready_tx, ready_rx) = mpsc::channel();
    let (go_tx, go_rx) = mpsc::channel::<()>();

    let worker = thread::spawn(move || {
        disable_cancellation().unwrap();
        ready_tx.send(ThreadHandle::current()).unwrap();
        go_rx.recv().unwrap();

        // Still masked: nothing has been delivered yet.
        assert!(!is_cancel_requested());
        assert_eq!(signals_received(), 0);

        let result = enable_cancellation();
        (result.map_err(|e| e.is_cancelled()), signals_received())
    });

    let target = ready_rx.recv().unwrap();
    request_cancel(target).unwrap();
    request_cancel(target).unwrap();
    go_tx.send(()).unwrap();

    let (result, received) = worker.join().unwrap();
    assert_eq!(result, Err(true));
    assert_eq!(received, 1);
}

#[test]
fn blocked_read_unwinds_with_destructors() {
    install_handler().unwrap();

    let dropped = Arc::new(AtomicBool::new(false));
    let (ready_tx, ready_rx) = mpsc::channel();

    let worker = {
        let dropped = Arc::clone(&dropped);
        thread::spawn(move || -> Result<usize, nodelog::Error> {
            let _guard = SetOnDrop(dropped);
            // Keep the peer open so the read blocks instead of seeing EOF.
            let (mut port, _peer) = UnixStream::pair()?;
            port.set_read_timeout(Some(Duration::from_millis(50)))?;
            ready_tx.send(ThreadHandle::current()).ok();

            let mut buf = [0u8; 16];
            loop {
                checkpoint()?;
                match port.read(&mut buf) {
                    Err(e)
                        if matches!(
                            e.kind(),
                            std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                        ) => {}
                    other => {
                        if let Some(n) = interruptible(other)? {
                            return Ok(n);
                        }
                    }
                }
            }
        })
    };

    let target = ready_rx.recv().unwrap();
    thread::sleep(Duration::from_millis(20));
    request_cancel(target).unwrap();

    let result = worker.join().unwrap();
    assert!(result.unwrap_err().is_cancelled());
    assert!(dropped.load(Ordering::SeqCst));
}

#[test]
fn cancellation_is_sticky() {
    install_handler().unwrap();

    let (ready_tx, ready_rx) = mpsc::channel();
    let (go_tx, go_rx) = mpsc::channel::<()>();

    let worker = thread::spawn(move || {
        ready_tx.send(ThreadHandle::current()).unwrap();
        go_rx.recv().unwrap();
        while !is_cancel_requested() {
            thread::yield_now();
        }
        [checkpoint().is_err(), checkpoint().is_err(), is_cancel_requested()]
    });

    let target = ready_rx.recv().unwrap();
    request_cancel(target).unwrap();
    go_tx.send(()).unwrap();
    assert_eq!(worker.join().unwrap(), [true, true, true]);
}

#[test]
fn cancel_only_reaches_the_target() {
    install_handler().unwrap();

    let (ready_tx, ready_rx) = mpsc::channel();
    let (go_tx, go_rx) = mpsc::channel::<()>();

    let bystander = thread::spawn(move || {
        ready_tx.send(()).unwrap();
        go_rx.recv().unwrap();
        is_cancel_requested()
    });
    ready_rx.recv().unwrap();

    let (target_tx, target_rx) = mpsc::channel();
    let target = thread::spawn(move || {
        target_tx.send(ThreadHandle::current()).unwrap();
        while !is_cancel_requested() {
            thread::yield_now();
        }
    });
    request_cancel(target_rx.recv().unwrap()).unwrap();
    target.join().unwrap();

    go_tx.send(()).unwrap();
    assert!(!bystander.join().unwrap());
}

#[test]
fn exited_thread_is_a_no_op() {
    install_handler().unwrap();

    let finished = thread::spawn(|| {});
    while !finished.is_finished() {
        thread::yield_now();
    }
    // Exited but not joined: the id is still reserved and the request is harmless.
    request_cancel(ThreadHandle::of(&finished)).unwrap();
    finished.join().unwrap();
}

#[test]
fn thread_handle_tag_matches_log_tag() {
    assert_eq!(ThreadHandle::current().tag(), nodelog::fmt::thread_tag());
}

#[test]
fn interruptible_passes_values_and_errors_through() {
    assert_eq!(interruptible(Ok(7)).unwrap(), Some(7));

    let err = interruptible::<()>(Err(std::io::Error::other("broken"))).unwrap_err();
    assert!(matches!(err, nodelog::Error::Io(_)));

    // EINTR on a thread nobody cancelled asks the caller to retry.
    let retry = thread::spawn(|| {
        interruptible::<()>(Err(std::io::ErrorKind::Interrupted.into())).unwrap()
    });
    assert_eq!(retry.join().unwrap(), None);
}
