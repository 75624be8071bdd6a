//! One-shot background work polled from the frame loop

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

pub enum JobPoll<T> {
    Pending,
    Ready(T),
    /// Worker exited without a result (it panicked)
    Lost,
}

/// A closure running on its own thread, reporting back over a channel
pub struct Job<T> {
    rx: Receiver<T>,
}

impl<T: Send + 'static> Job<T> {
    pub fn spawn<F>(name: &str, work: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new().name(name.to_string()).spawn(move || {
            // The receiver is gone if the screen that started us was dropped
            let _ = tx.send(work());
        });
        if let Err(e) = spawned {
            log::error!("Failed to start {} worker: {}", name, e);
        }
        Self { rx }
    }

    /// Non-blocking check, call once per frame
    pub fn poll(&self) -> JobPoll<T> {
        match self.rx.try_recv() {
            Ok(value) => JobPoll::Ready(value),
            Err(TryRecvError::Empty) => JobPoll::Pending,
            Err(TryRecvError::Disconnected) => JobPoll::Lost,
        }
    }
}

#[cfg(test)]
pub(crate) fn wait_for<T>(mut poll: impl FnMut() -> Option<T>) -> T {
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    loop {
        if let Some(value) = poll() {
            return value;
        }
        assert!(std::time::Instant::now() < deadline, "background job timed out");
        thread::sleep(std::time::Duration::from_millis(5));
    }
}
