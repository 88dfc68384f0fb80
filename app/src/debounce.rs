//! Keystroke debouncing
//!
//! Each `trigger` aborts the pending timer and starts a new one, so only
//! the last call inside a window reaches the handler. Once a timer fires the
//! handler runs as its own task; later triggers never cancel it.

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

type Handler<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

pub struct Debouncer<T> {
    delay: Duration,
    handler: Handler<T>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Send + 'static> Debouncer<T> {
    pub fn new<F, Fut>(delay: Duration, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self {
            delay,
            handler: Arc::new(move |arg: T| handler(arg).boxed()),
            pending: Mutex::new(None),
        }
    }

    /// Schedule the handler with `arg` after the delay, replacing any
    /// pending call. Must be called from within a tokio runtime.
    pub fn trigger(&self, arg: T) {
        let handler = Arc::clone(&self.handler);
        let delay = self.delay;

        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(handler(arg));
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.replace(timer) {
            previous.abort();
        }
    }

    /// Drop the pending call, if any
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    /// Whether a timer is scheduled and has not fired yet
    pub fn is_pending(&self) -> bool {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.as_ref().is_some_and(|timer| !timer.is_finished())
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }
}
