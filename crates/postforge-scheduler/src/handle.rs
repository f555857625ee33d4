// SPDX-FileCopyrightText: 2026 Postforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Caller-side handle for a scheduled task.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use postforge_core::PostforgeError;
use tokio::sync::oneshot;

/// Resolves to the task's own result once the scheduler has run it.
///
/// If the task panics, or the scheduler drops it without running it, the
/// handle resolves to [`PostforgeError::Scheduler`].
#[must_use = "a TaskHandle does nothing unless awaited"]
#[derive(Debug)]
pub struct TaskHandle<T> {
    rx: oneshot::Receiver<Result<T, PostforgeError>>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(rx: oneshot::Receiver<Result<T, PostforgeError>>) -> Self {
        Self { rx }
    }
}

impl<T> Future for TaskHandle<T> {
    type Output = Result<T, PostforgeError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|received| match received {
            Ok(result) => result,
            Err(_) => Err(PostforgeError::Scheduler(
                "task ended without producing a result".into(),
            )),
        })
    }
}
