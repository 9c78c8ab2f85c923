/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{ready, Context, Poll};

use bytes::Bytes;
use futures_util::Stream;
use pin_project_lite::pin_project;

/// Observer for the bytes moved by a transfer.
///
/// Progress is informational only, listeners cannot influence the outcome of a transfer.
pub trait ProgressListener: Send + Sync {
    /// Called once before the first body byte is sent or received.
    ///
    /// `total_bytes` is the expected body size when it is known.
    fn on_start(&self, total_bytes: Option<u64>) {
        let _ = total_bytes;
    }

    /// Called after each chunk with the running total of bytes moved so far.
    fn on_progress(&self, transferred_bytes: u64, total_bytes: Option<u64>);

    /// Called once when the body has been fully sent or received.
    fn on_finish(&self, transferred_bytes: u64) {
        let _ = transferred_bytes;
    }
}

/// A [`ProgressListener`] that ignores all progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressListener for NoProgress {
    fn on_progress(&self, _transferred_bytes: u64, _total_bytes: Option<u64>) {}
}

/// Shared running byte count for a single transfer.
#[derive(Clone, Default)]
pub(crate) struct ProgressTracker {
    transferred: Arc<AtomicU64>,
    total: Option<u64>,
    listener: Option<Arc<dyn ProgressListener>>,
}

impl ProgressTracker {
    pub(crate) fn new(total: Option<u64>, listener: Option<Arc<dyn ProgressListener>>) -> Self {
        Self {
            transferred: Arc::new(AtomicU64::new(0)),
            total,
            listener,
        }
    }

    pub(crate) fn start(&self) {
        if let Some(listener) = &self.listener {
            listener.on_start(self.total);
        }
    }

    pub(crate) fn advance(&self, n: u64) {
        let transferred = self.transferred.fetch_add(n, Ordering::Relaxed) + n;
        if let Some(listener) = &self.listener {
            listener.on_progress(transferred, self.total);
        }
    }

    pub(crate) fn finish(&self) {
        if let Some(listener) = &self.listener {
            listener.on_finish(self.transferred());
        }
    }

    pub(crate) fn transferred(&self) -> u64 {
        self.transferred.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for ProgressTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressTracker")
            .field("transferred", &self.transferred())
            .field("total", &self.total)
            .finish()
    }
}

pin_project! {
    /// Stream adapter that reports every chunk passing through it to a [`ProgressTracker`].
    #[derive(Debug)]
    pub(crate) struct ProgressStream<S> {
        #[pin]
        inner: S,
        tracker: ProgressTracker,
    }
}

impl<S> ProgressStream<S> {
    pub(crate) fn new(inner: S, tracker: ProgressTracker) -> Self {
        Self { inner, tracker }
    }
}

impl<S, E> Stream for ProgressStream<S>
where
    S: Stream<Item = Result<Bytes, E>>,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        let item = ready!(this.inner.poll_next(cx));
        if let Some(Ok(chunk)) = &item {
            this.tracker.advance(chunk.len() as u64);
        }
        Poll::Ready(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::{ProgressListener, ProgressStream, ProgressTracker};
    use bytes::Bytes;
    use futures_util::{stream, StreamExt};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorder(Mutex<Vec<u64>>);

    impl ProgressListener for Recorder {
        fn on_progress(&self, transferred_bytes: u64, _total_bytes: Option<u64>) {
            self.0.lock().unwrap().push(transferred_bytes);
        }
    }

    #[tokio::test]
    async fn test_progress_stream_counts_chunks() {
        let recorder = Arc::new(Recorder::default());
        let tracker = ProgressTracker::new(Some(9), Some(recorder.clone()));
        let chunks = vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"abcd")),
            Ok(Bytes::from_static(b"efg")),
            Ok(Bytes::from_static(b"hi")),
        ];

        let collected: Vec<_> = ProgressStream::new(stream::iter(chunks), tracker.clone())
            .collect()
            .await;

        assert_eq!(3, collected.len());
        assert_eq!(9, tracker.transferred());
        assert_eq!(vec![4, 7, 9], *recorder.0.lock().unwrap());
    }
}
