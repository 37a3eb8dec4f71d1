//! Progress-callback trait for per-file batch events.
//!
//! Inject an [`Arc<dyn BatchProgressCallback>`] via
//! [`crate::config::PatchConfigBuilder::progress_callback`] to receive an
//! event as the batch driver reaches each file. The CLI uses it to drive a
//! progress bar; tests use it to observe ordering.
//!
//! # Example
//!
//! ```rust
//! use sitepatch::{BatchProgressCallback, FileStatus, PatchConfig};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingCallback {
//!     updated: AtomicUsize,
//! }
//!
//! impl BatchProgressCallback for CountingCallback {
//!     fn on_file_complete(&self, _index: usize, _total: usize, _file: &str, status: &FileStatus) {
//!         if matches!(status, FileStatus::Updated) {
//!             self.updated.fetch_add(1, Ordering::SeqCst);
//!         }
//!     }
//! }
//!
//! let config = PatchConfig::builder()
//!     .progress_callback(Arc::new(CountingCallback { updated: AtomicUsize::new(0) }))
//!     .build()
//!     .unwrap();
//! ```

use crate::output::{FileStatus, RunSummary};
use std::sync::Arc;

/// Called by the batch driver as it processes each file.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Files are processed one at a time, in name order.
pub trait BatchProgressCallback: Send + Sync {
    /// Called once after the directory has been listed.
    fn on_batch_start(&self, total_files: usize) {
        let _ = total_files;
    }

    /// Called before a file is read.
    ///
    /// # Arguments
    /// * `index`: 1-indexed position in the batch
    /// * `total`: number of files in the batch
    /// * `file` : file name
    fn on_file_start(&self, index: usize, total: usize, file: &str) {
        let _ = (index, total, file);
    }

    /// Called after a file has been handled, whatever the outcome.
    fn on_file_complete(&self, index: usize, total: usize, file: &str, status: &FileStatus) {
        let _ = (index, total, file, status);
    }

    /// Called once after every file has been attempted.
    fn on_batch_complete(&self, summary: &RunSummary) {
        let _ = summary;
    }
}

/// A no-op implementation for callers that don't need progress events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressCallback;

impl BatchProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::PatchConfig`].
pub type ProgressCallback = Arc<dyn BatchProgressCallback>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileError;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingCallback {
        events: Mutex<Vec<String>>,
    }

    impl BatchProgressCallback for RecordingCallback {
        fn on_batch_start(&self, total_files: usize) {
            self.events.lock().unwrap().push(format!("start {total_files}"));
        }

        fn on_file_start(&self, index: usize, total: usize, file: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("begin {index}/{total} {file}"));
        }

        fn on_file_complete(&self, index: usize, _total: usize, file: &str, status: &FileStatus) {
            self.events
                .lock()
                .unwrap()
                .push(format!("end {index} {file} {}", status.label()));
        }

        fn on_batch_complete(&self, summary: &RunSummary) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done {}", summary.total()));
        }
    }

    #[test]
    fn noop_callback_does_not_panic() {
        let cb = NoopProgressCallback;
        cb.on_batch_start(2);
        cb.on_file_start(1, 2, "a.html");
        cb.on_file_complete(1, 2, "a.html", &FileStatus::Updated);
        cb.on_batch_complete(&RunSummary::new("test"));
    }

    #[test]
    fn recording_callback_receives_events() {
        let cb = RecordingCallback::default();
        cb.on_batch_start(2);
        cb.on_file_start(1, 2, "a.html");
        cb.on_file_complete(1, 2, "a.html", &FileStatus::Updated);
        cb.on_file_start(2, 2, "b.html");
        cb.on_file_complete(
            2,
            2,
            "b.html",
            &FileStatus::Failed {
                error: FileError::ReadFailed {
                    file: "b.html".into(),
                    detail: "gone".into(),
                },
            },
        );
        cb.on_batch_complete(&RunSummary::new("test"));

        let events = cb.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "start 2",
                "begin 1/2 a.html",
                "end 1 a.html updated",
                "begin 2/2 b.html",
                "end 2 b.html error",
                "done 0",
            ]
        );
    }

    #[test]
    fn arc_dyn_callback_works() {
        let cb: ProgressCallback = Arc::new(NoopProgressCallback);
        cb.on_batch_start(1);
    }
}
