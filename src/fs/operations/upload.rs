//! Upload batches.
//!
//! A batch uploads its files strictly one after another into the directory
//! that was current when the batch started. Progress counts settled jobs,
//! failed ones included, so it always ends at 100%.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::StorageApi;
use crate::drive::core::Completion;
use crate::drive::{Drive, DriveEvent};
use crate::error::{DriveError, Result};
use crate::fs::{LocalFile, PendingJob, UploadBatch, UploadState};
use crate::notify::NotificationKind;

impl<S: StorageApi> Drive<S> {
    /// Start uploading `files` into the current directory.
    ///
    /// An empty list is a no-op. Only one batch may run at a time; a second
    /// call while a batch is active is rejected with
    /// [`DriveError::UploadInProgress`].
    pub fn upload(&mut self, files: Vec<LocalFile>) -> Result<()> {
        if files.is_empty() {
            return Ok(());
        }
        if !self.uploads.is_idle() {
            return Err(DriveError::UploadInProgress);
        }

        let batch = UploadBatch::new(files, self.store.path());
        info!(
            total = batch.total_count(),
            path = batch.origin_path(),
            "upload batch started"
        );
        self.emit(DriveEvent::UploadStarted {
            total: batch.total_count(),
        });
        self.uploads = UploadState::Uploading(batch);
        self.start_next_upload();
        Ok(())
    }

    fn start_next_upload(&mut self) {
        let Some(job) = self.uploads.batch_mut().and_then(UploadBatch::next_job) else {
            return;
        };
        debug!(file = job.file.name(), path = %job.target_path, "upload job started");
        let api = Arc::clone(&self.api);
        self.spawn_task(async move {
            let (index, result) = run_upload_job(api, job).await;
            Completion::Uploaded { index, result }
        });
    }

    pub(crate) fn settle_upload(&mut self, index: usize, result: Result<()>) {
        let Some(batch) = self.uploads.batch_mut() else {
            return;
        };
        let Some(name) = batch.jobs().get(index).map(|j| j.file.name().to_string()) else {
            return;
        };

        let failure = result.err();
        let Some(progress) = batch.settle(index, failure.as_ref().map(ToString::to_string)) else {
            return;
        };
        let terminal = batch.is_terminal();

        if let Some(err) = failure {
            warn!(file = %name, "upload failed: {}", err);
            self.notify(
                NotificationKind::Error,
                format!("Failed to upload {}: {}", name, err),
            );
        }
        self.emit(DriveEvent::UploadProgress(progress));

        if terminal {
            self.finish_upload();
        } else {
            self.start_next_upload();
        }
    }

    fn finish_upload(&mut self) {
        let Some(batch) = self.uploads.finish() else {
            return;
        };
        info!(
            succeeded = batch.succeeded_count(),
            failed = batch.failed_count(),
            "upload batch finished"
        );
        self.emit(DriveEvent::UploadFinished {
            succeeded: batch.succeeded_count(),
            failed: batch.failed_count(),
        });
        self.notify(NotificationKind::Success, "Upload complete");
        self.load(batch.origin_path());
        self.load_space();
    }
}

/// Read one local file and send it to the storage service.
pub(crate) async fn run_upload_job<S: StorageApi>(
    api: Arc<S>,
    job: PendingJob,
) -> (usize, Result<()>) {
    let result = async {
        let data = job.file.read().await?;
        api.upload(&job.target_path, job.file.name(), data).await
    }
    .await;
    (job.index, result)
}
