//! Upload batch state machine.
//!
//! A batch is an ordered queue of jobs drained one at a time: a job is only
//! handed out by [`UploadBatch::next_job`] once the previous one has settled,
//! and [`UploadState`] allows at most one batch at a time.

#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::progress::UploadProgress;

/// Contents of a local file picked by the user.
#[derive(Debug, Clone)]
enum LocalSource {
    Bytes(Arc<[u8]>),
    #[cfg(not(target_arch = "wasm32"))]
    Path(PathBuf),
}

/// A local file queued for upload.
#[derive(Debug, Clone)]
pub struct LocalFile {
    name: String,
    source: LocalSource,
}

impl LocalFile {
    /// File backed by an in-memory buffer.
    pub fn from_bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        Self {
            name: name.into(),
            source: LocalSource::Bytes(Arc::from(data)),
        }
    }

    /// File on the local disk, read when its job starts.
    ///
    /// This method is only available on native targets (not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            name,
            source: LocalSource::Path(path.to_path_buf()),
        }
    }

    /// Name the file will have on the server.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the whole file.
    pub async fn read(&self) -> Result<Vec<u8>> {
        match &self.source {
            LocalSource::Bytes(data) => Ok(data.to_vec()),
            #[cfg(not(target_arch = "wasm32"))]
            LocalSource::Path(path) => Ok(tokio::fs::read(path).await?),
        }
    }
}

/// Lifecycle of a single upload job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum JobStatus {
    Pending,
    InFlight,
    Succeeded,
    Failed,
}

impl JobStatus {
    /// Succeeded or failed.
    pub fn is_settled(&self) -> bool {
        matches!(self, JobStatus::Succeeded | JobStatus::Failed)
    }
}

/// One file of a batch.
#[derive(Debug, Clone)]
pub struct UploadJob {
    pub file: LocalFile,
    pub status: JobStatus,
    pub error_message: Option<String>,
}

/// Job handed to the uploader.
#[derive(Debug, Clone)]
pub struct PendingJob {
    pub index: usize,
    pub file: LocalFile,
    /// Directory the batch was started in
    pub target_path: String,
}

/// An ordered group of uploads started by one user action.
#[derive(Debug, Clone)]
pub struct UploadBatch {
    jobs: Vec<UploadJob>,
    completed_count: usize,
    origin_path: String,
}

impl UploadBatch {
    pub fn new(files: Vec<LocalFile>, origin_path: impl Into<String>) -> Self {
        let jobs = files
            .into_iter()
            .map(|file| UploadJob {
                file,
                status: JobStatus::Pending,
                error_message: None,
            })
            .collect();
        Self {
            jobs,
            completed_count: 0,
            origin_path: origin_path.into(),
        }
    }

    pub fn jobs(&self) -> &[UploadJob] {
        &self.jobs
    }

    /// Settled jobs. Never decreases.
    pub fn completed_count(&self) -> usize {
        self.completed_count
    }

    pub fn total_count(&self) -> usize {
        self.jobs.len()
    }

    /// Directory that was current when the batch started.
    pub fn origin_path(&self) -> &str {
        &self.origin_path
    }

    pub fn succeeded_count(&self) -> usize {
        self.count(JobStatus::Succeeded)
    }

    pub fn failed_count(&self) -> usize {
        self.count(JobStatus::Failed)
    }

    fn count(&self, status: JobStatus) -> usize {
        self.jobs.iter().filter(|j| j.status == status).count()
    }

    /// Every job has succeeded or failed.
    pub fn is_terminal(&self) -> bool {
        self.jobs.iter().all(|j| j.status.is_settled())
    }

    pub fn progress(&self, filename: &str) -> UploadProgress {
        UploadProgress::new(self.completed_count, self.total_count(), filename)
    }

    /// Mark the next pending job in flight and return it.
    ///
    /// Returns `None` while a job is still in flight or once the queue is
    /// drained.
    pub fn next_job(&mut self) -> Option<PendingJob> {
        if self.jobs.iter().any(|j| j.status == JobStatus::InFlight) {
            return None;
        }
        let index = self
            .jobs
            .iter()
            .position(|j| j.status == JobStatus::Pending)?;
        let job = &mut self.jobs[index];
        job.status = JobStatus::InFlight;
        Some(PendingJob {
            index,
            file: job.file.clone(),
            target_path: self.origin_path.clone(),
        })
    }

    /// Record the outcome of the in-flight job at `index`.
    ///
    /// Returns the progress after this job, or `None` if `index` is not the
    /// in-flight job.
    pub fn settle(&mut self, index: usize, error: Option<String>) -> Option<UploadProgress> {
        let job = self.jobs.get_mut(index)?;
        if job.status != JobStatus::InFlight {
            return None;
        }
        match error {
            None => job.status = JobStatus::Succeeded,
            Some(message) => {
                job.status = JobStatus::Failed;
                job.error_message = Some(message);
            }
        }
        let filename = job.file.name().to_string();
        self.completed_count += 1;
        Some(self.progress(&filename))
    }
}

/// At most one active batch.
#[derive(Debug, Clone, Default)]
pub enum UploadState {
    #[default]
    Idle,
    Uploading(UploadBatch),
}

impl UploadState {
    pub fn is_idle(&self) -> bool {
        matches!(self, UploadState::Idle)
    }

    pub fn batch(&self) -> Option<&UploadBatch> {
        match self {
            UploadState::Uploading(batch) => Some(batch),
            UploadState::Idle => None,
        }
    }

    pub fn batch_mut(&mut self) -> Option<&mut UploadBatch> {
        match self {
            UploadState::Uploading(batch) => Some(batch),
            UploadState::Idle => None,
        }
    }

    /// Finish the active batch, returning it.
    pub fn finish(&mut self) -> Option<UploadBatch> {
        match std::mem::take(self) {
            UploadState::Uploading(batch) => Some(batch),
            UploadState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(names: &[&str]) -> UploadBatch {
        let files = names
            .iter()
            .map(|n| LocalFile::from_bytes(*n, n.as_bytes().to_vec()))
            .collect();
        UploadBatch::new(files, "/docs")
    }

    #[test]
    fn test_jobs_are_handed_out_one_at_a_time() {
        let mut batch = batch(&["x.txt", "y.txt"]);

        let first = batch.next_job().unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.target_path, "/docs");
        assert!(batch.next_job().is_none());

        batch.settle(0, None).unwrap();
        let second = batch.next_job().unwrap();
        assert_eq!(second.index, 1);
        assert_eq!(second.file.name(), "y.txt");
    }

    #[test]
    fn test_completed_count_reaches_total_once() {
        let mut batch = batch(&["a", "b", "c"]);
        let mut seen = Vec::new();

        while let Some(job) = batch.next_job() {
            let error = (job.index == 1).then(|| "quota exceeded".to_string());
            let progress = batch.settle(job.index, error).unwrap();
            seen.push(progress.completed);
        }

        assert_eq!(seen, vec![1, 2, 3]);
        assert!(batch.is_terminal());
        assert_eq!(batch.succeeded_count(), 2);
        assert_eq!(batch.failed_count(), 1);
        assert_eq!(
            batch.jobs()[1].error_message.as_deref(),
            Some("quota exceeded")
        );
    }

    #[test]
    fn test_settle_ignores_jobs_not_in_flight() {
        let mut batch = batch(&["a", "b"]);
        assert!(batch.settle(0, None).is_none());
        batch.next_job().unwrap();
        assert!(batch.settle(1, None).is_none());
        assert!(batch.settle(0, None).is_some());
        assert!(batch.settle(0, None).is_none());
        assert_eq!(batch.completed_count(), 1);
    }

    #[test]
    fn test_upload_state_finish() {
        let mut state = UploadState::Uploading(batch(&["a"]));
        assert!(!state.is_idle());
        assert_eq!(state.batch().unwrap().total_count(), 1);

        let finished = state.finish().unwrap();
        assert_eq!(finished.origin_path(), "/docs");
        assert!(state.is_idle());
        assert!(state.finish().is_none());
    }

    #[tokio::test]
    async fn test_local_file_from_bytes() {
        let file = LocalFile::from_bytes("x.txt", b"hello".to_vec());
        assert_eq!(file.name(), "x.txt");
        assert_eq!(file.read().await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_local_file_missing_path_fails_on_read() {
        let file = LocalFile::from_path("/definitely/not/here.bin");
        assert_eq!(file.name(), "here.bin");
        assert!(file.read().await.is_err());
    }
}
