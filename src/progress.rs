//! Progress reporting for upload batches.

use serde::Serialize;

/// Progress of an upload batch, reported after every settled job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadProgress {
    /// Jobs settled so far (succeeded or failed)
    pub completed: usize,
    /// Jobs in the batch
    pub total: usize,
    /// Name of the file whose job just settled
    pub filename: String,
}

impl UploadProgress {
    /// Create a new progress report.
    pub fn new(completed: usize, total: usize, filename: impl Into<String>) -> Self {
        Self {
            completed,
            total,
            filename: filename.into(),
        }
    }

    /// Get progress as a percentage (0.0 to 100.0).
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.completed as f64 / self.total as f64) * 100.0
    }

    /// Percentage rounded for display.
    pub fn display_percent(&self) -> u8 {
        self.percent().round() as u8
    }

    /// Check if every job has settled.
    pub fn is_complete(&self) -> bool {
        self.completed >= self.total
    }
}
