//! Storage space.

use std::sync::Arc;

use tracing::warn;

use crate::api::StorageApi;
use crate::drive::core::Completion;
use crate::drive::{Drive, DriveEvent};
use crate::error::Result;
use crate::fs::SpaceInfo;

impl<S: StorageApi> Drive<S> {
    /// Refresh the storage space figures.
    pub fn load_space(&mut self) {
        let api = Arc::clone(&self.api);
        self.spawn_task(async move { Completion::Space(api.space().await) });
    }

    pub(crate) fn settle_space(&mut self, result: Result<SpaceInfo>) {
        match result {
            Ok(space) => {
                self.space = Some(space);
                self.emit(DriveEvent::SpaceChanged(space));
            }
            Err(err) => warn!("Failed to load storage space: {}", err),
        }
    }
}
