//! Drive state and its actor runtime.

pub mod actor;
pub(crate) mod core;
mod events;

pub use actor::DriveHandle;
pub use self::core::{describe_failure, Drive, DriveSnapshot};
pub use events::DriveEvent;
