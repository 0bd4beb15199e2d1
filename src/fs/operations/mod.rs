//! Drive operations split into focused modules.

mod browse;
mod dir_ops;
mod quota;
mod search;
mod upload;
pub(crate) mod utils;
