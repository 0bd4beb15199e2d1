//! Breadcrumb trail for the current path.

use serde::Serialize;

/// Label used for the root crumb.
pub const ROOT_LABEL: &str = "Root";

/// One clickable segment of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Crumb {
    /// Segment name (or [`ROOT_LABEL`])
    pub label: String,
    /// Cumulative path up to and including this segment
    pub path: String,
}

/// Build the breadcrumb trail for `path`.
///
/// The trail always starts with the root crumb for `/`, followed by one crumb
/// per non-empty segment whose path is the join of every segment so far.
pub fn build_breadcrumb(path: &str) -> Vec<Crumb> {
    let mut crumbs = vec![Crumb {
        label: ROOT_LABEL.to_string(),
        path: "/".to_string(),
    }];

    let mut prefix = String::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        prefix.push('/');
        prefix.push_str(segment);
        crumbs.push(Crumb {
            label: segment.to_string(),
            path: prefix.clone(),
        });
    }

    crumbs
}
