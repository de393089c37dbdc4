//! Entry eligibility predicates

use std::fs::Metadata;
use std::path::{Component, Path};

/// Predicate deciding whether a visited entry gets hashed.
///
/// Receives the entry path, its metadata when it could be read, and the
/// traversal error when it could not. Metadata is `None` whenever the error
/// is `Some`.
pub type Filter = dyn Fn(&Path, Option<&Metadata>, Option<&walkdir::Error>) -> bool + Send + Sync;

/// Accept regular files and symbolic links.
///
/// Directories, devices, sockets, pipes and entries that could not be
/// stat'ed are rejected.
pub fn default_filter(
    _path: &Path,
    metadata: Option<&Metadata>,
    _error: Option<&walkdir::Error>,
) -> bool {
    match metadata {
        Some(metadata) => {
            let file_type = metadata.file_type();
            file_type.is_file() || file_type.is_symlink()
        }
        None => false,
    }
}

/// Default policy, additionally rejecting any path with a component named
/// in `patterns` (e.g. `.git`, `target`).
pub fn exclude_names(
    patterns: Vec<String>,
) -> impl Fn(&Path, Option<&Metadata>, Option<&walkdir::Error>) -> bool + Send + Sync {
    move |path, metadata, error| {
        if has_excluded_component(path, &patterns) {
            return false;
        }
        default_filter(path, metadata, error)
    }
}

fn has_excluded_component(path: &Path, patterns: &[String]) -> bool {
    path.components().any(|component| match component {
        Component::Normal(name) => patterns.iter().any(|p| name.to_string_lossy() == p.as_str()),
        _ => false,
    })
}
