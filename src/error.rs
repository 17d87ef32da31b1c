//! Input errors.
//!
//! Everything here aborts the run. Extraction ambiguity and malformed template
//! fences are never errors; they degrade silently.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("template not found: {}", .0.display())]
    MissingTemplate(PathBuf),

    #[error("name list not found: {}", .0.display())]
    MissingNameList(PathBuf),

    #[error("malformed bucket binding `{spec}`: {reason} (expected LABEL=FILE)")]
    MalformedBinding { spec: String, reason: &'static str },

    #[error("failed to read source {origin}: {source}")]
    UnreadableSource {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no source could be read (tried {tried}); last error: {last}")]
    AllSourcesFailed { tried: usize, last: String },

    #[error("unknown source shape: {0}. Use markup, manual, prose, intrinsics, or classes")]
    UnknownShape(String),

    #[error("unknown format: {0}. Use txt, csv, or json")]
    UnknownFormat(String),

    #[error("`{name}` and `{previous}` both map to {file} in bucket {bucket}")]
    SlugCollision {
        bucket: String,
        file: String,
        name: String,
        previous: String,
    },
}
