//! Source documents: local paths, `file://` URLs, glob patterns, or stdin.

use crate::error::InputError;
use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One fetched document, before any extraction.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub origin: String,
    pub text: String,
}

impl RawDocument {
    pub fn read(path: &Path) -> Result<Self, InputError> {
        let origin = path.display().to_string();
        let bytes = fs::read(path).map_err(|source| InputError::UnreadableSource {
            origin: origin.clone(),
            source,
        })?;
        debug!(origin = %origin, bytes = bytes.len(), "read source");
        Ok(RawDocument {
            origin,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    pub fn stdin() -> Result<Self> {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        Ok(RawDocument {
            origin: "<stdin>".to_string(),
            text,
        })
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand inputs into paths, keeping the order they were given in.
///
/// `file://` prefixes are stripped. Glob patterns expand to their sorted
/// matches; anything else is taken as a path even if it does not exist, so
/// the read reports it.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        let pattern = input.strip_prefix("file://").unwrap_or(input);
        let path = Path::new(pattern);
        if path.is_file() || !is_glob(pattern) {
            paths.push(path.to_path_buf());
            continue;
        }
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("skipping {}: {}", e.path().display(), e.error());
                    None
                }
            })
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        matches.sort();
        paths.extend(matches);
    }
    Ok(paths)
}

/// Read every input in order; stdin when there are none.
pub fn read_all(inputs: &[String]) -> Result<Vec<RawDocument>> {
    if inputs.is_empty() {
        return Ok(vec![RawDocument::stdin()?]);
    }
    expand_inputs(inputs)?
        .iter()
        .map(|path| RawDocument::read(path).map_err(anyhow::Error::from))
        .collect()
}

/// Treat inputs as alternates and return the first one that can be read.
pub fn read_first(inputs: &[String]) -> Result<RawDocument> {
    if inputs.is_empty() {
        return RawDocument::stdin();
    }
    let paths = expand_inputs(inputs)?;
    let mut last = String::from("no inputs matched");
    for path in &paths {
        match RawDocument::read(path) {
            Ok(doc) => return Ok(doc),
            Err(e) => {
                warn!("{e}; trying next source");
                last = e.to_string();
            }
        }
    }
    Err(InputError::AllSourcesFailed {
        tried: paths.len(),
        last,
    }
    .into())
}
