//! Order log resolution.
//!
//! An explicit path (command line, then config) is used as given and must
//! exist. Without one, the file name is looked up next to the executable and
//! then in the user's `Downloads` folder, where brokers' web consoles save it.

use std::env;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{Error, Result};

/// The user's home directory, from `HOME` or, on Windows, `USERPROFILE`.
fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Default search locations for `file_name`, in priority order.
pub fn default_candidates(file_name: &str) -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Some(dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        candidates.push(dir.join(file_name));
    }
    if let Some(home) = home_dir() {
        candidates.push(home.join("Downloads").join(file_name));
    }
    candidates
}

/// Pick the order log: `explicit` if given, otherwise the first existing candidate.
pub fn resolve_from(explicit: Option<&Path>, candidates: Vec<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(Error::InputNotFound {
                candidates: vec![path.to_path_buf()],
            })
        };
    }

    for candidate in &candidates {
        debug!("Looking for order log at {}", candidate.display());
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }
    Err(Error::InputNotFound { candidates })
}

/// Resolve the order log using the default search locations.
pub fn resolve(explicit: Option<&Path>, file_name: &str) -> Result<PathBuf> {
    resolve_from(explicit, default_candidates(file_name))
}
