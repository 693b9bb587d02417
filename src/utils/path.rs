//! Path utilities: expand `~`, check output targets.

use std::path::{Path, PathBuf};

pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// Output files must be given as absolute paths (after `~` expansion).
pub fn absolute_output(path: &str) -> Option<PathBuf> {
    let p = expand_tilde(path);
    if Path::new(&p).is_absolute() {
        Some(p)
    } else {
        None
    }
}
