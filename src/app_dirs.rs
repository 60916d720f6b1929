//! Locate the directory holding the stored menu text and `config.json`.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "menupick";
const APPLICATION: &str = "menupick";

pub const DATA_DIR_ENV: &str = "MENUPICK_DATA_DIR";

/// Resolve an override directory from an environment variable.
///
/// An empty string is treated the same as an unset value.
fn dir_from_env(name: &str) -> Option<PathBuf> {
    let value = env::var_os(name)?;
    if value.is_empty() {
        None
    } else {
        Some(PathBuf::from(value))
    }
}

/// Explicit path first, then `MENUPICK_DATA_DIR`, then the platform data dir.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
        return Ok(dir);
    }
    let dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .ok_or_else(|| anyhow!("unable to determine a data directory for menupick"))?;
    Ok(dirs.data_local_dir().to_path_buf())
}

#[cfg(test)]
#[path = "tests/app_dirs_tests.rs"]
mod tests;
