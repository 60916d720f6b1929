use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::menu::{FIELD_DELIMITER, HEADER_MARKER, MenuFormat};

pub const DEFAULT_CELEBRATION_MS: u64 = 1500;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Line prefix marking restaurant headers. Empty disables the filter.
    #[serde(default = "default_header_marker")]
    pub header_marker: String,

    /// Column delimiter; must be exactly one character.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Total length of the celebration played after each pick.
    #[serde(default = "default_celebration_ms")]
    pub celebration_ms: u64,
}

fn default_header_marker() -> String {
    HEADER_MARKER.to_string()
}

fn default_delimiter() -> String {
    FIELD_DELIMITER.to_string()
}

fn default_celebration_ms() -> u64 {
    DEFAULT_CELEBRATION_MS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            header_marker: default_header_marker(),
            delimiter: default_delimiter(),
            celebration_ms: default_celebration_ms(),
        }
    }
}

impl AppConfig {
    pub fn menu_format(&self) -> Result<MenuFormat> {
        let mut chars = self.delimiter.chars();
        let (Some(delimiter), None) = (chars.next(), chars.next()) else {
            bail!(
                "delimiter must be a single character (got {:?})",
                self.delimiter
            );
        };
        Ok(MenuFormat {
            header_marker: self.header_marker.clone(),
            delimiter,
        })
    }
}

#[cfg(test)]
#[path = "../tests/model/config_tests.rs"]
mod tests;
