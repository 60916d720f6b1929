//! Turns pasted menu tables into a list of dish names.
//!
//! Menus copied out of ordering sites arrive as tab-separated rows with the
//! dish name in the first column, interleaved with restaurant header lines.

/// Lines starting with this prefix name a restaurant, not a dish.
pub const HEADER_MARKER: &str = "餐厅";

pub const FIELD_DELIMITER: char = '\t';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuFormat {
    /// Literal line prefix for section headers. Empty disables header filtering.
    pub header_marker: String,
    pub delimiter: char,
}

impl Default for MenuFormat {
    fn default() -> Self {
        Self {
            header_marker: HEADER_MARKER.to_string(),
            delimiter: FIELD_DELIMITER,
        }
    }
}

impl MenuFormat {
    /// Literal prefix check on the untrimmed line.
    pub fn is_header(&self, line: &str) -> bool {
        !self.header_marker.is_empty() && line.starts_with(self.header_marker.as_str())
    }

    pub fn extract(&self, text: &str) -> Vec<String> {
        text.split('\n')
            .filter(|line| !line.trim().is_empty() && !self.is_header(line))
            .filter_map(|line| {
                let first = line.split(self.delimiter).next().unwrap_or("").trim();
                // An indented header survives the line filter; catch it once trimmed.
                if first.is_empty() || self.is_header(first) {
                    None
                } else {
                    Some(first.to_string())
                }
            })
            .collect()
    }
}

/// Extract dish names using the default format. `None` reads as empty text.
pub fn extract_items(text: Option<&str>) -> Vec<String> {
    MenuFormat::default().extract(text.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/menu_tests.rs"]
mod tests;
