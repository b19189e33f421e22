use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvSettings {
    /// Single-byte field delimiter.
    pub delimiter: u8,
    /// Whether the first record is a header that data iteration must skip.
    pub has_header: bool,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: true,
        }
    }
}
