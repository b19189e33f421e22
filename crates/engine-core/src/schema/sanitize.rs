use serde::Serialize;
use std::fmt;

/// Identifier used when a header cell sanitizes down to nothing.
pub const PLACEHOLDER_COLUMN: &str = "NONE_SUPPLIED";

/// Characters removed from header text.
pub const RESERVED_CHARS: [char; 12] = ['\'', '"', '.', '/', '\\', '?', '$', '-', '*', '`', '+', ','];

/// A column identifier free of whitespace and reserved punctuation.
/// Uniqueness across a column list is not implied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ColumnName(String);

impl ColumnName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_COLUMN
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColumnName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turns arbitrary header text into a usable identifier.
///
/// Whitespace becomes `_`, reserved punctuation is dropped and an empty
/// result becomes [`PLACEHOLDER_COLUMN`].
pub fn sanitize(raw: &str) -> ColumnName {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| !RESERVED_CHARS.contains(c))
        .collect();

    if cleaned.is_empty() {
        ColumnName(PLACEHOLDER_COLUMN.to_string())
    } else {
        ColumnName(cleaned)
    }
}
