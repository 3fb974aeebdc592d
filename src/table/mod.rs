//! Tabular input and output.
pub mod sink;
pub mod source;

use std::path::Path;

/// Logical label the single input column is relabelled to.
pub const SCI_NAME_HEADER: &str = "Sci_name";
pub const ACCEPTED_NAME_HEADER: &str = "Accepted Name";
pub const AUTHOR_HEADER: &str = "Author";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
    Spreadsheet,
}

impl TableFormat {
    /// Picks the format from the file extension. Anything that is not
    /// delimited text is treated as a spreadsheet.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match extension.as_deref() {
            Some("csv") => TableFormat::Csv,
            Some("tsv") | Some("tab") => TableFormat::Tsv,
            _ => TableFormat::Spreadsheet,
        }
    }

    pub(crate) fn delimiter(self) -> u8 {
        match self {
            TableFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}
