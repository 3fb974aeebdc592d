use crate::error::{CrateError, Result};
use crate::table::TableFormat;
use calamine::{Data, Reader, open_workbook_auto};
use log::{debug, info};
use std::path::Path;

/// Loads the names held in the single column of `path`, in row order.
///
/// The header cell is discarded whatever its text. Cell content is kept as
/// is: no trimming, empty cells become empty strings.
pub fn load(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(CrateError::source_load(path, "file does not exist"));
    }

    let names = match TableFormat::from_path(path) {
        format @ (TableFormat::Csv | TableFormat::Tsv) => load_delimited(path, format.delimiter())?,
        TableFormat::Spreadsheet => load_spreadsheet(path)?,
    };
    info!("Loaded {} names from {:?}", names.len(), path);
    Ok(names)
}

fn load_delimited(path: &Path, delimiter: u8) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)
        .map_err(|e| CrateError::source_load(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| CrateError::source_load(path, e))?
        .clone();
    check_single_column(path, headers.len())?;
    debug!("Relabelling column {:?}", headers.get(0).unwrap_or(""));

    let mut names = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            CrateError::source_load(path, format!("row {}: {}", i + 2, e))
        })?;
        names.push(record.get(0).unwrap_or("").to_string());
    }
    Ok(names)
}

fn load_spreadsheet(path: &Path) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| CrateError::source_load(path, e))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CrateError::source_load(path, "workbook has no worksheet"))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| CrateError::source_load(path, e))?;

    if range.is_empty() {
        return Err(CrateError::source_load(path, "worksheet has no header row"));
    }
    check_single_column(path, range.width())?;

    let mut rows = range.rows();
    if let Some(header) = rows.next() {
        debug!("Relabelling column {:?} of sheet '{}'", cell_text(&header[0]), sheet);
    }
    Ok(rows.map(|row| cell_text(&row[0])).collect())
}

fn check_single_column(path: &Path, width: usize) -> Result<()> {
    match width {
        1 => Ok(()),
        0 => Err(CrateError::source_load(path, "no column found")),
        n => Err(CrateError::source_load(
            path,
            format!("expected exactly one column of names, found {}", n),
        )),
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(v) => format!("{v}"),
        Data::Int(v) => format!("{v}"),
        Data::Bool(v) => v.to_string(),
        other => other.to_string(),
    }
}
