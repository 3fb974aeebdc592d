use crate::error::{CrateError, Result};
use crate::pipeline::ResultRow;
use crate::table::{ACCEPTED_NAME_HEADER, AUTHOR_HEADER, SCI_NAME_HEADER, TableFormat};
use csv::WriterBuilder;
use log::info;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

const HEADERS: [&str; 3] = [SCI_NAME_HEADER, ACCEPTED_NAME_HEADER, AUTHOR_HEADER];

/// Writes one line per row: the original name, then accepted name and author.
/// Failed lookups get blank cells. The rows stay with the caller, so a failed
/// write can be retried elsewhere.
pub fn save(rows: &[ResultRow], path: &Path) -> Result<()> {
    match TableFormat::from_path(path) {
        format @ (TableFormat::Csv | TableFormat::Tsv) => {
            save_delimited(rows, path, format.delimiter())
                .map_err(|e| CrateError::sink_write(path, e))?
        }
        TableFormat::Spreadsheet => {
            save_spreadsheet(rows, path).map_err(|e| CrateError::sink_write(path, e))?
        }
    }
    info!("Wrote {} rows to {:?}", rows.len(), path);
    Ok(())
}

fn save_delimited(rows: &[ResultRow], path: &Path, delimiter: u8) -> csv::Result<()> {
    let mut writer = WriterBuilder::new().delimiter(delimiter).from_path(path)?;
    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record([
            row.raw_name.as_str(),
            row.accepted_name().unwrap_or(""),
            row.author().unwrap_or(""),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn save_spreadsheet(rows: &[ResultRow], path: &Path) -> std::result::Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        for (col, header) in HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }
        for (i, row) in rows.iter().enumerate() {
            let line = i as u32 + 1;
            write_cell(sheet, line, 0, &row.raw_name)?;
            write_cell(sheet, line, 1, row.accepted_name().unwrap_or(""))?;
            write_cell(sheet, line, 2, row.author().unwrap_or(""))?;
        }
        sheet.autofit();
    }

    workbook.save(path)?;
    Ok(())
}

// Empty cells are left blank rather than written as empty strings.
fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, text: &str) -> std::result::Result<(), XlsxError> {
    if !text.is_empty() {
        sheet.write_string(row, col, text)?;
    }
    Ok(())
}
