use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::*;
use crate::error::{CrmError, Result};

/// Read a sheet as a table, taking the first non-empty row as the header
pub fn read_table(path: &Path, sheet: &str) -> Result<Table> {
    if !path.exists() {
        return Err(CrmError::FileNotFound(path.display().to_string()));
    }

    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| CrmError::Read(format!("Failed to open workbook: {}", e)))?;

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(CrmError::SheetNotFound(sheet.to_string()));
    }

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| CrmError::Read(format!("Failed to read sheet '{}': {}", sheet, e)))?;

    Ok(range_to_table(sheet, &range))
}

/// Convert a calamine range into a header + rows table
fn range_to_table(sheet: &str, range: &Range<Data>) -> Table {
    let (row_count, col_count) = range.get_size();

    let mut rows = (0..row_count).map(|row_idx| {
        (0..col_count)
            .map(|col_idx| convert_cell_value(range.get((row_idx, col_idx))))
            .collect::<Vec<_>>()
    });

    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(CellValue::as_text).collect(),
        None => Vec::new(),
    };

    let mut table = Table::new(sheet, headers);
    for row in rows {
        // Trailing blank rows carry no record
        if row.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(row);
    }

    table
}

/// Convert calamine Data to our CellValue
fn convert_cell_value(cell: Option<&Data>) -> CellValue {
    match cell {
        None => CellValue::Empty,
        Some(data) => match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::String(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Boolean(*b),
            Data::DateTime(dt) => CellValue::DateTime(format_excel_datetime(dt.as_f64())),
            Data::DateTimeIso(s) => CellValue::DateTime(s.clone()),
            Data::DurationIso(s) => CellValue::String(s.clone()),
            Data::Error(e) => CellValue::Error(format!("{:?}", e)),
        },
    }
}

/// Format Excel datetime (days since 1899-12-30) to ISO 8601
fn format_excel_datetime(value: f64) -> String {
    // Round to whole seconds first so a time just before midnight rolls into the next day
    let rounded = (value * 86400.0).round() as i64;
    let days = rounded.div_euclid(86400);
    let total_seconds = rounded.rem_euclid(86400) as u32;

    let epoch = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    let date = epoch + chrono::Duration::days(days);

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let time = chrono::NaiveTime::from_hms_opt(hours, minutes, seconds).unwrap_or_default();
    let datetime = chrono::NaiveDateTime::new(date, time);

    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Get list of sheets in a workbook with their sizes
pub fn get_sheets(path: &Path) -> Result<Vec<SheetInfo>> {
    if !path.exists() {
        return Err(CrmError::FileNotFound(path.display().to_string()));
    }

    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| CrmError::Read(format!("Failed to open workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::new();

    for (index, name) in sheet_names.iter().enumerate() {
        let (rows, cols) = workbook
            .worksheet_range(name)
            .map(|range| range.get_size())
            .unwrap_or((0, 0));
        sheets.push(SheetInfo {
            name: name.clone(),
            index: index as u32,
            row_count: rows as u32,
            col_count: cols as u32,
        });
    }

    Ok(sheets)
}

/// Compute SHA-256 checksum of a file
pub fn compute_checksum(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CrmError::FileNotFound(path.display().to_string())
        } else {
            CrmError::Read(format!("Failed to open file for checksum: {}", e))
        }
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = [0; 8192];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| CrmError::Read(format!("Failed to read file for checksum: {}", e)))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
