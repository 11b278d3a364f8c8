use std::path::Path;
use umya_spreadsheet::{new_file_empty_worksheet, writer, Worksheet};

use super::reader::compute_checksum;
use super::types::{CellValue, Table};
use crate::error::{CrmError, Result};

/// Export one table to a new workbook, returning the file checksum
pub fn write_table(table: &Table, output_path: &Path) -> Result<String> {
    write_tables(std::slice::from_ref(table), output_path)
}

/// Export tables to a new workbook, one sheet per table
pub fn write_tables(tables: &[Table], output_path: &Path) -> Result<String> {
    if tables.is_empty() {
        return Err(CrmError::Write("Nothing to export".to_string()));
    }

    let mut book = new_file_empty_worksheet();

    for table in tables {
        let sheet = book
            .new_sheet(&table.sheet)
            .map_err(|e| CrmError::Write(format!("Failed to create sheet '{}': {}", table.sheet, e)))?;
        fill_sheet(sheet, table);
    }

    writer::xlsx::write(&book, output_path)
        .map_err(|e| CrmError::Write(format!("Failed to write file: {}", e)))?;

    compute_checksum(output_path)
}

fn fill_sheet(sheet: &mut Worksheet, table: &Table) {
    for (col_idx, header) in table.headers.iter().enumerate() {
        let col_num = (col_idx + 1) as u32;
        sheet.get_cell_mut((col_num, 1)).set_value(header);
    }

    // Data starts below the header row; umya is 1-based
    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_num = (row_idx + 2) as u32;

        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = (col_idx + 1) as u32;

            match cell {
                CellValue::Empty => {}
                CellValue::Number(n) => {
                    sheet.get_cell_mut((col_num, row_num)).set_value_number(*n);
                }
                CellValue::Boolean(b) => {
                    sheet.get_cell_mut((col_num, row_num)).set_value_bool(*b);
                }
                CellValue::String(s) | CellValue::DateTime(s) => {
                    sheet.get_cell_mut((col_num, row_num)).set_value(s);
                }
                CellValue::Error(e) => {
                    sheet.get_cell_mut((col_num, row_num)).set_value(format!("#{}", e));
                }
            }
        }
    }
}
