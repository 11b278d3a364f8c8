use std::path::Path;

use super::types::{Company, CrmData, Person};
use crate::config::{CompanyColumns, CrmConfig, PersonColumns};
use crate::error::{CrmError, Result};
use crate::excel::{self, CellValue, Table};

/// Read and type both sheets of the configured workbook
pub fn load_workbook(config: &CrmConfig) -> Result<CrmData> {
    let path: &Path = &config.workbook_path;
    let checksum = excel::compute_checksum(path)?;

    let companies_table = excel::read_table(path, &config.companies_sheet)?;
    let people_table = excel::read_table(path, &config.people_sheet)?;

    let companies = parse_companies(&companies_table, &config.company_columns)?;
    let people = parse_people(&people_table, &config.person_columns)?;

    log::info!(
        "Loaded {} companies and {} people from {}",
        companies.len(),
        people.len(),
        path.display()
    );

    Ok(CrmData {
        companies,
        people,
        checksum,
    })
}

fn required_column(table: &Table, header: &str) -> Result<usize> {
    table
        .column_index(header)
        .ok_or_else(|| CrmError::missing_column(&table.sheet, header))
}

fn text(cell: &CellValue) -> Option<String> {
    cell.as_non_empty_text()
}

pub fn parse_companies(table: &Table, columns: &CompanyColumns) -> Result<Vec<Company>> {
    let name_col = required_column(table, &columns.name)?;
    let industry_col = required_column(table, &columns.industry)?;
    let revenue_col = required_column(table, &columns.revenue)?;

    let companies = (0..table.row_count())
        .map(|row| {
            let revenue_cell = table.cell(row, revenue_col);
            let revenue_millions = revenue_cell.as_number();
            if revenue_millions.is_none() && !revenue_cell.is_empty() {
                log::warn!(
                    "{} row {}: revenue '{}' is not a number",
                    table.sheet,
                    row + 2,
                    revenue_cell.as_text()
                );
            }

            Company {
                name: text(table.cell(row, name_col)).unwrap_or_default(),
                industry: text(table.cell(row, industry_col)),
                revenue_millions,
            }
        })
        .collect();

    Ok(companies)
}

pub fn parse_people(table: &Table, columns: &PersonColumns) -> Result<Vec<Person>> {
    let name_col = required_column(table, &columns.name)?;
    let email_col = required_column(table, &columns.email)?;
    let phone_col = required_column(table, &columns.phone)?;
    let title_col = required_column(table, &columns.title)?;
    let company_col = required_column(table, &columns.company)?;
    let status_col = table.column_index(&columns.lead_status);

    let people = (0..table.row_count())
        .map(|row| {
            let lead_status = status_col
                .and_then(|col| text(table.cell(row, col)))
                .and_then(|value| match value.parse() {
                    Ok(status) => Some(status),
                    Err(_) => {
                        log::warn!(
                            "{} row {}: ignoring unknown lead status '{}'",
                            table.sheet,
                            row + 2,
                            value
                        );
                        None
                    }
                });

            Person {
                name: text(table.cell(row, name_col)).unwrap_or_default(),
                email: text(table.cell(row, email_col)),
                phone: text(table.cell(row, phone_col)),
                title: text(table.cell(row, title_col)),
                company: text(table.cell(row, company_col)),
                lead_status,
            }
        })
        .collect();

    Ok(people)
}
