//! Sample workbook shared by the unit tests.

use std::path::{Path, PathBuf};

use crate::excel::{write_tables, CellValue, Table};

fn s(v: &str) -> CellValue {
    CellValue::String(v.to_string())
}

pub fn companies_table() -> Table {
    let mut table = Table::new(
        "Companies",
        vec!["Company Name".into(), "Industry".into(), "Revenue (in Millions)".into()],
    );
    let rows: [(&str, &str, Option<f64>); 6] = [
        ("Acme", "Technology", Some(120.0)),
        ("Globex", "Energy", Some(340.5)),
        ("Initech", "Technology", Some(45.0)),
        ("Umbrella", "Healthcare", Some(980.0)),
        ("Hooli", "Technology", None),
        ("Stark Industries", "Manufacturing", Some(600.0)),
    ];
    for (name, industry, revenue) in rows {
        table.push_row(vec![
            s(name),
            s(industry),
            revenue.map(CellValue::Number).unwrap_or_default(),
        ]);
    }
    table
}

pub fn people_table(with_status: bool) -> Table {
    let mut headers: Vec<String> = ["Name", "Email", "Phone Number", "Title", "Company"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    if with_status {
        headers.push("Lead Status".to_string());
    }

    let mut table = Table::new("People", headers);
    let rows = [
        ("Ada Lovelace", "ada@acme.io", "555-0100", "CTO", "Acme", "Contacted"),
        ("Grace Hopper", "grace@globex.com", "555-0101", "VP Engineering", "Globex", ""),
        ("Alan Turing", "alan@initech.com", "555-0102", "Researcher", "Initech", "Qualified"),
        ("Linus Torvalds", "linus@contoso.com", "555-0103", "Maintainer", "Contoso", ""),
        ("Margaret Hamilton", "margaret@acme.io", "555-0104", "Director", "Acme", ""),
    ];
    for (name, email, phone, title, company, status) in rows {
        table.push_row(vec![s(name), s(email), s(phone), s(title), s(company), s(status)]);
    }
    table
}

pub fn write_sample_workbook(dir: &Path, with_status: bool) -> PathBuf {
    let path = dir.join("crm_test_case_data.xlsx");
    write_tables(&[companies_table(), people_table(with_status)], &path)
        .expect("sample workbook should be writable");
    path
}
