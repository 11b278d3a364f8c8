use std::path::{Path, PathBuf};

use simple_crm_lib::crm::Selection;
use simple_crm_lib::excel::{write_tables, CellValue, Table};
use simple_crm_lib::leads::LeadStatus;
use simple_crm_lib::{CrmApp, CrmConfig, CrmError};

fn s(v: &str) -> CellValue {
    CellValue::String(v.to_string())
}

fn companies() -> Table {
    let mut table = Table::new(
        "Companies",
        vec!["Company Name".into(), "Industry".into(), "Revenue (in Millions)".into()],
    );
    table.push_row(vec![s("Northwind"), s("Retail"), CellValue::Number(75.0)]);
    table.push_row(vec![s("Contoso"), s("Technology"), CellValue::Number(410.0)]);
    table.push_row(vec![s("Fabrikam"), s("Retail"), CellValue::Number(12.5)]);
    table
}

fn people(extra: Option<(&str, &str)>) -> Table {
    let mut table = Table::new(
        "People",
        ["Name", "Email", "Phone Number", "Title", "Company", "Lead Status"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );
    table.push_row(vec![s("Nina Patel"), s("nina@northwind.com"), s("555-0200"), s("Buyer"), s("Northwind"), s("")]);
    table.push_row(vec![s("Omar Haddad"), s("omar@contoso.com"), s("555-0201"), s("CIO"), s("Contoso"), s("Qualified")]);
    table.push_row(vec![s("Nina Patel"), s("nina.p@fabrikam.com"), s("555-0202"), s("Owner"), s("Fabrikam"), s("")]);
    table.push_row(vec![s("Lee Chen"), s("lee@tailspin.com"), s("555-0203"), s("Analyst"), s("Tailspin"), s("")]);
    if let Some((name, company)) = extra {
        table.push_row(vec![s(name), s(""), s(""), s(""), s(company), s("")]);
    }
    table
}

fn write_workbook(dir: &Path, extra: Option<(&str, &str)>) -> PathBuf {
    let path = dir.join("crm.xlsx");
    write_tables(&[companies(), people(extra)], &path).unwrap();
    path
}

#[test]
fn joined_contacts_carry_company_attributes() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = CrmApp::new(CrmConfig::with_workbook(write_workbook(dir.path(), None)));

    let view = app.contacts(&Selection::All).unwrap();
    assert_eq!(view.rows.len(), 4);

    for contact in &view.rows {
        match contact.person.company.as_deref() {
            Some("Tailspin") => assert!(contact.company.is_none()),
            Some(name) => assert_eq!(contact.company.as_ref().unwrap().name, name),
            None => unreachable!("every sample person has a company"),
        }
    }
    assert_eq!(view.rows[1].industry(), Some("Technology"));
    assert_eq!(view.rows[1].revenue_millions(), Some(410.0));
}

#[test]
fn filters_return_exact_matches_or_everything() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = CrmApp::new(CrmConfig::with_workbook(write_workbook(dir.path(), None)));

    let retail = app.companies(&Selection::from_option(Some("Retail"))).unwrap();
    assert!(retail.rows.iter().all(|c| c.industry.as_deref() == Some("Retail")));
    assert_eq!(retail.rows.len(), 2);

    let all = app.companies(&Selection::from_option(Some("All"))).unwrap();
    assert_eq!(all.rows.len(), 3);

    let contoso = app.people(&Selection::Value("Contoso".into())).unwrap();
    assert_eq!(contoso.rows.len(), 1);
    assert_eq!(contoso.rows[0].name, "Omar Haddad");

    let dashboard = app.dashboard().unwrap();
    assert_eq!(dashboard.stats.top_industries[0].value, "Retail");
    assert_eq!(dashboard.stats.top_industries[0].count, 2);
}

#[test]
fn lead_statuses_are_per_session_and_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = CrmApp::new(CrmConfig::with_workbook(write_workbook(dir.path(), None)));

    let first = app.open_leads_session().unwrap();
    let second = app.open_leads_session().unwrap();

    let seeded = app.leads(first).unwrap();
    assert_eq!(seeded.rows[1].status, LeadStatus::Qualified);
    assert_eq!(seeded.rows[3].status, LeadStatus::New);

    app.set_lead_status(first, "Lee Chen", LeadStatus::Contacted).unwrap();
    let before = app.leads(first).unwrap();
    let again = app.set_lead_status(first, "Lee Chen", LeadStatus::Contacted).unwrap();
    assert!(!again.changed);
    assert_eq!(app.leads(first).unwrap().rows, before.rows);

    // Both "Nina Patel" rows share one status entry
    app.set_lead_status(first, "Nina Patel", LeadStatus::Converted).unwrap();
    let rows = app.leads(first).unwrap().rows;
    assert_eq!(rows[0].status, LeadStatus::Converted);
    assert_eq!(rows[2].status, LeadStatus::Converted);

    assert_eq!(app.leads(second).unwrap().rows[3].status, LeadStatus::New);

    app.close_leads_session(first).unwrap();
    assert!(matches!(app.leads(first), Err(CrmError::UnknownSession(_))));
}

#[test]
fn changed_workbook_resets_lead_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path(), None);
    let mut app = CrmApp::new(CrmConfig::with_workbook(&path));

    let session = app.open_leads_session().unwrap();
    app.set_lead_status(session, "Lee Chen", LeadStatus::Lost).unwrap();

    write_workbook(dir.path(), Some(("Ivy Brooks", "Contoso")));

    let view = app.leads(session).unwrap();
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.rows[3].status, LeadStatus::New);
    assert_eq!(view.rows[4].name, "Ivy Brooks");
}

#[test]
fn missing_sheet_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("only-companies.xlsx");
    write_tables(&[companies()], &path).unwrap();

    let mut app = CrmApp::new(CrmConfig::with_workbook(&path));
    let err = app.dashboard().unwrap_err();
    assert!(matches!(err, CrmError::SheetNotFound(ref sheet) if sheet == "People"));
}

#[test]
fn status_set_after_workbook_change_survives() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_workbook(dir.path(), None);
    let mut app = CrmApp::new(CrmConfig::with_workbook(&path));

    let session = app.open_leads_session().unwrap();
    write_workbook(dir.path(), Some(("Ivy Brooks", "Contoso")));

    let change = app.set_lead_status(session, "Lee Chen", LeadStatus::Converted).unwrap();
    assert_eq!(change.previous, LeadStatus::New);
    assert!(change.changed);

    let view = app.leads(session).unwrap();
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.rows[3].name, "Lee Chen");
    assert_eq!(view.rows[3].status, LeadStatus::Converted);
}
