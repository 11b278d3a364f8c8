//! View models for the four pages. Each is derived from the loaded data on
//! every interaction; only the leads page reads session state.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::crm::{
    self, filter_companies, filter_contacts, filter_options, filter_people, Company, Contact,
    CrmData, DashboardStats, Person, Selection,
};
use crate::error::CrmError;
use crate::excel::{CellValue, Table};
use crate::leads::{LeadBoard, LeadStatus, StatusCount};

/// Navigation entries, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Page {
    Dashboard,
    Companies,
    People,
    Leads,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Dashboard, Page::Companies, Page::People, Page::Leads];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Companies => "Companies",
            Page::People => "People",
            Page::Leads => "Leads",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Dashboard => "CRM Dashboard Overview",
            Page::Companies => "Companies",
            Page::People => "Contacts",
            Page::Leads => "Lead Management",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Page::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CrmError::UnknownPage(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub title: String,
    pub stats: DashboardStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompaniesView {
    pub title: String,
    pub options: Vec<String>,
    pub selected: String,
    pub rows: Vec<Company>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeopleView {
    pub title: String,
    pub options: Vec<String>,
    pub selected: String,
    pub rows: Vec<Person>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsView {
    pub title: String,
    pub options: Vec<String>,
    pub selected: String,
    pub rows: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRow {
    pub name: String,
    pub company: Option<String>,
    pub status: LeadStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadsView {
    pub title: String,
    pub statuses: Vec<LeadStatus>,
    pub rows: Vec<LeadRow>,
    pub counts: Vec<StatusCount>,
}

pub fn dashboard_view(data: &CrmData, top_n: usize) -> DashboardView {
    DashboardView {
        title: Page::Dashboard.title().to_string(),
        stats: crm::dashboard_stats(data, top_n),
    }
}

pub fn companies_view(data: &CrmData, selection: &Selection) -> CompaniesView {
    CompaniesView {
        title: Page::Companies.title().to_string(),
        options: filter_options(data.industries()),
        selected: selection.label().to_string(),
        rows: filter_companies(&data.companies, selection),
    }
}

pub fn people_view(data: &CrmData, selection: &Selection) -> PeopleView {
    PeopleView {
        title: Page::People.title().to_string(),
        options: filter_options(data.company_names()),
        selected: selection.label().to_string(),
        rows: filter_people(&data.people, selection),
    }
}

pub fn contacts_view(data: &CrmData, selection: &Selection) -> ContactsView {
    let contacts = crm::join_people_with_companies(&data.people, &data.companies);
    ContactsView {
        title: "Contacts with Company Details".to_string(),
        options: filter_options(data.company_names()),
        selected: selection.label().to_string(),
        rows: filter_contacts(&contacts, selection),
    }
}

/// One row per person in sheet order, with the session's status
pub fn leads_view(data: &CrmData, board: &LeadBoard) -> LeadsView {
    let rows = data
        .people
        .iter()
        .map(|p| LeadRow {
            name: p.name.clone(),
            company: p.company.clone(),
            status: board.status(&p.name),
        })
        .collect();

    LeadsView {
        title: Page::Leads.title().to_string(),
        statuses: LeadStatus::ALL.to_vec(),
        rows,
        counts: board.counts(),
    }
}

fn text(value: Option<&str>) -> CellValue {
    value
        .map(|v| CellValue::String(v.to_string()))
        .unwrap_or_default()
}

fn number(value: Option<f64>) -> CellValue {
    value.map(CellValue::Number).unwrap_or_default()
}

pub fn companies_table(rows: &[Company]) -> Table {
    let mut table = Table::new(
        "Companies",
        vec!["Company Name".into(), "Industry".into(), "Revenue (in Millions)".into()],
    );
    for c in rows {
        table.push_row(vec![
            CellValue::String(c.name.clone()),
            text(c.industry.as_deref()),
            number(c.revenue_millions),
        ]);
    }
    table
}

pub fn people_table(rows: &[Person]) -> Table {
    let mut table = Table::new(
        "People",
        ["Name", "Email", "Phone Number", "Title", "Company"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );
    for p in rows {
        table.push_row(vec![
            CellValue::String(p.name.clone()),
            text(p.email.as_deref()),
            text(p.phone.as_deref()),
            text(p.title.as_deref()),
            text(p.company.as_deref()),
        ]);
    }
    table
}

pub fn contacts_table(rows: &[Contact]) -> Table {
    let mut table = Table::new(
        "Contacts",
        ["Name", "Email", "Phone Number", "Title", "Company", "Industry", "Revenue (in Millions)"]
            .iter()
            .map(|h| h.to_string())
            .collect(),
    );
    for c in rows {
        let p = &c.person;
        table.push_row(vec![
            CellValue::String(p.name.clone()),
            text(p.email.as_deref()),
            text(p.phone.as_deref()),
            text(p.title.as_deref()),
            text(p.company.as_deref()),
            text(c.industry()),
            number(c.revenue_millions()),
        ]);
    }
    table
}

pub fn leads_table(rows: &[LeadRow]) -> Table {
    let mut table = Table::new(
        "Leads",
        vec!["Name".into(), "Company".into(), "Lead Status".into()],
    );
    for r in rows {
        table.push_row(vec![
            CellValue::String(r.name.clone()),
            text(r.company.as_deref()),
            CellValue::String(r.status.as_str().to_string()),
        ]);
    }
    table
}

pub fn top_industries_table(stats: &DashboardStats) -> Table {
    let mut table = Table::new("Top Industries", vec!["Industry".into(), "Companies".into()]);
    for vc in &stats.top_industries {
        table.push_row(vec![
            CellValue::String(vc.value.clone()),
            CellValue::Number(vc.count as f64),
        ]);
    }
    table
}
