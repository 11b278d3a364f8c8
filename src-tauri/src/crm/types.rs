use serde::{Deserialize, Serialize};

use crate::leads::LeadStatus;

/// A row of the Companies sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub industry: Option<String>,
    pub revenue_millions: Option<f64>,
}

/// A row of the People sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    /// Seed value from the optional Lead Status column
    pub lead_status: Option<LeadStatus>,
}

/// A person joined with their company; `company` is None when nothing matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub person: Person,
    pub company: Option<Company>,
}

impl Contact {
    pub fn industry(&self) -> Option<&str> {
        self.company.as_ref().and_then(|c| c.industry.as_deref())
    }

    pub fn revenue_millions(&self) -> Option<f64> {
        self.company.as_ref().and_then(|c| c.revenue_millions)
    }
}

/// Both sheets of the workbook, typed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmData {
    pub companies: Vec<Company>,
    pub people: Vec<Person>,
    pub checksum: String,
}

impl CrmData {
    pub fn new(companies: Vec<Company>, people: Vec<Person>) -> Self {
        CrmData {
            companies,
            people,
            checksum: String::new(),
        }
    }

    pub fn industries(&self) -> impl Iterator<Item = &str> {
        self.companies.iter().filter_map(|c| c.industry.as_deref())
    }

    pub fn company_names(&self) -> impl Iterator<Item = &str> {
        self.people.iter().filter_map(|p| p.company.as_deref())
    }
}
