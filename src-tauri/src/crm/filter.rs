use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::types::{Company, Contact, Person};

/// The option that disables a filter
pub const ALL: &str = "All";

/// Choice made in a filter select
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    All,
    Value(String),
}

impl Selection {
    /// Parse the select's value; `None` and `"All"` both mean no filter
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            None => Selection::All,
            Some(v) if v == ALL => Selection::All,
            Some(v) => Selection::Value(v.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Value(v) => v,
        }
    }

    /// Equality on the chosen column; an absent cell never matches a value
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Value(wanted) => value == Some(wanted.as_str()),
        }
    }
}

/// `"All"` followed by the distinct values in sorted order
pub fn filter_options<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = values.into_iter().collect();
    std::iter::once(ALL)
        .chain(distinct)
        .map(String::from)
        .collect()
}

pub fn filter_companies(companies: &[Company], selection: &Selection) -> Vec<Company> {
    companies
        .iter()
        .filter(|c| selection.matches(c.industry.as_deref()))
        .cloned()
        .collect()
}

pub fn filter_people(people: &[Person], selection: &Selection) -> Vec<Person> {
    people
        .iter()
        .filter(|p| selection.matches(p.company.as_deref()))
        .cloned()
        .collect()
}

pub fn filter_contacts(contacts: &[Contact], selection: &Selection) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|c| selection.matches(c.person.company.as_deref()))
        .cloned()
        .collect()
}
