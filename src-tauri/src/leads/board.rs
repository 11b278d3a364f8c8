use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::status::LeadStatus;
use crate::crm::Person;

/// Outcome of a status update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub previous: LeadStatus,
    pub current: LeadStatus,
    pub changed: bool,
}

/// Number of leads in one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: LeadStatus,
    pub count: usize,
}

/// Lead status per person name for one session.
///
/// Names are not unique in the People sheet; people sharing a name share
/// one entry. Writes overwrite unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadBoard {
    statuses: HashMap<String, LeadStatus>,
}

impl LeadBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every person starts at their sheet status, or `New` without one
    pub fn seed(people: &[Person]) -> Self {
        let statuses = people
            .iter()
            .map(|p| (p.name.clone(), p.lead_status.unwrap_or_default()))
            .collect();
        LeadBoard { statuses }
    }

    /// Current status; unknown names read as `New`
    pub fn status(&self, name: &str) -> LeadStatus {
        self.statuses.get(name).copied().unwrap_or_default()
    }

    pub fn set_status(&mut self, name: &str, status: LeadStatus) -> StatusChange {
        let previous = self
            .statuses
            .insert(name.to_string(), status)
            .unwrap_or_default();

        StatusChange {
            previous,
            current: status,
            changed: previous != status,
        }
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Leads per status, all five statuses present in pipeline order
    pub fn counts(&self) -> Vec<StatusCount> {
        LeadStatus::ALL
            .iter()
            .map(|&status| StatusCount {
                status,
                count: self.statuses.values().filter(|&&s| s == status).count(),
            })
            .collect()
    }
}
