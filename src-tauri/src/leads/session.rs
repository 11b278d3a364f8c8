use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::board::LeadBoard;
use crate::crm::Person;
use crate::error::{CrmError, Result};

/// Identifies one UI session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = CrmError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s.trim())
            .map(SessionId)
            .map_err(|_| CrmError::UnknownSession(s.to_string()))
    }
}

/// Owns the lead board of every open session
#[derive(Debug, Default)]
pub struct SessionRegistry {
    boards: HashMap<SessionId, LeadBoard>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, people: &[Person]) -> SessionId {
        let id = SessionId::new();
        self.boards.insert(id, LeadBoard::seed(people));
        log::debug!("Opened lead session {}", id);
        id
    }

    pub fn board(&self, id: SessionId) -> Result<&LeadBoard> {
        self.boards
            .get(&id)
            .ok_or_else(|| CrmError::UnknownSession(id.to_string()))
    }

    pub fn board_mut(&mut self, id: SessionId) -> Result<&mut LeadBoard> {
        self.boards
            .get_mut(&id)
            .ok_or_else(|| CrmError::UnknownSession(id.to_string()))
    }

    pub fn close(&mut self, id: SessionId) -> Result<()> {
        if self.boards.remove(&id).is_none() {
            return Err(CrmError::UnknownSession(id.to_string()));
        }
        log::debug!("Closed lead session {}", id);
        Ok(())
    }

    /// Re-seed every open board from freshly loaded people
    pub fn reset_all(&mut self, people: &[Person]) {
        for board in self.boards.values_mut() {
            *board = LeadBoard::seed(people);
        }
        if !self.boards.is_empty() {
            log::info!("Reset {} lead session(s) after data reload", self.boards.len());
        }
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}
