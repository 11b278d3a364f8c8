use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::DataCache;
use crate::config::CrmConfig;
use crate::crm::{CrmData, Selection};
use crate::error::{CrmError, Result};
use crate::excel::{self, SheetInfo};
use crate::leads::{LeadStatus, SessionId, SessionRegistry, StatusChange};
use crate::views::{self, CompaniesView, ContactsView, DashboardView, LeadsView, Page, PeopleView};

/// Summary returned after (re)loading the workbook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookStatus {
    pub path: String,
    pub checksum: String,
    pub companies: usize,
    pub people: usize,
    pub sheets: Vec<SheetInfo>,
}

/// Every UI interaction, independent of the shell that renders it
#[derive(Debug)]
pub struct CrmApp {
    config: CrmConfig,
    cache: DataCache,
    sessions: SessionRegistry,
}

impl CrmApp {
    pub fn new(config: CrmConfig) -> Self {
        CrmApp {
            config,
            cache: DataCache::new(),
            sessions: SessionRegistry::new(),
        }
    }

    pub fn config(&self) -> &CrmConfig {
        &self.config
    }

    pub fn workbook_path(&self) -> &Path {
        &self.config.workbook_path
    }

    /// Load through the cache; a reload re-seeds every lead session
    fn data(&mut self) -> Result<Arc<CrmData>> {
        let cached = self.cache.get_or_load(&self.config)?;
        if cached.reloaded && self.cache.generation() > 1 {
            self.sessions.reset_all(&cached.data.people);
        }
        Ok(cached.data)
    }

    pub fn dashboard(&mut self) -> Result<DashboardView> {
        let top_n = self.config.top_industries;
        let data = self.data()?;
        Ok(views::dashboard_view(&data, top_n))
    }

    pub fn companies(&mut self, selection: &Selection) -> Result<CompaniesView> {
        let data = self.data()?;
        Ok(views::companies_view(&data, selection))
    }

    pub fn people(&mut self, selection: &Selection) -> Result<PeopleView> {
        let data = self.data()?;
        Ok(views::people_view(&data, selection))
    }

    pub fn contacts(&mut self, selection: &Selection) -> Result<ContactsView> {
        let data = self.data()?;
        Ok(views::contacts_view(&data, selection))
    }

    pub fn open_leads_session(&mut self) -> Result<SessionId> {
        let data = self.data()?;
        Ok(self.sessions.open(&data.people))
    }

    pub fn leads(&mut self, session: SessionId) -> Result<LeadsView> {
        let data = self.data()?;
        let board = self.sessions.board(session)?;
        Ok(views::leads_view(&data, board))
    }

    pub fn set_lead_status(
        &mut self,
        session: SessionId,
        name: &str,
        status: LeadStatus,
    ) -> Result<StatusChange> {
        // Apply any pending re-seed first so the write is not wiped by it
        self.data()?;
        let change = self.sessions.board_mut(session)?.set_status(name, status);
        if change.changed {
            log::info!(
                "Lead '{}' moved from {} to {} (session {})",
                name,
                change.previous,
                change.current,
                session
            );
        }
        Ok(change)
    }

    pub fn close_leads_session(&mut self, session: SessionId) -> Result<()> {
        self.sessions.close(session)
    }

    /// Drop cached data and load again, resetting every lead session
    pub fn reload(&mut self) -> Result<WorkbookStatus> {
        self.cache.invalidate();
        let data = self.data()?;
        self.status_of(&data)
    }

    /// Point the app at another workbook; the old data stays if the new one fails to load
    pub fn open_workbook(&mut self, path: impl Into<PathBuf>) -> Result<WorkbookStatus> {
        let mut config = self.config.clone();
        config.workbook_path = path.into();

        let mut cache = DataCache::new();
        let data = cache.get_or_load(&config)?.data;

        log::info!("Switched workbook to {}", config.workbook_path.display());
        self.config = config;
        self.cache = cache;
        self.sessions.reset_all(&data.people);
        self.status_of(&data)
    }

    /// Write the rows a page currently shows to a new workbook
    pub fn export_view(
        &mut self,
        page: Page,
        selection: &Selection,
        session: Option<SessionId>,
        output: &Path,
    ) -> Result<String> {
        let table = match page {
            Page::Dashboard => views::top_industries_table(&self.dashboard()?.stats),
            Page::Companies => views::companies_table(&self.companies(selection)?.rows),
            Page::People => views::people_table(&self.people(selection)?.rows),
            Page::Leads => {
                let session = session.ok_or_else(|| {
                    CrmError::UnknownSession("no session given for leads export".to_string())
                })?;
                views::leads_table(&self.leads(session)?.rows)
            }
        };

        let checksum = excel::write_table(&table, output)?;
        log::info!("Exported {} rows of {} to {}", table.row_count(), page, output.display());
        Ok(checksum)
    }

    fn status_of(&self, data: &CrmData) -> Result<WorkbookStatus> {
        Ok(WorkbookStatus {
            path: self.config.workbook_path.display().to_string(),
            checksum: data.checksum.clone(),
            companies: data.companies.len(),
            people: data.people.len(),
            sheets: excel::get_sheets(&self.config.workbook_path)?,
        })
    }
}
