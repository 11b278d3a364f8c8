use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CrmError, Result};

/// Environment variable that overrides the configured workbook path
pub const WORKBOOK_ENV: &str = "SIMPLE_CRM_WORKBOOK";

/// Header names of the Companies sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyColumns {
    pub name: String,
    pub industry: String,
    pub revenue: String,
}

impl Default for CompanyColumns {
    fn default() -> Self {
        Self {
            name: "Company Name".to_string(),
            industry: "Industry".to_string(),
            revenue: "Revenue (in Millions)".to_string(),
        }
    }
}

/// Header names of the People sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonColumns {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    pub company: String,
    /// Optional column; missing from the sheet is fine
    pub lead_status: String,
}

impl Default for PersonColumns {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            email: "Email".to_string(),
            phone: "Phone Number".to_string(),
            title: "Title".to_string(),
            company: "Company".to_string(),
            lead_status: "Lead Status".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CrmConfig {
    pub workbook_path: PathBuf,
    pub companies_sheet: String,
    pub people_sheet: String,
    pub company_columns: CompanyColumns,
    pub person_columns: PersonColumns,
    pub top_industries: usize,
    pub watch_workbook: bool,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            workbook_path: PathBuf::from("crm_test_case_data.xlsx"),
            companies_sheet: "Companies".to_string(),
            people_sheet: "People".to_string(),
            company_columns: CompanyColumns::default(),
            person_columns: PersonColumns::default(),
            top_industries: 5,
            watch_workbook: true,
        }
    }
}

impl CrmConfig {
    pub fn with_workbook(path: impl Into<PathBuf>) -> Self {
        Self {
            workbook_path: path.into(),
            ..Self::default()
        }
    }
}

/// Canonical config file path (~/.simple-crm/config.json)
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CrmError::Config("Could not find home directory".to_string()))?;
    Ok(home.join(".simple-crm").join("config.json"))
}

/// Load configuration from the canonical path, then apply the environment override
pub fn load_config() -> Result<CrmConfig> {
    let mut config = match config_path() {
        Ok(path) if path.exists() => load_config_from(&path)?,
        _ => CrmConfig::default(),
    };

    if let Ok(path) = std::env::var(WORKBOOK_ENV) {
        if !path.trim().is_empty() {
            config.workbook_path = PathBuf::from(path);
        }
    }

    Ok(config)
}

pub fn load_config_from(path: &Path) -> Result<CrmConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CrmError::Config(format!("Failed to read config {}: {}", path.display(), e)))?;

    let config: CrmConfig = serde_json::from_str(&content)
        .map_err(|e| CrmError::Config(format!("Failed to parse config {}: {}", path.display(), e)))?;

    if config.top_industries == 0 {
        return Err(CrmError::Config("topIndustries must be at least 1".to_string()));
    }

    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}
