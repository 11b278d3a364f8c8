use serde::Serialize;
use std::sync::Arc;
use tauri::{command, AppHandle, Emitter, State};
use tokio::sync::Mutex;

use crate::app::{CrmApp, WorkbookStatus};
use crate::config::CrmConfig;
use crate::crm::Selection;
use crate::error::CrmError;
use crate::excel::{create_event_channel, FileChangeType, WorkbookWatcher};
use crate::leads::{LeadStatus, SessionId, StatusChange};
use crate::views::{CompaniesView, ContactsView, DashboardView, LeadsView, Page, PeopleView};

pub const WORKBOOK_CHANGED_EVENT: &str = "workbook-changed";

pub struct AppState {
    pub app: Arc<Mutex<CrmApp>>,
    pub workbook_watcher: Mutex<Option<WorkbookWatcher>>,
}

impl AppState {
    pub fn new(app: CrmApp) -> Self {
        AppState {
            app: Arc::new(Mutex::new(app)),
            workbook_watcher: Mutex::new(None),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommandError {
    message: String,
}

impl From<CrmError> for CommandError {
    fn from(e: CrmError) -> Self {
        CommandError {
            message: e.to_string(),
        }
    }
}

/// Run a workbook-touching call off the async runtime
async fn with_app<T, F>(state: &AppState, f: F) -> Result<T, CommandError>
where
    F: FnOnce(&mut CrmApp) -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let app = state.app.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut guard = app.blocking_lock();
        f(&mut guard)
    })
    .await
    .map_err(|e| CommandError { message: format!("Task join error: {}", e) })??;

    Ok(result)
}

fn parse_session(session_id: &str) -> Result<SessionId, CommandError> {
    Ok(session_id.parse::<SessionId>()?)
}

#[command]
pub fn get_pages() -> Vec<String> {
    Page::ALL.iter().map(|p| p.as_str().to_string()).collect()
}

#[command]
pub async fn get_config(state: State<'_, Arc<AppState>>) -> Result<CrmConfig, CommandError> {
    Ok(state.app.lock().await.config().clone())
}

#[command]
pub async fn get_dashboard(state: State<'_, Arc<AppState>>) -> Result<DashboardView, CommandError> {
    with_app(&state, |app| app.dashboard()).await
}

#[command]
pub async fn get_companies(
    state: State<'_, Arc<AppState>>,
    industry: Option<String>,
) -> Result<CompaniesView, CommandError> {
    let selection = Selection::from_option(industry.as_deref());
    with_app(&state, move |app| app.companies(&selection)).await
}

#[command]
pub async fn get_people(
    state: State<'_, Arc<AppState>>,
    company: Option<String>,
) -> Result<PeopleView, CommandError> {
    let selection = Selection::from_option(company.as_deref());
    with_app(&state, move |app| app.people(&selection)).await
}

#[command]
pub async fn get_contacts(
    state: State<'_, Arc<AppState>>,
    company: Option<String>,
) -> Result<ContactsView, CommandError> {
    let selection = Selection::from_option(company.as_deref());
    with_app(&state, move |app| app.contacts(&selection)).await
}

#[command]
pub async fn open_leads_session(state: State<'_, Arc<AppState>>) -> Result<String, CommandError> {
    let id = with_app(&state, |app| app.open_leads_session()).await?;
    Ok(id.to_string())
}

#[command]
pub async fn get_leads(
    state: State<'_, Arc<AppState>>,
    session_id: String,
) -> Result<LeadsView, CommandError> {
    let session = parse_session(&session_id)?;
    with_app(&state, move |app| app.leads(session)).await
}

#[command]
pub async fn set_lead_status(
    state: State<'_, Arc<AppState>>,
    session_id: String,
    name: String,
    status: LeadStatus,
) -> Result<StatusChange, CommandError> {
    let session = parse_session(&session_id)?;
    let mut app = state.app.lock().await;
    Ok(app.set_lead_status(session, &name, status)?)
}

#[command]
pub async fn close_leads_session(
    state: State<'_, Arc<AppState>>,
    session_id: String,
) -> Result<(), CommandError> {
    let session = parse_session(&session_id)?;
    let mut app = state.app.lock().await;
    Ok(app.close_leads_session(session)?)
}

#[command]
pub async fn reload_workbook(state: State<'_, Arc<AppState>>) -> Result<WorkbookStatus, CommandError> {
    with_app(&state, |app| app.reload()).await
}

#[command]
pub async fn open_workbook(
    app_handle: AppHandle,
    state: State<'_, Arc<AppState>>,
    path: String,
) -> Result<WorkbookStatus, CommandError> {
    let status = with_app(&state, move |app| app.open_workbook(path)).await?;

    // Follow the new file if we were watching the old one
    let watching = state.workbook_watcher.lock().await.is_some();
    if watching {
        set_watching(&app_handle, &state, true).await?;
    }

    Ok(status)
}

#[command]
pub async fn export_view(
    state: State<'_, Arc<AppState>>,
    page: String,
    filter: Option<String>,
    session_id: Option<String>,
    output_path: String,
) -> Result<String, CommandError> {
    let page = page.parse::<Page>()?;
    let selection = Selection::from_option(filter.as_deref());
    let session = session_id.as_deref().map(parse_session).transpose()?;

    with_app(&state, move |app| {
        app.export_view(page, &selection, session, std::path::Path::new(&output_path))
    })
    .await
}

/// Start or stop reloading the data when the workbook changes on disk
#[command]
pub async fn watch_workbook(
    app_handle: AppHandle,
    state: State<'_, Arc<AppState>>,
    enable: bool,
) -> Result<(), CommandError> {
    set_watching(&app_handle, &state, enable).await
}

pub async fn set_watching(
    app_handle: &AppHandle,
    state: &AppState,
    enable: bool,
) -> Result<(), CommandError> {
    let mut watcher_guard = state.workbook_watcher.lock().await;

    if !enable {
        if let Some(watcher) = watcher_guard.take() {
            watcher.unwatch();
        }
        return Ok(());
    }

    if watcher_guard.is_none() {
        let (tx, rx) = create_event_channel();
        *watcher_guard = Some(WorkbookWatcher::new(tx));

        // Reload, then tell the frontend to re-render
        let app = state.app.clone();
        let handle = app_handle.clone();
        std::thread::spawn(move || {
            while let Ok(event) = rx.recv() {
                if event.change_type == FileChangeType::Modified {
                    if let Err(e) = app.blocking_lock().reload() {
                        log::warn!("Reload after workbook change failed: {}", e);
                    }
                }
                let _ = handle.emit(WORKBOOK_CHANGED_EVENT, &event);
            }
        });
    }

    let path = state.app.lock().await.workbook_path().to_path_buf();
    if let Some(ref watcher) = *watcher_guard {
        watcher.watch(&path)?;
    }

    Ok(())
}
