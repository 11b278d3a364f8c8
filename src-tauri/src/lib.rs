pub mod app;
pub mod cache;
#[cfg(feature = "desktop")]
mod commands;
pub mod config;
pub mod crm;
pub mod error;
pub mod excel;
pub mod leads;
pub mod render;
pub mod views;

#[cfg(test)]
mod test_support;

pub use app::{CrmApp, WorkbookStatus};
pub use config::CrmConfig;
pub use error::{CrmError, Result};

/// Initialise env_logger once; `RUST_LOG` overrides the default `info` filter
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Configuration from disk, falling back to defaults when it cannot be read
pub fn load_config_or_default() -> CrmConfig {
    match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}; using default configuration", e);
            let mut config = CrmConfig::default();
            if let Ok(path) = std::env::var(config::WORKBOOK_ENV) {
                config.workbook_path = path.into();
            }
            config
        }
    }
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use commands::AppState;
    use std::sync::Arc;
    use tauri::Manager;

    init_logging();

    let config = load_config_or_default();
    let watch_on_start = config.watch_workbook;
    log::info!("Using workbook {}", config.workbook_path.display());

    let app_state = Arc::new(AppState::new(CrmApp::new(config)));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            commands::get_pages,
            commands::get_config,
            commands::get_dashboard,
            commands::get_companies,
            commands::get_people,
            commands::get_contacts,
            commands::open_leads_session,
            commands::get_leads,
            commands::set_lead_status,
            commands::close_leads_session,
            commands::reload_workbook,
            commands::open_workbook,
            commands::export_view,
            commands::watch_workbook,
        ])
        .setup(move |app| {
            #[cfg(debug_assertions)]
            {
                if let Some(window) = app.get_webview_window("main") {
                    window.open_devtools();
                }
            }

            if watch_on_start {
                let handle = app.handle().clone();
                let state = app.state::<Arc<AppState>>().inner().clone();
                tauri::async_runtime::spawn(async move {
                    if let Err(e) = commands::set_watching(&handle, &state, true).await {
                        log::warn!("Could not watch workbook: {:?}", e);
                    }
                });
            }

            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
