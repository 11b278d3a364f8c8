use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use super::reader::compute_checksum;
use super::types::*;
use crate::error::{CrmError, Result};

/// Quiet period after the last event of a burst before the file is checked
const DEBOUNCE: Duration = Duration::from_millis(500);
const TICK: Duration = Duration::from_millis(100);

/// Watches the workbook and reports content changes
pub struct WorkbookWatcher {
    state: Arc<Mutex<Option<WatchState>>>,
    watcher: Mutex<Option<RecommendedWatcher>>,
    event_sender: Sender<FileChangeEvent>,
}

struct WatchState {
    path: PathBuf,
    last_checksum: String,
}

impl WorkbookWatcher {
    pub fn new(event_sender: Sender<FileChangeEvent>) -> Self {
        WorkbookWatcher {
            state: Arc::new(Mutex::new(None)),
            watcher: Mutex::new(None),
            event_sender,
        }
    }

    /// Start watching `path`, replacing any previously watched workbook
    pub fn watch(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(CrmError::FileNotFound(path.display().to_string()));
        }

        let mut state = self
            .state
            .lock()
            .map_err(|_| CrmError::Watch("Failed to acquire lock".to_string()))?;
        let mut watcher_slot = self
            .watcher
            .lock()
            .map_err(|_| CrmError::Watch("Failed to acquire lock".to_string()))?;

        if state.as_ref().map(|s| s.path == path).unwrap_or(false) {
            return Ok(());
        }

        let initial_checksum = compute_checksum(path)?;

        let (tx, rx) = channel::<notify::Result<Event>>();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )
        .map_err(|e| CrmError::Watch(format!("Failed to create watcher: {}", e)))?;

        watcher
            .watch(path, RecursiveMode::NonRecursive)
            .map_err(|e| CrmError::Watch(format!("Failed to watch file: {}", e)))?;

        *watcher_slot = Some(watcher);
        *state = Some(WatchState {
            path: path.to_path_buf(),
            last_checksum: initial_checksum,
        });
        log::info!("Watching workbook {}", path.display());

        let event_sender = self.event_sender.clone();
        let state_ref = self.state.clone();
        let watched_path = path.to_path_buf();

        thread::spawn(move || {
            process_watch_events(rx, event_sender, state_ref, watched_path);
        });

        Ok(())
    }

    /// Stop watching; the event thread exits on its next tick
    pub fn unwatch(&self) {
        if let Ok(mut watcher) = self.watcher.lock() {
            watcher.take();
        }
        if let Ok(mut state) = self.state.lock() {
            if let Some(s) = state.take() {
                log::info!("Stopped watching {}", s.path.display());
            }
        }
    }

    pub fn watched_path(&self) -> Option<PathBuf> {
        self.state
            .lock()
            .ok()
            .and_then(|g| g.as_ref().map(|s| s.path.clone()))
    }
}

fn is_current(state: &Arc<Mutex<Option<WatchState>>>, path: &Path) -> bool {
    state
        .lock()
        .map(|g| g.as_ref().map(|s| s.path == path).unwrap_or(false))
        .unwrap_or(false)
}

/// Collect raw events into bursts and check the file once a burst has gone quiet
fn process_watch_events(
    rx: Receiver<notify::Result<Event>>,
    event_sender: Sender<FileChangeEvent>,
    state: Arc<Mutex<Option<WatchState>>>,
    path: PathBuf,
) {
    let mut last_event_time: Option<Instant> = None;

    loop {
        match rx.recv_timeout(TICK) {
            Ok(Ok(event)) => {
                if classify(&event.kind).is_some() {
                    last_event_time = Some(Instant::now());
                }
            }
            Ok(Err(e)) => {
                log::warn!("Watch error for {}: {}", path.display(), e);
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if !is_current(&state, &path) {
            break;
        }

        let settled = last_event_time
            .map(|t| t.elapsed() >= DEBOUNCE)
            .unwrap_or(false);
        if !settled {
            continue;
        }
        last_event_time = None;

        if let Some(change_event) = check_file(&state, &path) {
            if event_sender.send(change_event).is_err() {
                break;
            }
        }
    }
}

fn check_file(state: &Arc<Mutex<Option<WatchState>>>, path: &Path) -> Option<FileChangeEvent> {
    // Editors often replace the file, so judge by what is on disk now
    let change_type = if path.exists() {
        FileChangeType::Modified
    } else {
        FileChangeType::Deleted
    };
    let mut guard = state.lock().ok()?;
    let watched = guard.as_mut()?;
    detect_change(&mut watched.last_checksum, path, change_type)
}

fn classify(kind: &EventKind) -> Option<FileChangeType> {
    match kind {
        EventKind::Modify(_) | EventKind::Create(_) => Some(FileChangeType::Modified),
        EventKind::Remove(_) => Some(FileChangeType::Deleted),
        _ => None,
    }
}

/// Editors touch files without changing them; only report real content changes
fn detect_change(
    last_checksum: &mut String,
    path: &Path,
    change_type: FileChangeType,
) -> Option<FileChangeEvent> {
    let path_str = path.display().to_string();

    if change_type == FileChangeType::Deleted {
        last_checksum.clear();
        return Some(FileChangeEvent {
            path: path_str,
            change_type,
            new_checksum: None,
        });
    }

    let new_checksum = compute_checksum(path).ok()?;
    if new_checksum == *last_checksum {
        return None;
    }
    *last_checksum = new_checksum.clone();

    Some(FileChangeEvent {
        path: path_str,
        change_type,
        new_checksum: Some(new_checksum),
    })
}

/// Create a channel for receiving file change events
pub fn create_event_channel() -> (Sender<FileChangeEvent>, Receiver<FileChangeEvent>) {
    channel()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    fn modify_event() -> notify::Result<Event> {
        Ok(Event::new(EventKind::Modify(ModifyKind::Any)))
    }

    #[test]
    fn test_classify_event_kinds() {
        assert_eq!(classify(&EventKind::Modify(ModifyKind::Any)), Some(FileChangeType::Modified));
        assert_eq!(classify(&EventKind::Create(CreateKind::File)), Some(FileChangeType::Modified));
        assert_eq!(classify(&EventKind::Remove(RemoveKind::File)), Some(FileChangeType::Deleted));
        assert_eq!(classify(&EventKind::Access(notify::event::AccessKind::Any)), None);
    }

    #[test]
    fn test_detect_change_ignores_identical_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm.xlsx");
        std::fs::write(&path, b"v1").unwrap();
        let mut last = compute_checksum(&path).unwrap();

        std::fs::write(&path, b"v1").unwrap();
        assert!(detect_change(&mut last, &path, FileChangeType::Modified).is_none());

        std::fs::write(&path, b"v2").unwrap();
        let event = detect_change(&mut last, &path, FileChangeType::Modified).unwrap();
        let expected = compute_checksum(&path).unwrap();
        assert_eq!(event.change_type, FileChangeType::Modified);
        assert_eq!(event.new_checksum.as_deref(), Some(expected.as_str()));
        assert_eq!(last, expected);

        // Same content again after the change is not reported twice
        assert!(detect_change(&mut last, &path, FileChangeType::Modified).is_none());
    }

    #[test]
    fn test_burst_reports_final_content_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm.xlsx");
        std::fs::write(&path, b"v1").unwrap();

        let state = Arc::new(Mutex::new(Some(WatchState {
            path: path.clone(),
            last_checksum: compute_checksum(&path).unwrap(),
        })));
        let (raw_tx, raw_rx) = channel();
        let (tx, rx) = create_event_channel();
        let loop_state = state.clone();
        let loop_path = path.clone();
        let worker = thread::spawn(move || process_watch_events(raw_rx, tx, loop_state, loop_path));

        // A touch that leaves the bytes alone is not reported
        std::fs::write(&path, b"v1").unwrap();
        raw_tx.send(modify_event()).unwrap();
        assert!(rx.recv_timeout(Duration::from_millis(1200)).is_err());

        // A save in two steps is reported once, with the final checksum
        std::fs::write(&path, b"v2 partial").unwrap();
        raw_tx.send(modify_event()).unwrap();
        std::fs::write(&path, b"v2 complete").unwrap();
        raw_tx.send(modify_event()).unwrap();

        let event = rx.recv_timeout(Duration::from_secs(3)).unwrap();
        assert_eq!(event.change_type, FileChangeType::Modified);
        assert_eq!(event.new_checksum, Some(compute_checksum(&path).unwrap()));
        assert!(rx.recv_timeout(Duration::from_millis(1200)).is_err());

        state.lock().unwrap().take();
        worker.join().unwrap();
    }

    #[test]
    fn test_watch_missing_file() {
        let (tx, _rx) = create_event_channel();
        let watcher = WorkbookWatcher::new(tx);
        let err = watcher.watch(Path::new("/nonexistent/crm.xlsx")).unwrap_err();
        assert!(matches!(err, CrmError::FileNotFound(_)));
        assert!(watcher.watched_path().is_none());
    }

    #[test]
    fn test_watch_and_unwatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm.xlsx");
        std::fs::write(&path, b"v1").unwrap();

        let (tx, _rx) = create_event_channel();
        let watcher = WorkbookWatcher::new(tx);
        watcher.watch(&path).unwrap();
        assert_eq!(watcher.watched_path(), Some(path.clone()));

        watcher.unwatch();
        assert!(watcher.watched_path().is_none());
    }
}
