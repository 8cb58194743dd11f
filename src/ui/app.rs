use assetsweep::allowlist::Allowlist;
use assetsweep::catalog::PrefixCatalog;
use assetsweep::cleaner::{self, DeleteObserver, RemovalMode};
use assetsweep::model::{DeleteReport, ExtensionFilter, Outcome, ScanResult};
use assetsweep::scanner::{self, ScanOptions};
use assetsweep::selection::SelectionState;
use ratatui::widgets::ListState;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use sysinfo::{Disk, Disks};

pub enum AppState {
    Browsing,
    Scanning,
    Confirming,
    Cleaning,
    Done(DoneKind, String),
}

/// What ended the last action, used to title the result popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoneKind {
    Nothing,
    Failed,
    Finished,
}

impl DoneKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Nothing => "Nothing to Delete",
            Self::Failed => "Error",
            Self::Finished => "Deletion Complete",
        }
    }
}

/// One line of the prefix list: either a category header or a prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Category(String),
    Prefix(String),
}

pub enum ScanUpdate {
    Progress(usize),
    Finished(Result<ScanResult, String>),
}

pub enum CleanUpdate {
    Outcome(String),
    Progress { completed: usize, total: usize },
    Finished(DeleteReport),
}

struct ChannelObserver {
    tx: mpsc::Sender<CleanUpdate>,
}

impl DeleteObserver for ChannelObserver {
    fn on_outcome(&mut self, outcome: &Outcome) {
        let _ = self.tx.send(CleanUpdate::Outcome(outcome.to_string()));
    }

    fn on_progress(&mut self, completed: usize, total: usize) {
        let _ = self.tx.send(CleanUpdate::Progress { completed, total });
    }
}

pub struct App {
    pub root: PathBuf,
    pub selection: SelectionState,
    pub rows: Vec<Row>,
    pub list_state: ListState,
    pub state: AppState,
    pub extensions: Option<ExtensionFilter>,
    pub mode: RemovalMode,
    pub allowlist: Allowlist,
    pub disks: Disks,
    pub log_path: Option<PathBuf>,
    pub status: String,
    pub log_messages: Vec<String>,
    pub show_log: bool,
    pub log_scroll: u16,
    // Scanning
    pub scan_rx: Option<mpsc::Receiver<ScanUpdate>>,
    pub found: usize,
    pub pending: Option<ScanResult>,
    // Cleaning
    pub cleaning_rx: Option<mpsc::Receiver<CleanUpdate>>,
    pub progress: (usize, usize),
    pub cancel: Arc<AtomicBool>,
}

impl App {
    pub fn new(
        root: PathBuf,
        catalog: &PrefixCatalog,
        extensions: Option<ExtensionFilter>,
        mode: RemovalMode,
        allowlist: Allowlist,
    ) -> Self {
        let selection = SelectionState::new(catalog);
        let rows = catalog
            .categories()
            .iter()
            .flat_map(|c| {
                std::iter::once(Row::Category(c.name.clone()))
                    .chain(c.prefixes.iter().cloned().map(Row::Prefix))
            })
            .collect::<Vec<_>>();

        let mut list_state = ListState::default();
        if !rows.is_empty() {
            list_state.select(Some(0));
        }

        Self {
            root,
            selection,
            rows,
            list_state,
            state: AppState::Browsing,
            extensions,
            mode,
            allowlist,
            disks: Disks::new_with_refreshed_list(),
            log_path: None,
            status: "Ready".to_string(),
            log_messages: Vec::new(),
            show_log: false,
            log_scroll: 0,
            scan_rx: None,
            found: 0,
            pending: None,
            cleaning_rx: None,
            progress: (0, 0),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn with_log_path(mut self, path: PathBuf) -> Self {
        self.log_path = Some(path);
        self
    }

    pub fn next(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.rows.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.rows.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Toggles the highlighted row. Category rows assign their new state to
    /// every member prefix.
    pub fn toggle(&mut self) {
        let Some(row) = self
            .list_state
            .selected()
            .and_then(|i| self.rows.get(i))
            .cloned()
        else {
            return;
        };

        match row {
            Row::Category(name) => self.selection.toggle_category(&name),
            Row::Prefix(prefix) => self.selection.toggle_prefix(&prefix),
        }
    }

    pub fn select_all(&mut self) {
        self.selection.select_all();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn toggle_extensions(&mut self) {
        self.extensions = match self.extensions {
            Some(_) => None,
            None => Some(ExtensionFilter::unreal_assets()),
        };
    }

    pub const fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    pub fn toggle_log(&mut self) {
        self.show_log = !self.show_log;
        self.log_scroll = 0;
    }

    pub const fn scroll_log_down(&mut self) {
        self.log_scroll = self.log_scroll.saturating_add(1);
    }

    pub const fn scroll_log_up(&mut self) {
        self.log_scroll = self.log_scroll.saturating_sub(1);
    }

    /// The disk holding the root folder, picked by longest mount point.
    pub fn root_disk(&self) -> Option<&Disk> {
        self.disks
            .list()
            .iter()
            .filter(|d| self.root.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().as_os_str().len())
    }

    pub fn progress_percent(&self) -> u16 {
        let (completed, total) = self.progress;
        if total == 0 {
            return 0;
        }
        u16::try_from(completed.min(total) * 100 / total).unwrap_or(100)
    }

    pub fn start_scan(&mut self) {
        let prefixes = self.selection.selected_prefixes();
        if prefixes.is_empty() {
            self.state = AppState::Done(
                DoneKind::Nothing,
                "No prefixes selected for deletion.".to_string(),
            );
            return;
        }

        let options = ScanOptions {
            prefixes,
            extensions: self.extensions.clone(),
            allowlist: self.allowlist.clone(),
        };
        let root = self.root.clone();

        let (tx, rx) = mpsc::channel();
        self.scan_rx = Some(rx);
        self.found = 0;
        self.pending = None;
        self.state = AppState::Scanning;
        self.status = format!("Scanning {}...", root.display());

        thread::spawn(move || {
            let tx_progress = tx.clone();
            let cb = move |found: usize| {
                let _ = tx_progress.send(ScanUpdate::Progress(found));
            };

            let res = scanner::scan(&root, &options, Some(&cb)).map_err(|e| e.to_string());
            let _ = tx.send(ScanUpdate::Finished(res));
        });
    }

    pub fn check_scan_status(&mut self) {
        let Some(rx) = &self.scan_rx else {
            return;
        };
        let updates: Vec<ScanUpdate> = rx.try_iter().collect();

        for update in updates {
            match update {
                ScanUpdate::Progress(found) => self.found = found,
                ScanUpdate::Finished(Ok(result)) => {
                    self.scan_rx = None;
                    self.log_messages.clear();
                    self.log_messages
                        .extend(result.warnings.iter().map(ToString::to_string));
                    if result.is_empty() {
                        self.status = "Ready".to_string();
                        self.state = AppState::Done(
                            DoneKind::Nothing,
                            "No matching files found to delete.".to_string(),
                        );
                    } else {
                        self.found = result.len();
                        self.status = format!("Found {} files", result.len());
                        self.pending = Some(result);
                        self.state = AppState::Confirming;
                    }
                }
                ScanUpdate::Finished(Err(msg)) => {
                    self.scan_rx = None;
                    self.status = "Scan failed.".to_string();
                    self.state = AppState::Done(DoneKind::Failed, format!("Error: {msg}"));
                }
            }
        }
    }

    pub fn cancel_confirmation(&mut self) {
        self.pending = None;
        self.status = "Deletion cancelled.".to_string();
        self.state = AppState::Browsing;
    }

    pub fn clean_selected(&mut self) {
        let Some(result) = self.pending.take() else {
            self.state = AppState::Browsing;
            return;
        };

        self.cancel.store(false, Ordering::Relaxed);
        self.progress = (0, result.len());
        self.state = AppState::Cleaning;
        self.status = "Deleting files...".to_string();

        let (tx, rx) = mpsc::channel();
        self.cleaning_rx = Some(rx);

        let mode = self.mode;
        let cancel = Arc::clone(&self.cancel);
        thread::spawn(move || {
            let mut observer = ChannelObserver { tx: tx.clone() };
            let report = cleaner::delete_until(&result, mode, &mut observer, Some(&*cancel));
            let _ = tx.send(CleanUpdate::Finished(report));
        });
    }

    pub fn cancel_cleaning(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        self.status = "Cancelling...".to_string();
    }

    pub fn check_cleaning_status(&mut self) {
        let Some(rx) = &self.cleaning_rx else {
            return;
        };
        let updates: Vec<CleanUpdate> = rx.try_iter().collect();

        for update in updates {
            match update {
                CleanUpdate::Outcome(line) => self.log_messages.push(line),
                CleanUpdate::Progress { completed, total } => self.progress = (completed, total),
                CleanUpdate::Finished(report) => {
                    self.cleaning_rx = None;
                    self.status = "Deletion complete.".to_string();
                    self.state = AppState::Done(DoneKind::Finished, report.summary());

                    // Refresh disk info after cleaning
                    self.disks.refresh(true);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use assetsweep::model::{CandidateFile, ScanWarning};
    use std::fs::File;
    use std::time::{Duration, Instant};
    use tempfile::tempdir;

    fn app(root: PathBuf) -> App {
        App::new(
            root,
            &PrefixCatalog::default(),
            None,
            RemovalMode::Permanent,
            Allowlist::default(),
        )
    }

    fn wait_until(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while !done(app) && Instant::now() < deadline {
            app.check_scan_status();
            app.check_cleaning_status();
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn rows_follow_catalog_order() {
        let app = app(PathBuf::from("/tmp"));
        assert_eq!(app.rows[0], Row::Category("Audio Prefixes".to_string()));
        assert_eq!(app.rows[1], Row::Prefix("LPS_".to_string()));
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn toggle_on_category_row_selects_members() {
        let mut app = app(PathBuf::from("/tmp"));
        app.toggle();
        assert!(app.selection.is_selected("LPS_"));
        assert!(app.selection.is_selected("AUD_"));

        app.next();
        app.toggle();
        assert!(!app.selection.is_selected("LPS_"));
        assert!(app.selection.is_selected("WAV_"));
        assert!(app.selection.category_flag("Audio Prefixes"));
    }

    #[test]
    fn navigation_wraps() {
        let mut app = app(PathBuf::from("/tmp"));
        app.previous();
        assert_eq!(app.list_state.selected(), Some(app.rows.len() - 1));
        app.next();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn scan_without_selection_reports_message() {
        let mut app = app(PathBuf::from("/tmp"));
        app.start_scan();
        assert!(matches!(
            &app.state,
            AppState::Done(DoneKind::Nothing, msg) if msg == "No prefixes selected for deletion."
        ));
        assert!(app.scan_rx.is_none());
    }

    #[test]
    fn check_scan_status_moves_to_confirming() {
        let mut app = app(PathBuf::from("/tmp"));
        app.state = AppState::Scanning;

        let (tx, rx) = mpsc::channel();
        app.scan_rx = Some(rx);

        tx.send(ScanUpdate::Progress(3)).unwrap();
        app.check_scan_status();
        assert_eq!(app.found, 3);
        assert!(matches!(app.state, AppState::Scanning));

        let result = ScanResult {
            root: PathBuf::from("/tmp"),
            files: vec![CandidateFile {
                path: PathBuf::from("/tmp/SM_Rock.uasset"),
                prefix: "SM_".to_string(),
                size: Some(10),
            }],
            warnings: vec![],
        };
        tx.send(ScanUpdate::Finished(Ok(result))).unwrap();
        app.check_scan_status();

        assert!(matches!(app.state, AppState::Confirming));
        assert_eq!(app.pending.as_ref().map(ScanResult::len), Some(1));
        assert!(app.scan_rx.is_none());

        app.cancel_confirmation();
        assert!(matches!(app.state, AppState::Browsing));
        assert!(app.pending.is_none());
        assert_eq!(app.status, "Deletion cancelled.");
    }

    #[test]
    fn empty_scan_reports_nothing_found() {
        let mut app = app(PathBuf::from("/tmp"));
        let (tx, rx) = mpsc::channel();
        app.scan_rx = Some(rx);

        tx.send(ScanUpdate::Finished(Ok(ScanResult::default())))
            .unwrap();
        app.check_scan_status();

        assert!(matches!(
            &app.state,
            AppState::Done(DoneKind::Nothing, msg) if msg == "No matching files found to delete."
        ));
    }

    #[test]
    fn scan_then_clean_end_to_end() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("SM_Rock.uasset");
        let keep = dir.path().join("T_Rock.uasset");
        File::create(&target)?;
        File::create(&keep)?;

        let mut app = app(dir.path().to_path_buf());
        app.selection.set_prefix("SM_", true);
        app.start_scan();
        wait_until(&mut app, |a| !matches!(a.state, AppState::Scanning));
        assert!(matches!(app.state, AppState::Confirming));

        app.clean_selected();
        wait_until(&mut app, |a| !matches!(a.state, AppState::Cleaning));

        assert!(matches!(
            &app.state,
            AppState::Done(DoneKind::Finished, msg) if msg == "Deleted 1 files, 0 failed."
        ));
        assert_eq!(app.progress, (1, 1));
        assert_eq!(app.progress_percent(), 100);
        assert_eq!(app.log_messages.len(), 1);
        assert!(!target.exists());
        assert!(keep.exists());
        Ok(())
    }

    #[test]
    fn scan_warnings_stay_in_log_during_deletion() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join("SM_Rock.uasset");
        File::create(&target)?;

        let mut app = app(dir.path().to_path_buf());
        app.log_messages.push("Successfully deleted: /old/SM_Old.uasset".to_string());
        let (tx, rx) = mpsc::channel();
        app.scan_rx = Some(rx);

        let warning = ScanWarning {
            path: Some(dir.path().join("Locked")),
            message: "permission denied".to_string(),
        };
        let result = ScanResult {
            root: dir.path().to_path_buf(),
            files: vec![CandidateFile {
                path: target.clone(),
                prefix: "SM_".to_string(),
                size: Some(0),
            }],
            warnings: vec![warning.clone()],
        };
        tx.send(ScanUpdate::Finished(Ok(result))).unwrap();
        app.check_scan_status();
        assert_eq!(app.log_messages, vec![warning.to_string()]);

        app.clean_selected();
        wait_until(&mut app, |a| !matches!(a.state, AppState::Cleaning));

        assert_eq!(
            app.log_messages,
            vec![
                warning.to_string(),
                format!("Successfully deleted: {}", target.display()),
            ]
        );
        Ok(())
    }

    #[test]
    fn failed_scan_is_titled_as_error() {
        let mut app = app(PathBuf::from("/tmp"));
        let (tx, rx) = mpsc::channel();
        app.scan_rx = Some(rx);

        tx.send(ScanUpdate::Finished(Err("Root folder does not exist".to_string())))
            .unwrap();
        app.check_scan_status();

        let AppState::Done(kind, msg) = &app.state else {
            panic!("scan error should end in Done");
        };
        assert_eq!(*kind, DoneKind::Failed);
        assert_eq!(kind.title(), "Error");
        assert_eq!(msg, "Error: Root folder does not exist");
        assert_eq!(DoneKind::Nothing.title(), "Nothing to Delete");
        assert_eq!(DoneKind::Finished.title(), "Deletion Complete");
    }
}
