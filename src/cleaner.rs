use crate::model::{DeleteReport, Outcome, ScanResult};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalMode {
    #[default]
    Permanent,
    /// Move files to the OS trash instead of unlinking them.
    Trash,
}

impl RemovalMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Permanent => "Permanent delete",
            Self::Trash => "Move to trash",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Permanent => Self::Trash,
            Self::Trash => Self::Permanent,
        }
    }
}

/// Receives per-file events while [`delete`] runs. Both calls happen on the
/// deleting thread, right after each file.
pub trait DeleteObserver {
    fn on_outcome(&mut self, _outcome: &Outcome) {}
    fn on_progress(&mut self, _completed: usize, _total: usize) {}
}

impl DeleteObserver for () {}

/// Removes every candidate of `result` in order.
///
/// A failure is recorded and the loop moves on to the next file; nothing
/// here returns early. Confirmation is the caller's job.
pub fn delete(
    result: &ScanResult,
    mode: RemovalMode,
    observer: &mut dyn DeleteObserver,
) -> DeleteReport {
    delete_until(result, mode, observer, None)
}

/// Like [`delete`], but checks `cancel` before each file and stops once it
/// is set.
pub fn delete_until(
    result: &ScanResult,
    mode: RemovalMode,
    observer: &mut dyn DeleteObserver,
    cancel: Option<&AtomicBool>,
) -> DeleteReport {
    let total = result.len();
    let mut report = DeleteReport::default();

    for (i, file) in result.files.iter().enumerate() {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            log::warn!("Deletion cancelled after {i} of {total} files");
            report.cancelled = true;
            break;
        }

        let outcome = match remove(&file.path, mode) {
            Ok(()) => {
                let outcome = Outcome::Deleted(file.path.clone());
                log::info!("{outcome}");
                outcome
            }
            Err(reason) => {
                let outcome = Outcome::Failed {
                    path: file.path.clone(),
                    reason,
                };
                log::error!("{outcome}");
                outcome
            }
        };

        observer.on_outcome(&outcome);
        report.outcomes.push(outcome);
        observer.on_progress(i + 1, total);
    }

    report
}

fn remove(path: &Path, mode: RemovalMode) -> Result<(), String> {
    match mode {
        RemovalMode::Permanent => fs::remove_file(path).map_err(|e| describe_io_error(&e)),
        RemovalMode::Trash => {
            // The trash backends report a missing file in platform-specific ways.
            fs::symlink_metadata(path).map_err(|e| describe_io_error(&e))?;
            trash::delete(path).map_err(|e| e.to_string())
        }
    }
}

fn describe_io_error(err: &io::Error) -> String {
    match err.kind() {
        ErrorKind::NotFound => "file not found".to_string(),
        ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => err.to_string(),
    }
}
