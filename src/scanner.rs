use crate::allowlist::Allowlist;
use crate::error::CleanupError;
use crate::model::{CandidateFile, ExtensionFilter, ScanResult, ScanWarning};
use jwalk::{Parallelism, WalkDir};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// What to look for under the root directory.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub prefixes: BTreeSet<String>,
    /// `None` disables extension filtering entirely.
    pub extensions: Option<ExtensionFilter>,
    pub allowlist: Allowlist,
}

impl ScanOptions {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: ExtensionFilter) -> Self {
        self.extensions = Some(extensions);
        self
    }

    #[must_use]
    pub fn with_allowlist(mut self, allowlist: Allowlist) -> Self {
        self.allowlist = allowlist;
        self
    }
}

/// Fails unless `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<(), CleanupError> {
    match fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(CleanupError::RootNotDirectory(root.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(CleanupError::RootMissing(root.to_path_buf()))
        }
        Err(e) => Err(CleanupError::Io(e)),
    }
}

/// Walks `root` recursively and collects every regular file whose name
/// starts with one of the selected prefixes.
///
/// The walk is serial, includes hidden entries and does not follow
/// symlinks. Directories that cannot be read are reported as warnings and
/// skipped. `progress_cb` receives the number of matches found so far.
pub fn scan(
    root: &Path,
    options: &ScanOptions,
    progress_cb: Option<&dyn Fn(usize)>,
) -> Result<ScanResult, CleanupError> {
    validate_root(root)?;

    let mut result = ScanResult {
        root: root.to_path_buf(),
        ..ScanResult::default()
    };

    // An empty prefix would match every file.
    let prefixes: Vec<&str> = options
        .prefixes
        .iter()
        .map(String::as_str)
        .filter(|p| !p.is_empty())
        .collect();
    if prefixes.is_empty() {
        return Ok(result);
    }

    log::debug!(
        "Scanning {} for {} prefixes",
        root.display(),
        prefixes.len()
    );

    let walker = WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(Parallelism::Serial);

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                record_warning(&mut result.warnings, e.path().map(Path::to_path_buf), &e);
                continue;
            }
        };

        if let Some(e) = &entry.read_children_error {
            record_warning(&mut result.warnings, Some(entry.path()), e);
        }

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let Some(prefix) = longest_match(&name, &prefixes) else {
            continue;
        };

        let path = entry.path();
        if let Some(filter) = &options.extensions
            && !filter.matches(&path)
        {
            continue;
        }
        if options.allowlist.is_protected(&path) {
            log::debug!("Skipping protected path {}", path.display());
            continue;
        }

        let size = entry.metadata().ok().map(|m| m.len());
        result.files.push(CandidateFile {
            path,
            prefix: prefix.to_string(),
            size,
        });

        if let Some(cb) = progress_cb {
            cb(result.files.len());
        }
    }

    log::info!(
        "Scan of {} found {} files ({} unreadable directories)",
        root.display(),
        result.len(),
        result.warnings.len()
    );
    Ok(result)
}

fn longest_match<'a>(name: &str, prefixes: &[&'a str]) -> Option<&'a str> {
    prefixes
        .iter()
        .copied()
        .filter(|p| name.starts_with(*p))
        .max_by_key(|p| p.len())
}

fn record_warning(warnings: &mut Vec<ScanWarning>, path: Option<PathBuf>, err: &jwalk::Error) {
    if path.is_some() && warnings.iter().any(|w| w.path == path) {
        return;
    }
    let warning = ScanWarning {
        path,
        message: err.to_string(),
    };
    log::warn!("{warning}");
    warnings.push(warning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn names(result: &ScanResult) -> Vec<String> {
        let mut names: Vec<String> = result
            .files
            .iter()
            .map(|f| f.path.file_name().unwrap_or_default().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn scan_matches_prefix_and_extension() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        File::create(root.join("SM_Rock.uasset"))?;
        File::create(root.join("T_Rock.uasset"))?;
        File::create(root.join("readme.txt"))?;

        let options = ScanOptions::new(["SM_"]).with_extensions(ExtensionFilter::unreal_assets());
        let result = scan(root, &options, None)?;

        assert_eq!(names(&result), vec!["SM_Rock.uasset"]);
        assert_eq!(result.files[0].prefix, "SM_");
        Ok(())
    }

    #[test]
    fn scan_without_filter_ignores_extension() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        File::create(root.join("SM_Rock.uasset"))?;
        File::create(root.join("SM_Rock.fbx"))?;
        File::create(root.join("SM_notes"))?;

        let result = scan(root, &ScanOptions::new(["SM_"]), None)?;
        assert_eq!(names(&result), vec!["SM_Rock.fbx", "SM_Rock.uasset", "SM_notes"]);
        Ok(())
    }

    #[test]
    fn scan_recurses_into_hidden_and_nested_dirs() -> Result<()> {
        let dir = tempdir()?;
        let root = dir.path();
        let nested = root.join("Content").join("Meshes").join(".backup");
        fs::create_dir_all(&nested)?;
        let mut f = File::create(nested.join("SM_Old.uasset"))?;
        f.write_all(&[0u8; 64])?;
        File::create(root.join("Content").join("SM_New.UASSET"))?;

        let options = ScanOptions::new(["SM_"]).with_extensions(ExtensionFilter::unreal_assets());
        let result = scan(root, &options, None)?;

        assert_eq!(names(&result), vec!["SM_New.UASSET", "SM_Old.uasset"]);
        assert_eq!(result.total_size(), 64);
        Ok(())
    }

    #[test]
    fn prefix_match_is_case_sensitive() -> Result<()> {
        let dir = tempdir()?;
        File::create(dir.path().join("sm_lower.uasset"))?;
        File::create(dir.path().join("SM_Upper.uasset"))?;

        let result = scan(dir.path(), &ScanOptions::new(["SM_"]), None)?;
        assert_eq!(names(&result), vec!["SM_Upper.uasset"]);
        Ok(())
    }

    #[test]
    fn overlapping_prefixes_record_file_once() -> Result<()> {
        let dir = tempdir()?;
        File::create(dir.path().join("SKM_Hero.uasset"))?;

        let result = scan(dir.path(), &ScanOptions::new(["S", "SK", "SKM_"]), None)?;
        assert_eq!(result.len(), 1);
        assert_eq!(result.files[0].prefix, "SKM_");
        Ok(())
    }

    #[test]
    fn directories_are_not_candidates() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("SM_Folder"))?;
        File::create(dir.path().join("SM_Folder").join("inner.txt"))?;

        let result = scan(dir.path(), &ScanOptions::new(["SM_"]), None)?;
        assert!(result.is_empty());
        Ok(())
    }

    #[test]
    fn empty_selection_yields_empty_result() -> Result<()> {
        let dir = tempdir()?;
        File::create(dir.path().join("SM_Rock.uasset"))?;

        let none: [&str; 0] = [];
        let result = scan(dir.path(), &ScanOptions::new(none), None)?;
        assert!(result.is_empty());

        let result = scan(dir.path(), &ScanOptions::new([""]), None)?;
        assert!(result.is_empty());
        Ok(())
    }

    #[test]
    fn protected_paths_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        let keep = dir.path().join("Keep");
        fs::create_dir(&keep)?;
        File::create(keep.join("SM_Hero.uasset"))?;
        File::create(dir.path().join("SM_Rock.uasset"))?;

        let options = ScanOptions::new(["SM_"]).with_allowlist(Allowlist::new([keep]));
        let result = scan(dir.path(), &options, None)?;
        assert_eq!(names(&result), vec!["SM_Rock.uasset"]);
        Ok(())
    }

    #[test]
    fn progress_reports_running_match_count() -> Result<()> {
        use std::cell::RefCell;

        let dir = tempdir()?;
        File::create(dir.path().join("SM_A.uasset"))?;
        File::create(dir.path().join("SM_B.uasset"))?;
        File::create(dir.path().join("T_C.uasset"))?;

        let seen = RefCell::new(Vec::new());
        let cb = |n: usize| seen.borrow_mut().push(n);
        scan(dir.path(), &ScanOptions::new(["SM_"]), Some(&cb))?;

        assert_eq!(*seen.borrow(), vec![1, 2]);
        Ok(())
    }

    #[test]
    fn missing_root_is_invalid_input() {
        let path = PathBuf::from("/path/to/non/existent/directory/assetsweep_test_12345");
        let err = scan(&path, &ScanOptions::new(["SM_"]), None).err();
        assert!(matches!(err, Some(CleanupError::RootMissing(_))));
    }

    #[test]
    fn file_root_is_invalid_input() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("SM_Rock.uasset");
        File::create(&file)?;

        let err = scan(&file, &ScanOptions::new(["SM_"]), None).err();
        assert!(err.is_some_and(|e| e.is_invalid_input()));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_does_not_abort_scan() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir()?;
        let locked = dir.path().join("Locked");
        fs::create_dir(&locked)?;
        File::create(locked.join("SM_Hidden.uasset"))?;
        File::create(dir.path().join("SM_Visible.uasset"))?;
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

        let result = scan(dir.path(), &ScanOptions::new(["SM_"]), None);
        // Privileged users can still read the directory.
        let locked_out = fs::read_dir(&locked).is_err();

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

        let result = result?;
        assert!(names(&result).contains(&"SM_Visible.uasset".to_string()));
        if locked_out {
            assert_eq!(names(&result), vec!["SM_Visible.uasset".to_string()]);
            assert_eq!(result.warnings.len(), 1);
            assert_eq!(result.warnings[0].path.as_deref(), Some(locked.as_path()));
        }
        Ok(())
    }
}
