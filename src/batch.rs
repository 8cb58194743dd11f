use anyhow::{Result, bail};
use assetsweep::catalog::PrefixCatalog;
use assetsweep::cleaner::{self, DeleteObserver, RemovalMode};
use assetsweep::model::{Outcome, ScanResult};
use assetsweep::scanner::{self, ScanOptions};
use humansize::{BINARY, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

struct BarObserver {
    bar: ProgressBar,
}

impl DeleteObserver for BarObserver {
    fn on_outcome(&mut self, outcome: &Outcome) {
        if !outcome.is_deleted() {
            self.bar.println(outcome.to_string());
        }
    }

    fn on_progress(&mut self, completed: usize, _total: usize) {
        self.bar.set_position(completed as u64);
    }
}

pub fn print_catalog(catalog: &PrefixCatalog) {
    for category in catalog.categories() {
        println!("{}: {}", category.name, category.prefixes.join(" "));
    }
}

/// Scans `root` and, when `confirm` is set, deletes what it found.
/// Without `confirm` this is a dry run that only lists the candidates.
pub fn run(root: &Path, options: &ScanOptions, mode: RemovalMode, confirm: bool) -> Result<()> {
    let result = scan_with_spinner(root, options)?;

    if !result.warnings.is_empty() {
        eprintln!(
            "Skipped {} unreadable directories (see log for details).",
            result.warnings.len()
        );
    }

    if result.is_empty() {
        println!("No matching files found to delete.");
        return Ok(());
    }

    println!(
        "Found {} files ({}) in {}",
        result.len(),
        format_size(result.total_size(), BINARY),
        root.display()
    );

    if !confirm {
        for file in &result.files {
            let size = file
                .size
                .map_or_else(|| "?".to_string(), |s| format_size(s, BINARY));
            println!("  [{}] {} ({size})", file.prefix, file.path.display());
        }
        println!("This was a dry run. Re-run with --confirm to delete these files.");
        return Ok(());
    }

    let bar = ProgressBar::new(result.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green/white} {pos}/{len} ({percent}%) {msg}")?
            .progress_chars("=> "),
    );
    bar.set_message(mode.name());

    let mut observer = BarObserver { bar: bar.clone() };
    let report = cleaner::delete(&result, mode, &mut observer);
    bar.finish_and_clear();

    println!("{}", report.summary());
    let failed = report.failed_count();
    if failed > 0 {
        bail!("{failed} files could not be deleted");
    }
    Ok(())
}

fn scan_with_spinner(root: &Path, options: &ScanOptions) -> Result<ScanResult> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Scanning {}", root.display()));

    let cb = |found: usize| spinner.set_message(format!("{found} matching files"));
    let result = scanner::scan(root, options, Some(&cb));
    spinner.finish_and_clear();

    Ok(result?)
}
