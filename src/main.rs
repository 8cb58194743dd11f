mod batch;
mod ui;

use anyhow::{Context, Result, bail};
use assetsweep::allowlist::Allowlist;
use assetsweep::catalog::PrefixCatalog;
use assetsweep::cleaner::RemovalMode;
use assetsweep::constants::LAST_FOLDER_PATH;
use assetsweep::logging;
use assetsweep::model::ExtensionFilter;
use assetsweep::preferences::Preferences;
use assetsweep::scanner::{ScanOptions, validate_root};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use simplelog::LevelFilter;
use std::collections::BTreeSet;
use std::io;
use std::path::PathBuf;
use ui::app::App;

#[derive(Parser)]
#[command(version, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Folder to clean (defaults to the last folder used, then the current directory)
    root: Option<PathBuf>,

    /// Delete files starting with this prefix, e.g. SM_ (repeatable).
    /// Giving any prefix or category skips the interactive UI.
    #[arg(short = 'p', long = "prefix", value_name = "PREFIX")]
    prefixes: Vec<String>,

    /// Select every prefix of a category, e.g. "Mesh" (repeatable)
    #[arg(short = 'c', long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// Only match files with this extension, case-insensitive (repeatable)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Only match Unreal asset files (.uasset, .umap)
    #[arg(long)]
    unreal_only: bool,

    /// Move files to the trash instead of deleting them
    #[arg(long)]
    trash: bool,

    /// Actually delete in batch mode (otherwise only list the matches)
    #[arg(long)]
    confirm: bool,

    /// Load the prefix catalog from a JSON file
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Print the prefix catalog and exit
    #[arg(long)]
    list_prefixes: bool,

    /// Log every deleted file to the terminal in batch mode
    #[arg(long)]
    verbose: bool,

    /// Print version information
    #[arg(short = 'v', long = "version", action = clap::ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    fn interactive(&self) -> bool {
        self.prefixes.is_empty() && self.categories.is_empty()
    }

    fn extension_filter(&self) -> Result<Option<ExtensionFilter>> {
        if self.unreal_only {
            let unreal = ExtensionFilter::unreal_assets();
            let all: Vec<String> = unreal
                .iter()
                .map(ToString::to_string)
                .chain(self.extensions.iter().cloned())
                .collect();
            return Ok(Some(ExtensionFilter::new(all)));
        }
        if self.extensions.is_empty() {
            return Ok(None);
        }
        let filter = ExtensionFilter::new(&self.extensions);
        if filter.is_empty() {
            bail!("--ext was given but names no extension");
        }
        Ok(Some(filter))
    }

    fn selected_prefixes(&self, catalog: &PrefixCatalog) -> Result<BTreeSet<String>> {
        let mut prefixes: BTreeSet<String> = self.prefixes.iter().cloned().collect();
        for name in &self.categories {
            let category = catalog.find_category(name)?;
            prefixes.extend(category.prefixes.iter().cloned());
        }
        Ok(prefixes)
    }
}

fn resolve_root(cli_root: Option<PathBuf>, prefs: &Preferences) -> Result<PathBuf> {
    if let Some(root) = cli_root {
        return Ok(root);
    }
    let last = prefs.get(LAST_FOLDER_PATH, "");
    if !last.is_empty() && PathBuf::from(&last).is_dir() {
        return Ok(PathBuf::from(last));
    }
    std::env::current_dir().context("Failed to read the current directory")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let catalog = match &cli.catalog {
        Some(path) => PrefixCatalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None => PrefixCatalog::default(),
    };

    if cli.list_prefixes {
        batch::print_catalog(&catalog);
        return Ok(());
    }

    let extensions = cli.extension_filter()?;
    let interactive = cli.interactive();
    let term_level = if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let log_path = logging::init(!interactive, term_level)?;

    let mut prefs = Preferences::load();
    let root = resolve_root(cli.root.clone(), &prefs)?;
    validate_root(&root)?;
    let root = root.canonicalize().unwrap_or(root);
    if let Err(e) = prefs.set(LAST_FOLDER_PATH, root.to_string_lossy()) {
        log::warn!("Failed to save preferences: {e}");
    }

    let mode = if cli.trash {
        RemovalMode::Trash
    } else {
        RemovalMode::Permanent
    };
    let allowlist = Allowlist::load();

    if !interactive {
        let options = ScanOptions {
            prefixes: cli.selected_prefixes(&catalog)?,
            extensions,
            allowlist,
        };
        return batch::run(&root, &options, mode, cli.confirm);
    }

    let mut app = App::new(root, &catalog, extensions, mode, allowlist).with_log_path(log_path);

    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let res = ui::run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}
