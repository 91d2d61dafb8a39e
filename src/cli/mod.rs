//! # CLI Module
//!
//! Command-line interface for the photo cleanup engine.
//!
//! ## Usage
//! ```bash
//! # Find duplicates, messaging app images and screenshots
//! photo-cleanup scan ~/Pictures
//!
//! # JSON output
//! photo-cleanup scan ~/Pictures --output json
//!
//! # Preview, then move redundant duplicates to the trash
//! photo-cleanup remove duplicate ~/Pictures --all
//! photo-cleanup remove duplicate ~/Pictures --all --yes
//!
//! # Recently removed items
//! photo-cleanup trash list
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_cleanup::core::classifier::screenshot_reason;
use photo_cleanup::core::ledger::{Category, RetentionLedger};
use photo_cleanup::core::media::{FsIndexConfig, FsMediaIndex, MediaRecord, TrashRemover};
use photo_cleanup::core::orchestrator::{ScanOrchestrator, ScanResult};
use photo_cleanup::core::store::SqliteBlobStore;
use photo_cleanup::error::{CleanupError, LedgerError, Result};
use photo_cleanup::events::{Event, EventChannel, ScanEvent};
use std::path::{Path, PathBuf};
use std::thread;

/// Photo Cleanup - Find duplicates, chat images and screenshots
#[derive(Parser, Debug)]
#[command(name = "photo-cleanup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ledger database path
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scan folders and list cleanup candidates
    Scan {
        /// Folders to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Include video files
        #[arg(long)]
        include_videos: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Move candidates of one category to the trash
    Remove {
        /// duplicate, messaging_app or screenshot
        #[arg(value_parser = parse_category)]
        category: Category,

        /// Folders to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Select every candidate (duplicates keep their best copy)
        #[arg(long, conflicts_with = "id")]
        all: bool,

        /// Select individual records by id
        #[arg(long)]
        id: Vec<String>,

        /// Actually remove; otherwise only print the selection
        #[arg(short, long)]
        yes: bool,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Include video files
        #[arg(long)]
        include_videos: bool,
    },

    /// Manage recently removed items
    Trash {
        #[command(subcommand)]
        action: TrashAction,
    },
}

#[derive(Subcommand, Debug)]
enum TrashAction {
    /// List retained items with days remaining
    List,
    /// Drop one item from the ledger
    Restore {
        /// Item id as shown by `trash list`
        id: String,
    },
    /// Empty the ledger
    Clear,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (ids only)
    Minimal,
}

fn parse_category(value: &str) -> std::result::Result<Category, String> {
    value.parse().map_err(|e: LedgerError| e.to_string())
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let ledger_path = cli.ledger.unwrap_or_else(default_ledger_path);

    match cli.command {
        Commands::Scan {
            paths,
            output,
            include_hidden,
            include_videos,
            verbose,
        } => {
            let config = index_config(paths, include_hidden, include_videos);
            run_scan(config, output, verbose)
        }
        Commands::Remove {
            category,
            paths,
            all,
            id,
            yes,
            include_hidden,
            include_videos,
        } => {
            let config = index_config(paths, include_hidden, include_videos);
            run_remove(config, &ledger_path, category, all, &id, yes)
        }
        Commands::Trash { action } => run_trash(&ledger_path, action),
    }
}

fn default_ledger_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("photo-cleanup")
        .join("ledger.db")
}

fn index_config(roots: Vec<PathBuf>, include_hidden: bool, include_videos: bool) -> FsIndexConfig {
    FsIndexConfig {
        roots,
        include_hidden,
        include_videos,
        ..FsIndexConfig::default()
    }
}

fn open_ledger(path: &Path) -> Result<RetentionLedger> {
    let store = SqliteBlobStore::open(path)?;
    Ok(RetentionLedger::new(Box::new(store)))
}

fn build_orchestrator(config: FsIndexConfig, ledger_path: &Path) -> Result<ScanOrchestrator> {
    ScanOrchestrator::builder()
        .index(Box::new(FsMediaIndex::new(config)))
        .remover(Box::new(TrashRemover::new()))
        .ledger(open_ledger(ledger_path)?)
        .build()
}

/// Run a scan, drawing a progress bar when `show_progress` is set
fn scan_with_progress(orchestrator: &mut ScanOrchestrator, show_progress: bool) -> Result<ScanResult> {
    let (mut sender, receiver) = EventChannel::new();

    let progress = if show_progress {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {percent:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            if let (Some(pb), Event::Scan(ScanEvent::Progress(p))) = (&progress_clone, event) {
                pb.set_position((p.fraction * 100.0).round() as u64);
                pb.set_message(p.message);
            }
        }
    });

    let result = orchestrator.scan(&mut sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(result?)
}

fn run_scan(config: FsIndexConfig, output: OutputFormat, verbose: bool) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Photo Cleanup").bold().cyan(),
            style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    // Scanning never touches the ledger
    let mut orchestrator = ScanOrchestrator::builder()
        .index(Box::new(FsMediaIndex::new(config)))
        .remover(Box::new(TrashRemover::new()))
        .build()?;
    let result = scan_with_progress(&mut orchestrator, matches!(output, OutputFormat::Pretty))?;

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &result, verbose),
        OutputFormat::Json => print_json_results(&result)?,
        OutputFormat::Minimal => print_minimal_results(&result),
    }

    Ok(())
}

fn run_remove(
    config: FsIndexConfig,
    ledger_path: &Path,
    category: Category,
    all: bool,
    ids: &[String],
    yes: bool,
) -> Result<()> {
    if !all && ids.is_empty() {
        return Err(CleanupError::Config(
            "nothing selected: pass --all or at least one --id".to_string(),
        ));
    }

    let term = Term::stderr();
    let mut orchestrator = build_orchestrator(config, ledger_path)?;
    let result = scan_with_progress(&mut orchestrator, true)?;

    let selected = if all {
        result.candidates(category)
    } else {
        result.select(category, ids)
    };

    if selected.is_empty() {
        term.write_line(&format!(
            "  No {} matched the selection.",
            category.display_name().to_lowercase()
        ))
        .ok();
        return Ok(());
    }

    term.write_line(&format!(
        "{} ({} selected)",
        style(category.display_name()).bold().underlined(),
        style(selected.len()).cyan()
    ))
    .ok();
    for record in &selected {
        term.write_line(&format!("    {} {}", style("○").dim(), display_locator(record)))
            .ok();
    }
    term.write_line("").ok();

    if !yes {
        term.write_line(&format!(
            "{}",
            style("Dry run: nothing was removed. Re-run with --yes to move these to the trash.").dim()
        ))
        .ok();
        return Ok(());
    }

    let removed = orchestrator.remove(category, &selected)?;
    term.write_line(&format!(
        "{} Moved {} item(s) to the trash. They stay listed under `trash list` for {} days.",
        style("✓").green().bold(),
        style(removed).cyan(),
        orchestrator.ledger().config().retention.num_days()
    ))
    .ok();

    Ok(())
}

fn run_trash(ledger_path: &Path, action: TrashAction) -> Result<()> {
    let term = Term::stderr();
    let ledger = open_ledger(ledger_path)?;

    match action {
        TrashAction::List => {
            let items = ledger.list();
            if items.is_empty() {
                term.write_line("  Nothing was removed recently.").ok();
                return Ok(());
            }

            term.write_line(&format!("{}", style("Recently Removed:").bold().underlined()))
                .ok();
            for item in &items {
                let days = ledger.days_remaining(item.removed_at);
                term.write_line(&format!(
                    "  {} {} {}",
                    style(format!("{:>2}d", days)).yellow(),
                    style(format!("[{}]", item.category.display_name())).dim(),
                    display_locator(&item.record)
                ))
                .ok();
                term.write_line(&format!("      {}", style(&item.record.id).dim())).ok();
            }
        }
        TrashAction::Restore { id } => {
            if ledger.restore(&id) {
                term.write_line(&format!("{} Restored {}", style("✓").green().bold(), id))
                    .ok();
            } else {
                term.write_line(&format!(
                    "{} No retained item with id {}",
                    style("✗").red().bold(),
                    id
                ))
                .ok();
            }
        }
        TrashAction::Clear => {
            ledger.clear();
            term.write_line(&format!("{} Ledger cleared", style("✓").green().bold()))
                .ok();
        }
    }

    Ok(())
}

fn print_pretty_results(term: &Term, result: &ScanResult, verbose: bool) {
    let summary = result.summary();

    term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();
    term.write_line(&format!(
        "  {} photos scanned",
        style(summary.total_scanned).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} duplicate groups ({} redundant copies)",
        style(summary.duplicate_groups).cyan(),
        style(summary.redundant_duplicates).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} messaging app images",
        style(summary.messaging_app_matches).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} screenshots",
        style(summary.screenshot_matches).cyan()
    ))
    .ok();
    term.write_line("").ok();

    if !result.duplicates.is_empty() {
        term.write_line(&format!("{}", style("Duplicates:").bold().underlined()))
            .ok();
        for (i, group) in result.duplicates.iter().enumerate() {
            term.write_line(&format!(
                "  {} {} ({} photos)",
                style(format!("Group {}:", i + 1)).bold(),
                style(&group.key).yellow(),
                group.assets.len()
            ))
            .ok();

            for record in &group.assets {
                let marker = if record.id == group.best_quality.id {
                    style("★").green().to_string()
                } else {
                    style("○").dim().to_string()
                };
                let size = if verbose {
                    format!(" {}", style(format!("{}x{}", record.width, record.height)).dim())
                } else {
                    String::new()
                };
                term.write_line(&format!("    {} {}{}", marker, display_locator(record), size))
                    .ok();
            }
            term.write_line("").ok();
        }
    }

    print_record_list(term, Category::MessagingApp, &result.messaging_app_matches, |_| None);
    print_record_list(term, Category::Screenshot, &result.screenshot_matches, |record| {
        if verbose {
            screenshot_reason(record).map(|d| d.reason)
        } else {
            None
        }
    });

    term.write_line(&format!(
        "{}",
        style("Remember: No files were deleted. Use `remove` to move items to the trash.").dim()
    ))
    .ok();
}

fn print_record_list<F>(term: &Term, category: Category, records: &[MediaRecord], note: F)
where
    F: Fn(&MediaRecord) -> Option<String>,
{
    if records.is_empty() {
        return;
    }

    term.write_line(&format!(
        "{}",
        style(format!("{}:", category.display_name())).bold().underlined()
    ))
    .ok();
    for record in records {
        let line = match note(record) {
            Some(note) => format!("    {} {} {}", style("○").dim(), display_locator(record), style(note).dim()),
            None => format!("    {} {}", style("○").dim(), display_locator(record)),
        };
        term.write_line(&line).ok();
    }
    term.write_line("").ok();
}

fn print_json_results(result: &ScanResult) -> Result<()> {
    let output = serde_json::json!({
        "summary": result.summary(),
        "duplicates": result.duplicates.iter().map(|g| {
            serde_json::json!({
                "id": g.id,
                "key": g.key,
                "best": g.best_quality.id,
                "assets": g.assets.iter().map(|r| &r.id).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
        "messaging_app": result.messaging_app_matches.iter().map(|r| &r.id).collect::<Vec<_>>(),
        "screenshots": result.screenshot_matches.iter().map(|r| &r.id).collect::<Vec<_>>(),
    });

    let json = serde_json::to_string_pretty(&output).map_err(CleanupError::Output)?;
    println!("{}", json);
    Ok(())
}

/// Ids a "select all" would remove, one per line
fn print_minimal_results(result: &ScanResult) {
    for category in Category::ALL {
        for record in result.candidates(category) {
            println!("{}\t{}", category, record.id);
        }
    }
}

fn display_locator(record: &MediaRecord) -> String {
    let path = Path::new(&record.locator);
    match dirs::home_dir().and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf)) {
        Some(relative) => format!("~/{}", relative.display()),
        None => record.locator.clone(),
    }
}
