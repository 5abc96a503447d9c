use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daybook::domain::{validate, AppState, TaskStatus};
use daybook::persistence::{
    decode_with_diagnostics, get_data_dir, init_local_data_dir, is_recognizable, Store, StoreConfig,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Plain-text storage for tasks, pomodoros, reminders and reading lists", long_about = None)]
struct Cli {
    /// Data directory. Defaults to the nearest .daybook, then ~/.daybook
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .daybook directory in the current directory
    Init,
    /// Print a summary of the stored state
    Show,
    /// Check the data file for invalid or unreadable entries
    Check {
        /// Write the repaired state back
        #[arg(long)]
        fix: bool,
    },
    /// Write the data file as stored
    Export {
        /// Output file path. Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the stored state with the contents of a document
    Import { file: PathBuf },
    /// Print when the data file was last written
    Stamp,
    /// List daily snapshots
    Backups,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Commands::Init = cli.command {
        let current_dir = std::env::current_dir().context("Could not determine current directory")?;
        let data_dir = init_local_data_dir(&current_dir)?;
        let store = Store::new(StoreConfig::new(&data_dir));
        if !store.save(&AppState::new()).await {
            anyhow::bail!("Failed to write {}", store.path().display());
        }
        println!("Initialized daybook directory: {}", data_dir.display());
        return Ok(());
    }

    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => get_data_dir()?,
    };
    let store = Store::new(StoreConfig::new(data_dir));

    match cli.command {
        Commands::Init => Ok(()),
        Commands::Show => show(&store).await,
        Commands::Check { fix } => check(&store, fix).await,
        Commands::Export { output } => export(&store, output).await,
        Commands::Import { file } => import(&store, file).await,
        Commands::Stamp => {
            match store.timestamp().await {
                Some(modified) => println!("{}", modified.to_rfc3339()),
                None => println!("Never saved"),
            }
            Ok(())
        }
        Commands::Backups => {
            let snapshots = store.snapshots().await;
            if snapshots.is_empty() {
                println!("No snapshots yet");
            }
            for path in snapshots {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

async fn show(store: &Store) -> Result<()> {
    let Some(state) = store.load().await else {
        println!("No daybook found at {}", store.path().display());
        return Ok(());
    };

    let open_tasks = state.tasks.iter().filter(|task| task.status != TaskStatus::Done).count();
    println!("File:       {}", store.path().display());
    println!("Tasks:      {} ({} open)", state.tasks.len(), open_tasks);
    println!("Pomodoros:  {}", state.pomodoros.len());
    println!("Stats days: {}", state.daily_stats.len());
    println!("Templates:  {}", state.templates.len());
    println!("Reading:    {}", state.reading_list.len());
    println!("Reminders:  {}", state.reminders.len());
    println!(
        "Timer:      {}/{}/{} min, long break every {}",
        state.settings.focus_minutes,
        state.settings.short_break_minutes,
        state.settings.long_break_minutes,
        state.settings.sessions_before_long_break
    );
    println!("Streak:     {} days", state.current_streak);
    for section in &state.unknown_sections {
        println!("Kept:       ## {}", section.heading);
    }
    Ok(())
}

async fn check(store: &Store, fix: bool) -> Result<()> {
    let report = store.integrity_check().await;
    if report.ok {
        println!("OK");
        return Ok(());
    }

    for issue in &report.issues {
        println!("issue: {}", issue);
    }
    for fixed in &report.fixed {
        println!("fix:   {}", fixed);
    }

    if !fix {
        anyhow::bail!("{} issue(s) found, run with --fix to repair", report.issues.len());
    }
    let Some(state) = report.state else {
        anyhow::bail!("Nothing to repair in {}", store.path().display());
    };
    if !store.save(&state).await {
        anyhow::bail!("Failed to write {}", store.path().display());
    }
    println!("Repaired {}", store.path().display());
    Ok(())
}

async fn export(store: &Store, output: Option<PathBuf>) -> Result<()> {
    let content = store
        .read_raw()
        .await
        .with_context(|| format!("Nothing to export at {}", store.path().display()))?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, content)
                .await
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            println!("Exported to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

async fn import(store: &Store, file: PathBuf) -> Result<()> {
    let content = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    if !is_recognizable(&content) {
        anyhow::bail!("{} is not a daybook document", file.display());
    }

    let (state, diagnostics) = decode_with_diagnostics(&content);
    for diagnostic in diagnostics.iter() {
        eprintln!("Warning: {}", diagnostic.issue());
    }
    validate(&state).with_context(|| format!("Refusing to import {}", file.display()))?;

    if !store.save(&state).await {
        anyhow::bail!("Failed to write {}", store.path().display());
    }
    println!("Imported {} into {}", file.display(), store.path().display());
    Ok(())
}
