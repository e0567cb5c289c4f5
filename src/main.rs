//! CLI entry point for keyseq
//!
//! Provides command-line access for checking bindings files for conflicts,
//! listing them, parsing descriptors, and replaying a key stream against a
//! bindings file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use keyseq::config::{self, EngineConfig};
use keyseq::core::parser::{parse_descriptor, parse_descriptor_strict, parse_keystroke};
use keyseq::core::{format_sequence, handler, ConflictDetector, ConflictKind};
use keyseq::{Keyboard, ManualClock, Outcome};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keyseq")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a bindings file for conflicts
    Check {
        /// Path to bindings file
        file: PathBuf,
    },

    /// List all bindings in a bindings file
    List {
        /// Path to bindings file
        file: PathBuf,
    },

    /// Show the keystrokes a descriptor parses to
    Parse {
        /// Descriptors such as "ctrl+s" or "t e s t"
        #[arg(required = true)]
        descriptors: Vec<String>,
    },

    /// Replay chords against a bindings file and report what fires
    Simulate {
        /// Path to bindings file
        file: PathBuf,

        /// Milliseconds between consecutive chords
        #[arg(short, long, default_value_t = 0)]
        gap_ms: u64,

        /// Reject descriptors with unknown keys
        #[arg(long)]
        strict: bool,

        /// Chords to press in order, e.g. t e s t ctrl+s
        #[arg(required = true)]
        chords: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file } => check_conflicts(&file)?,
        Commands::List { file } => list_bindings(&file)?,
        Commands::Parse { descriptors } => parse_descriptors(&descriptors)?,
        Commands::Simulate {
            file,
            gap_ms,
            strict,
            chords,
        } => simulate(&file, Duration::from_millis(gap_ms), strict, &chords)?,
    }

    Ok(())
}

/// Console logging, filtered by RUST_LOG (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Check a bindings file for conflicts
fn check_conflicts(path: &Path) -> anyhow::Result<()> {
    let config = EngineConfig::from_env();

    println!("{} Parsing bindings: {}", "→".cyan(), path.display());

    let file = config::load_bindings(path, &config)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    println!("{} Found {} bindings\n", "✓".green(), file.entries.len());

    // Build conflict detector
    let mut detector = ConflictDetector::new();
    for entry in &file.entries {
        detector.add_binding(&entry.descriptor, &parse_descriptor(&entry.descriptor));
    }

    let conflicts = detector.find_conflicts();

    if conflicts.is_empty() {
        println!("{} {}", "✓".green().bold(), "No conflicts detected!".bold());
        return Ok(());
    }

    println!(
        "{} Found {} conflict{}:\n",
        "✗".red().bold(),
        conflicts.len(),
        if conflicts.len() == 1 { "" } else { "s" }
    );

    for (i, conflict) in conflicts.iter().enumerate() {
        let reason = match conflict.kind {
            ConflictKind::Duplicate => "same sequence bound more than once",
            ConflictKind::Shadowed => "sequence can never complete",
            ConflictKind::UnknownKey => "unknown key in sequence",
        };

        println!(
            "{} {} ({})",
            format!("Conflict {}", i + 1).yellow().bold(),
            format_sequence(&conflict.sequence).cyan(),
            reason
        );

        for (idx, identifier) in conflict.identifiers.iter().enumerate() {
            println!("  {} {}", format!("{}.", idx + 1).dimmed(), identifier);
        }
        println!();
    }

    println!("{}", "⚠ Some of these bindings will never fire!".yellow());
    std::process::exit(1);
}

/// List all bindings in a bindings file
fn list_bindings(path: &Path) -> anyhow::Result<()> {
    let config = EngineConfig::from_env();
    let file = config::load_bindings(path, &config)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    println!("{}", format!("Bindings from: {}\n", path.display()).bold());

    if let Some(timeout) = file.timeout {
        println!("timeout: {}ms", timeout.as_millis());
    }

    for entry in &file.entries {
        let keys = format_sequence(&parse_descriptor(&entry.descriptor));
        println!(
            "{} → {} {}",
            entry.descriptor.cyan().bold(),
            entry.action.green(),
            format!("[{}]", keys).dimmed()
        );
    }

    println!("\n{} Total: {} bindings", "✓".green(), file.entries.len());

    Ok(())
}

/// Print the encoded keystrokes of each descriptor
fn parse_descriptors(descriptors: &[String]) -> anyhow::Result<()> {
    for descriptor in descriptors {
        let keys = parse_descriptor_strict(descriptor)?;

        println!("{}", descriptor.cyan().bold());
        for key in keys {
            println!("  {:<20} {:#010x}", key.to_string(), key.bits());
        }
    }

    Ok(())
}

/// Feed chords into a matcher built from a bindings file
///
/// Time is simulated: the clock advances by `gap` before every chord, so
/// timeouts behave exactly as they would for a typist that fast.
fn simulate(path: &Path, gap: Duration, strict: bool, chords: &[String]) -> anyhow::Result<()> {
    let config = EngineConfig::from_env();
    let config = if strict { config.with_strict(true) } else { config };
    let file = config::load_bindings(path, &config)
        .with_context(|| format!("Failed to load {}", path.display()))?;

    let clock = ManualClock::new();
    let mut matcher = config.build(clock.clone());
    config::install(&file, &mut matcher, |entry| {
        let action = entry.action.clone();
        let descriptor = entry.descriptor.clone();
        handler(move || println!("  {} {} ({})", "⚡".yellow(), action.green().bold(), descriptor))
    });

    let keyboard: &mut dyn Keyboard = &mut matcher;

    for chord in chords {
        let keystroke = parse_keystroke(chord, chord)?;
        clock.advance(gap);

        println!("{} {}", "→".cyan(), keystroke);
        match keyboard.record_key(keystroke.key(), keystroke.modifiers()) {
            Outcome::Matched { .. } => {}
            Outcome::Pending => println!("  {}", "… waiting for more keys".dimmed()),
            Outcome::Reset => println!("  {}", "✗ no match".dimmed()),
        }
    }

    Ok(())
}
