//! Subcommands and their handlers.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use quiz_core::{
    apply_to_file, ArrayName, BackupPolicy, ConvertConfig, PatchConfig, PatchReport, RemoveByMatch,
    SetField, DEFAULT_LEVEL, DEFAULT_TITLE,
};

#[derive(Parser)]
#[command(name = "quizctl", about = "Build and patch quiz JSON files from Anki exports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an Anki TSV export into a quiz JSON file
    Convert {
        /// Tab-separated export with a Front/Back/Tags header
        #[arg(short, long)]
        input: PathBuf,
        /// Quiz JSON file to write (parent directories are created)
        #[arg(short, long)]
        output: PathBuf,
        /// Text document used as the quiz overview
        #[arg(short, long)]
        writeup: Option<PathBuf>,
        #[arg(long, default_value = DEFAULT_TITLE)]
        title: String,
        /// Level given to every card
        #[arg(long, default_value = DEFAULT_LEVEL)]
        level: String,
    },
    /// Remove every card whose front or question matches the text
    Remove {
        #[command(flatten)]
        target: PatchArgs,
        /// Exact question text to remove
        #[arg(long)]
        front: String,
    },
    /// Set one field on every card (resets levels by default)
    SetField {
        #[command(flatten)]
        target: PatchArgs,
        #[arg(long, default_value = "level")]
        field: String,
        #[arg(long, default_value = quiz_core::patch::set_field::RESET_LEVEL)]
        value: String,
    },
    /// Show record counts per array and level
    Stats {
        /// Quiz JSON file to inspect
        #[arg(short, long)]
        file: PathBuf,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Options shared by the patch commands.
#[derive(Args)]
pub struct PatchArgs {
    /// Quiz JSON file to patch
    #[arg(short, long)]
    pub file: PathBuf,
    /// Arrays to patch (repeatable; default: anki, items, cloze)
    #[arg(long = "array", value_name = "NAME")]
    pub arrays: Vec<ArrayName>,
    /// Copy the file to a sibling before overwriting it
    #[arg(long)]
    pub backup: bool,
    #[arg(long, default_value = BackupPolicy::DEFAULT_SUFFIX)]
    pub backup_suffix: String,
}

impl PatchArgs {
    fn config(&self) -> PatchConfig {
        let mut config = PatchConfig::new(&self.file);
        if self.backup {
            config.backup = BackupPolicy::sibling(&self.backup_suffix);
        }
        config
    }

    fn arrays(&self) -> Vec<ArrayName> {
        if self.arrays.is_empty() {
            ArrayName::ALL.to_vec()
        } else {
            self.arrays.clone()
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Convert {
            input,
            output,
            writeup,
            title,
            level,
        } => {
            let config = ConvertConfig {
                input,
                output,
                writeup,
                title,
                level,
            };
            let report = quiz_core::convert(&config)
                .with_context(|| format!("converting {}", config.input.display()))?;
            println!("Wrote {} ({} cards)", report.output.display(), report.cards);
            Ok(())
        }
        Commands::Remove { target, front } => {
            let patch = RemoveByMatch::new(front.as_str()).with_arrays(target.arrays());
            let report = apply_to_file(&patch, &target.config())
                .with_context(|| format!("patching {}", target.file.display()))?;
            print_backup(&report);
            if report.written {
                println!(
                    "Removed {} card(s) matching front: {}",
                    report.outcome.changed(),
                    front
                );
            } else {
                println!("No matching card found for front: {}", front);
            }
            Ok(())
        }
        Commands::SetField {
            target,
            field,
            value,
        } => {
            let patch = SetField::new(field.as_str(), value.as_str()).with_arrays(target.arrays());
            let report = apply_to_file(&patch, &target.config())
                .with_context(|| format!("patching {}", target.file.display()))?;
            print_backup(&report);
            if report.written {
                println!(
                    "Updated {} to {} on {} record(s) in {}",
                    field,
                    value,
                    report.outcome.changed(),
                    report.file.display()
                );
            } else {
                println!(
                    "No changes: {} already {} on all {} record(s) in {}",
                    field,
                    value,
                    report.outcome.matched(),
                    report.file.display()
                );
            }
            Ok(())
        }
        Commands::Stats { file, json } => {
            let doc = quiz_core::load_value(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let stats = quiz_core::summarize(&doc);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            if stats.is_empty() {
                println!("No card arrays in {}", file.display());
                return Ok(());
            }
            for array in &stats {
                let levels = array
                    .levels
                    .iter()
                    .map(|(level, count)| format!("{}={}", level, count))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{}: {} record(s) [{}]", array.name, array.records, levels);
                if array.skipped > 0 {
                    println!("  {} non-record entries skipped", array.skipped);
                }
            }
            Ok(())
        }
    }
}

fn print_backup(report: &PatchReport) {
    if let Some(backup) = &report.backup {
        println!("Backup written to {}", backup.display());
    }
}
