// SPDX-License-Identifier: PMPL-1.0-or-later

//! langpack: layered language-pack loading and label resolution
//!
//! Loads `<Label>`/`<List>` pack files declared by a YAML or JSON config,
//! resolves labels by language index, and ships authoring tools for
//! inspecting, checking, and batch-scanning pack files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use langpack::config::PackConfig;
use langpack::diagnostics;
use langpack::lifecycle::PackManager;
use langpack::pack;
use langpack::scan::{self, ScanConfig, DEFAULT_EXTENSION};
use langpack::source::{FsSource, PackSource};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "langpack")]
#[command(version)]
#[command(about = "Layered language-pack loading and label resolution")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a label against the packs a config declares
    Resolve {
        /// Pack config file (YAML or JSON)
        #[arg(value_name = "CONFIG")]
        config: PathBuf,

        /// Label to resolve
        #[arg(value_name = "LABEL")]
        label: String,

        /// Language index (defaults to the config's language)
        #[arg(short, long)]
        language: Option<usize>,

        /// Context to load before resolving
        #[arg(short, long)]
        context: Option<String>,
    },

    /// Parse one pack file and list its labels
    Inspect {
        /// Pack file to inspect
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format: text, json, or yaml
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Verify every file a config declares exists, decodes, and parses
    Check {
        /// Pack config file (YAML or JSON)
        #[arg(value_name = "CONFIG")]
        config: PathBuf,
    },

    /// Batch-validate all pack files under a directory
    Scan {
        /// Directory to scan for pack files
        #[arg(value_name = "DIRECTORY")]
        directory: PathBuf,

        /// Pack file extension to match
        #[arg(short, long, default_value = DEFAULT_EXTENSION)]
        extension: String,

        /// Only show files with problems
        #[arg(short, long)]
        problems_only: bool,

        /// Output report to file (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            config,
            label,
            language,
            context,
        } => {
            let config = PackConfig::load(&config)?;
            let mut manager = PackManager::new(config);
            manager.start()?;
            if let Some(context_id) = context {
                manager.on_context_changed(&context_id)?;
            }
            if let Some(index) = language {
                manager.set_language(index);
            }

            match manager.resolve(&label, manager.language()) {
                Some(text) => println!("{}", text),
                None => {
                    eprintln!(
                        "unresolved: no pack defines '{}' at language {}",
                        label,
                        manager.language()
                    );
                    std::process::exit(1);
                }
            }
        }

        Commands::Inspect { file, format } => {
            let text = FsSource.read_text(&file)?;
            let parsed = pack::parse(&text, false);

            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&parsed)?),
                "yaml" => print!("{}", serde_yaml::to_string(&parsed)?),
                _ => {
                    println!("Pack: {}", file.display());
                    println!("  Labels: {}", parsed.label_count());
                    println!("  Widest variant list: {}", parsed.max_variants());

                    let mut labels: Vec<_> = parsed.labels.iter().collect();
                    labels.sort_by_key(|(key, _)| key.as_str());
                    for (key, variants) in labels {
                        println!("\n  {}", key);
                        for (index, variant) in variants.iter().enumerate() {
                            println!("    [{}] {}", index, variant);
                        }
                    }
                }
            }
        }

        Commands::Check { config } => {
            let config = PackConfig::load(&config)?;
            diagnostics::run_check(&config, &FsSource)?;
        }

        Commands::Scan {
            directory,
            extension,
            problems_only,
            output,
        } => {
            println!("Scanning pack files under: {}", directory.display());

            let report = scan::run(&ScanConfig {
                directory,
                extension,
                problems_only,
            })?;

            if let Some(output_path) = output {
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(&output_path, json)?;
                println!("Report saved to: {}", output_path.display());
            } else {
                println!("\nScan Summary:");
                println!("  Files scanned: {}", report.files_scanned);
                println!("  Files with problems: {}", report.files_with_problems);
                println!("  Total labels: {}", report.total_labels);

                for result in &report.results {
                    match &result.error {
                        Some(err) => println!("  {} — ERROR: {}", result.path.display(), err),
                        None => println!(
                            "  {} — {} label(s), up to {} variant(s)",
                            result.path.display(),
                            result.label_count,
                            result.max_variants
                        ),
                    }
                }
            }
        }
    }

    Ok(())
}
