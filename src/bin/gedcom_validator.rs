//! GEDCOM Validator CLI
//!
//! Checks GEDCOM files for inconsistent person and family records.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use gedcom_validator::report::{families_table, people_table, render_findings};
use gedcom_validator::{audit_file, OutputFormat, ValidationConfig, ValidatorConfig};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "gedcom-validator")]
#[command(about = "Validate GEDCOM person and family records")]
struct Cli {
    /// Config file (merged over defaults and gedcom.toml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    format: Option<FormatArg>,

    /// Reference date for future-date and age checks (YYYY-MM-DD)
    #[arg(short, long, global = true)]
    reference_date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Table,
    Json,
    Plain,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Validate files or directories of .ged files
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print the individuals and families of a file
    Show {
        path: PathBuf,
    },

    /// Print or save the effective configuration
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    }
}

/// Returns `Ok(false)` when any input had findings or failed to load
fn run(cli: Cli) -> Result<bool> {
    let mut config = ValidatorConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if let Some(date) = cli.reference_date {
        config.validation.reference_date = Some(date);
    }
    // one reference date for every file in this invocation; `config` itself stays unpinned
    let reference = config.validation.reference_or_today();
    let validation = ValidationConfig {
        reference_date: Some(reference),
        ..config.validation.clone()
    };

    match cli.command {
        Commands::Check { paths } => {
            let mut clean = true;
            for path in collect_inputs(&paths) {
                let source = path.display().to_string();
                match audit_file(&path, &validation) {
                    Ok(audit) => {
                        if !audit.findings.is_empty() {
                            clean = false;
                        }
                        print!("{}", render_findings(&source, &audit.findings, config.output.format)?);
                        if config.output.format == OutputFormat::Json {
                            println!();
                        }
                    }
                    Err(e) => {
                        clean = false;
                        eprintln!("{}: {}", source, e);
                    }
                }
            }
            Ok(clean)
        }

        Commands::Show { path } => {
            let audit = match audit_file(&path, &validation) {
                Ok(audit) => audit,
                Err(e) => {
                    eprintln!("{}: {}", path.display(), e);
                    return Ok(false);
                }
            };
            if config.output.show_people {
                println!("Individuals");
                print!("{}", people_table(&audit.tree.people, reference));
            }
            if config.output.show_families {
                println!("Families");
                print!("{}", families_table(&audit.tree.families, &audit.tree.people));
            }
            Ok(true)
        }

        Commands::Config { output } => {
            match output {
                Some(path) => {
                    config.save(&path).with_context(|| format!("writing {}", path))?;
                    println!("Configuration written to {}", path);
                }
                None => print!("{}", toml::to_string_pretty(&config)?),
            }
            Ok(true)
        }
    }
}

/// Expand directories into the `.ged` files below them, sorted
fn collect_inputs(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|e| e.ok())
                .map(|e| e.into_path())
                .filter(|p| is_gedcom(p))
                .collect();
            found.sort();
            inputs.extend(found);
        } else {
            inputs.push(path.clone());
        }
    }
    inputs
}

fn is_gedcom(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("ged"))
            .unwrap_or(false)
}
