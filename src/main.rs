//! termcfg CLI
//!
//! Entry point for the `termcfg` command-line tool.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use termcfg::{load_finalized, ConfigStore, LoadOptions, LoadReport};

#[derive(Parser)]
#[command(name = "termcfg")]
#[command(about = "Layered, typed terminal configuration store", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, finalize, and print the canonical effective configuration
    Export {
        /// Path to the base configuration file
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// Override assignments, key=value (applied after the base file)
        #[arg(long = "set", short = 'e')]
        overrides: Vec<String>,

        /// Do not resolve config-file includes
        #[arg(long)]
        no_includes: bool,
    },

    /// Load, finalize, and print a single typed value
    Get {
        /// Path to the base configuration file
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// The configuration key to read
        key: String,

        /// Expected value kind for the key
        #[arg(long, value_enum)]
        kind: KindArg,
    },

    /// Load the configuration and report the applied sources
    Verify {
        /// Path to the base configuration file
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Bool,
    Float,
    U8,
    U32,
    Color,
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            config,
            overrides,
            no_includes,
        } => {
            let options = LoadOptions {
                cli_overrides: if overrides.is_empty() {
                    None
                } else {
                    Some(overrides)
                },
                apply_includes: !no_includes,
            };
            let (store, _) = load_or_exit(&config, &options);
            print!("{}", store.export());
        }
        Commands::Get { config, key, kind } => {
            let (store, _) = load_or_exit(&config, &LoadOptions::default());
            run_get(&store, &key, kind);
        }
        Commands::Verify { config, json } => {
            let (_, report) = load_or_exit(&config, &LoadOptions::default());
            run_verify(&config, &report, json);
        }
    }
}

fn load_or_exit(config: &PathBuf, options: &LoadOptions) -> (ConfigStore, LoadReport) {
    match load_finalized(config, options) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    }
}

fn run_get(store: &ConfigStore, key: &str, kind: KindArg) {
    let rendered = match kind {
        KindArg::Bool => store.get_bool(key).map(|v| v.to_string()),
        KindArg::Float => store.get_float(key).map(|v| v.to_string()),
        KindArg::U8 => store.get_u8(key).map(|v| v.to_string()),
        KindArg::U32 => store.get_u32(key).map(|v| v.to_string()),
        KindArg::Color => store.get_color(key).map(|v| v.to_string()),
    };

    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_verify(config: &PathBuf, report: &LoadReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Configuration valid: {}", config.display());
    println!();
    println!("Applied sources ({} total):\n", report.sources.len());
    for source in &report.sources {
        match &source.path {
            Some(path) => {
                println!("  [{:?}] {}", source.origin, path);
                if let Some(digest) = &source.digest {
                    println!("    sha256: {}", digest);
                }
            }
            None => println!("  [{:?}] (override arguments)", source.origin),
        }
    }
}
