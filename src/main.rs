//! Apple crosstool CLI
//!
//! Entry point for the `apple-crosstool` command-line tool.

use apple_crosstool::config::{default_host_config_path, DEFAULT_REPO_CONFIG};
use apple_crosstool::{
    logging, ConfigurationTransition, EffectiveOptions, PatchOutcome, APPLE_CROSSTOOL_TRANSITION,
};
use apple_options::{ApplePlatformType, BuildOptions, CoreOptions};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "apple-crosstool")]
#[command(about = "Apple crosstool configuration transition", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the crosstool transition to the effective options
    Transition {
        #[command(flatten)]
        load: LoadArgs,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Fan the effective options out per architecture of a platform
    Split {
        /// Platform to split for (ios, watchos, tvos, macos)
        #[arg(long, short = 'p')]
        platform: String,

        #[command(flatten)]
        load: LoadArgs,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show the effective options and where they came from
    Show {
        #[command(flatten)]
        load: LoadArgs,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct LoadArgs {
    /// Path to host options file (default: ~/.config/apple-crosstool/options.toml)
    #[arg(long)]
    host_config: Option<PathBuf>,

    /// Path to repo options file (default: .apple-crosstool/options.toml)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Override an option, e.g. `apple.platform_type=watchos` (repeatable)
    #[arg(long = "set", value_name = "FRAGMENT.FIELD=VALUE")]
    overrides: Vec<String>,
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Transition { load, json } => run_transition(load, json),
        Commands::Split {
            platform,
            load,
            json,
        } => run_split(&platform, load, json),
        Commands::Show { load, json } => run_show(load, json),
    }
}

fn load_options(load: LoadArgs) -> EffectiveOptions {
    let host = load.host_config.or_else(default_host_config_path);
    let repo = load
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPO_CONFIG));

    match EffectiveOptions::build(host.as_deref(), Some(repo.as_path()), &load.overrides) {
        Ok(effective) => effective,
        Err(e) => {
            eprintln!("Error loading options: {}", e);
            process::exit(1);
        }
    }
}

fn run_transition(load: LoadArgs, json: bool) {
    let input = Arc::new(load_options(load).options);

    let outcome = match APPLE_CROSSTOOL_TRANSITION.evaluate(&input) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Transition failed: {}", e);
            process::exit(1);
        }
    };
    let label = match &outcome {
        PatchOutcome::Skipped(_) => "skipped",
        PatchOutcome::Unchanged(_) => "unchanged",
        PatchOutcome::Patched(_) => "patched",
    };
    let output = outcome.options();
    let checksum = checksum_or_exit(output);

    if json {
        print_json(&serde_json::json!({
            "outcome": label,
            "checksum": checksum,
            "options": &**output,
        }));
    } else {
        println!("Outcome: {}", label);
        println!("Checksum: {}", checksum);
        println!();
        print_toml(output);
    }
}

fn run_split(platform: &str, load: LoadArgs, json: bool) {
    let input = Arc::new(load_options(load).options);
    let transition = ConfigurationTransition::MultiArchSplit(ApplePlatformType::from(platform));

    let applied = match transition.apply(&input) {
        Ok(applied) => applied,
        Err(e) => {
            eprintln!("Split failed: {}", e);
            process::exit(1);
        }
    };
    let Some(branches) = applied.split() else {
        eprintln!("Split failed: transition produced a single configuration");
        process::exit(1);
    };

    if json {
        let output: Vec<serde_json::Value> = branches
            .iter()
            .map(|(arch, options)| {
                serde_json::json!({
                    "arch": arch,
                    "checksum": checksum_or_exit(options),
                    "options": &**options,
                })
            })
            .collect();
        print_json(&serde_json::Value::Array(output));
    } else {
        println!("Platform: {}", platform);
        for (arch, options) in branches {
            let cpu = options
                .get::<CoreOptions>()
                .map(|core| core.cpu.as_str())
                .unwrap_or("-");
            println!("  {:<10} cpu={:<10} {}", arch, cpu, checksum_or_exit(options));
        }
    }
}

fn run_show(load: LoadArgs, json: bool) {
    let effective = load_options(load);

    if json {
        match effective.to_json() {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Sources:");
    for source in &effective.sources {
        match (&source.path, &source.digest) {
            (Some(path), Some(digest)) => {
                println!("  {:?}: {} ({})", source.origin, path, &digest[..12])
            }
            _ => println!("  {:?}", source.origin),
        }
    }
    println!("Checksum: {}", effective.checksum);
    println!();
    print_toml(&effective.options);
}

fn checksum_or_exit(options: &BuildOptions) -> String {
    match options.checksum() {
        Ok(checksum) => checksum,
        Err(e) => {
            eprintln!("Error computing checksum: {}", e);
            process::exit(1);
        }
    }
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn print_toml(options: &BuildOptions) {
    match toml::to_string_pretty(options) {
        Ok(out) => print!("{}", out),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}
