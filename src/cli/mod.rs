use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};

use awslint::reflect::resolve_manifest;
use awslint::{LintError, TypeSystem};

mod lint;
mod lookup;
mod resources;

#[derive(Parser)]
#[command(
    name = "awslint",
    version,
    about = "Checks that every generated resource class has a hand-written wrapper"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show project information
    #[arg(long)]
    about: bool,

    /// Log at debug level (overridden by AWSLINT_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum Format {
    /// Human-readable text output (default)
    #[default]
    Text,
    /// JSON output
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint an assembly: every resource class must have a wrapper
    Lint {
        /// Assembly manifests (files or directories), dependencies included
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
        /// Assembly to lint [default: the first manifest's assembly]
        #[arg(long)]
        assembly: Option<String>,
        /// Only report diagnostics matching this `rule:scope` pattern
        #[arg(long)]
        include: Vec<String>,
        /// Suppress diagnostics matching this `rule:scope` pattern
        #[arg(long)]
        exclude: Vec<String>,
        /// Config file [default: awslint.json next to the first manifest]
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the resource classes visible from an assembly
    #[command(alias = "ls")]
    Resources {
        /// Assembly manifests (files or directories), dependencies included
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
        /// Assembly to inspect [default: the first manifest's assembly]
        #[arg(long)]
        assembly: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Look up a resource by identifier (case-insensitive)
    Lookup {
        /// Resource identifier, e.g. AWS::S3::Bucket
        name: String,
        /// Assembly manifests (files or directories)
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

pub fn run(cli: Cli) {
    if cli.about {
        print_about();
        return;
    }

    match cli.command {
        Some(Commands::Lint {
            manifests,
            assembly,
            include,
            exclude,
            config,
            format,
        }) => lint::run(manifests, assembly, include, exclude, config, format),
        Some(Commands::Resources {
            manifests,
            assembly,
            format,
        }) => resources::run(manifests, assembly, format),
        Some(Commands::Lookup {
            name,
            manifests,
            format,
        }) => lookup::run(name, manifests, format),
        None => {
            eprintln!("Usage: awslint <command> [args]");
            eprintln!("Run `awslint --help` for details.");
            std::process::exit(1);
        }
    }
}

fn print_about() {
    println!(
        "awslint: resource class coverage linter\n\
         ├─ version:    {}\n\
         ├─ author:     {}\n\
         ├─ source:     {}\n\
         └─ licence:    {} https://www.apache.org/licenses/LICENSE-2.0",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS"),
        env!("CARGO_PKG_REPOSITORY"),
        env!("CARGO_PKG_LICENSE"),
    );
}

/// Load manifests into a type system and pick the assembly to work on.
fn load(
    manifests: &[PathBuf],
    assembly: Option<String>,
) -> Result<(TypeSystem, String), LintError> {
    let ts = TypeSystem::load(manifests)?;
    let name = match assembly {
        Some(name) => name,
        None => ts
            .assemblies()
            .first()
            .map(|a| a.name.clone())
            .ok_or_else(|| LintError::Parse {
                message: "no assembly manifests given".to_string(),
            })?,
    };
    Ok((ts, name))
}

/// Directory a manifest argument lives in, for config discovery.
fn manifest_dir(path: &Path) -> Option<PathBuf> {
    let file = resolve_manifest(path).ok()?;
    file.parent().map(Path::to_path_buf)
}

/// Print `value` as pretty JSON on stdout.
fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("awslint: cannot serialize output: {e}");
            std::process::exit(1);
        }
    }
}
