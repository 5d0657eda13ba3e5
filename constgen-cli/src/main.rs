//! # constgen
//!
//! Generate C# constants classes for a Unity project's tags, layers, build
//! scenes and resource paths.
//!
//! ## Usage
//!
//! ```bash
//! # Generate into Assets/scripts/auto-generated
//! constgen generate --project ./MyGame
//!
//! # Preview without writing
//! constgen generate --dry-run
//!
//! # Regenerate whenever the project changes
//! constgen generate --watch
//!
//! # Write a default constgen.toml
//! constgen init
//!
//! # Fail (exit code 2) when generated files are out of date
//! constgen check
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use constgen::{ConstantsGenerator, GenerationReport, HostError};
use constgen_cli::{
    check::stale_files,
    config::{CONFIG_FILENAME, CliArgs, Config, ConfigManager, write_default_config},
    error::CliError,
    logging,
    unity::UnityProject,
    watcher::FileWatcher,
    writer::{FileWriter, WriteResult},
};

#[derive(Parser)]
#[command(name = "constgen")]
#[command(author, version, about = "Generate C# constants for Unity tags, layers, scenes and resources", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by CONSTGEN_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every constants class
    Generate {
        /// Unity project root
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Asset directory, relative to the project root
        #[arg(long)]
        assets_dir: Option<PathBuf>,

        /// Output directory, relative to the asset directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Namespace of the generated classes
        #[arg(short, long)]
        namespace: Option<String>,

        /// Only include scenes enabled in the build settings
        #[arg(long)]
        enabled_scenes_only: bool,

        /// Watch the project and regenerate on changes
        #[arg(short, long)]
        watch: bool,

        /// Preview output without writing files
        #[arg(long)]
        dry_run: bool,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a new constgen configuration file
    Init {
        /// Output path for configuration file
        #[arg(short, long, default_value = CONFIG_FILENAME)]
        output: PathBuf,

        /// Overwrite existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Check that generated files are up-to-date
    Check {
        /// Unity project root
        #[arg(short, long, default_value = ".")]
        project: PathBuf,

        /// Asset directory, relative to the project root
        #[arg(long)]
        assets_dir: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Generate {
            project,
            assets_dir,
            output,
            namespace,
            enabled_scenes_only,
            watch,
            dry_run,
            config,
        } => {
            let args = CliArgs {
                output,
                namespace,
                assets_dir,
                enabled_scenes_only: enabled_scenes_only.then_some(true),
            };
            cmd_generate(&project, config.as_deref(), &args, watch, dry_run)
        }

        Commands::Init { output, force } => cmd_init(output, force),

        Commands::Check {
            project,
            assets_dir,
            config,
        } => {
            let args = CliArgs {
                assets_dir,
                ..Default::default()
            };
            cmd_check(&project, config.as_deref(), &args)
        }
    }
}

/// Resolve the project root and its configuration.
fn load_project(
    project: &Path,
    config_path: Option<&Path>,
    args: &CliArgs,
) -> Result<(PathBuf, Config), CliError> {
    if !project.is_dir() {
        return Err(HostError::missing(project).into());
    }
    let root = std::fs::canonicalize(project)?;

    let config = ConfigManager::load(config_path, &root)?;
    let config = ConfigManager::merge_cli_args(config, args);
    config.validate()?;

    Ok((root, config))
}

/// Generate command implementation.
fn cmd_generate(
    project: &Path,
    config_path: Option<&Path>,
    args: &CliArgs,
    watch: bool,
    dry_run: bool,
) -> Result<(), CliError> {
    let (root, config) = load_project(project, config_path, args)?;

    if watch {
        run_watch_mode(&root, &config, dry_run)
    } else {
        run_generate(&root, &config, dry_run)
    }
}

/// Run generation once.
fn run_generate(root: &Path, config: &Config, dry_run: bool) -> Result<(), CliError> {
    println!("{}", "Reading project...".cyan());

    let project = UnityProject::from_config(root, config);
    project.verify()?;

    let generator = ConstantsGenerator::new(config.generator_settings());
    let writer = FileWriter::new(dry_run);
    let mut sink = writer.sink(config.output_dir(root));

    let report = generator.run(&project, &mut sink)?;
    let reimported = sink.reimported().len();

    for result in sink.into_results() {
        match result {
            WriteResult::Written { path, bytes } => {
                println!(
                    "{} Written {} bytes to {}",
                    "✓".green(),
                    bytes,
                    path.display()
                );
            }
            WriteResult::Unchanged { path } => {
                println!("{} {} unchanged", "·".dimmed(), path.display());
            }
            WriteResult::DryRun { content, path } => {
                println!(
                    "{} Would write to {}:",
                    "[dry-run]".yellow(),
                    path.display()
                );
                println!("{}", "─".repeat(60).dimmed());
                println!("{}", content);
                println!("{}", "─".repeat(60).dimmed());
            }
        }
    }

    if reimported > 0 {
        println!(
            "  {} file(s) changed; Unity reimports them on its next refresh",
            reimported.to_string().green()
        );
    }

    print_report(&report);

    if report.is_complete() {
        Ok(())
    } else {
        Err(CliError::Incomplete(report.failures.len()))
    }
}

/// Print warnings and per-class failures collected during a run.
fn print_report(report: &GenerationReport) {
    if !report.diagnostics.is_empty() {
        println!(
            "{} {} warning(s):",
            "Warning:".yellow(),
            report.diagnostics.len()
        );
        for diagnostic in &report.diagnostics {
            println!("  [{}] {}", diagnostic.kind(), diagnostic);
        }
    }

    for failure in &report.failures {
        println!(
            "{} {} not generated: {}",
            "✗".red(),
            failure.file_name,
            failure.error
        );
    }
}

/// Run in watch mode.
fn run_watch_mode(root: &Path, config: &Config, dry_run: bool) -> Result<(), CliError> {
    let project = UnityProject::from_config(root, config);

    println!("{}", "Starting watch mode...".cyan());
    println!("  Watching: {}", root.display());
    println!("  Press Ctrl+C to stop\n");

    // Initial generation
    if let Err(e) = run_generate(root, config, dry_run) {
        println!("{} {}", "Generation error:".red(), e);
    }

    let watcher = FileWatcher::new(project.watched_paths()).exclude(config.output_dir(root));
    let (_debouncer, rx) = watcher.watch()?;

    println!("\n{}", "Watching for changes...".cyan());

    while let Ok(event) = rx.recv() {
        if event.is_error() {
            println!(
                "{} {}",
                "Watch error:".red(),
                event.error_message().unwrap_or("Unknown error")
            );
            continue;
        }

        if let Some(path) = event.path() {
            println!("\n{} {}", "File changed:".cyan(), path.display());
        }

        // Drain the rest of this burst so one save triggers one run
        while rx.try_recv().is_ok() {}

        if let Err(e) = run_generate(root, config, dry_run) {
            println!("{} {}", "Generation error:".red(), e);
        }

        println!("\n{}", "Watching for changes...".cyan());
    }

    Ok(())
}

/// Init command implementation.
fn cmd_init(output: PathBuf, force: bool) -> Result<(), CliError> {
    write_default_config(&output, force)?;

    println!(
        "{} Created configuration file: {}",
        "✓".green(),
        output.display()
    );

    Ok(())
}

/// Check command implementation.
fn cmd_check(project: &Path, config_path: Option<&Path>, args: &CliArgs) -> Result<(), CliError> {
    println!("{}", "Checking generated files...".cyan());

    let (root, config) = load_project(project, config_path, args)?;
    let unity = UnityProject::from_config(&root, &config);
    unity.verify()?;

    let report = ConstantsGenerator::new(config.generator_settings()).generate(&unity);
    print_report(&report);
    if !report.is_complete() {
        return Err(CliError::Incomplete(report.failures.len()));
    }

    let stale = stale_files(&report, &config.output_dir(&root));
    if stale.is_empty() {
        println!("{} Constants are up-to-date", "✓".green());
        return Ok(());
    }

    println!("{} Constants are out of date", "✗".red());
    for file in &stale {
        println!("  {}", file);
    }
    println!("  Run 'constgen generate' to update");
    Err(CliError::Validation(format!(
        "{} generated file(s) out of date",
        stale.len()
    )))
}

/// Print an error with formatting.
fn print_error(error: &CliError) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}
