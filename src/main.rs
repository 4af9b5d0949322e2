//! Groundwork CLI - deployment bootstrap tool
//!
//! Usage: groundwork <COMMAND>
//!
//! Commands:
//!   run        Install dependencies, then provision persistent-disk directories
//!   install    Install dependencies only
//!   provision  Provision persistent-disk directories only
//!   check      Validate the bootstrap environment without mutating it

mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use groundwork::bootstrap::{run_bootstrap, BootstrapOptions, BootstrapReport};
use groundwork::check::{run_preflight, CheckStatus};
use groundwork::config::{Config, ConfigWarning};
use groundwork::error::GroundworkError;
use groundwork::installer::{command_line, install_dependencies};
use groundwork::provision::{ensure_directory, DirOutcome};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let json = cli.json;

    let result = dispatch(cli);

    // In JSON mode the orchestrator gets a machine-readable failure event
    // alongside the non-zero exit; the error itself still goes to stderr.
    if json {
        if let Err(err) = &result {
            if let Some(err) = err.downcast_ref::<GroundworkError>() {
                let event = serde_json::json!({
                    "event": "error",
                    "class": err.class().to_string(),
                    "message": err.to_string(),
                });
                println!("{}", serde_json::to_string(&event)?);
            }
        }
    }

    result
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run {
            config,
            manifest,
            mount,
            dry_run,
        } => cmd_run(
            config.as_deref(),
            manifest,
            mount,
            dry_run,
            cli.json,
            cli.verbose,
        ),
        Commands::Install {
            config,
            manifest,
            dry_run,
        } => cmd_install(config.as_deref(), manifest, dry_run, cli.json, cli.verbose),
        Commands::Provision {
            config,
            mount,
            dry_run,
        } => cmd_provision(config.as_deref(), mount, dry_run, cli.json),
        Commands::Check {
            config,
            strict_warnings,
        } => cmd_check(config.as_deref(), strict_warnings, cli.json),
    }
}

/// Load config per the hierarchy, echoing non-fatal warnings.
fn load_config(config_path: Option<&Path>, json: bool) -> Result<Config> {
    let (config, warnings) = match config_path {
        Some(path) => {
            let (config, warnings) = Config::load_with_warnings(path)?;
            (config.with_env_overrides(), warnings)
        }
        None => {
            let cwd = std::env::current_dir()?;
            (Config::load_or_default(Some(&cwd)), Vec::new())
        }
    };

    if !json {
        print_config_warnings(&warnings);
    }

    Ok(config)
}

fn print_config_warnings(warnings: &[ConfigWarning]) {
    for warning in warnings {
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        println!("⚠ Unknown config key '{}' in {}", warning.key, location);
        if let Some(suggestion) = &warning.suggestion {
            println!("  ↳ did you mean '{}'?", suggestion);
        }
    }
}

fn cmd_run(
    config_path: Option<&Path>,
    manifest: Option<PathBuf>,
    mount: Option<PathBuf>,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let mut config = load_config(config_path, json)?;
    if let Some(manifest) = manifest {
        config.installer.manifest = manifest;
    }
    if let Some(mount) = mount {
        config.disk.mount = mount;
    }

    if !json {
        println!("🚀 Groundwork Bootstrap");
        println!("Manifest: {}", config.installer.manifest.display());
        println!("Mount: {}", config.disk.mount.display());
        if dry_run {
            println!("Mode: Dry run");
        }
        if verbose > 0 {
            println!("Installer: {}", command_line(&config.installer));
            for dir in config.target_directories() {
                println!("Target: {}", dir.display());
            }
        }
        println!();
    }

    let report = run_bootstrap(&config, &BootstrapOptions { dry_run })?;

    if json {
        let output = serde_json::json!({
            "event": "bootstrap",
            "status": "success",
            "dry_run": dry_run,
            "installed": report.installed,
            "created": report.created.len(),
            "existing": report.existing.len(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        print_report(&report, &config, dry_run);
    }

    Ok(())
}

fn print_report(report: &BootstrapReport, config: &Config, dry_run: bool) {
    println!("📊 Bootstrap Results:");
    if report.installed {
        println!(
            "  ✓ Installed dependencies from {}",
            config.installer.manifest.display()
        );
    }
    if !report.created.is_empty() {
        let label = if dry_run { "Would create" } else { "Created" };
        println!("  ✓ {}: {} directories", label, report.created.len());
        for path in &report.created {
            println!("    - {}", path.display());
        }
    }
    if !report.existing.is_empty() {
        println!(
            "  ✓ Existing: {} directories (left untouched)",
            report.existing.len()
        );
        for path in &report.existing {
            println!("    - {}", path.display());
        }
    }
    if dry_run {
        println!("  (dry run - no changes made)");
    } else {
        println!("  ✓ Runtime ready");
    }
    println!();
}

fn cmd_install(
    config_path: Option<&Path>,
    manifest: Option<PathBuf>,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let mut config = load_config(config_path, json)?;
    if let Some(manifest) = manifest {
        config.installer.manifest = manifest;
    }

    if !json {
        println!("📦 Groundwork Install");
        println!("Manifest: {}", config.installer.manifest.display());
        if dry_run {
            println!("Mode: Dry run");
        }
        if verbose > 0 {
            println!("Installer: {}", command_line(&config.installer));
        }
        println!();
    }

    install_dependencies(&config.installer, dry_run)?;

    if json {
        let output = serde_json::json!({
            "event": "install",
            "status": "success",
            "dry_run": dry_run,
            "manifest": config.installer.manifest.display().to_string(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else if dry_run {
        println!("✓ Manifest present (dry run - installer not invoked)");
    } else {
        println!("✓ Dependencies installed");
    }

    Ok(())
}

fn cmd_provision(
    config_path: Option<&Path>,
    mount: Option<PathBuf>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config_path, json)?;
    if let Some(mount) = mount {
        config.disk.mount = mount;
    }

    if !json {
        println!("📁 Groundwork Provision");
        println!("Mount: {}", config.disk.mount.display());
        if dry_run {
            println!("Mode: Dry run");
        }
        println!();
    }

    let mut created = Vec::new();
    let mut existing = Vec::new();
    for dir in config.target_directories() {
        match ensure_directory(&dir, dry_run)? {
            DirOutcome::Created => created.push(dir),
            DirOutcome::Existing => existing.push(dir),
        }
    }

    if json {
        let output = serde_json::json!({
            "event": "provision",
            "status": "success",
            "dry_run": dry_run,
            "created": created.len(),
            "existing": existing.len(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let label = if dry_run { "Would create" } else { "Created" };
        for path in &created {
            println!("  + {}: {}", label, path.display());
        }
        for path in &existing {
            println!("  = Exists: {}", path.display());
        }
        println!();
        println!(
            "Summary: {} created, {} existing",
            created.len(),
            existing.len()
        );
    }

    Ok(())
}

fn cmd_check(config_path: Option<&Path>, strict_warnings: bool, json: bool) -> Result<()> {
    let config = load_config(config_path, json)?;

    if !json {
        println!("🩺 Groundwork Check");
        println!("Manifest: {}", config.installer.manifest.display());
        println!("Mount: {}", config.disk.mount.display());
        if strict_warnings {
            println!("Strict: failing on warnings");
        }
        println!();
    }

    let report = run_preflight(&config);

    let has_issues = if strict_warnings {
        report.errors() > 0 || report.warnings() > 0
    } else {
        report.errors() > 0
    };

    if json {
        let output = serde_json::json!({
            "event": "check",
            "passes": report.passes(),
            "warnings": report.warnings(),
            "errors": report.errors(),
            "success": !has_issues,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        for check in &report.checks {
            let icon = match check.status {
                CheckStatus::Pass => "✓",
                CheckStatus::Warning => "⚠",
                CheckStatus::Error => "✗",
            };
            println!("{} [{}] {}", icon, check.name, check.message);
            if let Some(rec) = &check.recommendation {
                println!("  ↳ {}", rec);
            }
        }

        println!();
        println!(
            "Summary: {} passed, {} warnings, {} errors",
            report.passes(),
            report.warnings(),
            report.errors()
        );
    }

    if has_issues {
        if !json {
            println!();
            println!("🔴 Check FAILED - environment is not ready to bootstrap");
        }
        std::process::exit(1);
    } else if !json {
        println!();
        println!("🟢 Check PASSED");
    }

    Ok(())
}
