use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use snowgen::batch;
use snowgen::cli::{Cli, Command};
use snowgen::config::Config;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("snowgen starting");

    match cli.command {
        None => cmd_batch(&config.config_dir, &config.output_dir),
        Some(Command::Batch { config_dir, output_dir }) => cmd_batch(
            config_dir.as_deref().unwrap_or(config.config_dir.as_path()),
            output_dir.as_deref().unwrap_or(config.output_dir.as_path()),
        ),
        Some(Command::Init { path, force }) => cmd_init(&config, &path, force),
        Some(Command::Brand {
            config_file,
            output_dir,
        }) => cmd_brand(&config, &config_file, output_dir),
    }
}

fn cmd_batch(config_dir: &Path, output_dir: &Path) -> Result<()> {
    let report = batch::run(config_dir, output_dir).context(format!(
        "Failed to generate projects from {} into {}",
        config_dir.display(),
        output_dir.display()
    ))?;

    if report.total() == 0 {
        println!("No brand configs found in {}", config_dir.display());
        return Ok(());
    }

    for brand in &report.succeeded {
        println!("{} {}", "✓".green(), brand.cyan());
    }
    for (file_name, reason) in &report.failed {
        println!("{} {} {}", "✗".red(), file_name.yellow(), reason.dimmed());
    }
    let summary = format!(
        "Generated {} of {} brand projects in {}",
        report.succeeded.len(),
        report.total(),
        output_dir.display()
    );
    if report.all_succeeded() {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }

    Ok(())
}

fn cmd_init(config: &Config, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(eyre::eyre!(
            "Settings file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    config
        .save(path)
        .context(format!("Failed to write settings to {}", path.display()))?;
    println!("{} Wrote settings to {}", "✓".green(), path.display().to_string().cyan());
    Ok(())
}

fn cmd_brand(config: &Config, config_file: &Path, output_dir: Option<PathBuf>) -> Result<()> {
    let output_dir = match output_dir {
        Some(dir) => dir,
        None => {
            let stem = config_file
                .file_stem()
                .ok_or_else(|| eyre::eyre!("Config path has no file name: {}", config_file.display()))?;
            config.output_dir.join(stem)
        }
    };

    let generated = batch::process_brand(config_file, &output_dir)
        .context(format!("Failed to process {}", config_file.display()))?;

    println!("{} {}", "✓".green(), generated.project_path.display().to_string().cyan());
    println!("{} {}", "✓".green(), generated.packages_path.display().to_string().cyan());
    Ok(())
}
