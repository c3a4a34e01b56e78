use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use catering_portions_rs::catalog::{
    load_calculate_request, load_check_request, load_reference, ReferenceData,
};
use catering_portions_rs::cli::{Cli, Command};
use catering_portions_rs::error::Result;
use catering_portions_rs::interface::{
    collect_request, display_calculation, display_catalog, display_check, export_csv,
    prompt_yes_no,
};
use catering_portions_rs::planner::{calculate_request, check_request, EngineConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let reference = match &cli.reference {
        Some(path) => load_reference(path)?,
        None => ReferenceData::standard()?,
    };
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    info!(dishes = reference.len(), "reference data loaded");

    match cli.command.unwrap_or_default() {
        Command::Calculate {
            request,
            template,
            json,
            csv,
        } => cmd_calculate(&reference, &config, &request, template.as_deref(), json, csv),
        Command::Check { request, json } => cmd_check(&reference, &config, &request, json),
        Command::Build => cmd_build(&reference, &config),
        Command::Catalog => {
            display_catalog(&reference);
            Ok(())
        }
    }
}

/// Calculate portions for a request file.
fn cmd_calculate(
    reference: &ReferenceData,
    config: &EngineConfig,
    path: &Path,
    template: Option<&str>,
    json: bool,
    csv: Option<PathBuf>,
) -> Result<()> {
    let mut request = load_calculate_request(path)?;
    if let Some(name) = template {
        request.dish_ids = reference.template_menu(name)?;
    }

    let result = calculate_request(&request, reference, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_calculation(&result);
    }

    if let Some(out) = csv {
        export_csv(&result, &out)?;
        info!(path = %out.display(), "portions exported");
    }

    Ok(())
}

/// Check caller portions from a request file.
fn cmd_check(reference: &ReferenceData, config: &EngineConfig, path: &Path, json: bool) -> Result<()> {
    let request = load_check_request(path)?;
    let result = check_request(&request, reference, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        display_check(&result);
    }

    Ok(())
}

/// Build a menu interactively and show its portions.
fn cmd_build(reference: &ReferenceData, config: &EngineConfig) -> Result<()> {
    if reference.is_empty() {
        println!("The reference data has no dishes.");
        return Ok(());
    }

    let request = collect_request(reference)?;
    if request.dish_ids.is_empty() {
        println!("No dishes selected.");
        return Ok(());
    }

    let result = calculate_request(&request, reference, config)?;
    display_calculation(&result);

    if prompt_yes_no("Save this request as JSON?", false)? {
        let path = PathBuf::from("portion_request.json");
        std::fs::write(&path, serde_json::to_string_pretty(&request)?)?;
        println!("Request saved to {}", path.display());
    }

    Ok(())
}
