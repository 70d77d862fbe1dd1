//! # CLI Layer
//!
//! One possible client for certz. This is the only place that parses arguments,
//! writes to stdout/stderr, or writes downloaded certificates to disk.
//!
//! - `run()`: parses arguments, sets up logging and dispatches
//! - `handle_*()`: per-command handlers that call the API and print the result

use super::render::{print_config, print_entries, print_messages, print_record, print_status};
use super::setup::{Cli, Commands};
use certz::api::{self, ConfigAction};
use certz::error::Result;
use certz::init::{initialize, CertzContext};
use certz::resolver::Certificate;
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let ctx = initialize(cli.config_dir.clone(), &cli.overrides())?;

    match cli.command {
        Commands::Lookup { id, json } => handle_lookup(&ctx, &id, json),
        Commands::Download { id, output } => handle_download(&ctx, &id, &output),
        Commands::Manifest {
            filter,
            ignore_case,
        } => handle_manifest(&ctx, filter.as_deref(), ignore_case),
        Commands::Status => handle_status(&ctx),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
        Commands::Init => handle_init(&ctx),
    }
}

/// Logs go to stderr so stdout stays clean for output and `--json`.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // Keep an already installed subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn handle_lookup(ctx: &CertzContext, id: &str, json: bool) -> Result<()> {
    let result = ctx.api()?.lookup(id)?;
    if json {
        for record in &result.records {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        return Ok(());
    }
    for record in &result.records {
        print_record(record);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_download(ctx: &CertzContext, id: &str, output: &Path) -> Result<()> {
    let result = ctx.api()?.certificate(id)?;
    if let Some(certificate) = &result.certificate {
        let path = write_certificate(output, certificate)?;
        println!(
            "{} {} ({}, {} bytes)",
            "Saved".green(),
            path.display(),
            certificate.mimetype,
            certificate.bytes.len()
        );
    }
    print_messages(&result.messages);
    Ok(())
}

fn write_certificate(dir: &Path, certificate: &Certificate) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&certificate.filename);
    fs::write(&path, &certificate.bytes)?;
    Ok(path)
}

fn handle_manifest(ctx: &CertzContext, filter: Option<&str>, ignore_case: bool) -> Result<()> {
    // The manifest needs only the archive, not the roster
    let archive = ctx.config.archive_path.as_deref();
    let result = api::manifest(archive, filter, ignore_case)?;
    print_entries(&result.entries);
    print_messages(&result.messages);
    Ok(())
}

fn handle_status(ctx: &CertzContext) -> Result<()> {
    let result = ctx.api()?.status()?;
    if let Some(status) = &result.status {
        print_status(status);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &CertzContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let show_all = matches!(action, ConfigAction::ShowAll);
    let result = api::config(ctx.config_dir(), action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &CertzContext) -> Result<()> {
    let result = api::init(ctx.config_dir())?;
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_certificate_creates_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("out");
        let certificate = Certificate {
            entry_name: "cert_42.png".to_string(),
            bytes: b"\x89PNG".to_vec(),
            filename: "OJT_Certificate_Jane_Doe_42.png".to_string(),
            mimetype: "image/png",
        };

        let path = write_certificate(&dir, &certificate).unwrap();
        assert_eq!(path, dir.join("OJT_Certificate_Jane_Doe_42.png"));
        assert_eq!(fs::read(path).unwrap(), b"\x89PNG");
    }
}
