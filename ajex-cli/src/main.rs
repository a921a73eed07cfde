mod assistant;
mod cli;
mod cli_modes;
mod render;

use ajex_core::{Config, Session};
use anyhow::Result;
use clap::Parser;
use cli::Cli;
use cli_modes::{
    CliModeResult, chat_mode, export_mode, moods_mode, summary_mode, timeline_mode, use_color,
};
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ajex: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, filtered by `AJEX_LOG` (e.g. `AJEX_LOG=ajex_core=debug`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("AJEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let renderer = Renderer::new(Some(RenderOptions {
        date_format: config.date_format.clone(),
        use_color: use_color(&cli),
        short_mode: cli.short,
    }));

    let root = cli.path.clone().unwrap_or_else(|| config.export_dir.clone());
    let mut session = Session::new();
    let report = session.load(&root)?;
    renderer.print_source_errors(&report.errors);

    if session.current().is_none() {
        if report.candidates == 0 {
            renderer.print_info(
                "No journal entries found. Make sure you selected the AppleJournalEntries folder.",
            );
        } else {
            renderer.print_info(&format!(
                "Found {} entry files, but none of them contained a journal entry.",
                report.candidates
            ));
        }
        return Ok(());
    }

    if let CliModeResult::Finish = chat_mode(&cli, &renderer, &config, &mut session)? {
        return Ok(());
    }

    let Some(collection) = session.current() else {
        return Ok(());
    };

    if let CliModeResult::Finish = export_mode(&cli, &renderer, &config, collection)? {
        return Ok(());
    }

    let mut read = false;
    if let CliModeResult::Finish = timeline_mode(&cli, &renderer, collection, &root)? {
        read = true;
    }
    if let CliModeResult::Finish = moods_mode(&cli, &renderer, collection)? {
        read = true;
    }
    if read {
        return Ok(());
    }

    summary_mode(&renderer, collection)?;
    Ok(())
}
