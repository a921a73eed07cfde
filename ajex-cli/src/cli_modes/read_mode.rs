use super::CliModeResult;
use crate::{cli::Cli, render::Renderer};
use ajex_core::{Collection, resources::DirResolver};
use anyhow::Result;
use std::path::Path;

pub fn timeline_mode(
    cli: &Cli,
    renderer: &Renderer,
    collection: &Collection,
    root: &Path,
) -> Result<CliModeResult> {
    if !cli.timeline {
        return Ok(CliModeResult::NothingToDo);
    }

    let entries = match &cli.year {
        Some(year) => collection.year(year),
        None => collection.entries.as_slice(),
    };
    if entries.is_empty() {
        let year = cli.year.as_deref().unwrap_or_default();
        renderer.print_info(&format!("No entries found for {year}."));
        return Ok(CliModeResult::Finish);
    }

    let resolver = DirResolver::scan(root)?;
    renderer.print_info(&format!("{} entries found.", entries.len()));
    renderer.print_timeline(entries, &resolver);
    Ok(CliModeResult::Finish)
}

pub fn moods_mode(cli: &Cli, renderer: &Renderer, collection: &Collection) -> Result<CliModeResult> {
    if !cli.moods {
        return Ok(CliModeResult::NothingToDo);
    }

    let counts = collection.mood_counts();
    if counts.is_empty() {
        renderer.print_info("No moods were logged.");
    } else {
        renderer.print_info(&format!("{} different moods logged.", counts.len()));
        renderer.print_moods(&counts);
    }
    Ok(CliModeResult::Finish)
}

pub fn summary_mode(renderer: &Renderer, collection: &Collection) -> Result<CliModeResult> {
    renderer.print_summary(collection);
    Ok(CliModeResult::Finish)
}
