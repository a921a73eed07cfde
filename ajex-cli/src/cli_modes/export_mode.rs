use super::CliModeResult;
use crate::{cli::Cli, render::Renderer};
use ajex_core::{
    Collection, Config,
    export::{export_archive, export_full},
};
use anyhow::Result;

pub fn export_mode(
    cli: &Cli,
    renderer: &Renderer,
    config: &Config,
    collection: &Collection,
) -> Result<CliModeResult> {
    if !cli.full && !cli.zip {
        return Ok(CliModeResult::NothingToDo);
    }

    let dir = cli.out.as_deref().unwrap_or(&config.output_dir);
    if cli.full {
        let path = export_full(collection, dir)?;
        renderer.print_info(&format!(
            "Exported {} entries to {}",
            collection.stats.entries,
            path.display()
        ));
    }
    if cli.zip {
        let path = export_archive(collection, dir)?;
        renderer.print_info(&format!("Created archive {}", path.display()));
    }
    Ok(CliModeResult::Finish)
}
