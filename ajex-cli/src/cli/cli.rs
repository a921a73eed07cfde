use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::render::ColorMode;

/// ajex: read, summarize and export an Apple Journal export folder
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("read_mode").args(["timeline", "moods"]).multiple(true)),
    group(ArgGroup::new("export_mode").args(["full", "zip"]).multiple(true)),
    group(ArgGroup::new("chat_mode").args(["chat"]).conflicts_with_all(["read_mode", "export_mode"])),
)]
pub struct Cli {
    /// The export folder (`AppleJournalEntries`, or its `Entries` subfolder).
    /// Defaults to `export_dir` from the config file.
    #[arg(env = "AJEX_EXPORT_DIR")]
    pub path: Option<PathBuf>,

    /// Lists entries, newest first.
    #[arg(long, short)]
    pub timeline: bool,
    /// Only list entries of this year (e.g. `ajex --timeline --year 2024`).
    #[arg(long, requires = "timeline", value_parser = parse_year)]
    pub year: Option<String>,
    /// Shows how often each mood was logged.
    #[arg(long, short)]
    pub moods: bool,
    /// Only shows the date, title and mood of each entry.
    #[arg(long, short)]
    pub short: bool,

    /// Writes every entry to `journal_full.md`.
    #[arg(long)]
    pub full: bool,
    /// Writes `apple-journal-export.zip` with the full journal, one file per year and stats.
    #[arg(long)]
    pub zip: bool,
    /// Directory for exported files. Defaults to `output_dir` from the config file.
    #[arg(long, short, requires = "export_mode")]
    pub out: Option<PathBuf>,

    /// Starts an interactive chat about your journal with the assistant.
    #[arg(long)]
    pub chat: bool,

    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

fn parse_year(s: &str) -> Result<String, String> {
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        Ok(s.to_string())
    } else {
        Err(format!("'{s}' is not a four-digit year"))
    }
}
