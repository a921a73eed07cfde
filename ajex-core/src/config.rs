use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::assistant::DEFAULT_CONTEXT_BUDGET;

#[derive(Debug, Clone)]
pub struct Config {
    /// Export folder read when no path is given on the command line.
    pub export_dir: PathBuf,
    /// Where `journal_full.md` and the zip archive are written.
    pub output_dir: PathBuf,
    /// chrono format used to show entry dates in the terminal. Exports always use `YYYY-MM-DD`.
    pub date_format: String,
    /// Characters of journal text handed to the assistant.
    pub context_budget: usize,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantConfig {
    pub model: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub max_tokens: u32,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: "claude-3-5-sonnet-20240620".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            max_tokens: 1024,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    export_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    date_format: Option<String>,
    context_budget: Option<usize>,
    /// Optional table:
    /// [assistant]
    /// model = "claude-3-5-sonnet-20240620"
    /// api_key_env = "ANTHROPIC_API_KEY"
    assistant: Option<FileAssistantConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct FileAssistantConfig {
    model: Option<String>,
    api_key_env: Option<String>,
    max_tokens: Option<u32>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    /// An unreadable or invalid file is reported and ignored.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            warn!("ignoring config file: {e:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let defaults = AssistantConfig::default();
        let assistant = file_config.assistant.unwrap_or_default();

        Self {
            export_dir: file_config
                .export_dir
                .map(|p| expand_home(&p))
                .unwrap_or_else(Self::default_export_dir),
            output_dir: file_config
                .output_dir
                .map(|p| expand_home(&p))
                .unwrap_or_else(|| PathBuf::from("output")),
            date_format: file_config
                .date_format
                .unwrap_or_else(|| "%A, %d %b %Y".to_string()),
            context_budget: file_config
                .context_budget
                .unwrap_or(DEFAULT_CONTEXT_BUDGET),
            assistant: AssistantConfig {
                model: assistant.model.unwrap_or(defaults.model),
                api_key_env: assistant.api_key_env.unwrap_or(defaults.api_key_env),
                max_tokens: assistant.max_tokens.unwrap_or(defaults.max_tokens),
            },
        }
    }

    /// Where the Journal app's export lands by default: `~/Documents/AppleJournalEntries`.
    fn default_export_dir() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            base.home_dir()
                .join("Documents")
                .join("AppleJournalEntries")
        } else {
            PathBuf::from("./AppleJournalEntries")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("ajex").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("ajex").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}

/// `~/x` → `{home}/x`. Other paths are returned unchanged.
fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), BaseDirs::new()) {
        (Ok(rest), Some(base)) => base.home_dir().join(rest),
        _ => path.to_path_buf(),
    }
}
