mod chat_mode;
mod cli_mode;
mod export_mode;
mod read_mode;
mod use_color;

pub use chat_mode::chat_mode;
pub use cli_mode::CliModeResult;
pub use export_mode::export_mode;
pub use read_mode::{moods_mode, summary_mode, timeline_mode};
pub use use_color::use_color;
