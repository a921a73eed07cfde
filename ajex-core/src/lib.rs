pub mod assistant;
pub mod collection;
pub mod config;
pub mod entry;
pub mod export;
pub mod parse_entry;
pub mod resources;
pub mod session;
pub mod sources;
pub mod stats;

#[cfg(test)]
mod tests;

pub use collection::{BuildResult, Collection, SourceError, Stats};
pub use config::Config;
pub use entry::Entry;
pub use session::Session;
