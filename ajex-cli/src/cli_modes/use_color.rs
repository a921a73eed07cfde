use std::io::{self, IsTerminal};

use crate::cli::Cli;

pub fn use_color(cli: &Cli) -> bool {
    cli.color.enabled(
        std::env::var_os("NO_COLOR").is_some(),
        io::stdout().is_terminal(),
    )
}
