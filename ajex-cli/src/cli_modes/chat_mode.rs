use super::CliModeResult;
use crate::{assistant::AnthropicAssistant, cli::Cli, render::Renderer};
use ajex_core::{
    Config, Session,
    assistant::{Conversation, Role, build_context, system_prompt},
};
use anyhow::Result;
use std::io::{self, BufRead, Write};

#[derive(Debug, PartialEq, Eq)]
enum ChatCommand<'a> {
    Skip,
    Quit,
    Reset,
    Reload,
    Ask(&'a str),
}

impl<'a> ChatCommand<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => ChatCommand::Skip,
            "/quit" | "/exit" => ChatCommand::Quit,
            "/reset" => ChatCommand::Reset,
            "/reload" => ChatCommand::Reload,
            prompt => ChatCommand::Ask(prompt),
        }
    }
}

/// Tracks what has been written for the current answer so each snapshot only prints what's new.
#[derive(Default)]
struct SnapshotPrinter {
    printed: String,
}

impl SnapshotPrinter {
    /// Text to print for `snapshot`. A snapshot that doesn't extend the previous one starts over
    /// on a new line.
    fn next_chunk(&mut self, snapshot: &str) -> String {
        let chunk = match snapshot.strip_prefix(self.printed.as_str()) {
            Some(rest) => rest.to_string(),
            None => format!("\n{snapshot}"),
        };
        self.printed = snapshot.to_string();
        chunk
    }
}

pub fn chat_mode(
    cli: &Cli,
    renderer: &Renderer,
    config: &Config,
    session: &mut Session,
) -> Result<CliModeResult> {
    if !cli.chat {
        return Ok(CliModeResult::NothingToDo);
    }

    let assistant = match AnthropicAssistant::from_config(&config.assistant) {
        Ok(assistant) => assistant,
        Err(e) => {
            renderer.print_error(&format!("Assistant unavailable: {e}"));
            return Ok(CliModeResult::Finish);
        }
    };

    renderer.print_info("Ask anything about your journal. /reset, /reload, /quit");
    let mut conversation = Conversation::new();
    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match ChatCommand::parse(&line) {
            ChatCommand::Skip => {}
            ChatCommand::Quit => break,
            ChatCommand::Reset => {
                conversation.reset();
                renderer.print_info("Conversation cleared.");
            }
            ChatCommand::Reload => reload(renderer, session),
            ChatCommand::Ask(prompt) => {
                let Some(collection) = session.current() else {
                    renderer.print_error("No journal is loaded. Try /reload.");
                    continue;
                };
                let context = build_context(&collection.entries, config.context_budget);
                let system = system_prompt(&context);

                let mut printer = SnapshotPrinter::default();
                let reply = conversation.ask(&assistant, &system, prompt, |snapshot| {
                    renderer.print_chunk(&printer.next_chunk(snapshot));
                });
                if !printer.printed.is_empty() {
                    println!();
                }
                if reply.role == Role::Error {
                    renderer.print_error(&reply.text);
                }
            }
        }
    }
    Ok(CliModeResult::Finish)
}

/// Rebuilds the collection from disk. A failed reload is reported and the previous collection
/// stays in use.
fn reload(renderer: &Renderer, session: &mut Session) {
    match session.reload() {
        Ok(report) => {
            renderer.print_source_errors(&report.errors);
            match session.current() {
                Some(collection) => renderer.print_info(&format!(
                    "Reloaded {} entries.",
                    collection.stats.entries
                )),
                None => renderer.print_info("No journal entries found after reloading."),
            }
        }
        Err(e) => renderer.print_error(&format!("Could not reload: {e:#}")),
    }
}
