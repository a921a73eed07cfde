//! The boundary to a text-generation assistant that answers questions about the journal.
//!
//! The assistant itself is external. This module builds what it is given (a system prompt
//! carrying a bounded excerpt of the journal) and keeps the conversation transcript. Responses
//! arrive as a stream of *snapshots*: each item is the full response text so far, superseding
//! the previous one, so a consumer only ever needs the latest item.

use crate::entry::Entry;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;

/// Characters of journal text handed to the assistant at most.
pub const DEFAULT_CONTEXT_BUDGET: usize = 12_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    /// A failed request, shown in the transcript but never sent back to the assistant.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

impl Message {
    fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// What one request hands to the assistant.
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    /// User and assistant turns, oldest first, ending with the new prompt.
    pub messages: Vec<&'a Message>,
}

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant unavailable: {0}")]
    Unavailable(String),
    #[error("assistant request failed: {0}")]
    Request(String),
    #[error("assistant response interrupted: {0}")]
    Stream(String),
}

pub type Snapshot = Result<String, AssistantError>;

/// Growing snapshots of one response. Dropping the stream abandons the response.
pub type SnapshotStream<'a> = Box<dyn Iterator<Item = Snapshot> + 'a>;

pub trait Assistant {
    fn stream<'a>(&'a self, request: &ChatRequest<'_>) -> Result<SnapshotStream<'a>, AssistantError>;
}

/// Renders entries newest first as `Date / Mood / Content` blocks, stopping before the first
/// block that would push the text past `budget` characters.
pub fn build_context(entries: &[Entry], budget: usize) -> String {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut context = String::new();
    let mut used = 0;
    for entry in sorted {
        let block = context_block(entry);
        let len = block.chars().count();
        if used + len > budget {
            break;
        }
        context.push_str(&block);
        used += len;
    }
    context
}

fn context_block(entry: &Entry) -> String {
    let mut block = format!("Date: {}\n", entry.date);
    if let Some(mood) = &entry.mood {
        match &entry.mood_context {
            Some(context) => block.push_str(&format!("Mood: {mood} ({context})\n")),
            None => block.push_str(&format!("Mood: {mood}\n")),
        }
    }
    block.push_str(&format!("Content: {}\n\n", entry.content));
    block
}

pub fn system_prompt(context: &str) -> String {
    format!(
        "You are a helpful, private journal assistant.\n\
         Analyze the following journal entries to answer the user's questions.\n\
         Be empathetic and insightful.\n\
         Keep answers concise.\n\
         \n\
         Journal Entries Context:\n\
         {context}"
    )
}

/// The transcript of one chat session.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Sends `prompt` with the earlier turns and records the answer.
    ///
    /// `on_snapshot` sees every snapshot as it arrives. The final snapshot becomes one
    /// assistant message. If the request or the stream fails, a single [`Role::Error`]
    /// message is recorded instead and earlier messages stay as they were.
    pub fn ask<A: Assistant + ?Sized>(
        &mut self,
        assistant: &A,
        system: &str,
        prompt: &str,
        mut on_snapshot: impl FnMut(&str),
    ) -> &Message {
        self.messages.push(Message::new(Role::User, prompt));

        let reply = {
            let request = ChatRequest {
                system,
                messages: self.history(),
            };
            match assistant.stream(&request) {
                Ok(stream) => {
                    let mut latest = String::new();
                    let mut failure = None;
                    for snapshot in stream {
                        match snapshot {
                            Ok(text) => {
                                latest = text;
                                on_snapshot(&latest);
                            }
                            Err(e) => {
                                failure = Some(e);
                                break;
                            }
                        }
                    }
                    match failure {
                        Some(e) => Message::new(Role::Error, e.to_string()),
                        None => Message::new(Role::Assistant, latest),
                    }
                }
                Err(e) => Message::new(Role::Error, e.to_string()),
            }
        };

        self.messages.push(reply);
        &self.messages[self.messages.len() - 1]
    }

    /// Turns worth resending: errors are dropped along with the prompt that caused them.
    fn history(&self) -> Vec<&Message> {
        self.messages
            .iter()
            .enumerate()
            .filter(|(i, m)| match m.role {
                Role::Error => false,
                Role::Assistant => true,
                Role::User => self
                    .messages
                    .get(i + 1)
                    .is_none_or(|next| next.role != Role::Error),
            })
            .map(|(_, m)| m)
            .collect()
    }
}
