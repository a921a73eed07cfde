//! [`Assistant`] backed by the Anthropic Messages API, streamed over server-sent events.

use ajex_core::assistant::{Assistant, AssistantError, ChatRequest, Snapshot, SnapshotStream};
use ajex_core::config::AssistantConfig;
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use std::io::{BufRead, BufReader};
use std::time::Duration;

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicAssistant {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicAssistant {
    /// Fails with [`AssistantError::Unavailable`] when the configured key variable is unset.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AssistantError::Unavailable(format!(
                    "set {} to chat about your journal",
                    config.api_key_env
                ))
            })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| AssistantError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

impl Assistant for AnthropicAssistant {
    fn stream<'a>(&'a self, request: &ChatRequest<'_>) -> Result<SnapshotStream<'a>, AssistantError> {
        let messages: Vec<_> = request
            .messages
            .iter()
            .map(|m| json!({ "role": m.role.as_ref(), "content": m.text }))
            .collect();
        let body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "system": request.system,
            "messages": messages,
            "stream": true,
        });

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .map_err(|e| AssistantError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(AssistantError::Request(format!("{status}: {detail}")));
        }
        Ok(Box::new(SseSnapshots::new(BufReader::new(response))))
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamEvent {
    ContentBlockDelta { delta: Delta },
    MessageStop,
    Error { error: ApiError },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Delta {
    TextDelta { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Turns an event stream into growing snapshots of the response text.
struct SseSnapshots<R> {
    reader: R,
    text: String,
    done: bool,
}

impl<R: BufRead> SseSnapshots<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            text: String::new(),
            done: false,
        }
    }

    fn fail(&mut self, error: AssistantError) -> Option<Snapshot> {
        self.done = true;
        Some(Err(error))
    }
}

impl<R: BufRead> Iterator for SseSnapshots<R> {
    type Item = Snapshot;

    fn next(&mut self) -> Option<Snapshot> {
        let mut line = String::new();
        while !self.done {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => self.done = true,
                Ok(_) => {}
                Err(e) => return self.fail(AssistantError::Stream(e.to_string())),
            }
            let Some(data) = line.trim_end().strip_prefix("data:") else {
                continue;
            };
            match serde_json::from_str::<StreamEvent>(data.trim()) {
                Ok(StreamEvent::ContentBlockDelta {
                    delta: Delta::TextDelta { text },
                }) => {
                    self.text.push_str(&text);
                    return Some(Ok(self.text.clone()));
                }
                Ok(StreamEvent::MessageStop) => self.done = true,
                Ok(StreamEvent::Error { error }) => {
                    return self.fail(AssistantError::Stream(error.message));
                }
                Ok(_) => {}
                Err(e) => return self.fail(AssistantError::Stream(format!("bad event: {e}"))),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn snapshots(body: &str) -> Vec<Snapshot> {
        SseSnapshots::new(Cursor::new(body.as_bytes().to_vec())).collect()
    }

    #[test]
    fn text_deltas_become_growing_snapshots() {
        let body = "event: message_start\n\
data: {\"type\":\"message_start\",\"message\":{\"id\":\"msg_1\"}}\n\
\n\
event: content_block_delta\n\
data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"You \"}}\n\
\n\
event: ping\n\
data: {\"type\":\"ping\"}\n\
\n\
event: content_block_delta\n\
data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"seem happy.\"}}\n\
\n\
event: message_stop\n\
data: {\"type\":\"message_stop\"}\n\
\n\
data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"ignored\"}}\n";

        let texts: Vec<String> = snapshots(body).into_iter().map(Result::unwrap).collect();
        assert_eq!(texts, vec!["You ", "You seem happy."]);
    }

    #[test]
    fn error_event_ends_the_stream() {
        let body = "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"Hi\"}}\n\
data: {\"type\":\"error\",\"error\":{\"type\":\"overloaded_error\",\"message\":\"Overloaded\"}}\n\
data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"more\"}}\n";

        let items = snapshots(body);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].as_deref().unwrap(), "Hi");
        assert!(matches!(&items[1], Err(AssistantError::Stream(m)) if m == "Overloaded"));
    }

    #[test]
    fn malformed_event_is_a_stream_error() {
        let items = snapshots("data: {not json\n");
        assert_eq!(items.len(), 1);
        assert!(items[0].is_err());
    }

    #[test]
    fn unterminated_stream_just_ends() {
        let body = "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"input_json_delta\",\"partial_json\":\"{}\"}}\n";
        assert!(snapshots(body).is_empty());
    }

    #[test]
    fn missing_key_means_unavailable() {
        let config = AssistantConfig {
            api_key_env: "AJEX_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };
        let err = AnthropicAssistant::from_config(&config).err().unwrap();
        assert!(matches!(err, AssistantError::Unavailable(_)));
        assert!(err.to_string().contains("AJEX_TEST_KEY_THAT_IS_NEVER_SET"));
    }
}
