mod anthropic;

pub use anthropic::AnthropicAssistant;
