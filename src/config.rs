/// Local storage key holding the serialized vocabulary list.
pub const STORAGE_KEY: &str = "devalicath_vocab";

/// Delay before the mock chat bot answers a user message.
pub const CHAT_REPLY_DELAY_MS: u32 = 600;

/// Number of placeholder entries a fresh chapter starts with.
pub const PLACEHOLDER_VOCAB_COUNT: usize = 8;

/// Maximum number of cards shown in practice mode.
pub const PRACTICE_PREVIEW_LIMIT: usize = 8;

pub const DEFAULT_CHAPTER_TITLE: &str = "Devalicath Chapter 1";

/// Runtime settings handed to the UI when it is mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterConfig {
    pub storage_key: String,
    pub chat_reply_delay_ms: u32,
    pub log_level: log::Level,
}

impl Default for ChapterConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            chat_reply_delay_ms: CHAT_REPLY_DELAY_MS,
            log_level: log::Level::Info,
        }
    }
}
