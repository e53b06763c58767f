pub mod chapter;
pub mod chat;
pub mod config;
pub mod example;
pub mod exercise;
pub mod media;
pub mod storage;
pub mod views;
pub mod vocab;
pub mod wasm;

pub use chapter::{ApplicationDraft, ChapterExport, ChapterSettings, LessonDraft, parse_tags};
pub use chat::{
    ChatMessage, ChatTranscript, PendingReply, ReplyTimers, SEED_GREETING, Speaker, canned_reply,
};
pub use config::{CHAT_REPLY_DELAY_MS, ChapterConfig, STORAGE_KEY};
pub use example::{
    ExampleDraft, ExampleKind, NO_SENTENCE, SCRAMBLE_SEPARATOR, count_blanks, fill_blank_preview,
    scramble_sentence,
};
pub use exercise::{Question, QuestionKind, Responses, sample_questions};
pub use media::{MediaError, playable_audio, to_embed_url};
pub use storage::{
    MemoryStore, StoreError, VocabStore, load_vocabulary, read_vocabulary, save_vocabulary,
};
pub use views::{Flashcard, MatchCard, MatchPairs, VocabMode, practice_preview, shuffle_pairs};
pub use vocab::{VocabError, VocabItem, Vocabulary, filter_vocabulary};
