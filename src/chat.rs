//! Local help-chat that answers every question with a canned echo.

use std::collections::BTreeMap;

pub const SEED_GREETING: &str = "Hi! Ask me about the lesson or exercises.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Bot,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}

/// A bot answer waiting for its reply delay to elapse.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending reply does nothing until it is delivered"]
pub struct PendingReply {
    message: ChatMessage,
}

impl PendingReply {
    pub fn text(&self) -> &str {
        &self.message.text
    }
}

/// Bot template wrapped around the user's own words.
pub fn canned_reply(heard: &str) -> String {
    format!(
        "Bot: I heard '{heard}'. I can help with vocab, examples, or exercises. \
         Try asking 'explain word_X' or 'give hint for Q1'."
    )
}

/// Append-only conversation between the learner and the mock bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl Default for ChatTranscript {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::bot(SEED_GREETING)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Records a user message and returns the bot answer to deliver later.
    ///
    /// Blank input is ignored and yields `None`.
    pub fn submit(&mut self, input: &str) -> Option<PendingReply> {
        if input.trim().is_empty() {
            return None;
        }

        self.messages.push(ChatMessage::user(input));
        Some(PendingReply {
            message: ChatMessage::bot(canned_reply(input)),
        })
    }

    pub fn deliver(&mut self, reply: PendingReply) {
        self.messages.push(reply.message);
    }

    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(ChatMessage::bot(SEED_GREETING));
    }
}

/// Scheduled reply timers, keyed so each handle can be dropped once it fires.
#[derive(Debug)]
pub struct ReplyTimers<H> {
    next_key: u64,
    handles: BTreeMap<u64, H>,
}

impl<H> Default for ReplyTimers<H> {
    fn default() -> Self {
        Self {
            next_key: 0,
            handles: BTreeMap::new(),
        }
    }
}

impl<H> ReplyTimers<H> {
    /// Stores the handle built by `make`, which receives the key it is filed under.
    pub fn insert_with(&mut self, make: impl FnOnce(u64) -> H) -> u64 {
        let key = self.next_key;
        self.next_key = self.next_key.wrapping_add(1);
        self.handles.insert(key, make(key));
        key
    }

    pub fn remove(&mut self, key: u64) -> Option<H> {
        self.handles.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Drops every handle still waiting.
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_single_greeting() {
        let transcript = ChatTranscript::new();

        assert_eq!(transcript.messages(), &[ChatMessage::bot(SEED_GREETING)]);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut transcript = ChatTranscript::new();

        assert!(transcript.submit("").is_none());
        assert!(transcript.submit("  \t\n").is_none());
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn submission_appends_user_then_bot() {
        let mut transcript = ChatTranscript::new();

        let reply = transcript.submit("hello").expect("non-blank input gets a reply");
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[1], ChatMessage::user("hello"));

        transcript.deliver(reply);
        assert_eq!(transcript.len(), 3);

        let bot = &transcript.messages()[2];
        assert_eq!(bot.speaker, Speaker::Bot);
        assert!(bot.text.contains("'hello'"));
    }

    #[test]
    fn reply_uses_template() {
        assert_eq!(
            canned_reply("what is a slope?"),
            "Bot: I heard 'what is a slope?'. I can help with vocab, examples, or exercises. \
             Try asking 'explain word_X' or 'give hint for Q1'."
        );
    }

    #[test]
    fn reply_delivered_after_reset_lands_on_fresh_transcript() {
        let mut transcript = ChatTranscript::new();
        let reply = transcript.submit("question").expect("reply expected");

        transcript.reset();
        assert_eq!(transcript.len(), 1);

        transcript.deliver(reply);
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages()[0], ChatMessage::bot(SEED_GREETING));
    }

    #[test]
    fn fired_timers_are_released() {
        let mut timers = ReplyTimers::default();

        let first = timers.insert_with(|key| format!("timer {key}"));
        let second = timers.insert_with(|key| format!("timer {key}"));
        assert_ne!(first, second);
        assert_eq!(timers.len(), 2);

        assert_eq!(timers.remove(first).as_deref(), Some("timer 0"));
        assert_eq!(timers.remove(first), None);
        assert_eq!(timers.len(), 1);

        for _ in 0..100 {
            let key = timers.insert_with(|key| format!("timer {key}"));
            timers.remove(key);
        }
        assert_eq!(timers.len(), 1);

        timers.clear();
        assert!(timers.is_empty());
    }
}
