use std::collections::HashSet;

use crate::config::PLACEHOLDER_VOCAB_COUNT;

/// A single word/meaning pair of the chapter vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VocabItem {
    /// Identifier unique within one [`Vocabulary`].
    pub id: String,
    pub word: String,
    /// Translation or explanation shown on the flip side of a flashcard.
    pub meaning: String,
    /// Handle of an uploaded audio clip, empty when nothing was uploaded.
    ///
    /// The handle is a transient object URL and does not outlive the page.
    #[serde(default, rename = "audioUrl")]
    pub audio_reference: String,
}

impl VocabItem {
    pub fn new(id: impl Into<String>, word: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            word: word.into(),
            meaning: meaning.into(),
            audio_reference: String::new(),
        }
    }

    pub fn has_audio(&self) -> bool {
        !self.audio_reference.is_empty()
    }

    fn matches(&self, needle: &str) -> bool {
        self.word.to_lowercase().contains(needle) || self.meaning.to_lowercase().contains(needle)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VocabError {
    #[error("no vocabulary item with id {id}")]
    UnknownId { id: String },
    #[error("vocabulary id {id} is used more than once")]
    DuplicateId { id: String },
}

/// Ordered vocabulary list with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    items: Vec<VocabItem>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Vocabulary {
    /// Starter list shown before the author has entered any words.
    pub fn placeholder() -> Self {
        let items = (1..=PLACEHOLDER_VOCAB_COUNT)
            .map(|n| VocabItem::new(format!("w{n}"), format!("word_{n}"), format!("Nghĩa tiếng Việt {n}")))
            .collect();

        Self { items }
    }

    /// Builds a vocabulary from existing items.
    ///
    /// # Errors
    /// Returns [`VocabError::DuplicateId`] for the first id that occurs twice.
    pub fn from_items(items: Vec<VocabItem>) -> Result<Self, VocabError> {
        let mut seen = HashSet::new();

        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(VocabError::DuplicateId {
                    id: item.id.clone(),
                });
            }
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[VocabItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&VocabItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Appends a placeholder row and returns it.
    pub fn add_placeholder(&mut self) -> &VocabItem {
        let id = self.next_id();
        self.items.push(VocabItem::new(id, "new_word", "nghĩa"));
        &self.items[self.items.len() - 1]
    }

    pub fn remove(&mut self, id: &str) -> Result<VocabItem, VocabError> {
        let position = self.position(id)?;
        Ok(self.items.remove(position))
    }

    pub fn set_word(&mut self, id: &str, word: impl Into<String>) -> Result<(), VocabError> {
        self.item_mut(id)?.word = word.into();
        Ok(())
    }

    pub fn set_meaning(&mut self, id: &str, meaning: impl Into<String>) -> Result<(), VocabError> {
        self.item_mut(id)?.meaning = meaning.into();
        Ok(())
    }

    /// Stores an audio handle on the item and returns the handle it replaced, if any.
    pub fn attach_audio(
        &mut self,
        id: &str,
        reference: impl Into<String>,
    ) -> Result<Option<String>, VocabError> {
        let item = self.item_mut(id)?;
        let previous = std::mem::replace(&mut item.audio_reference, reference.into());

        Ok((!previous.is_empty()).then_some(previous))
    }

    /// Drops every audio handle, returning the ones that were set.
    pub fn clear_audio(&mut self) -> Vec<String> {
        self.items
            .iter_mut()
            .map(|item| std::mem::take(&mut item.audio_reference))
            .filter(|reference| !reference.is_empty())
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize, VocabError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| VocabError::UnknownId { id: id.to_string() })
    }

    fn item_mut(&mut self, id: &str) -> Result<&mut VocabItem, VocabError> {
        let position = self.position(id)?;
        Ok(&mut self.items[position])
    }

    fn next_id(&self) -> String {
        let taken: HashSet<&str> = self.items.iter().map(|item| item.id.as_str()).collect();
        let is_free = |n: &u64| !taken.contains(format!("w{n}").as_str());

        let highest = self
            .items
            .iter()
            .filter_map(|item| item.id.strip_prefix('w'))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        // Past u64::MAX, reuse the lowest free number instead.
        let number = highest
            .checked_add(1)
            .filter(is_free)
            .or_else(|| (1..=u64::MAX).find(is_free))
            .unwrap_or(highest);

        format!("w{number}")
    }
}

/// Returns the items whose word or meaning contains `query`, ignoring case.
///
/// Order follows `items`; an empty query keeps everything.
pub fn filter_vocabulary<'a>(items: &'a [VocabItem], query: &str) -> Vec<&'a VocabItem> {
    let needle = query.to_lowercase();
    items.iter().filter(|item| item.matches(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(vocabulary: &Vocabulary) -> Vec<String> {
        vocabulary.items().iter().map(|item| item.id.clone()).collect()
    }

    fn sample() -> Vec<VocabItem> {
        vec![
            VocabItem::new("w1", "Derivative", "Đạo hàm"),
            VocabItem::new("w2", "integral", "Tích phân"),
            VocabItem::new("w3", "slope", "hệ số góc DERIVED"),
        ]
    }

    #[test]
    fn placeholder_has_eight_numbered_rows() {
        let vocabulary = Vocabulary::placeholder();

        assert_eq!(vocabulary.len(), 8);
        assert_eq!(vocabulary.items()[0].id, "w1");
        assert_eq!(vocabulary.items()[7].word, "word_8");
        assert_eq!(vocabulary.items()[2].meaning, "Nghĩa tiếng Việt 3");
        assert!(vocabulary.items().iter().all(|item| !item.has_audio()));
    }

    #[test]
    fn add_then_remove_restores_ids() {
        let mut vocabulary = Vocabulary::placeholder();
        let before = ids(&vocabulary);

        let added = vocabulary.add_placeholder().clone();
        assert_eq!(added.word, "new_word");
        assert_eq!(added.meaning, "nghĩa");
        assert_eq!(vocabulary.len(), 9);

        vocabulary.remove(&added.id).expect("added item should be removable");
        assert_eq!(ids(&vocabulary), before);
    }

    #[test]
    fn fresh_ids_do_not_collide_after_removal() {
        let mut vocabulary = Vocabulary::placeholder();
        vocabulary.remove("w3").expect("w3 exists");

        let added = vocabulary.add_placeholder().id.clone();

        assert_eq!(added, "w9");
        assert!(Vocabulary::from_items(vocabulary.items().to_vec()).is_ok());
    }

    #[test]
    fn fresh_id_skips_non_numeric_ids() {
        let mut vocabulary =
            Vocabulary::from_items(vec![VocabItem::new("custom", "a", "b")]).expect("unique ids");

        assert_eq!(vocabulary.add_placeholder().id, "w1");
    }

    #[test]
    fn fresh_id_survives_largest_numeric_suffix() {
        let mut vocabulary = Vocabulary::from_items(vec![
            VocabItem::new("w18446744073709551615", "a", "b"),
            VocabItem::new("w1", "c", "d"),
        ])
        .expect("unique ids");

        let added = vocabulary.add_placeholder().id.clone();

        assert_eq!(added, "w2");
        assert!(Vocabulary::from_items(vocabulary.items().to_vec()).is_ok());
    }

    #[test]
    fn editing_touches_only_the_target_field() {
        let mut vocabulary = Vocabulary::from_items(sample()).expect("unique ids");
        let original = vocabulary.clone();

        vocabulary.set_word("w2", "antiderivative").expect("w2 exists");

        let edited = vocabulary.get("w2").expect("w2 exists");
        assert_eq!(edited.word, "antiderivative");
        assert_eq!(edited.meaning, "Tích phân");
        assert_eq!(vocabulary.get("w1"), original.get("w1"));
        assert_eq!(vocabulary.get("w3"), original.get("w3"));

        vocabulary.set_meaning("w1", "đạo hàm").expect("w1 exists");
        assert_eq!(vocabulary.get("w1").map(|item| item.word.as_str()), Some("Derivative"));
    }

    #[test]
    fn unknown_id_is_reported() {
        let mut vocabulary = Vocabulary::placeholder();

        let error = vocabulary.set_word("missing", "x").expect_err("id does not exist");
        assert_eq!(
            error,
            VocabError::UnknownId {
                id: "missing".to_string()
            }
        );
        assert!(vocabulary.remove("missing").is_err());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let error = Vocabulary::from_items(vec![
            VocabItem::new("w1", "a", "b"),
            VocabItem::new("w1", "c", "d"),
        ])
        .expect_err("duplicate id");

        assert_eq!(error, VocabError::DuplicateId { id: "w1".to_string() });
    }

    #[test]
    fn attaching_audio_returns_replaced_handle() {
        let mut vocabulary = Vocabulary::placeholder();

        let first = vocabulary.attach_audio("w1", "blob:one").expect("w1 exists");
        let second = vocabulary.attach_audio("w1", "blob:two").expect("w1 exists");

        assert_eq!(first, None);
        assert_eq!(second.as_deref(), Some("blob:one"));
        assert!(vocabulary.get("w1").is_some_and(VocabItem::has_audio));

        assert_eq!(vocabulary.clear_audio(), vec!["blob:two".to_string()]);
        assert!(!vocabulary.get("w1").is_some_and(VocabItem::has_audio));
    }

    #[test]
    fn filter_matches_word_or_meaning_case_insensitively() {
        let items = sample();

        let hits: Vec<&str> = filter_vocabulary(&items, "deriv")
            .into_iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(hits, vec!["w1", "w3"]);

        let by_meaning = filter_vocabulary(&items, "TÍCH");
        assert_eq!(by_meaning.len(), 1);
        assert_eq!(by_meaning[0].id, "w2");
    }

    #[test]
    fn empty_filter_keeps_everything_in_order() {
        let items = sample();
        let all = filter_vocabulary(&items, "");

        assert_eq!(all.len(), items.len());
        assert!(all.iter().zip(&items).all(|(left, right)| *left == right));
    }

    #[test]
    fn filter_is_idempotent() {
        let items = sample();
        let once: Vec<VocabItem> = filter_vocabulary(&items, "e").into_iter().cloned().collect();
        let twice: Vec<VocabItem> = filter_vocabulary(&once, "e").into_iter().cloned().collect();

        assert_eq!(once, twice);
    }

    #[test]
    fn serializes_with_storage_field_names() {
        let mut item = VocabItem::new("w1", "word_1", "meaning");
        item.audio_reference = "blob:x".to_string();

        let json = serde_json::to_value(&item).expect("item should serialize");
        assert_eq!(json["audioUrl"], "blob:x");

        let parsed: VocabItem =
            serde_json::from_str(r#"{"id":"w2","word":"a","meaning":"b"}"#)
                .expect("audio field is optional");
        assert!(parsed.audio_reference.is_empty());
    }
}
