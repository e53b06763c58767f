use std::cell::RefCell;

use crate::vocab::{VocabError, VocabItem, Vocabulary};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("stored vocabulary is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("stored vocabulary is inconsistent: {0}")]
    Inconsistent(#[from] VocabError),
    #[error("storage backend failed: {0}")]
    Backend(String),
}

/// Key-value slot that holds the serialized vocabulary of one chapter.
pub trait VocabStore {
    /// Reads the stored list. `Ok(None)` means nothing has been saved yet.
    fn read(&self) -> Result<Option<Vec<VocabItem>>, StoreError>;

    /// Overwrites the stored list.
    fn write(&self, items: &[VocabItem]) -> Result<(), StoreError>;

    /// Deletes the stored list entirely.
    fn clear(&self) -> Result<(), StoreError>;
}

/// Store backed by a string slot in memory, holding the same JSON the browser would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl VocabStore for MemoryStore {
    fn read(&self) -> Result<Option<Vec<VocabItem>>, StoreError> {
        match self.slot.borrow().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn write(&self, items: &[VocabItem]) -> Result<(), StoreError> {
        let serialized = serde_json::to_string(items)?;
        self.slot.replace(Some(serialized));
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.slot.replace(None);
        Ok(())
    }
}

/// Reads the saved vocabulary, validating ids and dropping stale audio handles.
///
/// # Errors
/// * [`StoreError::Malformed`] or [`StoreError::Backend`] from the store itself.
/// * [`StoreError::Inconsistent`] when the saved list repeats an id.
pub fn read_vocabulary<S: VocabStore + ?Sized>(store: &S) -> Result<Option<Vocabulary>, StoreError> {
    let Some(items) = store.read()? else {
        return Ok(None);
    };

    let mut vocabulary = Vocabulary::from_items(items)?;
    let stale = vocabulary.clear_audio();
    if !stale.is_empty() {
        log::debug!("dropped {} audio handles from a previous session", stale.len());
    }

    Ok(Some(vocabulary))
}

/// Loads the saved vocabulary, falling back to the placeholder list on any failure.
pub fn load_vocabulary<S: VocabStore + ?Sized>(store: &S) -> Vocabulary {
    match read_vocabulary(store) {
        Ok(Some(vocabulary)) => {
            log::info!("restored {} saved vocabulary items", vocabulary.len());
            vocabulary
        }
        Ok(None) => Vocabulary::placeholder(),
        Err(error) => {
            log::warn!("ignoring saved vocabulary: {error}");
            Vocabulary::placeholder()
        }
    }
}

/// Writes the vocabulary back, logging instead of failing.
pub fn save_vocabulary<S: VocabStore + ?Sized>(store: &S, vocabulary: &Vocabulary) {
    if let Err(error) = store.write(vocabulary.items()) {
        log::warn!("failed to save vocabulary: {error}");
    }
}
