use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::PRACTICE_PREVIEW_LIMIT;
use crate::vocab::VocabItem;

/// How the vocabulary section presents the list below the editing table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VocabMode {
    /// Words and meanings in two independently shuffled columns.
    #[default]
    Match,
    /// One card at a time, meaning first.
    Flashcard,
    /// Quick review grid of the first few items.
    Practice,
}

impl VocabMode {
    pub const ALL: [VocabMode; 3] = [VocabMode::Match, VocabMode::Flashcard, VocabMode::Practice];

    pub fn label(self) -> &'static str {
        match self {
            VocabMode::Match => "Match",
            VocabMode::Flashcard => "Flashcard",
            VocabMode::Practice => "Practice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchCard {
    pub id: String,
    pub text: String,
}

/// Two shuffled columns for the match board. No pairing state is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPairs {
    pub left: Vec<MatchCard>,
    pub right: Vec<MatchCard>,
}

/// Shuffles words and meanings into separate columns, each permuted independently.
pub fn shuffle_pairs<R: Rng + ?Sized>(rng: &mut R, items: &[VocabItem]) -> MatchPairs {
    let mut left: Vec<MatchCard> = items
        .iter()
        .map(|item| MatchCard {
            id: item.id.clone(),
            text: item.word.clone(),
        })
        .collect();
    let mut right: Vec<MatchCard> = items
        .iter()
        .map(|item| MatchCard {
            id: item.id.clone(),
            text: item.meaning.clone(),
        })
        .collect();

    left.shuffle(rng);
    right.shuffle(rng);

    MatchPairs { left, right }
}

/// Items shown in practice mode.
pub fn practice_preview(items: &[VocabItem]) -> &[VocabItem] {
    &items[..items.len().min(PRACTICE_PREVIEW_LIMIT)]
}

/// Circular cursor over the vocabulary for the flashcard view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flashcard {
    index: usize,
    revealed: bool,
}

impl Flashcard {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
        self.revealed = false;
    }

    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.index = (self.index + len - 1) % len;
        self.revealed = false;
    }

    /// Discloses the word of the current card.
    pub fn flip(&mut self) {
        self.revealed = true;
    }

    /// Pulls the cursor back inside a list that has shrunk.
    pub fn clamp(&mut self, len: usize) {
        if self.index >= len {
            self.index = len.saturating_sub(1);
            self.revealed = false;
        }
    }

    /// The card under the cursor, or `None` for an empty list.
    pub fn current<'a>(&self, items: &'a [VocabItem]) -> Option<&'a VocabItem> {
        if items.is_empty() {
            return None;
        }
        items.get(self.index.min(items.len() - 1))
    }
}
