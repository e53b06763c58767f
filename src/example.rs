use rand::Rng;
use rand::seq::SliceRandom;

/// Shown instead of a scramble when the author has not entered a sentence.
pub const NO_SENTENCE: &str = "(no sentence)";

/// Joins the scrambled tokens.
pub const SCRAMBLE_SEPARATOR: &str = "  ";

const BLANK_MARKER: &str = "__";

/// Interactive example templates offered in the Example section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExampleKind {
    #[default]
    Scramble,
    FillBlank,
    Choose,
    ShortAnswer,
}

impl ExampleKind {
    pub const ALL: [ExampleKind; 4] = [
        ExampleKind::Scramble,
        ExampleKind::FillBlank,
        ExampleKind::Choose,
        ExampleKind::ShortAnswer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExampleKind::Scramble => "Scramble",
            ExampleKind::FillBlank => "Fill blank",
            ExampleKind::Choose => "Choose",
            ExampleKind::ShortAnswer => "Short answer",
        }
    }
}

/// Author input for the Example section.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ExampleDraft {
    pub scramble_sentence: String,
    pub fill_template: String,
    pub short_prompt: String,
}

/// Shuffles the words of `sentence` for a word-order exercise.
///
/// Words are split on whitespace and joined with [`SCRAMBLE_SEPARATOR`]. Blank
/// input yields [`NO_SENTENCE`].
pub fn scramble_sentence<R: Rng + ?Sized>(rng: &mut R, sentence: &str) -> String {
    let mut words: Vec<&str> = sentence.split_whitespace().collect();
    if words.is_empty() {
        return NO_SENTENCE.to_string();
    }

    words.shuffle(rng);
    words.join(SCRAMBLE_SEPARATOR)
}

/// Number of `__` blanks in a fill-in-the-blank template.
pub fn count_blanks(template: &str) -> usize {
    template.matches(BLANK_MARKER).count()
}

pub fn fill_blank_preview(template: &str) -> String {
    format!("Preview: {template}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sorted(tokens: impl IntoIterator<Item = String>) -> Vec<String> {
        let mut tokens: Vec<String> = tokens.into_iter().collect();
        tokens.sort();
        tokens
    }

    #[test]
    fn scramble_is_a_permutation_of_the_words() {
        let sentence = "The quick brown fox jumps over the lazy dog.";

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let scrambled = scramble_sentence(&mut rng, sentence);

            let output = sorted(scrambled.split(SCRAMBLE_SEPARATOR).map(str::to_string));
            let input = sorted(sentence.split_whitespace().map(str::to_string));
            assert_eq!(output, input);
        }
    }

    #[test]
    fn scramble_collapses_irregular_whitespace() {
        let mut rng = StdRng::seed_from_u64(4);
        let scrambled = scramble_sentence(&mut rng, "  a\tb \n c  ");

        assert_eq!(
            sorted(scrambled.split(SCRAMBLE_SEPARATOR).map(str::to_string)),
            vec!["a", "b", "c"]
        );
    }

    #[test]
    fn single_word_is_unchanged() {
        let mut rng = StdRng::seed_from_u64(9);

        assert_eq!(scramble_sentence(&mut rng, "derivative"), "derivative");
    }

    #[test]
    fn blank_sentence_yields_placeholder() {
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(scramble_sentence(&mut rng, ""), NO_SENTENCE);
        assert_eq!(scramble_sentence(&mut rng, "   \t "), NO_SENTENCE);
    }

    #[test]
    fn same_seed_gives_same_scramble() {
        let sentence = "one two three four five six";

        let first = scramble_sentence(&mut StdRng::seed_from_u64(21), sentence);
        let second = scramble_sentence(&mut StdRng::seed_from_u64(21), sentence);

        assert_eq!(first, second);
    }

    #[test]
    fn fill_blank_helpers() {
        let template = "The area of a circle is __ * r^2 and its perimeter is __.";

        assert_eq!(count_blanks(template), 2);
        assert_eq!(count_blanks("no blanks"), 0);
        assert_eq!(fill_blank_preview("x = __"), "Preview: x = __");
    }
}
