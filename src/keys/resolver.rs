//! Phrase -> key combination resolution
//!
//! Resolution order for a phrase:
//! 1. Exact alias match on the whole (normalized) phrase
//! 2. Left-to-right scan over the words with one word of lookahead:
//!    - `f <number>` -> function key `f1`..`f12`
//!    - `symbol <sym>` / `press <sym>` -> shifted chord or the symbol itself
//!    - any other word -> its mapped key, or nothing
//!
//! Unknown words are dropped rather than reported; a phrase where nothing
//! resolves comes back as [`Resolution::Empty`].

use std::sync::Arc;

use super::combo::{Combination, KeyToken};
use super::vocab::{Vocabulary, normalize};

/// Word that introduces a function key ("f five")
const FUNCTION_PREFIX: &str = "f";
/// Words that introduce an explicit symbol ("symbol dollar", "press x")
const SYMBOL_PREFIXES: [&str; 2] = ["symbol", "press"];
const FUNCTION_KEYS: std::ops::RangeInclusive<u8> = 1..=12;

/// Outcome of resolving one phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Phrase matched an alias; holds its literal combination
    AliasHit(String),
    /// Phrase resolved word by word
    Tokens(Combination),
    /// Nothing in the phrase was recognized
    Empty,
}

impl Resolution {
    /// Serialized combination, if anything resolved
    pub fn combo(&self) -> Option<String> {
        match self {
            Resolution::AliasHit(combo) => Some(combo.clone()),
            Resolution::Tokens(combination) => Some(combination.to_string()),
            Resolution::Empty => None,
        }
    }
}

/// One scanning step: tokens produced and how many words were used
#[derive(Debug, PartialEq)]
struct Step {
    tokens: Vec<KeyToken>,
    consumed: usize,
}

impl Step {
    fn emit(tokens: Vec<KeyToken>, consumed: usize) -> Self {
        Self { tokens, consumed }
    }

    fn skip(consumed: usize) -> Self {
        Self {
            tokens: Vec::new(),
            consumed,
        }
    }
}

/// Stateless resolver over a shared, read-only vocabulary
#[derive(Debug, Clone)]
pub struct KeyResolver {
    vocab: Arc<Vocabulary>,
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(Vocabulary::builtin().clone()))
    }
}

impl KeyResolver {
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self { vocab }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Resolve a raw phrase into an alias hit, a token sequence, or nothing
    pub fn resolve(&self, phrase: &str) -> Resolution {
        let phrase = normalize(phrase);

        if let Some(combo) = self.resolve_alias(&phrase) {
            tracing::debug!(phrase = %phrase, combo, "alias hit");
            return Resolution::AliasHit(combo.to_string());
        }

        let tokens = self.tokenize(&phrase);
        tracing::debug!(phrase = %phrase, ?tokens, "tokenized");

        match Combination::from_tokens(tokens) {
            Some(combination) => Resolution::Tokens(combination),
            None => Resolution::Empty,
        }
    }

    /// Alias lookup on an already normalized phrase
    pub fn resolve_alias(&self, phrase: &str) -> Option<&str> {
        self.vocab.alias(phrase)
    }

    /// Scan a lowercase phrase into key tokens, in spoken order
    pub fn tokenize(&self, phrase: &str) -> Vec<KeyToken> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let mut tokens = Vec::new();
        let mut cursor = 0;

        while cursor < words.len() {
            let step = self.step(&words[cursor..]);
            tokens.extend(step.tokens);
            cursor += step.consumed;
        }

        tokens
    }

    /// Resolve the word at the head of `rest`, peeking at most one ahead
    fn step(&self, rest: &[&str]) -> Step {
        let word = rest[0];
        let next = rest.get(1).copied();

        if let (FUNCTION_PREFIX, Some(next)) = (word, next) {
            return match self.function_key(next) {
                Some(token) => Step::emit(vec![token], 2),
                // Not a function key: drop the "f", the next word gets its own step
                None => Step::skip(1),
            };
        }

        if let Some(next) = next {
            if SYMBOL_PREFIXES.contains(&word) {
                return Step::emit(self.resolve_symbol(next), 2);
            }
        }

        Step::emit(self.resolve_word(word).into_iter().collect(), 1)
    }

    /// `f<N>` when `word` maps to an integer in 1..=12
    fn function_key(&self, word: &str) -> Option<KeyToken> {
        let value = self.vocab.word(word).unwrap_or(word);
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let n: u8 = value.parse().ok()?;
        FUNCTION_KEYS.contains(&n).then(|| KeyToken::function(n))
    }

    /// Map one ordinary word to a key, or `None` when it names no key
    pub fn resolve_word(&self, word: &str) -> Option<KeyToken> {
        let mapped = self.vocab.word(word).unwrap_or(word);

        let mut chars = mapped.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_alphanumeric() {
                return Some(KeyToken::from(c));
            }
        }

        if self.vocab.is_key_name(mapped) {
            return Some(KeyToken::from(mapped));
        }

        None
    }

    /// Shifted chord for a symbol, or the symbol verbatim when no shift is needed
    ///
    /// Spoken names ("dollar") go through the word table for the chord lookup
    /// only. Never empty.
    pub fn resolve_symbol(&self, symbol: &str) -> Vec<KeyToken> {
        let symbol = symbol.to_lowercase();
        let value = self.vocab.word(&symbol).unwrap_or(&symbol);

        let mut chars = value.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(chord) = self.vocab.symbol(c) {
                return chord.to_vec();
            }
        }

        vec![KeyToken::from(symbol.as_str())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<KeyToken> {
        items.iter().map(|s| KeyToken::from(*s)).collect()
    }

    fn combo(resolver: &KeyResolver, phrase: &str) -> Option<String> {
        resolver.resolve(phrase).combo()
    }

    #[test]
    fn test_alias_bypasses_tokenizing() {
        let resolver = KeyResolver::default();
        assert_eq!(
            resolver.resolve("Save"),
            Resolution::AliasHit("ctrl+s".to_string())
        );
        assert_eq!(
            resolver.resolve("task   manager"),
            Resolution::AliasHit("ctrl+shift+esc".to_string())
        );
        // Alias only matches the whole phrase
        assert_eq!(combo(&resolver, "save control"), Some("ctrl".to_string()));
    }

    #[test]
    fn test_function_keys() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.tokenize("f five"), tokens(&["f5"]));
        assert_eq!(resolver.tokenize("f one"), tokens(&["f1"]));
        assert_eq!(resolver.tokenize("f 12"), tokens(&["f12"]));
        assert_eq!(resolver.tokenize("alt f 4"), tokens(&["alt", "f4"]));
        assert_eq!(combo(&resolver, "shift f ten"), Some("shift".to_string()));
    }

    #[test]
    fn test_function_key_out_of_range() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.resolve("f thirteen"), Resolution::Empty);
        assert_eq!(resolver.resolve("f 13"), Resolution::Empty);
        assert_eq!(resolver.tokenize("f zero"), tokens(&["0"]));
        assert_eq!(resolver.tokenize("f banana"), Vec::<KeyToken>::new());
    }

    #[test]
    fn test_trailing_f_is_a_letter() {
        let resolver = KeyResolver::default();
        assert_eq!(combo(&resolver, "control f"), Some("ctrl+f".to_string()));
        assert_eq!(combo(&resolver, "f"), Some("f".to_string()));
    }

    #[test]
    fn test_symbol_requests() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.tokenize("symbol dollar"), tokens(&["shift", "4"]));
        assert_eq!(resolver.tokenize("symbol !"), tokens(&["shift", "1"]));
        assert_eq!(resolver.tokenize("press z"), tokens(&["z"]));
        assert_eq!(resolver.tokenize("press ~"), tokens(&["~"]));
        assert_eq!(combo(&resolver, "symbol dollar"), Some("shift+4".to_string()));
        assert_eq!(combo(&resolver, "press z"), Some("z".to_string()));
    }

    #[test]
    fn test_unshifted_symbol_passes_through_verbatim() {
        let resolver = KeyResolver::default();
        // Word table only feeds the chord lookup, never the fallback
        assert_eq!(resolver.tokenize("press control"), tokens(&["control"]));
        assert_eq!(resolver.tokenize("press period"), tokens(&["period"]));
        assert_eq!(resolver.tokenize("press banana"), tokens(&["banana"]));
        assert_eq!(resolver.tokenize("symbol X"), tokens(&["x"]));
        assert_eq!(resolver.resolve_symbol("Question"), tokens(&["shift", "/"]));
    }

    #[test]
    fn test_symbol_prefix_without_argument_is_dropped() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.resolve("press"), Resolution::Empty);
        assert_eq!(resolver.tokenize("control symbol"), tokens(&["ctrl"]));
    }

    #[test]
    fn test_order_preserved() {
        let resolver = KeyResolver::default();
        assert_eq!(
            combo(&resolver, "control shift escape"),
            Some("ctrl+shift+esc".to_string())
        );
        assert_eq!(
            combo(&resolver, "shift control escape"),
            Some("shift+ctrl+esc".to_string())
        );
    }

    #[test]
    fn test_ordinary_words() {
        let resolver = KeyResolver::default();
        // Single characters pass straight through
        assert_eq!(resolver.tokenize("control a"), tokens(&["ctrl", "a"]));
        assert_eq!(resolver.tokenize("alt 7"), tokens(&["alt", "7"]));
        // Canonical names are accepted because they are mapping values
        assert_eq!(resolver.tokenize("ctrl down tab"), tokens(&["ctrl", "down", "tab"]));
        // Filler words vanish
        assert_eq!(resolver.tokenize("enter key please"), tokens(&["enter"]));
    }

    #[test]
    fn test_unrecognized() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.resolve("banana"), Resolution::Empty);
        assert_eq!(resolver.resolve(""), Resolution::Empty);
        assert_eq!(resolver.resolve("   \t "), Resolution::Empty);
        assert_eq!(Resolution::Empty.combo(), None);
    }

    #[test]
    fn test_idempotent() {
        let resolver = KeyResolver::default();
        let first = resolver.resolve("control shift symbol dollar");
        let second = resolver.resolve("control shift symbol dollar");
        assert_eq!(first, second);
        assert_eq!(first.combo(), Some("ctrl+shift+shift+4".to_string()));
    }

    #[test]
    fn test_step_reports_consumed_words() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.step(&["f", "two", "x"]), Step::emit(tokens(&["f2"]), 2));
        assert_eq!(resolver.step(&["f", "x"]), Step::skip(1));
        assert_eq!(resolver.step(&["press", "x"]), Step::emit(tokens(&["x"]), 2));
        assert_eq!(resolver.step(&["banana"]), Step::skip(1));
    }
}
