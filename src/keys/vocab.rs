//! Vocabulary tables: spoken words, phrase aliases and shifted symbols
//!
//! Built once at startup and never mutated afterwards. The resolver only
//! ever borrows them, so a single `Vocabulary` can be shared freely.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::combo::KeyToken;
use crate::config::KeysConfig;

/// Words reserved by the lifecycle layer (resume, pause, exit)
pub const CONTROL_WORDS: [&str; 3] = ["start", "stop", "exit"];

/// Spoken word -> key name or punctuation character
const WORDS: &[(&str, &str)] = &[
    // Named keys
    ("escape", "esc"),
    ("enter", "enter"),
    ("space", "space"),
    ("tab-space", "tab"),
    ("control", "ctrl"),
    ("shift", "shift"),
    ("alt", "alt"),
    ("backspace", "backspace"),
    ("caps lock", "caps lock"),
    ("windows", "win"),
    ("up", "up"),
    ("next", "down"),
    ("left", "left"),
    ("right", "right"),
    ("delete", "delete"),
    ("insert", "insert"),
    ("home", "home"),
    ("end", "end"),
    // Digits
    ("zero", "0"),
    ("one", "1"),
    ("two", "2"),
    ("three", "3"),
    ("four", "4"),
    ("five", "5"),
    ("six", "6"),
    ("seven", "7"),
    ("eight", "8"),
    ("nine", "9"),
    // Punctuation names
    ("period", "."),
    ("comma", ","),
    ("question", "?"),
    ("exclamation", "!"),
    ("colon", ":"),
    ("semicolon", ";"),
    ("slash", "/"),
    ("backslash", "\\"),
    ("quote", "'"),
    ("dollar", "$"),
    ("percent", "%"),
    ("ampersand", "&"),
];

/// Whole phrase -> literal combination
const ALIASES: &[(&str, &str)] = &[
    ("close", "alt+f4"),
    ("save", "ctrl+s"),
    ("copy", "ctrl+c"),
    ("paste", "ctrl+v"),
    ("undo", "ctrl+z"),
    ("redo", "ctrl+y"),
    ("refresh", "f5"),
    ("menu", "shift+f10"),
    ("desktop", "win+d"),
    ("task manager", "ctrl+shift+esc"),
    ("change language", "win+space"),
];

/// Symbol -> (modifier, base key) on a US layout
const SYMBOLS: &[(char, &str, &str)] = &[
    ('!', "shift", "1"),
    ('@', "shift", "2"),
    ('#', "shift", "3"),
    ('$', "shift", "4"),
    ('%', "shift", "5"),
    ('^', "shift", "6"),
    ('&', "shift", "7"),
    ('*', "shift", "8"),
    ('(', "shift", "9"),
    (')', "shift", "0"),
    ('_', "shift", "-"),
    ('+', "shift", "="),
    ('{', "shift", "["),
    ('}', "shift", "]"),
    (':', "shift", ";"),
    ('"', "shift", "'"),
    ('<', "shift", ","),
    ('>', "shift", "."),
    ('?', "shift", "/"),
    ('|', "shift", "\\"),
];

static BUILTIN: LazyLock<Vocabulary> = LazyLock::new(Vocabulary::build);

/// Immutable lookup tables consulted by the resolver
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: HashMap<String, String>,
    /// Every value of `words`; ordinary words only resolve into this set
    key_names: HashSet<String>,
    aliases: HashMap<String, String>,
    symbols: HashMap<char, [KeyToken; 2]>,
}

impl Vocabulary {
    /// The built-in tables, constructed on first use
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    /// Built-in tables with user entries from config layered on top
    pub fn with_overrides(keys: &KeysConfig) -> Self {
        let mut vocab = BUILTIN.clone();

        for word in &keys.words {
            let spoken = word.word.trim().to_lowercase();
            let key = word.key.trim().to_lowercase();
            // The tokenizer looks words up one at a time
            if spoken.is_empty() || spoken.contains(char::is_whitespace) {
                tracing::warn!(word = %word.word, "ignoring custom word that is not a single word");
                continue;
            }
            if key.is_empty() {
                tracing::warn!(word = %word.word, "ignoring custom word with empty key");
                continue;
            }
            vocab.words.insert(spoken, key);
        }
        for alias in &keys.aliases {
            let phrase = normalize(&alias.phrase);
            let combo = alias.combo.trim().to_lowercase();
            if phrase.is_empty() {
                tracing::warn!(combo = %alias.combo, "ignoring custom alias with empty phrase");
                continue;
            }
            if combo.is_empty() {
                tracing::warn!(phrase = %alias.phrase, "ignoring custom alias with empty combo");
                continue;
            }
            vocab.aliases.insert(phrase, combo);
        }

        vocab.key_names = vocab.words.values().cloned().collect();
        tracing::debug!(
            words = vocab.words.len(),
            aliases = vocab.aliases.len(),
            "vocabulary built with overrides"
        );
        vocab
    }

    fn build() -> Self {
        let words: HashMap<String, String> = WORDS
            .iter()
            .map(|(w, k)| (w.to_string(), k.to_string()))
            .collect();
        let key_names = words.values().cloned().collect();
        let aliases = ALIASES
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect();
        let symbols = SYMBOLS
            .iter()
            .map(|&(c, modifier, base)| (c, [KeyToken::from(modifier), KeyToken::from(base)]))
            .collect();

        Self {
            words,
            key_names,
            aliases,
            symbols,
        }
    }

    /// Literal combination for an exact phrase match
    pub fn alias(&self, phrase: &str) -> Option<&str> {
        self.aliases.get(phrase).map(String::as_str)
    }

    /// Mapped value for a single spoken word
    pub fn word(&self, word: &str) -> Option<&str> {
        self.words.get(word).map(String::as_str)
    }

    /// Whether `name` is produced by some word mapping
    pub fn is_key_name(&self, name: &str) -> bool {
        self.key_names.contains(name)
    }

    /// Shifted chord for a symbol character
    pub fn symbol(&self, symbol: char) -> Option<&[KeyToken; 2]> {
        self.symbols.get(&symbol)
    }

    /// Alias phrases and their combinations, sorted by phrase
    pub fn aliases(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .aliases
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Spoken words and what they map to, sorted by word
    pub fn words(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .words
            .iter()
            .map(|(w, k)| (w.as_str(), k.as_str()))
            .collect();
        entries.sort_unstable();
        entries
    }

    /// Symbol characters that resolve to a shifted chord
    pub fn symbol_chars(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.symbols.keys().copied().collect();
        chars.sort_unstable();
        chars
    }
}

/// Lowercase and collapse runs of whitespace into single spaces
pub fn normalize(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}
