//! Lifecycle control words - intercepted before any key resolution
//!
//! Control phrases are matched exactly (case-insensitive, trailing
//! punctuation ignored). Aliases are checked before this layer, so an alias
//! that happens to equal a control phrase still presses its keys.

use crate::config::ControlConfig;
use crate::keys::Vocabulary;

/// Lifecycle command spoken by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Shut the engine down
    Exit,
    /// Stop pressing keys until resumed
    Pause,
    /// Start pressing keys again
    Resume,
    /// List what can be said
    Help,
    /// Show recent commands
    History,
}

/// Checks input against the configured control phrases
pub struct ControlProcessor {
    phrases: Vec<(String, ControlCommand)>,
}

impl Default for ControlProcessor {
    fn default() -> Self {
        Self::new(&ControlConfig::default())
    }
}

impl ControlProcessor {
    pub fn new(config: &ControlConfig) -> Self {
        let groups = [
            (&config.exit_phrases, ControlCommand::Exit),
            (&config.pause_phrases, ControlCommand::Pause),
            (&config.resume_phrases, ControlCommand::Resume),
            (&config.help_phrases, ControlCommand::Help),
            (&config.history_phrases, ControlCommand::History),
        ];

        let phrases = groups
            .into_iter()
            .flat_map(|(phrases, cmd)| {
                phrases
                    .iter()
                    .map(|p| crate::keys::normalize(p))
                    .filter(|p| !p.is_empty())
                    .map(move |p| (p, cmd))
            })
            .collect();

        Self { phrases }
    }

    /// Control command for a phrase, if it is one
    pub fn detect(&self, text: &str) -> Option<ControlCommand> {
        let text = crate::keys::normalize(text);
        // Transcribers like to end with a period
        let text = text.trim_end_matches(|c: char| c.is_ascii_punctuation());

        self.phrases
            .iter()
            .find(|(phrase, _)| phrase == text)
            .map(|(_, cmd)| *cmd)
    }

    /// First configured phrase for a command, for prompts like "say 'start'"
    pub fn phrase_for(&self, cmd: ControlCommand) -> Option<&str> {
        self.phrases
            .iter()
            .find(|(_, c)| *c == cmd)
            .map(|(p, _)| p.as_str())
    }

    /// Listing of everything that can be said
    pub fn help_text(&self, vocab: &Vocabulary) -> String {
        let mut out = String::from("Voice commands:\n");

        out.push_str("\nControl:\n");
        for (phrase, cmd) in &self.phrases {
            out.push_str(&format!("  {:<20} {:?}\n", phrase, cmd));
        }

        out.push_str("\nShortcuts:\n");
        for (phrase, combo) in vocab.aliases() {
            out.push_str(&format!("  {:<20} {}\n", phrase, combo));
        }

        out.push_str("\nKeys:\n");
        for (word, key) in vocab.words() {
            out.push_str(&format!("  {:<20} {}\n", word, key));
        }

        out.push_str("\nPatterns:\n");
        out.push_str("  f <one..twelve>      function keys\n");
        out.push_str("  symbol <name|char>   shifted symbol, e.g. 'symbol dollar'\n");
        out.push_str("  press <char>         single key\n");

        let symbols: String = vocab.symbol_chars().into_iter().collect();
        out.push_str(&format!("\nShifted symbols: {}\n", symbols));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_control_words() {
        let processor = ControlProcessor::default();

        assert_eq!(processor.detect("exit"), Some(ControlCommand::Exit));
        assert_eq!(processor.detect("stop"), Some(ControlCommand::Pause));
        assert_eq!(processor.detect("Start"), Some(ControlCommand::Resume));
        assert_eq!(processor.detect("help"), Some(ControlCommand::Help));
        assert_eq!(processor.detect("history"), Some(ControlCommand::History));
    }

    #[test]
    fn test_trailing_punctuation_ignored() {
        let processor = ControlProcessor::default();
        assert_eq!(processor.detect("Stop."), Some(ControlCommand::Pause));
        assert_eq!(processor.detect(" exit! "), Some(ControlCommand::Exit));
    }

    #[test]
    fn test_not_a_control_word() {
        let processor = ControlProcessor::default();
        assert_eq!(processor.detect("stop now"), None);
        assert_eq!(processor.detect("control shift escape"), None);
        assert_eq!(processor.detect(""), None);
    }

    #[test]
    fn test_custom_phrases() {
        let config = ControlConfig {
            pause_phrases: vec!["go to sleep".to_string()],
            ..ControlConfig::default()
        };
        let processor = ControlProcessor::new(&config);

        assert_eq!(processor.detect("go to sleep"), Some(ControlCommand::Pause));
        assert_eq!(processor.detect("stop"), None);
        assert_eq!(processor.phrase_for(ControlCommand::Resume), Some("start"));
    }

    #[test]
    fn test_help_lists_vocabulary() {
        let processor = ControlProcessor::default();
        let help = processor.help_text(Vocabulary::builtin());

        assert!(help.contains("task manager"));
        assert!(help.contains("ctrl+shift+esc"));
        assert!(help.contains("escape"));
        assert!(help.contains("symbol <name|char>"));
        assert!(help.contains("Pause"));
    }
}
