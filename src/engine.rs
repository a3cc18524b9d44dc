//! Voice command engine with pause/resume and command history
//!
//! Takes transcribed phrases one at a time, resolves them to key
//! combinations, and presses them through a [`KeyInjector`]. Owns the only
//! mutable state in the pipeline: the active flag and the history log.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::config::Config;
use crate::control::{ControlCommand, ControlProcessor};
use crate::keys::{Combination, InjectError, KeyInjector, KeyResolver, Vocabulary, normalize};

/// One received command
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub at: DateTime<Local>,
    pub command: String,
}

/// Result of processing one phrase
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// Combination was pressed
    Executed(String),
    /// Nothing in the phrase mapped to a key
    Unrecognized,
    /// Engine is paused; phrase was not resolved
    Ignored,
    /// Pause command received
    Paused,
    /// Resume command received
    Resumed,
    /// Exit command received
    Exit,
    /// Help listing requested
    Help(String),
    /// History requested; oldest first
    History(Vec<String>),
}

/// Main engine: resolver + control words + injector
pub struct VoiceCommandEngine {
    resolver: KeyResolver,
    control: ControlProcessor,
    injector: Box<dyn KeyInjector>,
    active: bool,
    history: VecDeque<HistoryEntry>,
    history_limit: usize,
}

impl VoiceCommandEngine {
    /// Build an engine from config; the vocabulary is frozen here
    pub fn new(config: &Config, injector: Box<dyn KeyInjector>) -> Self {
        let vocab = Arc::new(Vocabulary::with_overrides(&config.keys));
        Self {
            resolver: KeyResolver::new(vocab),
            control: ControlProcessor::new(&config.control),
            injector,
            active: true,
            history: VecDeque::with_capacity(config.history_limit),
            history_limit: config.history_limit,
        }
    }

    pub fn resolver(&self) -> &KeyResolver {
        &self.resolver
    }

    pub fn control(&self) -> &ControlProcessor {
        &self.control
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Process a transcribed phrase
    ///
    /// Order: alias, control word, active check, then tokenizing. Aliases
    /// are pressed even while paused. Injection errors are returned; the
    /// engine stays usable afterwards.
    pub fn process_command(&mut self, text: &str) -> Result<ProcessResult, InjectError> {
        self.push_history(text);
        tracing::debug!(command = text, "command received");

        let phrase = normalize(text);
        if let Some(combo) = self.resolver.resolve_alias(&phrase) {
            tracing::debug!(phrase = %phrase, combo, "alias hit");
            let combination = Combination::parse(combo)?;
            return self.press(combination);
        }

        if let Some(cmd) = self.control.detect(&phrase) {
            return Ok(self.handle_control(cmd));
        }

        if !self.active {
            tracing::debug!(command = text, "paused, ignoring");
            return Ok(ProcessResult::Ignored);
        }

        // Only an active engine spends time tokenizing
        let tokens = self.resolver.tokenize(&phrase);
        tracing::debug!(phrase = %phrase, ?tokens, "tokenized");
        let Some(combination) = Combination::from_tokens(tokens) else {
            tracing::warn!(command = text, "unrecognized command");
            return Ok(ProcessResult::Unrecognized);
        };
        self.press(combination)
    }

    fn press(&mut self, combination: Combination) -> Result<ProcessResult, InjectError> {
        self.injector.press(&combination)?;
        tracing::info!(combo = %combination, "executed");
        Ok(ProcessResult::Executed(combination.to_string()))
    }

    fn handle_control(&mut self, cmd: ControlCommand) -> ProcessResult {
        match cmd {
            ControlCommand::Exit => {
                tracing::info!("exit requested");
                ProcessResult::Exit
            }
            ControlCommand::Pause => {
                self.active = false;
                tracing::info!("paused");
                ProcessResult::Paused
            }
            ControlCommand::Resume => {
                self.active = true;
                tracing::info!("resumed");
                ProcessResult::Resumed
            }
            ControlCommand::Help => {
                ProcessResult::Help(self.control.help_text(self.resolver.vocabulary()))
            }
            ControlCommand::History => ProcessResult::History(
                self.history
                    .iter()
                    .map(|e| format!("{} {}", e.at.format("%H:%M:%S"), e.command))
                    .collect(),
            ),
        }
    }

    fn push_history(&mut self, command: &str) {
        if self.history_limit == 0 {
            return;
        }
        if self.history.len() >= self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry {
            at: Local::now(),
            command: command.to_string(),
        });
    }
}
