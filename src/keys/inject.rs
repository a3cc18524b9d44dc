//! Key injection backends
//!
//! - **Enigo** (feature `inject`): presses the chord on the real keyboard
//! - **Dry run**: logs the chord and presses nothing
//!
//! Both consume an already resolved [`Combination`]; deciding what to press is
//! the resolver's job, pressing it is this module's.

use std::thread;
use std::time::Duration;

use thiserror::Error;

use super::combo::Combination;
use crate::config::InputConfig;

/// Error type for key injection
#[derive(Debug, Error)]
pub enum InjectError {
    #[error("malformed combination: {0:?}")]
    MalformedCombination(String),
    #[error("unknown key: {0:?}")]
    UnknownKey(String),
    #[error("input backend error: {0}")]
    Backend(String),
}

/// Something that can press a key combination
pub trait KeyInjector {
    fn press(&mut self, combo: &Combination) -> Result<(), InjectError>;
}

/// Injector that only reports what it would press
#[derive(Debug, Default)]
pub struct DryRunInjector;

impl KeyInjector for DryRunInjector {
    fn press(&mut self, combo: &Combination) -> Result<(), InjectError> {
        tracing::info!(combo = %combo, "dry run, not pressing");
        Ok(())
    }
}

/// Delays around a chord, taken from config
#[derive(Debug, Clone, Copy)]
pub struct ChordTiming {
    /// Wait after pressing modifiers, before the final key
    pub modifier_delay: Duration,
    /// Wait after the final key, before releasing modifiers
    pub release_delay: Duration,
}

impl From<&InputConfig> for ChordTiming {
    fn from(config: &InputConfig) -> Self {
        Self {
            modifier_delay: Duration::from_millis(config.modifier_delay_ms),
            release_delay: Duration::from_millis(config.release_delay_ms),
        }
    }
}

/// One key event sent to a backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stroke {
    Press,
    Click,
    Release,
}

/// Hold every key but the last, click the last, release in reverse
///
/// Every held key gets a release attempt, whatever failed before it. The
/// first error wins.
pub(crate) fn press_chord<K: Copy>(
    keys: &[K],
    timing: ChordTiming,
    mut send: impl FnMut(K, Stroke) -> Result<(), InjectError>,
) -> Result<(), InjectError> {
    let Some((&last, held)) = keys.split_last() else {
        return Ok(());
    };

    let mut first_error = None;
    let mut pressed = 0;
    for &key in held {
        match send(key, Stroke::Press) {
            Ok(()) => pressed += 1,
            Err(e) => {
                first_error = Some(e);
                break;
            }
        }
    }

    if first_error.is_none() {
        if !held.is_empty() {
            thread::sleep(timing.modifier_delay);
        }
        if let Err(e) = send(last, Stroke::Click) {
            first_error = Some(e);
        }
        if !held.is_empty() {
            thread::sleep(timing.release_delay);
        }
    }

    for &key in held[..pressed].iter().rev() {
        if let Err(e) = send(key, Stroke::Release) {
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(feature = "inject")]
pub use self::enigo_backend::EnigoInjector;

#[cfg(feature = "inject")]
mod enigo_backend {
    use super::{ChordTiming, InjectError, KeyInjector, Stroke, press_chord};
    use crate::keys::combo::{Combination, KeyToken};
    use enigo::{Direction, Enigo, Key, Keyboard, Settings};

    /// Keyboard injector using enigo
    pub struct EnigoInjector {
        enigo: Enigo,
        timing: ChordTiming,
    }

    impl EnigoInjector {
        pub fn new(timing: ChordTiming) -> Result<Self, InjectError> {
            let enigo = Enigo::new(&Settings::default())
                .map_err(|e| InjectError::Backend(format!("Failed to initialize Enigo: {}", e)))?;
            Ok(Self { enigo, timing })
        }
    }

    impl KeyInjector for EnigoInjector {
        /// Hold every key but the last, click the last, release in reverse
        fn press(&mut self, combo: &Combination) -> Result<(), InjectError> {
            let keys = combo
                .tokens()
                .iter()
                .map(to_enigo_key)
                .collect::<Result<Vec<_>, _>>()?;
            let enigo = &mut self.enigo;
            press_chord(&keys, self.timing, |key, stroke| {
                let (direction, action) = match stroke {
                    Stroke::Press => (Direction::Press, "press"),
                    Stroke::Click => (Direction::Click, "click"),
                    Stroke::Release => (Direction::Release, "release"),
                };
                enigo
                    .key(key, direction)
                    .map_err(|e| InjectError::Backend(format!("Failed to {} key: {}", action, e)))
            })
        }
    }

    /// Map a key token onto enigo's key set
    pub(super) fn to_enigo_key(token: &KeyToken) -> Result<Key, InjectError> {
        let name = token.as_str();
        let key = match name {
            "ctrl" | "control" => Key::Control,
            "shift" => Key::Shift,
            "alt" => Key::Alt,
            "win" | "windows" | "meta" | "cmd" => Key::Meta,
            "esc" | "escape" => Key::Escape,
            "enter" | "return" => Key::Return,
            "space" => Key::Space,
            "tab" => Key::Tab,
            "backspace" => Key::Backspace,
            "caps lock" | "capslock" => Key::CapsLock,
            "up" => Key::UpArrow,
            "down" => Key::DownArrow,
            "left" => Key::LeftArrow,
            "right" => Key::RightArrow,
            "delete" => Key::Delete,
            #[cfg(not(target_os = "macos"))]
            "insert" => Key::Insert,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" => Key::PageUp,
            "pagedown" => Key::PageDown,
            _ => {
                if let Some(n) = function_number(name) {
                    return function_key(n).ok_or_else(|| InjectError::UnknownKey(name.to_string()));
                }
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Unicode(c),
                    _ => return Err(InjectError::UnknownKey(name.to_string())),
                }
            }
        };
        Ok(key)
    }

    fn function_number(name: &str) -> Option<u8> {
        let digits = name.strip_prefix('f')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    fn function_key(n: u8) -> Option<Key> {
        let key = match n {
            1 => Key::F1,
            2 => Key::F2,
            3 => Key::F3,
            4 => Key::F4,
            5 => Key::F5,
            6 => Key::F6,
            7 => Key::F7,
            8 => Key::F8,
            9 => Key::F9,
            10 => Key::F10,
            11 => Key::F11,
            12 => Key::F12,
            _ => return None,
        };
        Some(key)
    }
}
