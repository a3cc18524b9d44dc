//! Key tokens and the "+"-joined combinations built from them

use std::fmt;

use super::inject::InjectError;

/// Separator between keys in a serialized combination
pub const SEPARATOR: char = '+';

/// One physical key or modifier, e.g. `ctrl`, `f5`, `3`, `a`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyToken(String);

impl KeyToken {
    /// Function key token `f1`..`f12`
    pub fn function(n: u8) -> Self {
        Self(format!("f{}", n))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<char> for KeyToken {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, non-empty set of keys pressed together
///
/// Order matters: modifiers come before the keys they modify. The
/// assembler never reorders what the resolver produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Combination(Vec<KeyToken>);

impl Combination {
    /// Assemble tokens into a combination; `None` when there are no tokens
    pub fn from_tokens(tokens: Vec<KeyToken>) -> Option<Self> {
        if tokens.is_empty() {
            None
        } else {
            Some(Self(tokens))
        }
    }

    /// Split a serialized combination such as `ctrl+shift+esc`
    pub fn parse(combo: &str) -> Result<Self, InjectError> {
        let combo = combo.trim();
        let tokens = combo
            .split(SEPARATOR)
            .map(|part| {
                let part = part.trim();
                if part.is_empty() {
                    Err(InjectError::MalformedCombination(combo.to_string()))
                } else {
                    Ok(KeyToken::from(part))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_tokens(tokens).ok_or_else(|| InjectError::MalformedCombination(combo.to_string()))
    }

    pub fn tokens(&self) -> &[KeyToken] {
        &self.0
    }

    /// Human-readable form used in feedback, e.g. `ctrl + s`
    pub fn spaced(&self) -> String {
        self.0
            .iter()
            .map(KeyToken::as_str)
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
