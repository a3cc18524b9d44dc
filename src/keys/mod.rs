//! Spoken phrase to keyboard chord translation
//!
//! Turns transcribed phrases such as "control shift escape", "symbol dollar"
//! or "f five" into a single combination (`ctrl+shift+esc`, `shift+4`, `f5`)
//! and hands it to an injector.
//!
//! # Pieces
//!
//! - **Vocabulary**: word, alias and symbol tables, frozen at startup
//! - **Resolver**: alias check, then a left-to-right word scan
//! - **Combination**: ordered tokens joined with `+`
//! - **Injector**: presses the combination (enigo) or just logs it

mod combo;
mod inject;
mod resolver;
mod vocab;

pub use combo::{Combination, KeyToken, SEPARATOR};
#[cfg(feature = "inject")]
pub use inject::EnigoInjector;
pub use inject::{ChordTiming, DryRunInjector, InjectError, KeyInjector};
pub use resolver::{KeyResolver, Resolution};
pub use vocab::{CONTROL_WORDS, Vocabulary, normalize};
