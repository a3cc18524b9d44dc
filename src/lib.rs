//! Voice phrase to keyboard chord engine
//!
//! ```
//! use voicekeys::keys::{KeyResolver, Resolution};
//!
//! let resolver = KeyResolver::default();
//! assert_eq!(resolver.resolve("control shift escape").combo().as_deref(), Some("ctrl+shift+esc"));
//! assert_eq!(resolver.resolve("banana"), Resolution::Empty);
//! ```

pub mod config;
pub mod control;
pub mod engine;
pub mod keys;
pub mod logging;

pub use config::Config;
pub use engine::{ProcessResult, VoiceCommandEngine};
