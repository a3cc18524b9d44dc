//! End-to-end checks through the public API: phrase in, combination out

use std::cell::RefCell;
use std::rc::Rc;

use voicekeys::config::Config;
use voicekeys::engine::{ProcessResult, VoiceCommandEngine};
use voicekeys::keys::{Combination, InjectError, KeyInjector, KeyResolver, KeyToken, Resolution};

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Vec<String>>>>);

impl KeyInjector for Recorder {
    fn press(&mut self, combo: &Combination) -> Result<(), InjectError> {
        self.0
            .borrow_mut()
            .push(combo.tokens().iter().map(|t| t.to_string()).collect());
        Ok(())
    }
}

fn resolve(phrase: &str) -> Option<String> {
    KeyResolver::default().resolve(phrase).combo()
}

#[test]
fn test_documented_phrases() {
    assert_eq!(resolve("Save").as_deref(), Some("ctrl+s"));
    assert_eq!(resolve("f five").as_deref(), Some("f5"));
    assert_eq!(resolve("f thirteen"), None);
    assert_eq!(resolve("symbol dollar").as_deref(), Some("shift+4"));
    assert_eq!(resolve("press z").as_deref(), Some("z"));
    assert_eq!(resolve("control shift escape").as_deref(), Some("ctrl+shift+esc"));
    assert_eq!(resolve("banana"), None);
    assert_eq!(resolve("   "), None);
}

#[test]
fn test_alias_hit_is_distinct_from_tokens() {
    let resolver = KeyResolver::default();

    assert!(matches!(resolver.resolve("refresh"), Resolution::AliasHit(_)));
    match resolver.resolve("f five") {
        Resolution::Tokens(combo) => assert_eq!(combo.tokens(), &[KeyToken::function(5)]),
        other => panic!("expected tokens, got {:?}", other),
    }
}

#[test]
fn test_every_function_key() {
    let words = [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
    ];
    for (i, word) in words.iter().enumerate() {
        let expected = format!("f{}", i + 1);
        assert_eq!(resolve(&format!("f {}", word)), Some(expected));
    }
    for n in 10..=12 {
        assert_eq!(resolve(&format!("f {}", n)), Some(format!("f{}", n)));
    }
}

#[test]
fn test_resolver_shared_across_threads() {
    let resolver = std::sync::Arc::new(KeyResolver::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let resolver = std::sync::Arc::clone(&resolver);
            std::thread::spawn(move || resolver.resolve("alt f four").combo())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("alt+f4"));
    }
}

#[test]
fn test_session() {
    let recorder = Recorder::default();
    let mut engine = VoiceCommandEngine::new(&Config::default(), Box::new(recorder.clone()));

    let script = [
        ("task manager", ProcessResult::Executed("ctrl+shift+esc".into())),
        ("stop", ProcessResult::Paused),
        ("control a", ProcessResult::Ignored),
        ("undo", ProcessResult::Executed("ctrl+z".into())),
        ("start", ProcessResult::Resumed),
        ("press exclamation", ProcessResult::Executed("shift+1".into())),
        ("what is this", ProcessResult::Unrecognized),
        ("exit", ProcessResult::Exit),
    ];

    for (phrase, expected) in script {
        assert_eq!(engine.process_command(phrase).unwrap(), expected, "for {:?}", phrase);
    }

    assert_eq!(
        *recorder.0.borrow(),
        vec![
            vec!["ctrl", "shift", "esc"],
            vec!["ctrl", "z"],
            vec!["shift", "1"],
        ]
    );
    assert_eq!(engine.history().count(), 8);
}

#[test]
fn test_custom_vocabulary_from_config() {
    let config = Config::from_toml_str(
        r#"
        [[keys.aliases]]
        phrase = "find"
        combo = "ctrl+f"

        [[keys.words]]
        word = "page"
        key = "pagedown"
        "#,
    )
    .unwrap();
    let recorder = Recorder::default();
    let mut engine = VoiceCommandEngine::new(&config, Box::new(recorder.clone()));

    assert_eq!(
        engine.process_command("Find").unwrap(),
        ProcessResult::Executed("ctrl+f".into())
    );
    assert_eq!(
        engine.process_command("shift page").unwrap(),
        ProcessResult::Executed("shift+pagedown".into())
    );
}
