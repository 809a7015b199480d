use conf_core::ConfigTree;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn unique_id(prefix: &str) -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}

/// Dedicated profile name unique to the calling test.
pub fn unique_profile_name() -> String {
    unique_id("test-addon")
}

/// Parses a JSON object literal into a tree, panicking on invalid input.
pub fn tree(value: serde_json::Value) -> ConfigTree {
    ConfigTree::from_json(value).expect("fixture must be a valid configuration tree")
}

/// A small screen-reader style configuration.
pub fn sample_tree() -> ConfigTree {
    tree(json!({
        "general": { "volume": 80, "rate": 1 },
        "speech": {
            "synth": "espeak",
            "autoLanguageSwitching": true,
            "espeak": { "rate": 40, "pitch": 50, "voice": "en-gb" }
        },
        "keyboard": {
            "speakTypedCharacters": true,
            "modifierKeys": ["capslock", "insert"]
        },
        "language": "en"
    }))
}
