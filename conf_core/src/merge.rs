//! # Structural Merge
//!
//! Applies a partial update document to a configuration tree in place.
//!
//! The *existing* tree decides where the merge recurses: a key that holds a
//! section in the target is merged key by key, a key that holds a leaf is
//! overwritten with whatever the overlay carries. Overlay keys must already
//! exist in the target; nothing is created.
//!
//! Updates are not atomic. Keys are visited in document order and a failure
//! stops the merge, leaving the leaves written before it in place.

use errors::MergeError;

use crate::types::{ConfigTree, ConfigValue};

/// Merges `overlay` into `target`.
///
/// Returns the number of leaves written.
///
/// # Errors
/// - `MergeError::KeyNotFound` when the overlay names a key the target lacks
/// - `MergeError::ShapeMismatch` when the overlay gives a leaf for a key that
///   holds a section in the target
pub fn update(target: &mut ConfigTree, overlay: &ConfigTree) -> Result<usize, MergeError> {
    let mut path = Vec::new();
    merge_into(target, overlay, &mut path)
}

fn merge_into<'a>(
    target: &mut ConfigTree,
    overlay: &'a ConfigTree,
    path: &mut Vec<&'a str>
) -> Result<usize, MergeError> {
    let mut written = 0;

    for (key, incoming) in overlay {
        path.push(key.as_str());

        let existing = target
            .get_mut(key)
            .ok_or_else(|| MergeError::KeyNotFound {
                path: path.join(".")
            })?;

        match (existing, incoming) {
            (ConfigValue::Tree(section), ConfigValue::Tree(nested)) => {
                written += merge_into(section, nested, path)?;
            }
            (ConfigValue::Tree(_), ConfigValue::Scalar(_)) => {
                return Err(MergeError::ShapeMismatch {
                    path: path.join(".")
                });
            }
            (slot, value) => {
                tracing::trace!(path = %path.join("."), "Overwriting leaf");
                *slot = value.clone();
                written += 1;
            }
        }

        path.pop();
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> ConfigTree {
        ConfigTree::from_json(value).unwrap()
    }

    fn sample() -> ConfigTree {
        tree(json!({
            "general": { "volume": 80, "rate": 1 },
            "speech": {
                "synth": "espeak",
                "espeak": { "rate": 40, "pitch": 50 }
            },
            "language": "en"
        }))
    }

    #[test]
    fn test_nested_update_keeps_siblings() {
        let mut target = sample();
        let written = update(&mut target, &tree(json!({ "general": { "volume": 50 } }))).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            target.get("general"),
            Some(&ConfigValue::Tree(tree(json!({ "volume": 50, "rate": 1 }))))
        );
        assert_eq!(target.get("speech"), sample().get("speech"));
    }

    #[test]
    fn test_deeply_nested_update() {
        let mut target = sample();
        update(
            &mut target,
            &tree(json!({ "speech": { "espeak": { "pitch": 70 } } }))
        )
        .unwrap();

        assert_eq!(
            target.get_path("speech.espeak.pitch"),
            Some(&ConfigValue::from(70))
        );
        assert_eq!(
            target.get_path("speech.espeak.rate"),
            Some(&ConfigValue::from(40))
        );
        assert_eq!(
            target.get_path("speech.synth"),
            Some(&ConfigValue::from("espeak"))
        );
    }

    #[test]
    fn test_empty_overlay_is_noop() {
        let mut target = sample();
        let written = update(&mut target, &ConfigTree::new()).unwrap();

        assert_eq!(written, 0);
        assert_eq!(target, sample());
    }

    #[test]
    fn test_missing_top_level_key_fails_and_leaves_tree() {
        let mut target = sample();
        let err = update(&mut target, &tree(json!({ "nonexistentKey": 1 }))).unwrap_err();

        assert_eq!(
            err,
            MergeError::KeyNotFound {
                path: "nonexistentKey".to_string()
            }
        );
        assert_eq!(target, sample());
    }

    #[test]
    fn test_missing_nested_key_reports_full_path() {
        let mut target = sample();
        let err = update(
            &mut target,
            &tree(json!({ "speech": { "espeak": { "volume": 3 } } }))
        )
        .unwrap_err();

        assert_eq!(err.path(), "speech.espeak.volume");
    }

    #[test]
    fn test_leaf_for_section_is_shape_mismatch() {
        let mut target = sample();
        let err = update(&mut target, &tree(json!({ "general": 5 }))).unwrap_err();

        assert_eq!(
            err,
            MergeError::ShapeMismatch {
                path: "general".to_string()
            }
        );
        assert_eq!(target, sample());
    }

    #[test]
    fn test_section_for_leaf_overwrites_leaf() {
        let mut target = sample();
        update(&mut target, &tree(json!({ "language": { "primary": "fr" } }))).unwrap();

        assert_eq!(
            target.get("language"),
            Some(&ConfigValue::Tree(tree(json!({ "primary": "fr" }))))
        );
    }

    #[test]
    fn test_leaf_type_may_change() {
        let mut target = sample();
        update(&mut target, &tree(json!({ "general": { "rate": "fast" } }))).unwrap();

        assert_eq!(
            target.get_path("general.rate"),
            Some(&ConfigValue::from("fast"))
        );
    }

    #[test]
    fn test_failure_after_earlier_keys_keeps_partial_writes() {
        let mut target = sample();
        let err = update(
            &mut target,
            &tree(json!({ "general": { "volume": 10 }, "missing": true }))
        )
        .unwrap_err();

        assert!(matches!(err, MergeError::KeyNotFound { .. }));
        assert_eq!(
            target.get_path("general.volume"),
            Some(&ConfigValue::from(10))
        );
    }

    #[test]
    fn test_keys_after_a_failure_are_not_written() {
        let mut target = sample();
        let overlay =
            ConfigTree::from_slice(br#"{"zzz": 1, "general": {"volume": 10}}"#).unwrap();

        let err = update(&mut target, &overlay).unwrap_err();

        assert_eq!(err.path(), "zzz");
        assert_eq!(
            target.get_path("general.volume"),
            Some(&ConfigValue::from(80))
        );
        assert_eq!(target, sample());
    }

    #[test]
    fn test_keys_are_applied_in_document_order() {
        let mut target = sample();
        let overlay = ConfigTree::from_slice(
            br#"{"language": "fr", "speech": {"espeak": {"pitch": 7, "nope": 1}}, "general": {"rate": 9}}"#
        )
        .unwrap();

        let err = update(&mut target, &overlay).unwrap_err();

        assert_eq!(err.path(), "speech.espeak.nope");
        assert_eq!(target.get("language"), Some(&ConfigValue::from("fr")));
        assert_eq!(
            target.get_path("speech.espeak.pitch"),
            Some(&ConfigValue::from(7))
        );
        assert_eq!(target.get_path("general.rate"), Some(&ConfigValue::from(1)));
    }

    #[test]
    fn test_applying_twice_equals_applying_once() {
        let overlay = tree(json!({
            "general": { "volume": 25 },
            "speech": { "espeak": { "rate": 90 } }
        }));

        let mut once = sample();
        update(&mut once, &overlay).unwrap();

        let mut twice = sample();
        update(&mut twice, &overlay).unwrap();
        update(&mut twice, &overlay).unwrap();

        assert_eq!(once, twice);
    }
}
