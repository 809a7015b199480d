use conf_core::{ConfigTree, ConfigValue, Scalar, update};
use proptest::prelude::*;

fn leaf() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(Scalar::Integer),
        "[a-z]{0,8}".prop_map(Scalar::Text),
    ]
}

/// Two-level trees: top-level leaves plus sections of leaves.
fn config_tree() -> impl Strategy<Value = ConfigTree> {
    let section = prop::collection::btree_map("[a-z]{1,4}", leaf(), 0..5)
        .prop_map(|map| map.into_iter().collect::<ConfigTree>());
    let node = prop_oneof![
        leaf().prop_map(ConfigValue::Scalar),
        section.prop_map(ConfigValue::Tree),
    ];
    prop::collection::btree_map("[a-z]{1,4}", node, 1..8)
        .prop_map(|map| map.into_iter().collect::<ConfigTree>())
}

/// A tree plus an overlay that rewrites a subset of its top-level leaves.
fn tree_with_leaf_overlay() -> impl Strategy<Value = (ConfigTree, ConfigTree)> {
    config_tree().prop_flat_map(|tree| {
        let leaf_keys: Vec<String> = tree
            .iter()
            .filter(|(_, value)| !value.is_tree())
            .map(|(key, _)| key.clone())
            .collect();
        let count = leaf_keys.len();
        (
            Just(tree),
            prop::sample::subsequence(leaf_keys, 0..=count),
            prop::collection::vec(leaf(), count)
        )
            .prop_map(|(tree, keys, values)| {
                let overlay = keys
                    .into_iter()
                    .zip(values)
                    .collect::<ConfigTree>();
                (tree, overlay)
            })
    })
}

proptest! {
    #[test]
    fn update_touches_only_overlay_keys((tree, overlay) in tree_with_leaf_overlay()) {
        let mut merged = tree.clone();
        update(&mut merged, &overlay).unwrap();

        for (key, before) in &tree {
            let after = merged.get(key).unwrap();
            match overlay.get(key) {
                Some(expected) => {
                    prop_assert_eq!(after, expected);
                }
                None => {
                    prop_assert_eq!(after, before);
                }
            }
        }
        prop_assert_eq!(merged.len(), tree.len());
    }

    #[test]
    fn update_is_idempotent((tree, overlay) in tree_with_leaf_overlay()) {
        let mut once = tree.clone();
        update(&mut once, &overlay).unwrap();

        let mut twice = once.clone();
        update(&mut twice, &overlay).unwrap();

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sections_keep_their_keys(tree in config_tree()) {
        // Overlay every section with itself: each section must keep its key set.
        let overlay: ConfigTree = tree
            .iter()
            .filter(|(_, value)| value.is_tree())
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        let mut merged = tree.clone();
        update(&mut merged, &overlay).unwrap();

        for (key, before) in &tree {
            if let Some(section) = before.as_tree() {
                let after = merged.get(key).and_then(ConfigValue::as_tree).unwrap();
                prop_assert_eq!(
                    section.keys().collect::<Vec<_>>(),
                    after.keys().collect::<Vec<_>>()
                );
            }
        }
    }
}
