//! Property-based tests for stored upload names

use std::path::Path;

use proptest::prelude::*;
use teamhub::backend::files::storage::{resolve_public_path, sanitize_filename};

proptest! {
    #[test]
    fn test_sanitized_names_stay_inside_the_public_root(name in ".{0,40}") {
        let cleaned = sanitize_filename(&name);
        prop_assert!(!cleaned.is_empty());
        prop_assert!(!cleaned.contains('/'));
        prop_assert!(!cleaned.contains('\\'));

        let root = Path::new("/srv/public");
        let stored = format!("/uploads/files/1700000000000-{cleaned}");
        let resolved = resolve_public_path(root, &stored);
        prop_assert!(resolved.is_some());
        prop_assert!(resolved.unwrap().starts_with(root));
    }

    #[test]
    fn test_escaping_paths_are_rejected(depth in 1usize..4, tail in "[a-z]{1,8}") {
        let path = format!("/uploads/{}{}", "../".repeat(depth), tail);
        prop_assert!(resolve_public_path(Path::new("/srv/public"), &path).is_none());
    }
}
