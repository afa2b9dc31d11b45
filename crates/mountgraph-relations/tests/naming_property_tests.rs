use mountgraph_relations::naming::{depluralize, path_diff, strip_affix_ignore_case};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][A-Za-z]{0,8}").unwrap()
}

fn path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..5).prop_map(|segments| segments.join("."))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn depluralize_never_grows_words(word in segment()) {
        let singular = depluralize(&word);
        prop_assert!(singular.len() <= word.len());
        if !word.ends_with('s') {
            prop_assert_eq!(singular, word);
        }
    }

    #[test]
    fn path_diff_slices_come_from_their_paths(
        paths in proptest::collection::vec(path(), 2..6)
    ) {
        let slices = path_diff(&paths).expect("at least two paths");
        prop_assert_eq!(slices.len(), paths.len());
        for (slice, path) in slices.iter().zip(&paths) {
            prop_assert!(path.contains(slice.as_str()), "{} not in {}", slice, path);
        }
    }

    #[test]
    fn path_diff_drops_shared_leading_segments(
        head in path(),
        tails in proptest::collection::btree_set(segment(), 2..5)
    ) {
        let paths: Vec<String> = tails.iter().map(|t| format!("{head}.{t}")).collect();
        let slices = path_diff(&paths).expect("at least two paths");
        let expected: Vec<String> = tails.into_iter().collect();
        prop_assert_eq!(slices, expected);
    }

    #[test]
    fn stripping_an_absent_affix_is_identity(text in segment()) {
        prop_assert_eq!(strip_affix_ignore_case(&text, "0"), text.as_str());
    }
}
