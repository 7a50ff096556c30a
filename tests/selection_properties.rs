//! Property tests for mapping and selection
//!
//! - mapping resolution does not depend on rule or file order
//! - selection is a duplicate-free subsequence of the catalog
//! - a mapped id never selects a line through a longer identifier alone
//! - selection is idempotent

use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use testscope::catalog::CandidateTest;
use testscope::changes::ChangeSet;
use testscope::mapping::{MappingRule, MappingTable, resolve_mapped_tests};
use testscope::selection::select_tests;

fn path_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "src/pages/UsersPage.jsx",
        "src/pages/ProductsPage.jsx",
        "src/components/Layout.jsx",
        "src/utils/format.ts",
        "README.md",
    ])
    .prop_map(str::to_string)
}

fn rule_strategy() -> impl Strategy<Value = MappingRule> {
    (
        prop::sample::select(vec![r"UsersPage\.", r"ProductsPage\.", "src/components/", r"\.ts$", "nothing"]),
        prop::collection::vec(prop::sample::select(vec!["TC_A", "TC_B", "TC_C", "TC_D"]), 0..3),
    )
        .prop_map(|(pattern, tests)| MappingRule::new(pattern, &tests))
}

fn line_strategy() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["a.spec.ts", "b.spec.ts"]),
        prop::sample::select(vec!["TC_A", "TC_B", "TC_A_EXTENDED", "XTC_B", "TC_C"]),
        prop::sample::select(vec!["", " @smoke", " @regression"]),
    )
        .prop_map(|(file, id, tag)| format!("{} › title {}{}", file, id, tag))
}

fn is_subsequence(selected: &[&CandidateTest], catalog: &[CandidateTest]) -> bool {
    let mut remaining = catalog.iter();
    selected
        .iter()
        .all(|wanted| remaining.any(|candidate| candidate == *wanted))
}

proptest! {
    #[test]
    fn mapping_is_order_independent(
        rules in prop::collection::vec(rule_strategy(), 0..6),
        files in prop::collection::vec(path_strategy(), 0..6),
    ) {
        let table = MappingTable { rules: rules.clone() };
        let changes: ChangeSet = files.iter().cloned().collect();
        let forward = resolve_mapped_tests(&table, &changes).unwrap();

        let mut reversed_rules = rules;
        reversed_rules.reverse();
        let mut reversed_files = files;
        reversed_files.reverse();
        let reversed_changes: ChangeSet = reversed_files.into_iter().collect();
        let backward = resolve_mapped_tests(&MappingTable { rules: reversed_rules }, &reversed_changes).unwrap();

        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn selection_is_duplicate_free_subsequence(
        lines in prop::collection::vec(line_strategy(), 0..12),
        tags in prop::collection::btree_set(prop::sample::select(vec!["@smoke", "@regression"]).prop_map(str::to_string), 0..2),
        mapped in prop::collection::btree_set(prop::sample::select(vec!["TC_A", "TC_B"]).prop_map(str::to_string), 0..2),
    ) {
        let catalog: Vec<CandidateTest> = lines.into_iter().map(CandidateTest::from).collect();
        let selection = select_tests(&catalog, &tags, &mapped).unwrap();
        let selected: Vec<&CandidateTest> = selection.candidates().collect();

        prop_assert!(is_subsequence(&selected, &catalog));
        let unique: HashSet<&CandidateTest> = selected.iter().copied().collect();
        prop_assert_eq!(unique.len(), selected.len());

        prop_assert_eq!(selection.clone(), select_tests(&catalog, &tags, &mapped).unwrap());
    }

    #[test]
    fn longer_identifier_never_matches_on_mapped_path(
        suffix in "_[A-Z]{1,6}",
        prefix in "[A-Za-z0-9]{0,3}",
    ) {
        let mapped: BTreeSet<String> = ["TC_PRODUCTS_ORDER".to_string()].into_iter().collect();
        let line = if prefix.is_empty() {
            format!("x.spec.ts › C TC_PRODUCTS_ORDER{}", suffix)
        } else {
            format!("x.spec.ts › C {}TC_PRODUCTS_ORDER", prefix)
        };
        let catalog = vec![CandidateTest::from(line)];

        let selection = select_tests(&catalog, &BTreeSet::new(), &mapped).unwrap();
        prop_assert!(selection.is_empty());
    }
}
