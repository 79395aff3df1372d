//! Matcher and index integration tests

use hadith_titles::{find_match_positions, find_matches, TitleIndex, TitleRecord};
use proptest::prelude::*;

fn record(title_ar: &str, title_en: &str) -> TitleRecord {
    TitleRecord::new(title_en, title_ar).with_title_en(title_en)
}

fn english_titles(matches: &[&TitleRecord]) -> Vec<String> {
    matches.iter().map(|r| r.title_en.clone()).collect()
}

// === Linear matching ===

#[test]
fn test_end_to_end_scenario() {
    let candidates = vec![
        record("أعلام الدين", "A"),
        record("اعلام الدين", "B"),
        record("كتاب آخر", "C"),
    ];

    let matches = find_matches("أعلام الدین", &candidates);
    assert_eq!(english_titles(&matches), vec!["A", "B"]);
}

#[test]
fn test_order_preserved_around_non_match() {
    let candidates = vec![
        record("الكافي", "A"),
        record("الاستبصار", "B"),
        record("الكافی", "C"),
    ];

    let matches = find_matches("الكافي", &candidates);
    assert_eq!(english_titles(&matches), vec!["A", "C"]);
}

#[test]
fn test_no_match_is_empty() {
    let candidates = vec![record("الكافي", "A"), record("الاستبصار", "B")];
    assert!(find_matches("بصائر الدرجات", &candidates).is_empty());
}

#[test]
fn test_ambiguous_match_returns_all() {
    let candidates = vec![record("مَنْ لا يَحْضُرُهُ الفَقِيهُ", "A"), record("من لا يحضره الفقيه", "B")];
    let matches = find_matches("من لا يحضره الفقيه", &candidates);
    assert_eq!(matches.len(), 2);
}

#[test]
fn test_missing_title_treated_as_empty() {
    let candidates = vec![
        TitleRecord {
            index: "1".to_string(),
            title_ar: None,
            title_en: "untitled".to_string(),
            ..Default::default()
        },
        record("الكافي", "A"),
    ];

    // The scan continues past the record without a title
    assert_eq!(english_titles(&find_matches("الكافي", &candidates)), vec!["A"]);
    // An empty query matches exactly the records without a title
    assert_eq!(find_match_positions("", &candidates), vec![0]);
}

#[test]
fn test_candidates_not_mutated() {
    let candidates = vec![record("أعلام الدين", "A")];
    let before = candidates.clone();
    let _ = find_matches("اعلام الدين", &candidates);
    assert_eq!(candidates, before);
}

// === Index ===

#[test]
fn test_index_reused_across_queries() {
    let candidates = vec![
        record("الكافي", "A"),
        record("الخصال", "B"),
        record("الكافي", "C"),
    ];
    let index = TitleIndex::build(&candidates);

    assert_eq!(english_titles(&index.lookup("الكافي")), vec!["A", "C"]);
    assert_eq!(english_titles(&index.lookup("الخِصال")), vec!["B"]);
    assert!(index.lookup("التوحيد").is_empty());
    assert_eq!(index.positions("الكافي"), &[0, 2]);
}

#[test]
fn test_index_duplicate_groups() {
    let candidates = vec![
        record("الكافي", "A"),
        record("الخصال", "B"),
        record("الكافی", "C"),
        record("الخصال", "D"),
        record("التوحيد", "E"),
    ];
    let index = TitleIndex::build(&candidates);
    let groups = index.duplicate_groups();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key.as_str(), "الكافي");
    assert_eq!(groups[0].positions, vec![0, 2]);
    assert_eq!(groups[1].positions, vec![1, 3]);
}

fn arabic_title() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "الكافي",
        "الكافی",
        "الْكَافِي",
        "أعلام الدين",
        "اعلام الدين",
        "أعلام الدین",
        "الخصال",
        "رسالة",
        "رساله",
        "",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn test_index_agrees_with_linear_scan(
        titles in prop::collection::vec(arabic_title(), 0..12),
        query in arabic_title(),
    ) {
        let candidates: Vec<TitleRecord> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| TitleRecord::new(i.to_string(), title.as_str()))
            .collect();
        let index = TitleIndex::build(&candidates);

        prop_assert_eq!(index.lookup(&query), find_matches(&query, &candidates));
        prop_assert_eq!(index.positions(&query).to_vec(), find_match_positions(&query, &candidates));
    }

    #[test]
    fn test_matches_are_ascending_positions(
        titles in prop::collection::vec(arabic_title(), 0..12),
        query in arabic_title(),
    ) {
        let candidates: Vec<TitleRecord> = titles
            .iter()
            .map(|title| TitleRecord::new("x", title.as_str()))
            .collect();
        let positions = find_match_positions(&query, &candidates);
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
