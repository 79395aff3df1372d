//! Normalization integration tests
//!
//! Enhanced with property-based testing

use hadith_titles::{normalize, normalize_with, NormalizeOptions, NormalizedKey};
use proptest::prelude::*;
use rstest::rstest;

// === Totality ===

#[test]
fn test_absent_input_is_empty() {
    assert_eq!(normalize(None::<&str>), "");
    assert_eq!(normalize(Option::<&str>::None), "");
    assert_eq!(normalize(""), "");
    assert_eq!(normalize_with(None::<&str>, &NormalizeOptions::default()), "");
}

// === Equivalences ===

#[rstest]
#[case("أعلام الدین", "اعلام الدين")]
#[case("كتاب (الاول)", "كتاب الاول")]
#[case("Abc", "abc")]
#[case("إرشاد القلوب", "ارشاد القلوب")]
#[case("آمالي", "امالي")]
#[case("مَعانِي الأَخْبار", "معاني الاخبار")]
#[case("رسالة في الفقه", "رساله في الفقه")]
#[case("فتاوى", "فتاوي")]
#[case("بحـــار الأنوار", "بحار الانوار")]
#[case("کشف الغمة", "كشف الغمه")]
#[case("«الخصال»", "الخصال")]
#[case("عيون أخبار الرضا، ج۱", "عيون اخبار الرضا ج۱")]
#[case("كامل الزيارات: باب؛", "كامل الزيارات باب")]
#[case("“قرب الإسناد”", "قرب الاسناد")]
fn test_equivalent_titles(#[case] a: &str, #[case] b: &str) {
    assert_eq!(normalize(a), normalize(b));
}

#[rstest]
#[case("الكافي", "الكاف")]
#[case("الخصال", "الخصائل")]
#[case("Vol 1", "Vol 2")]
fn test_distinct_titles(#[case] a: &str, #[case] b: &str) {
    assert_ne!(normalize(a), normalize(b));
}

#[test]
fn test_hamza_on_carrier_letters_kept() {
    // Only alef forms and bare hamza fold; hamza on waw/yeh stays
    assert_eq!(normalize("مؤمن"), "مؤمن");
    assert_eq!(normalize("رئيس"), "رئيس");
    assert_eq!(normalize("سماء"), "سماا");
}

#[test]
fn test_hyphen_and_digits_kept() {
    assert_eq!(normalize("Al-Kafi 2"), "al-kafi2");
    assert_eq!(normalize("المجلد ٣"), "المجلد٣");
}

#[test]
fn test_key_matches_normalize() {
    let key = NormalizedKey::new("تهذيب الأحكام");
    assert_eq!(key.as_str(), normalize("تهذيب الأحكام"));
    assert_eq!(key.into_string(), "تهذيبالاحكام");
}

// === Property-based tests ===

proptest! {
    #[test]
    fn test_normalize_idempotent(text in "\\PC{0,40}") {
        let once = normalize(text.as_str());
        prop_assert_eq!(normalize(once.as_str()), once.clone());
    }

    #[test]
    fn test_normalize_idempotent_on_arabic(
        text in "[\\x{0600}-\\x{06FF}a-zA-Z0-9 ()/,.:«»\"'\\[\\]-]{0,40}"
    ) {
        let once = normalize(text.as_str());
        prop_assert_eq!(normalize(once.as_str()), once.clone());
    }

    #[test]
    fn test_normalized_has_no_whitespace(text in "\\PC{0,40}") {
        let normalized = normalize(text.as_str());
        prop_assert!(!normalized.chars().any(char::is_whitespace));
    }

    #[test]
    fn test_normalized_has_no_diacritics(text in "[\\x{0600}-\\x{06FF} ]{0,40}") {
        let normalized = normalize(text.as_str());
        prop_assert!(!normalized
            .chars()
            .any(|c| ('\u{064B}'..='\u{065F}').contains(&c) || c == '\u{0670}'),
            "normalized output contains diacritics: {:?}", normalized);
    }

    #[test]
    fn test_key_equality_symmetric(a in "[\\x{0620}-\\x{064A} ]{0,12}", b in "[\\x{0620}-\\x{064A} ]{0,12}") {
        let ab = NormalizedKey::new(a.as_str()) == NormalizedKey::new(b.as_str());
        let ba = NormalizedKey::new(b.as_str()) == NormalizedKey::new(a.as_str());
        prop_assert_eq!(ab, ba);
    }
}
