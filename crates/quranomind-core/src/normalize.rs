//! Arabic text normalization for fuzzy surah-name matching.
//!
//! Canonicalizes the letterform variation users type in practice:
//! - Remove diacritics (tashkeel)
//! - Unify hamza-bearing alef variants to bare alef
//! - Unify taa marbuta to haa

/// Arabic combining marks removed during normalization.
const DIACRITICS: &[char] = &[
    '\u{064B}', // Fathatan
    '\u{064C}', // Dammatan
    '\u{064D}', // Kasratan
    '\u{064E}', // Fatha
    '\u{064F}', // Damma
    '\u{0650}', // Kasra
    '\u{0651}', // Shadda
    '\u{0652}', // Sukun
    '\u{0653}', // Maddah above
    '\u{0654}', // Hamza above
    '\u{0655}', // Hamza below
    '\u{0670}', // Superscript alef
];

/// Alef variants unified to plain alef (ا).
const ALEF_VARIANTS: &[char] = &[
    '\u{0623}', // Alef with hamza above (أ)
    '\u{0625}', // Alef with hamza below (إ)
    '\u{0622}', // Alef with madda (آ)
];

/// Normalize Arabic text for comparison.
///
/// Idempotent: normalizing already-normalized text is a no-op. The empty
/// string maps to the empty string.
///
/// # Examples
/// ```
/// use quranomind_core::normalize_arabic;
/// assert_eq!(normalize_arabic("البَقَرَة"), "البقره");
/// assert_eq!(normalize_arabic("أَعُوذُ"), "اعوذ");
/// ```
pub fn normalize_arabic(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        if DIACRITICS.contains(&c) {
            continue;
        }
        if ALEF_VARIANTS.contains(&c) {
            result.push('\u{0627}'); // Plain alef
            continue;
        }
        if c == '\u{0629}' {
            result.push('\u{0647}'); // Taa marbuta -> haa
            continue;
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn strips_diacritics() {
        let input = "بِسْمِ اللَّهِ الرَّحْمَٰنِ الرَّحِيمِ";
        assert_eq!(normalize_arabic(input), "بسم الله الرحمن الرحيم");
    }

    #[rstest]
    #[case("أَعُوذُ", "اعوذ")]
    #[case("إِلَيْهِ", "اليه")]
    #[case("آمَنُوا", "امنوا")]
    fn unifies_alef_variants(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_arabic(input), expected);
    }

    #[test]
    fn unifies_taa_marbuta() {
        assert_eq!(normalize_arabic("البقرة"), "البقره");
        assert_eq!(normalize_arabic("الفاتحة"), "الفاتحه");
    }

    #[test]
    fn idempotent() {
        for input in ["البَقَرَة", "أَعُوذُ", "سُورَةُ الفاتحة", "", "plain ascii"] {
            let once = normalize_arabic(input);
            assert_eq!(normalize_arabic(&once), once);
        }
    }

    #[test]
    fn empty_maps_to_empty() {
        assert_eq!(normalize_arabic(""), "");
    }

    #[test]
    fn non_arabic_untouched() {
        assert_eq!(normalize_arabic("Al-Baqarah"), "Al-Baqarah");
    }
}
