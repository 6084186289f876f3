/// Maps raw text to the canonical form used for vocabulary lookups.
/// Must be total and deterministic.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> String;
}

/// Canonicalizes Arabic text the way the embedding vocabulary was built:
/// diacritics stripped, letter variants unified, elongation collapsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArabicNormalizer;

// Applied in order after diacritics and elongation are handled.
const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("أ", "ا"),
    ("إ", "ا"),
    ("آ", "ا"),
    ("ة", "ه"),
    ("_", " "),
    ("-", " "),
    ("/", ""),
    (".", ""),
    ("،", ""),
    (" و ", " و"),
    (" يا ", " يا"),
    ("\"", ""),
    ("ـ", ""),
    ("'", ""),
    ("ى", "ي"),
    ("\\", ""),
    ("\n", " "),
    ("\t", " "),
    ("&quot;", " "),
    ("?", " ? "),
    ("؟", " ؟ "),
    ("!", " ! "),
];

const DOUBLED_LETTERS: &[(&str, &str)] = &[("وو", "و"), ("يي", "ي"), ("اا", "ا")];

fn is_tashkeel(ch: char) -> bool {
    matches!(ch, '\u{0617}'..='\u{061A}' | '\u{064B}'..='\u{0652}')
}

/// Keeps at most two consecutive copies of any character. Line breaks are
/// left alone.
fn collapse_elongation(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut previous = None;
    let mut run = 0;

    for ch in text.chars() {
        if ch == '\n' {
            collapsed.push(ch);
            previous = None;
            continue;
        }

        if previous == Some(ch) {
            run += 1;
        } else {
            previous = Some(ch);
            run = 1;
        }

        if run <= 2 {
            collapsed.push(ch);
        }
    }

    collapsed
}

impl Normalizer for ArabicNormalizer {
    fn normalize(&self, text: &str) -> String {
        let stripped: String = text.chars().filter(|&ch| !is_tashkeel(ch)).collect();
        let mut text = collapse_elongation(&stripped);

        for (search, replace) in DOUBLED_LETTERS.iter().chain(SUBSTITUTIONS) {
            text = text.replace(search, replace);
        }

        text.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(text: &str) -> String {
        ArabicNormalizer.normalize(text)
    }

    #[test]
    fn test_plain_word_unchanged() {
        assert_eq!(normalize("بيت"), "بيت");
        assert_eq!(normalize("شجره"), "شجره");
    }

    #[test]
    fn test_strips_tashkeel() {
        // fatha, shadda, damma, sukun
        assert_eq!(normalize("بَيْت"), "بيت");
        assert_eq!(normalize("سيّارة"), "سياره");
        assert_eq!(normalize("كُتُب"), "كتب");
    }

    #[test]
    fn test_unifies_letter_variants() {
        assert_eq!(normalize("أحمد"), "احمد");
        assert_eq!(normalize("إسلام"), "اسلام");
        assert_eq!(normalize("آمن"), "امن");
        assert_eq!(normalize("مدرسة"), "مدرسه");
        assert_eq!(normalize("مستشفى"), "مستشفي");
    }

    #[test]
    fn test_collapses_elongation() {
        assert_eq!(normalize("جمييييل"), "جميل");
        assert_eq!(normalize("جـــميل"), "جميل");
        assert_eq!(normalize("كبييير"), "كبير");
        assert_eq!(normalize("سلاااام"), "سلام");
    }

    #[test]
    fn test_elongation_keeps_two_of_other_letters() {
        assert_eq!(collapse_elongation("ممممم"), "مم");
        assert_eq!(collapse_elongation("abc"), "abc");
        assert_eq!(collapse_elongation(""), "");
    }

    #[test]
    fn test_elongation_ignores_line_breaks() {
        assert_eq!(collapse_elongation("a\n\n\nb"), "a\n\n\nb");
        assert_eq!(collapse_elongation("aa\naaa"), "aa\naa");
    }

    #[test]
    fn test_punctuation_and_whitespace() {
        assert_eq!(normalize("  بيت  "), "بيت");
        assert_eq!(normalize("بيت."), "بيت");
        assert_eq!(normalize("\"بيت\""), "بيت");
        assert_eq!(normalize("مرحبا؟"), "مرحبا ؟");
        assert_eq!(normalize("كرة_قدم"), "كره قدم");
        assert_eq!(normalize("\tبيت\n"), "بيت");
    }

    #[test]
    fn test_is_total_and_deterministic() {
        for input in ["", "   ", "zz368xyz", "ـــ", "؟!?", "سيارة"] {
            assert_eq!(normalize(input), normalize(input));
        }
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("ـــ"), "");
        assert_eq!(normalize("zz368xyz"), "zz368xyz");
    }
}
