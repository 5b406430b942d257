//! Text normalization for exact matching.
//!
//! The exact-match index keys utterances by a normalized form so that casing,
//! punctuation, diacritics, and whitespace variations all map to the same
//! entry: `"Héllo,   Wörld!"` and `"hello world"` share a key.

use unicode_segmentation::UnicodeSegmentation;

/// Normalize text into an exact-match key.
///
/// Case-folds, strips punctuation and diacritics, and collapses runs of
/// whitespace into a single space. Deterministic and pure.
pub fn exact_match_key(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for grapheme in text.graphemes(true) {
        let mut wrote_word_char = false;
        for ch in grapheme.chars().flat_map(fold_diacritic) {
            if ch.is_whitespace() {
                continue;
            }
            if is_combining_mark(ch) || !ch.is_alphanumeric() {
                continue;
            }
            for lower in ch.to_lowercase() {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                out.push(lower);
                wrote_word_char = true;
            }
        }
        if !wrote_word_char && grapheme.chars().any(char::is_whitespace) {
            pending_space = true;
        }
    }

    out
}

fn is_combining_mark(ch: char) -> bool {
    matches!(ch, '\u{0300}'..='\u{036F}' | '\u{1AB0}'..='\u{1AFF}' | '\u{20D0}'..='\u{20FF}')
}

/// Map a precomposed Latin character to its base letter.
///
/// Covers the Latin-1 Supplement and the common Latin Extended-A letters;
/// anything else passes through unchanged.
fn fold_diacritic(ch: char) -> std::iter::Once<char> {
    let folded = match ch {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'À'..='Å' | 'Ā' | 'Ă' | 'Ą' => 'A',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'Ç' | 'Ć' | 'Ĉ' | 'Ċ' | 'Č' => 'C',
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'È'..='Ë' | 'Ē' | 'Ĕ' | 'Ė' | 'Ę' | 'Ě' => 'E',
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'Ì'..='Ï' | 'Ĩ' | 'Ī' | 'Ĭ' | 'Į' | 'İ' => 'I',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'Ñ' | 'Ń' | 'Ņ' | 'Ň' => 'N',
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'Ò'..='Ö' | 'Ø' | 'Ō' | 'Ŏ' | 'Ő' => 'O',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'Ś' | 'Ŝ' | 'Ş' | 'Š' => 'S',
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'Ù'..='Ü' | 'Ũ' | 'Ū' | 'Ŭ' | 'Ů' | 'Ű' | 'Ų' => 'U',
        'ý' | 'ÿ' => 'y',
        'Ý' | 'Ÿ' => 'Y',
        'ź' | 'ż' | 'ž' => 'z',
        'Ź' | 'Ż' | 'Ž' => 'Z',
        other => other,
    };
    std::iter::once(folded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_punctuation() {
        assert_eq!(exact_match_key("Hello,   World!"), "hello world");
    }

    #[test]
    fn test_diacritics_are_stripped() {
        assert_eq!(exact_match_key("Héllo Wörld"), "hello world");
        assert_eq!(exact_match_key("crème brûlée"), "creme brulee");
    }

    #[test]
    fn test_whitespace_collapses() {
        assert_eq!(exact_match_key("  hello \t there  "), "hello there");
    }

    #[test]
    fn test_non_latin_passthrough() {
        assert_eq!(exact_match_key("こんにちは 世界"), "こんにちは 世界");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        assert_eq!(exact_match_key(""), "");
        assert_eq!(exact_match_key("?!..."), "");
    }
}
