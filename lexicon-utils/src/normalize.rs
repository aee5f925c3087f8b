//! Name normalization for matching words across corpora
//!
//! The picture database spells names in lowercase without umlauts, while
//! norm and frequency sources use regular German orthography. Normalizing
//! both sides the same way lets them be joined by name.

use unicode_normalization::UnicodeNormalization;

/// Normalize a name for cross-corpus matching
///
/// - Composes the text (NFC), so a decomposed `u` + combining diaeresis is treated like `ü`
/// - Converts to lowercase
/// - Replaces `ä`, `ö`, `ü` and `ß` with `ae`, `oe`, `ue` and `ss`
///
/// Different spellings can end up with the same normalized name; callers
/// that need a single match have to break the tie themselves.
pub fn normalize_name(name: &str) -> String {
    let lowercase = name.nfc().collect::<String>().to_lowercase();

    let mut result = String::with_capacity(lowercase.len());
    for c in lowercase.chars() {
        match c {
            'ä' => result.push_str("ae"),
            'ö' => result.push_str("oe"),
            'ü' => result.push_str("ue"),
            'ß' => result.push_str("ss"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases() {
        assert_eq!(normalize_name("Becher"), "becher");
    }

    #[test]
    fn test_replaces_umlauts() {
        assert_eq!(normalize_name("Mädchen"), "maedchen");
        assert_eq!(normalize_name("Öl"), "oel");
        assert_eq!(normalize_name("Tür"), "tuer");
        assert_eq!(normalize_name("Fuß"), "fuss");
    }

    #[test]
    fn test_decomposed_umlaut() {
        // "Tür" with U+0308 COMBINING DIAERESIS
        assert_eq!(normalize_name("Tu\u{0308}r"), "tuer");
    }

    #[test]
    fn test_already_normalized_is_unchanged() {
        assert_eq!(normalize_name("schluessel"), "schluessel");
    }

    #[test]
    fn test_not_injective() {
        assert_eq!(normalize_name("Masse"), normalize_name("Maße"));
    }
}
