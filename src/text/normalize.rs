use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a raw contract description.
///
/// Steps, in order:
/// 1. lowercase
/// 2. drop `. , ; :`
/// 3. drop straight and curly quotes
/// 4. `° * +` become spaces
/// 5. strip diacritics, keeping `ñ` as one letter
/// 6. drop decimal digits `0-9` (other numerics such as `²` or `½` fall to step 7)
/// 7. anything other than `a-z`, `ñ` or whitespace becomes a space
/// 8. collapse whitespace and trim
///
/// The output only contains `a-z`, `ñ` and single inner spaces, and the
/// function is idempotent. `None` passes through.
pub fn normalize(text: Option<&str>) -> Option<String> {
    text.map(normalize_str)
}

/// [`normalize`] for text known to be present.
pub fn normalize_str(text: &str) -> String {
    let lowered = text.to_lowercase();

    let mut punctuated = String::with_capacity(lowered.len());
    for c in lowered.chars() {
        match c {
            '.' | ',' | ';' | ':' => {}
            '"' | '\u{201C}' | '\u{201D}' | '\'' | '\u{2018}' | '\u{2019}' => {}
            '°' | '*' | '+' => punctuated.push(' '),
            other => punctuated.push(other),
        }
    }

    // NFC first so a decomposed "n" + U+0303 is recognized as ñ below
    let mut folded = String::with_capacity(punctuated.len());
    for c in punctuated.nfc() {
        if c == 'ñ' {
            folded.push(c);
            continue;
        }
        folded.extend(std::iter::once(c).nfd().filter(|d| !is_combining_mark(*d)));
    }

    let cleaned: String = folded
        .chars()
        .filter(|c| !c.is_ascii_digit())
        .map(|c| match c {
            'a'..='z' | 'ñ' => c,
            c if c.is_whitespace() => c,
            _ => ' ',
        })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scenario_bridge() {
        assert_eq!(
            normalize_str("Construcción de PUENTE N°3, fase II°"),
            "construccion de puente n fase ii"
        );
    }

    #[test]
    fn test_none_passes_through() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("  ")), Some(String::new()));
    }

    #[test]
    fn test_keeps_enye() {
        assert_eq!(normalize_str("Compañía de AÑO"), "compañia de año");
        // pre-decomposed n + combining tilde
        assert_eq!(normalize_str("an\u{303}o"), "año");
    }

    #[test]
    fn test_quotes_removed_without_splitting() {
        assert_eq!(normalize_str("“obra” l'agua ‘x’"), "obra lagua x");
    }

    #[test]
    fn test_symbols_split_tokens() {
        assert_eq!(normalize_str("via*anden+puente"), "via anden puente");
        assert_eq!(normalize_str("via/anden-puente"), "via anden puente");
    }

    #[test]
    fn test_digits_removed_without_splitting() {
        assert_eq!(normalize_str("ab12cd 2024"), "abcd");
    }

    #[test]
    fn test_other_numerics_split_tokens() {
        assert_eq!(normalize_str("anden de m²construido"), "anden de m construido");
        assert_eq!(normalize_str("tuberia de ½pulgada"), "tuberia de pulgada");
        assert_eq!(normalize_str("fase Ⅱ"), "fase");
    }

    #[test]
    fn test_accents_stripped() {
        assert_eq!(
            normalize_str("ADECUACIÓN, reparación y ejecución: vías"),
            "adecuacion reparacion y ejecucion vias"
        );
    }

    fn is_canonical(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_lowercase() || c == 'ñ' || c == ' ')
            && !s.starts_with(' ')
            && !s.ends_with(' ')
            && !s.contains("  ")
    }

    proptest! {
        #[test]
        fn prop_idempotent(s in any::<String>()) {
            let once = normalize_str(&s);
            prop_assert_eq!(normalize_str(&once), once);
        }

        #[test]
        fn prop_canonical_charset(s in any::<String>()) {
            prop_assert!(is_canonical(&normalize_str(&s)));
        }

        #[test]
        fn prop_spanish_text_idempotent(s in "[a-zA-ZáéíóúÁÉÍÓÚñÑüÜ0-9 .,;:°*+\"'-]{0,64}") {
            let once = normalize_str(&s);
            prop_assert!(is_canonical(&once));
            prop_assert_eq!(normalize_str(&once), once);
        }
    }
}
