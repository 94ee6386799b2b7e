//! Text normalization for product labels.
//!
//! Raw point-of-sale labels arrive as free text: inconsistent casing, color
//! suffixes, material descriptors and stray symbols. `clean` reduces a label
//! to a comparison key used for catalog matching; `display_clean` produces a
//! readable fallback name when no catalog entry matches.

/// Material/texture descriptors that carry no product identity.
///
/// Removal is a literal substring replacement, not word-boundary-safe:
/// "sinteticos" becomes "s". Matching behavior downstream depends on this
/// exact reduction, so it stays as-is.
const NOISE_WORDS: &[&str] = &[
    "tapiz",
    "americano",
    "importado",
    "decorativo",
    "textil",
    "sintetico",
    "bondeado",
];

/// Color tokens dropped from comparison keys (Spanish and English).
const COLOR_WORDS: &[&str] = &[
    "negro", "black", "noir", "azul", "blue", "rojo", "red", "gris", "grey", "gray", "blanco",
    "white", "cafe", "brown", "marron", "verde", "green", "plata", "silver", "beige", "naranja",
    "orange", "rosa", "pink", "tabaco", "caramelo", "arena", "vino", "oscuro", "dark", "claro",
    "light",
];

/// Reduce a raw label to its comparison key.
///
/// Steps, in order: lowercase, literal noise-word removal, non-alphanumeric
/// squashing, color-token drop. Pure and deterministic; empty input yields
/// an empty key.
pub fn clean(raw: &str) -> String {
    let mut s = raw.to_lowercase();

    for word in NOISE_WORDS {
        s = s.replace(word, "");
    }

    // Everything outside [a-z0-9] and whitespace becomes a space
    let squashed: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    squashed
        .split_whitespace()
        .filter(|token| !COLOR_WORDS.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clean a raw label for display: symbols stripped, whitespace collapsed,
/// Title Case. Colors and material words are kept — the label should stay
/// recognizable to whoever typed it.
pub fn display_clean(raw: &str) -> String {
    let squashed: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    title_case(&squashed.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// Title Case where any alphabetic char following a non-alphabetic one is
/// uppercased ("3mm foam" -> "3Mm Foam"), all other alphabetic chars
/// lowercased.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;

    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("VINIPIEL CLASICA NEGRO", "vinipiel clasica" ; "color token dropped")]
    #[test_case("Tela Cordoba (Azul)", "tela cordoba" ; "symbols and color")]
    #[test_case("TAPIZ TELA MALAGA", "tela malaga" ; "noise word removed")]
    #[test_case("ESPUMA 1/2 PLG", "espuma 1 2 plg" ; "slash becomes space")]
    #[test_case("", "" ; "empty input")]
    #[test_case("   ", "" ; "whitespace only")]
    fn clean_reduces_to_key(raw: &str, expected: &str) {
        assert_eq!(clean(raw), expected);
    }

    #[test]
    fn clean_is_idempotent_on_its_own_output() {
        let samples = [
            "VINIPIEL CLASICA NEGRO",
            "Tela Jacquard Premium - Rojo",
            "pvc bonde 3116",
            "GRAPAS 80/08 caja",
        ];
        for raw in samples {
            let once = clean(raw);
            assert_eq!(clean(&once), once, "clean not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn noise_removal_is_substring_based() {
        // "sintetico" inside "sinteticos" leaves the trailing "s" behind.
        // Intentional: the catalog keys were built with the same reduction.
        assert_eq!(clean("cueros sinteticos"), "cueros s");
    }

    #[test_case("vinipiel clasica  negro", "Vinipiel Clasica Negro" ; "collapses spaces keeps color")]
    #[test_case("TELA CORDOBA (AZUL)", "Tela Cordoba Azul" ; "uppercase input")]
    #[test_case("goma eva 3mm", "Goma Eva 3Mm" ; "digit boundary restarts casing")]
    #[test_case("", "" ; "empty input")]
    fn display_clean_produces_title_case(raw: &str, expected: &str) {
        assert_eq!(display_clean(raw), expected);
    }

    #[test]
    fn display_clean_keeps_noise_words() {
        assert_eq!(display_clean("tapiz importado fino"), "Tapiz Importado Fino");
    }
}
