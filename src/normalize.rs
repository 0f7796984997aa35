use unicode_normalization::{char::canonical_combining_class, UnicodeNormalization};

/// Canonical comparison form of a name.
///
/// Steps, in order: NFKD decomposition, removal of every code point with a
/// non-zero canonical combining class, whitespace runs collapsed to one ASCII
/// space, outer whitespace trimmed, then full Unicode case folding (so `ß`
/// folds to `ss`). The result is stable under re-application.
pub fn normalize(raw: &str) -> String {
    let stripped: String = raw
        .nfkd()
        .filter(|c| canonical_combining_class(*c) == 0)
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    caseless::default_case_fold_str(&collapsed)
}

/// Same as [`normalize`], with an absent value treated as the empty string.
pub fn normalize_opt(raw: Option<&str>) -> String {
    raw.map(normalize).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics() {
        assert_eq!(normalize("José"), normalize("Jose"));
        assert_eq!(normalize("Zoë Brontë"), "zoe bronte");
        // decomposed input (e + U+0301) lands on the same form as precomposed
        assert_eq!(normalize("Jose\u{301}"), normalize("José"));
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  Jane   Doe "), normalize("Jane Doe"));
        assert_eq!(normalize("Jane\t\n Doe"), "jane doe");
        // NBSP decomposes to a plain space under NFKD
        assert_eq!(normalize("Jane\u{a0}Doe"), "jane doe");
    }

    #[test]
    fn folds_case() {
        assert_eq!(normalize("O'Brien"), normalize("o'brien"));
        assert_eq!(normalize("STRASSE"), normalize("Straße"));
        assert_eq!(normalize("ẞ"), "ss");
    }

    #[test]
    fn absent_is_empty() {
        assert_eq!(normalize_opt(None), "");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t "), "");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "José",
            "  Jane   Doe ",
            "Straße",
            "İstanbul",
            "ǅemal",
            "ﬁnn",
            "Ångström",
            "Σίσυφος",
            "O'Brien-Smith\u{2003}Jr.",
            "\u{feff}Pure ID",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
