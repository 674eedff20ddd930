//! Text normalization for case- and accent-insensitive comparison.
//!
//! [`normalize`] lowercases with full Unicode case mapping and then folds the
//! accented Latin letters listed in [`fold_diacritic`] onto their base letter.
//! Characters outside that table pass through untouched.
//!
//! ```
//! use marketplace_catalog::utils::text_normalizer::normalize;
//!
//! assert_eq!(normalize("CAFÉ"), "cafe");
//! assert_eq!(normalize("Ñoño"), "nono");
//! ```

/// Returns the canonical comparison form of `text`.
///
/// Total and idempotent: `normalize(&normalize(s)) == normalize(s)` for every `s`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        for lower in c.to_lowercase() {
            out.push(fold_diacritic(lower));
        }
    }
    out
}

/// Maps a lowercase accented letter to its unaccented base letter.
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'ã' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'õ' | 'ô' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'ñ' => 'n',
        other => other,
    }
}
