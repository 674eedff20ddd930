//! URL slug derivation for product titles.

use regex::Regex;
use std::sync::LazyLock;

use super::text_normalizer::normalize;

/// Runs of anything that is not an ASCII letter or digit.
static SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid separator regex"));

/// Slug used when a title yields no usable characters.
pub const FALLBACK_SLUG: &str = "product";

/// Builds a URL slug from a product title.
///
/// The title is normalized (lowercase, accents folded), every run of
/// non-alphanumeric characters becomes a single `-`, and leading/trailing
/// dashes are trimmed.
///
/// # Examples
///
/// ```
/// use marketplace_catalog::utils::slug::slugify;
///
/// assert_eq!(slugify("Café con Leche 500ml"), "cafe-con-leche-500ml");
/// assert_eq!(slugify("¡¡¡"), "product");
/// ```
pub fn slugify(title: &str) -> String {
    let normalized = normalize(title);
    let slug = SEPARATOR_REGEX.replace_all(&normalized, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Zapatillas Running"), "zapatillas-running");
    }

    #[test]
    fn test_slugify_accents_and_punctuation() {
        assert_eq!(slugify("  Niño & Niña: Camión!  "), "nino-nina-camion");
    }

    #[test]
    fn test_slugify_empty_falls_back() {
        assert_eq!(slugify(""), FALLBACK_SLUG);
        assert_eq!(slugify("---"), FALLBACK_SLUG);
    }

    #[test]
    fn test_slugify_drops_non_latin() {
        assert_eq!(slugify("Tokyo 東京 2024"), "tokyo-2024");
    }
}
