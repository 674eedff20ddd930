//! Accent- and case-insensitive product search.
//!
//! Matching is a linear scan: every candidate's title and description are
//! normalized with [`normalize`] and tested for substring containment of the
//! normalized query. Only published candidates can match, and matches are
//! returned newest first.
//!
//! An empty (or absent) query is a substring of every text, so it returns all
//! published candidates. This is intentional: `GET /api/products/search` with
//! no `q` behaves like a listing of the published catalog.

use chrono::{DateTime, Utc};

use crate::domain::entities::{Product, ProductStatus};
use crate::utils::text_normalizer::normalize;

/// A record the matcher can evaluate.
pub trait SearchCandidate {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn status(&self) -> ProductStatus;
    fn created_at(&self) -> DateTime<Utc>;
}

impl SearchCandidate for Product {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    fn status(&self) -> ProductStatus {
        self.status
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A query in normalized form, reusable across candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    normalized: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            normalized: normalize(raw),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// True if the candidate is published and its title or description
    /// contains the query.
    pub fn matches<C: SearchCandidate + ?Sized>(&self, candidate: &C) -> bool {
        if candidate.status() != ProductStatus::Published {
            return false;
        }
        if self.is_empty() {
            return true;
        }

        normalize(candidate.title()).contains(&self.normalized)
            || normalize(candidate.description()).contains(&self.normalized)
    }
}

/// Filters `candidates` down to published matches of `query`, newest first.
///
/// Candidates with equal `created_at` keep their input order.
pub fn search<C: SearchCandidate>(query: &str, candidates: Vec<C>) -> Vec<C> {
    let query = SearchQuery::new(query);

    let mut matches: Vec<C> = candidates
        .into_iter()
        .filter(|c| query.matches(c))
        .collect();

    // `sort_by` is stable.
    matches.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::product::test_support::product;
    use chrono::{Duration, TimeZone};

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_matches_title_ignoring_accents() {
        let candidates = vec![
            product(1, "Café con leche", ProductStatus::Published, t(0)),
            product(2, "Tea", ProductStatus::Published, t(1)),
        ];

        let result = search("cafe", candidates);
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn test_accented_query_matches_plain_text() {
        let candidates = vec![product(1, "Cafe con leche", ProductStatus::Published, t(0))];

        assert_eq!(ids(&search("CAFÉ", candidates.clone())), vec![1]);
        assert_eq!(ids(&search("leché", candidates)), vec![1]);
    }

    #[test]
    fn test_matches_description() {
        let mut p = product(1, "Taza", ProductStatus::Published, t(0));
        p.description = Some("Ideal para el café de la mañana".to_string());

        assert_eq!(ids(&search("manana", vec![p.clone()])), vec![1]);
        assert!(search("te verde", vec![p]).is_empty());
    }

    #[test]
    fn test_unpublished_never_returned() {
        let candidates = vec![
            product(1, "Café", ProductStatus::Draft, t(0)),
            product(2, "Café", ProductStatus::Paused, t(1)),
            product(3, "Café", ProductStatus::Closed, t(2)),
            product(4, "Café", ProductStatus::Published, t(3)),
        ];

        assert_eq!(ids(&search("cafe", candidates)), vec![4]);
    }

    #[test]
    fn test_newest_first() {
        let candidates = vec![
            product(1, "Café viejo", ProductStatus::Published, t(0)),
            product(2, "Café nuevo", ProductStatus::Published, t(0) + Duration::hours(1)),
        ];

        assert_eq!(ids(&search("cafe", candidates)), vec![2, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let candidates = vec![
            product(5, "Café a", ProductStatus::Published, t(10)),
            product(3, "Café b", ProductStatus::Published, t(10)),
            product(9, "Café c", ProductStatus::Published, t(10)),
            product(1, "Café d", ProductStatus::Published, t(20)),
        ];

        assert_eq!(ids(&search("cafe", candidates)), vec![1, 5, 3, 9]);
    }

    #[test]
    fn test_empty_query_returns_all_published() {
        let candidates = vec![
            product(1, "Uno", ProductStatus::Published, t(0)),
            product(2, "Dos", ProductStatus::Draft, t(1)),
            product(3, "Tres", ProductStatus::Published, t(2)),
        ];

        assert_eq!(ids(&search("", candidates)), vec![3, 1]);
    }

    #[test]
    fn test_query_is_normalized_once() {
        let q = SearchQuery::new("  ÑANDÚ ");
        assert_eq!(q, SearchQuery::new("  nandu "));
        assert!(!q.is_empty());
    }

    #[test]
    fn test_no_candidates() {
        let result: Vec<Product> = search("anything", Vec::new());
        assert!(result.is_empty());
    }
}
