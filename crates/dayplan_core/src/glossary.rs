//! Static IT terminology glossary.
//!
//! # Responsibility
//! - Hold the hard-coded read-only term list shown on the glossary page.
//! - Pick the rotating "terms of the day" deterministically from the date,
//!   so every device shows the same selection without shared state.
//!
//! # Invariants
//! - Term ids are unique and stable across releases.
//! - `daily_terms` is a pure function of `(date, count)`.

use chrono::NaiveDate;

/// One glossary entry: stable id plus display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub id: u32,
    pub label: &'static str,
}

const TERMS: &[Term] = &[
    Term { id: 1, label: "e-Marketplace" },
    Term { id: 2, label: "Dropshipping" },
    Term { id: 3, label: "AI File" },
    Term { id: 4, label: "O2O (online to offline)" },
    Term { id: 5, label: "Consumer Decision Journey" },
    Term { id: 6, label: "NCP (Network Control Protocol)" },
    Term { id: 7, label: "Spinoff" },
    Term { id: 8, label: "Killer Contents" },
    Term { id: 9, label: "Library" },
    Term { id: 10, label: "Mockup" },
    Term { id: 11, label: "API (Application Programming Interface)" },
    Term { id: 12, label: "SaaS (Software as a Service)" },
    Term { id: 13, label: "CDN (Content Delivery Network)" },
    Term { id: 14, label: "DNS (Domain Name System)" },
    Term { id: 15, label: "ORM (Object-Relational Mapping)" },
    Term { id: 16, label: "CI/CD" },
    Term { id: 17, label: "Refactoring" },
    Term { id: 18, label: "Load Balancer" },
    Term { id: 19, label: "Cache" },
    Term { id: 20, label: "Webhook" },
    Term { id: 21, label: "OAuth" },
    Term { id: 22, label: "REST (Representational State Transfer)" },
    Term { id: 23, label: "GraphQL" },
    Term { id: 24, label: "Containerization" },
    Term { id: 25, label: "Serverless" },
    Term { id: 26, label: "A/B Test" },
    Term { id: 27, label: "MVP (Minimum Viable Product)" },
    Term { id: 28, label: "Technical Debt" },
    Term { id: 29, label: "Observability" },
    Term { id: 30, label: "Idempotency" },
];

/// Full read-only term list in id order.
pub fn all_terms() -> &'static [Term] {
    TERMS
}

/// Resolves a term label by id.
pub fn term_label(id: u32) -> Option<&'static str> {
    TERMS.iter().find(|term| term.id == id).map(|term| term.label)
}

/// Picks `count` terms for the given date.
///
/// The pick is seeded from the ISO date string, so the selection changes
/// once per day and is identical everywhere. `count` is clamped to the
/// glossary size.
pub fn daily_terms(date: NaiveDate, count: usize) -> Vec<Term> {
    let count = count.min(TERMS.len());
    if count == 0 {
        return Vec::new();
    }

    let seed = blake3::hash(date.format("%Y-%m-%d").to_string().as_bytes());
    let mut indices: Vec<usize> = (0..TERMS.len()).collect();

    // Fisher-Yates driven by the hash bytes, cycling through the digest.
    let bytes = seed.as_bytes();
    for i in (1..indices.len()).rev() {
        let byte = bytes[i % bytes.len()] as usize;
        indices.swap(i, byte % (i + 1));
    }

    indices.into_iter().take(count).map(|i| TERMS[i]).collect()
}

#[cfg(test)]
mod tests {
    use super::{all_terms, daily_terms, term_label};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn term_ids_are_unique() {
        let ids: HashSet<u32> = all_terms().iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), all_terms().len());
    }

    #[test]
    fn daily_pick_is_deterministic_per_date() {
        let day = date(2024, 3, 1);
        assert_eq!(daily_terms(day, 3), daily_terms(day, 3));

        let distinct: HashSet<Vec<u32>> = (1..=7)
            .map(|d| daily_terms(date(2024, 3, d), 3).iter().map(|t| t.id).collect())
            .collect();
        assert!(distinct.len() > 1, "selection never rotated over a week");
    }

    #[test]
    fn daily_pick_has_no_duplicates_and_clamps_count() {
        let picked = daily_terms(date(2024, 3, 1), 999);
        let ids: HashSet<u32> = picked.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), all_terms().len());
    }

    #[test]
    fn label_lookup() {
        assert_eq!(term_label(2), Some("Dropshipping"));
        assert_eq!(term_label(9999), None);
    }
}
