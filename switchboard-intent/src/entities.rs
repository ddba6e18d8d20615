//! Entity extraction.
//!
//! A fixed table of recognition patterns per entity kind, applied against
//! the original (case-preserving) query text. Confidence starts at a base
//! value and is boosted for capitalized tokens and for the presence of
//! kind-specific marker words. Overlapping same-kind matches are
//! deduplicated keeping the highest-confidence one.

use crate::normalize::{contains_keyword, NormalizedQuery};
use once_cell::sync::Lazy;
use regex::Regex;
use switchboard_core::{Entity, EntityKind, EntityProvenance};

/// Base confidence for a raw pattern match.
const BASE_CONFIDENCE: f32 = 0.5;
/// Boost when the matched token is capitalized.
const CAPITALIZED_BOOST: f32 = 0.2;
/// Boost when a kind-specific marker word appears in the query.
const MARKER_BOOST: f32 = 0.2;

struct PatternEntry {
    kind: EntityKind,
    patterns: Vec<Regex>,
    markers: &'static [&'static str],
}

static PATTERN_TABLE: Lazy<Vec<PatternEntry>> = Lazy::new(|| {
    vec![
        PatternEntry {
            kind: EntityKind::Customer,
            // Multi-word proper names ("John Smith", "Ana de Souza" reduces
            // to the capitalized runs).
            patterns: vec![Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+\b").unwrap()],
            markers: &["customer", "client", "account", "for"],
        },
        PatternEntry {
            kind: EntityKind::WorkOrder,
            patterns: vec![
                Regex::new(r"(?i)\bwo[-#]?(\d+)\b").unwrap(),
                Regex::new(r"(?i)\bwork\s*order\s*#?(\d+)\b").unwrap(),
            ],
            markers: &["work order", "wo"],
        },
        PatternEntry {
            kind: EntityKind::Technician,
            patterns: vec![
                Regex::new(r"\b[Tt]ech(?:nician)?\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)").unwrap(),
            ],
            markers: &["technician", "tech", "assign"],
        },
        PatternEntry {
            kind: EntityKind::Date,
            patterns: vec![
                Regex::new(r"(?i)\b(today|tomorrow|yesterday|monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b").unwrap(),
                Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap(),
                Regex::new(r"\b\d{1,2}/\d{1,2}(?:/\d{2,4})?\b").unwrap(),
            ],
            markers: &["on", "schedule", "reschedule", "by"],
        },
        PatternEntry {
            kind: EntityKind::Location,
            patterns: vec![
                Regex::new(r"\b\d{5}(?:-\d{4})?\b").unwrap(),
                Regex::new(r"\b(?:at|in)\s+([A-Z][A-Za-z]+(?:\s+[A-Z][A-Za-z]+)*)").unwrap(),
            ],
            markers: &["at", "in", "near", "address"],
        },
        PatternEntry {
            kind: EntityKind::ServiceType,
            patterns: vec![
                Regex::new(r"(?i)\b(heating|cooling|hvac|plumbing|electrical|roofing|appliance|installation|maintenance|repair|inspection)\b").unwrap(),
            ],
            markers: &["issue", "problem", "service", "system"],
        },
    ]
});

struct Candidate {
    kind: EntityKind,
    value: String,
    confidence: f32,
    position: usize,
    marker: Option<&'static str>,
}

/// Extract entities from a query, deduplicated per kind.
///
/// Deterministic: identical input always yields the identical list, and no
/// two returned entities of the same kind have one value fully containing
/// the other.
pub fn extract_entities(query: &NormalizedQuery) -> Vec<Entity> {
    let mut candidates: Vec<Candidate> = Vec::new();

    for entry in PATTERN_TABLE.iter() {
        let marker = entry
            .markers
            .iter()
            .copied()
            .find(|m| contains_keyword(&query.normalized, m));

        for pattern in &entry.patterns {
            for caps in pattern.captures_iter(&query.original) {
                let m = caps.get(1).or_else(|| caps.get(0)).unwrap();
                let value = m.as_str().trim().to_string();
                if value.is_empty() {
                    continue;
                }
                let mut confidence = BASE_CONFIDENCE;
                if value.chars().next().is_some_and(|c| c.is_uppercase()) {
                    confidence += CAPITALIZED_BOOST;
                }
                if marker.is_some() {
                    confidence += MARKER_BOOST;
                }
                candidates.push(Candidate {
                    kind: entry.kind,
                    value,
                    confidence: confidence.min(1.0),
                    position: m.start(),
                    marker,
                });
            }
        }
    }

    dedup(candidates)
}

/// Keep, per kind, the highest-confidence candidates with no value
/// containment among the survivors. Ties break on earlier position.
fn dedup(mut candidates: Vec<Candidate>) -> Vec<Entity> {
    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.position.cmp(&b.position))
    });

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        let contained = kept.iter().any(|k| {
            k.kind == candidate.kind && {
                let a = k.value.to_lowercase();
                let b = candidate.value.to_lowercase();
                a.contains(&b) || b.contains(&a)
            }
        });
        if !contained {
            kept.push(candidate);
        }
    }

    // Final list ordered by appearance in the text.
    kept.sort_by_key(|c| c.position);
    kept.into_iter()
        .map(|c| Entity {
            kind: c.kind,
            value: c.value,
            confidence: c.confidence,
            provenance: EntityProvenance::pattern(c.marker.unwrap_or("pattern")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn extract(text: &str) -> Vec<Entity> {
        extract_entities(&normalize(text))
    }

    #[test]
    fn test_customer_name_extracted() {
        let entities = extract("Show me John Smith's activity summary");
        let customer = entities
            .iter()
            .find(|e| e.kind == EntityKind::Customer)
            .expect("customer entity");
        assert_eq!(customer.value, "John Smith");
        // Capitalized + "for" marker absent: base + capitalization
        assert!(customer.confidence >= BASE_CONFIDENCE + CAPITALIZED_BOOST - f32::EPSILON);
    }

    #[test]
    fn test_work_order_number_extracted() {
        let entities = extract("Reassign WO-1042 to another tech");
        let wo = entities
            .iter()
            .find(|e| e.kind == EntityKind::WorkOrder)
            .expect("work order entity");
        assert_eq!(wo.value, "1042");
    }

    #[test]
    fn test_service_type_extracted() {
        let entities = extract("Create a ticket for heating issue");
        let service = entities
            .iter()
            .find(|e| e.kind == EntityKind::ServiceType)
            .expect("service type entity");
        assert_eq!(service.value.to_lowercase(), "heating");
    }

    #[test]
    fn test_marker_word_boosts_confidence() {
        let with_marker = extract("Look up customer John Smith");
        let without_marker = extract("Look up John Smith");
        let a = with_marker
            .iter()
            .find(|e| e.kind == EntityKind::Customer)
            .unwrap();
        let b = without_marker
            .iter()
            .find(|e| e.kind == EntityKind::Customer)
            .unwrap();
        assert!(a.confidence > b.confidence);
    }

    #[test]
    fn test_no_same_kind_containment() {
        let entities = extract("Schedule John Smith and John for tomorrow");
        let customers: Vec<_> = entities
            .iter()
            .filter(|e| e.kind == EntityKind::Customer)
            .collect();
        for a in &customers {
            for b in &customers {
                if a.value != b.value {
                    assert!(
                        !a.value.to_lowercase().contains(&b.value.to_lowercase()),
                        "{} contains {}",
                        a.value,
                        b.value
                    );
                }
            }
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let a = extract("Assign technician Dana Reyes to WO-7 tomorrow in Springfield");
        let b = extract("Assign technician Dana Reyes to WO-7 tomorrow in Springfield");
        assert_eq!(a, b);
    }

    #[test]
    fn test_dates_extracted() {
        let entities = extract("Reschedule the visit to 2026-08-12");
        assert!(entities.iter().any(|e| e.kind == EntityKind::Date));
        let entities = extract("Book it for tomorrow");
        assert!(entities
            .iter()
            .any(|e| e.kind == EntityKind::Date && e.value.eq_ignore_ascii_case("tomorrow")));
    }
}
