//! Sidebar note filtering.
//!
//! A pure, synchronous filter over the user's already-fetched note list.
//! An empty query returns every note in its original (fetch) order; a
//! non-empty query runs a typo-tolerant fuzzy match against note content and
//! returns matches in relevance order.

use nucleo_matcher::{
    pattern::{CaseMatching, Normalization, Pattern},
    Config, Matcher, Utf32Str,
};
use tracing::trace;

use quill_core::NoteSummary;

/// Filter configuration.
#[derive(Debug, Clone, Copy)]
pub struct FilterConfig {
    /// Minimum match score to keep a note. Zero keeps every fuzzy match the
    /// matcher reports; raising it tightens the match looseness.
    pub min_score: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { min_score: 0 }
    }
}

/// Filter notes by a live search string.
///
/// Matches are scored against the note content (the field the user is
/// searching, not the title) and returned best-first. Ties keep fetch order
/// (the sort is stable).
pub fn filter_notes(notes: &[NoteSummary], query: &str, config: FilterConfig) -> Vec<NoteSummary> {
    if query.is_empty() {
        return notes.to_vec();
    }

    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);

    let mut matches: Vec<(NoteSummary, u32)> = notes
        .iter()
        .filter_map(|note| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(&note.content, &mut buf);
            pattern
                .score(haystack, &mut matcher)
                .filter(|score| *score >= config.min_score)
                .map(|score| (note.clone(), score))
        })
        .collect();

    matches.sort_by(|a, b| b.1.cmp(&a.1));

    trace!(
        subsystem = "web",
        component = "sidebar",
        op = "filter",
        query = %query,
        result_count = matches.len(),
        "Filtered sidebar notes"
    );

    matches.into_iter().map(|(note, _)| note).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn note(content: &str) -> NoteSummary {
        NoteSummary {
            id: Uuid::now_v7(),
            title: content.to_string(),
            content: content.to_string(),
            created_at_utc: Utc::now(),
        }
    }

    fn contents(notes: &[NoteSummary]) -> Vec<&str> {
        notes.iter().map(|n| n.content.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_in_original_order() {
        let notes = vec![note("Buy milk"), note("Call mom"), note("Milkshake recipe")];
        let filtered = filter_notes(&notes, "", FilterConfig::default());
        assert_eq!(
            contents(&filtered),
            vec!["Buy milk", "Call mom", "Milkshake recipe"]
        );
    }

    #[test]
    fn test_milk_matches_approximately() {
        let notes = vec![note("Buy milk"), note("Call mom"), note("Milkshake recipe")];
        let filtered = filter_notes(&notes, "milk", FilterConfig::default());

        let found = contents(&filtered);
        assert!(found.contains(&"Buy milk"));
        assert!(found.contains(&"Milkshake recipe"));
        assert!(!found.contains(&"Call mom"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let notes = vec![note("MILK delivery schedule")];
        let filtered = filter_notes(&notes, "milk", FilterConfig::default());
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_results_are_relevance_ordered() {
        // A consecutive word match outranks a match scattered across words,
        // regardless of fetch order.
        let notes = vec![note("camille kept the list"), note("fresh milk")];
        let filtered = filter_notes(&notes, "milk", FilterConfig::default());
        assert_eq!(
            filtered.first().map(|n| n.content.as_str()),
            Some("fresh milk")
        );
    }

    #[test]
    fn test_no_match_yields_empty() {
        let notes = vec![note("Buy milk")];
        let filtered = filter_notes(&notes, "zzzqqq", FilterConfig::default());
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_min_score_tightens_filter() {
        let notes = vec![note("Buy milk")];
        let loose = filter_notes(&notes, "milk", FilterConfig { min_score: 0 });
        assert_eq!(loose.len(), 1);

        let strict = filter_notes(&notes, "milk", FilterConfig { min_score: u32::MAX });
        assert!(strict.is_empty());
    }

    #[test]
    fn test_filter_over_empty_list() {
        assert!(filter_notes(&[], "milk", FilterConfig::default()).is_empty());
        assert!(filter_notes(&[], "", FilterConfig::default()).is_empty());
    }
}
