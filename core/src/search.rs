//! Free-text search over the full (unfiltered) event collection.
//!
//! A query is split on whitespace; an event matches when every word occurs
//! somewhere in its title, localized title or description. Matches are then
//! ranked so title hits come first, and truncated to the view's limit.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Event;

/// Results shown in the list and timeline dropdowns.
pub const LIST_RESULT_LIMIT: usize = 10;
/// Results shown in the map dropdown.
pub const MAP_RESULT_LIMIT: usize = 8;
/// Queries shorter than this (in characters, after trimming) do not search.
pub const MIN_QUERY_CHARS: usize = 2;

/// How matches are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranking {
    /// Exact title, then title contains the query, then everything else.
    #[default]
    TitleFirst,
    /// Numeric score (exact 1000, prefix 500, title 300, short description
    /// 100, description 50); unscored matches are dropped.
    Scored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    pub ranking: Ranking,
}

impl SearchOptions {
    pub fn list() -> Self {
        SearchOptions {
            limit: LIST_RESULT_LIMIT,
            ranking: Ranking::TitleFirst,
        }
    }

    pub fn map() -> Self {
        SearchOptions {
            limit: MAP_RESULT_LIMIT,
            ranking: Ranking::TitleFirst,
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions::list()
    }
}

/// What the results panel should do after a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// Query too short: close the panel.
    Closed,
    /// Open the panel; an empty list means "no events found".
    Results(Vec<&'a Event>),
}

impl<'a> SearchOutcome<'a> {
    pub fn results(&self) -> &[&'a Event] {
        match self {
            SearchOutcome::Closed => &[],
            SearchOutcome::Results(r) => r,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, SearchOutcome::Results(_))
    }
}

/// Lowercased query words.
pub fn query_words(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_lowercase).collect()
}

/// Concatenated, lowercased text a query is matched against.
pub fn haystack(event: &Event) -> String {
    let parts = [
        event.title.as_deref().unwrap_or_default(),
        event.localized_title.as_deref().unwrap_or_default(),
        event.description.as_deref().unwrap_or_default(),
    ];
    parts.join(" ").to_lowercase()
}

/// True when every word is a substring of the event's searchable text.
pub fn matches_all_words(event: &Event, words: &[String]) -> bool {
    let text = haystack(event);
    words.iter().all(|w| text.contains(w.as_str()))
}

fn title_tier(event: &Event, query: &str) -> u8 {
    let title = event.title.as_deref().unwrap_or_default().to_lowercase();
    if title == query {
        2
    } else if title.contains(query) {
        1
    } else {
        0
    }
}

/// Relevance score for [`Ranking::Scored`]; `query` must be lowercased.
pub fn relevance(event: &Event, query: &str) -> u32 {
    let title = event.title.as_deref().unwrap_or_default().to_lowercase();
    let contains = |field: Option<&str>| {
        field
            .map(|f| f.to_lowercase().contains(query))
            .unwrap_or(false)
    };
    if title == query {
        1000
    } else if title.starts_with(query) {
        500
    } else if title.contains(query) {
        300
    } else if contains(event.short_description.as_deref()) {
        100
    } else if contains(event.description.as_deref()) {
        50
    } else {
        0
    }
}

/// Search `events` (the full collection) for `query`.
pub fn search<'a>(events: &'a [Event], query: &str, options: SearchOptions) -> SearchOutcome<'a> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return SearchOutcome::Closed;
    }
    let lowered = query.to_lowercase();
    let words = query_words(&lowered);

    let matched = events.iter().filter(|e| matches_all_words(e, &words));
    let mut results: Vec<&Event> = match options.ranking {
        Ranking::TitleFirst => {
            let mut ranked: Vec<(u8, &Event)> =
                matched.map(|e| (title_tier(e, &lowered), e)).collect();
            ranked.sort_by(|a, b| b.0.cmp(&a.0));
            ranked.into_iter().map(|(_, e)| e).collect()
        }
        Ranking::Scored => {
            let mut scored: Vec<(u32, &Event)> = matched
                .map(|e| (relevance(e, &lowered), e))
                .filter(|(score, _)| *score > 0)
                .collect();
            scored.sort_by(|a, b| b.0.cmp(&a.0));
            scored.into_iter().map(|(_, e)| e).collect()
        }
    };
    results.truncate(options.limit);
    debug!(query, found = results.len(), "search");
    SearchOutcome::Results(results)
}
