//! Search request parameters and the field filter

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::ShabdaError;

/// Entry field the search term must match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterTag {
    Headword,
    Definition,
    Reference,
}

impl FilterTag {
    pub const ALL: [FilterTag; 3] = [FilterTag::Headword, FilterTag::Definition, FilterTag::Reference];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterTag::Headword => "headword",
            FilterTag::Definition => "definition",
            FilterTag::Reference => "reference",
        }
    }
}

impl fmt::Display for FilterTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterTag {
    type Err = ShabdaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "headword" | "word" => Ok(FilterTag::Headword),
            "definition" => Ok(FilterTag::Definition),
            "reference" => Ok(FilterTag::Reference),
            other => Err(ShabdaError::Other(format!("Unknown filter tag: {}", other))),
        }
    }
}

/// Zero-or-one active filter with toggle semantics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSelection(Option<FilterTag>);

impl FilterSelection {
    pub fn active(&self) -> Option<FilterTag> {
        self.0
    }

    /// Selecting the active tag clears it; any other tag replaces it.
    /// Returns the new active tag.
    pub fn toggle(&mut self, tag: FilterTag) -> Option<FilterTag> {
        self.0 = if self.0 == Some(tag) { None } else { Some(tag) };
        self.0
    }
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Normalize a raw search term: trim and collapse whitespace runs
pub fn normalize_term(raw: &str) -> String {
    whitespace_runs().replace_all(raw.trim(), " ").into_owned()
}

/// The (term, filter) pair that fully determines a lookup.
///
/// Both the suggestion list and the results screen build their request from
/// this, so the same inputs always produce the same query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawSearchRequest")]
pub struct SearchRequest {
    term: String,
    filter: Option<FilterTag>,
}

#[derive(Deserialize)]
struct RawSearchRequest {
    term: String,
    #[serde(default)]
    filter: Option<FilterTag>,
}

impl From<RawSearchRequest> for SearchRequest {
    fn from(raw: RawSearchRequest) -> Self {
        SearchRequest::new(&raw.term, raw.filter)
    }
}

impl SearchRequest {
    pub fn new(term: &str, filter: Option<FilterTag>) -> Self {
        Self {
            term: normalize_term(term),
            filter,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn filter(&self) -> Option<FilterTag> {
        self.filter
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }
}
