//! Dictionary entry and lookup response types

use serde::{Deserialize, Serialize};

/// A single lookup result as returned by the dictionary API.
///
/// Every field except the headword may be absent independently, so the
/// optional ones stay `Option` all the way to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(rename = "word", alias = "headword")]
    pub headword: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Meaning in the secondary display language (Hindi)
    #[serde(
        rename = "hindi_meaning",
        alias = "hindiMeaning",
        alias = "meaning",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub meaning: Option<String>,
}

impl DictionaryEntry {
    pub fn new(id: impl Into<String>, headword: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            headword: headword.into(),
            gender: None,
            definition: None,
            reference: None,
            meaning: None,
        }
    }
}

/// Envelope of `GET /word`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub success: bool,
    #[serde(default)]
    pub results: Vec<DictionaryEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LookupResponse {
    pub fn ok(results: Vec<DictionaryEntry>) -> Self {
        Self {
            success: true,
            results,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            results: Vec::new(),
            error: Some(error.into()),
        }
    }
}
