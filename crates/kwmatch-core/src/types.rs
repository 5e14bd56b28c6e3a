//! Domain types shared by the engine and its I/O collaborators.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type SubjectKey = String;

/// Match results for a whole run, keyed by subject. Iteration order is the
/// subject key order, never the order documents were processed in.
pub type MatchRecord = BTreeMap<SubjectKey, MatchedKeywords>;

/// One input document.
///
/// - `subject`: unique key within a run (usually the file stem)
/// - `raw`: text as decoded by the input collaborator, never modified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub subject: SubjectKey,
    pub raw: String,
}

impl Document {
    pub fn new(subject: impl Into<String>, raw: impl Into<String>) -> Self {
        Self { subject: subject.into(), raw: raw.into() }
    }
}

/// Curated keyword list in source order.
///
/// Entries are trimmed and blank entries dropped on construction. Duplicates
/// are kept since the list order drives report ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordList(Vec<String>);

impl KeywordList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_string())
                .filter(|e| !e.is_empty())
                .collect(),
        )
    }

    /// One keyword per line.
    pub fn parse(text: &str) -> Self { Self::new(text.lines()) }

    pub fn as_slice(&self) -> &[String] { &self.0 }

    pub fn iter(&self) -> std::slice::Iter<'_, String> { self.0.iter() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl From<Vec<String>> for KeywordList {
    fn from(entries: Vec<String>) -> Self { Self::new(entries) }
}

impl From<KeywordList> for Vec<String> {
    fn from(list: KeywordList) -> Self { list.0 }
}

impl<'a> IntoIterator for &'a KeywordList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// Keywords found in one document, in first-match order, each at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchedKeywords(Vec<String>);

impl MatchedKeywords {
    /// Returns `false` when the keyword was already present.
    pub fn insert(&mut self, keyword: &str) -> bool {
        if self.contains(keyword) {
            return false;
        }
        self.0.push(keyword.to_string());
        true
    }

    pub fn contains(&self, keyword: &str) -> bool { self.0.iter().any(|k| k == keyword) }

    pub fn as_slice(&self) -> &[String] { &self.0 }

    pub fn iter(&self) -> std::slice::Iter<'_, String> { self.0.iter() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl<S: AsRef<str>> FromIterator<S> for MatchedKeywords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut matched = Self::default();
        for keyword in iter {
            matched.insert(keyword.as_ref());
        }
        matched
    }
}

impl<'a> IntoIterator for &'a MatchedKeywords {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_list_trims_and_keeps_duplicates() {
        let list = KeywordList::parse("  A \n\n B\n   \nA\n");
        assert_eq!(list.as_slice(), ["A", "B", "A"]);
    }

    #[test]
    fn keyword_list_of_blank_text_is_empty() {
        assert!(KeywordList::parse(" \n\t\n").is_empty());
    }

    #[test]
    fn matched_keywords_collapse_duplicates() {
        let matched: MatchedKeywords = ["A", "B", "A"].into_iter().collect();
        assert_eq!(matched.as_slice(), ["A", "B"]);
    }
}
