//! Aggregate statistics over a run's match records.
//!
//! Every ordering here comes from an explicit sort key, so results do not
//! depend on the order documents were processed in.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use crate::types::{KeywordList, MatchRecord, SubjectKey};

/// Number of subjects in the ranking facet.
pub const TOP_SUBJECTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectCount {
    pub subject: SubjectKey,
    pub count: usize,
}

/// Ranking facet. `NoSubjects` is distinct from a ranking in which every
/// subject scored zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "subjects", rename_all = "snake_case")]
pub enum TopSubjects {
    NoSubjects,
    Ranked(Vec<SubjectCount>),
}

impl TopSubjects {
    pub fn as_slice(&self) -> &[SubjectCount] {
        match self {
            Self::NoSubjects => &[],
            Self::Ranked(ranked) => ranked.as_slice(),
        }
    }
}

/// Read-only view recomputed from scratch on every run.
///
/// - `keyword_counts`: one entry per configured keyword, list order,
///   duplicates included
/// - `top_subjects`: up to [`TOP_SUBJECTS`] by distinct hits desc, then key asc
/// - `zero_match`: subjects without a single hit, key asc
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub keyword_counts: Vec<KeywordCount>,
    pub top_subjects: TopSubjects,
    pub zero_match: Vec<SubjectKey>,
}

/// Distinct keyword count per subject. Match lists are treated as plain sets.
pub fn subject_match_counts(matches: &MatchRecord) -> Vec<SubjectCount> {
    matches
        .iter()
        .map(|(subject, found)| SubjectCount {
            subject: subject.clone(),
            count: found.iter().collect::<BTreeSet<_>>().len(),
        })
        .collect()
}

/// Number of distinct subjects containing each keyword.
fn keyword_hits(matches: &MatchRecord) -> HashMap<&str, usize> {
    let mut hits: HashMap<&str, usize> = HashMap::new();
    for found in matches.values() {
        for keyword in found.iter().map(String::as_str).collect::<BTreeSet<_>>() {
            *hits.entry(keyword).or_default() += 1;
        }
    }
    hits
}

/// Subjects ranked by distinct hits descending, ties by key ascending.
pub fn rank_subjects(matches: &MatchRecord, limit: usize) -> TopSubjects {
    if matches.is_empty() {
        return TopSubjects::NoSubjects;
    }
    let mut counts = subject_match_counts(matches);
    counts.sort_by(|a, b| {
        (Reverse(a.count), &a.subject).cmp(&(Reverse(b.count), &b.subject))
    });
    counts.truncate(limit);
    TopSubjects::Ranked(counts)
}

pub fn zero_match_subjects(matches: &MatchRecord) -> Vec<SubjectKey> {
    let mut subjects: Vec<SubjectKey> = subject_match_counts(matches)
        .into_iter()
        .filter(|c| c.count == 0)
        .map(|c| c.subject)
        .collect();
    subjects.sort();
    subjects
}

pub fn summarize(keywords: &KeywordList, matches: &MatchRecord) -> Summary {
    let hits = keyword_hits(matches);
    let keyword_counts = keywords
        .iter()
        .map(|k| KeywordCount {
            keyword: k.clone(),
            count: hits.get(k.as_str()).copied().unwrap_or(0),
        })
        .collect();
    Summary {
        keyword_counts,
        top_subjects: rank_subjects(matches, TOP_SUBJECTS),
        zero_match: zero_match_subjects(matches),
    }
}

/// Listing mode: every distinct keyword (configured or seen in the records)
/// with its hit count, count descending then keyword ascending.
pub fn keyword_hit_counts(
    keywords: &KeywordList,
    matches: &MatchRecord,
) -> Vec<KeywordCount> {
    let hits = keyword_hits(matches);
    let names: BTreeSet<&str> =
        keywords.iter().map(String::as_str).chain(hits.keys().copied()).collect();
    let mut counts: Vec<KeywordCount> = names
        .into_iter()
        .map(|k| KeywordCount {
            keyword: k.to_string(),
            count: hits.get(k).copied().unwrap_or(0),
        })
        .collect();
    counts.sort_by(|a, b| {
        (Reverse(a.count), &a.keyword).cmp(&(Reverse(b.count), &b.keyword))
    });
    counts
}

/// Search mode: subjects whose match set contains `keyword` exactly, key
/// ascending. Empty means no subject matched; unknown keywords are not an error.
pub fn subjects_with_keyword(matches: &MatchRecord, keyword: &str) -> Vec<SubjectKey> {
    matches
        .iter()
        .filter(|(_, found)| found.contains(keyword))
        .map(|(subject, _)| subject.clone())
        .collect()
}
