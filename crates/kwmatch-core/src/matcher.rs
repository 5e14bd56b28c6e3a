use crate::normalize::fold_key;
use crate::types::{KeywordList, MatchedKeywords};

#[derive(Debug, Clone)]
struct KeywordEntry {
    keyword: String,
    lowered: String,
    folded: String,
}

impl KeywordEntry {
    fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            lowered: keyword.to_lowercase(),
            folded: fold_key(keyword),
        }
    }

    // An empty fold key only ever matches literally.
    fn matches(&self, cleaned: &str, folded_text: &str) -> bool {
        cleaned.contains(&self.lowered)
            || (!self.folded.is_empty() && folded_text.contains(&self.folded))
    }
}

/// Existence matcher over cleaned text.
///
/// A keyword hits a document when its lowercased form is a substring of the
/// cleaned text, or when its fold key is non-empty and a substring of the
/// text's fold key. Keyword forms are computed once here and reused for
/// every document of the run.
///
/// The fold rule trades precision for recall: short keywords can hit inside
/// unrelated runs of characters once spacing and punctuation are gone.
#[derive(Debug, Clone)]
pub struct Matcher {
    entries: Vec<KeywordEntry>,
}

impl Matcher {
    pub fn new(keywords: &KeywordList) -> Self {
        Self { entries: keywords.iter().map(|k| KeywordEntry::new(k)).collect() }
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Keywords present in `cleaned`, in keyword-list order of first hit.
    pub fn match_text(&self, cleaned: &str) -> MatchedKeywords {
        let folded_text = fold_key(cleaned);
        let mut matched = MatchedKeywords::default();
        for entry in &self.entries {
            if !matched.contains(&entry.keyword) && entry.matches(cleaned, &folded_text) {
                matched.insert(&entry.keyword);
            }
        }
        matched
    }
}

/// One-shot form of [`Matcher::match_text`].
pub fn match_keywords(cleaned: &str, keywords: &KeywordList) -> MatchedKeywords {
    Matcher::new(keywords).match_text(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;

    fn kw(items: &[&str]) -> KeywordList { KeywordList::new(items) }

    #[test]
    fn literal_match_keeps_phrase_spacing() {
        let cleaned = "research on deep learning and nlp";
        let matched = match_keywords(cleaned, &kw(&["Deep Learning", "NLP"]));
        assert_eq!(matched.as_slice(), ["Deep Learning", "NLP"]);
    }

    #[test]
    fn fold_rule_bridges_missing_space() {
        let matched = match_keywords("机器学习", &kw(&["机器 学习"]));
        assert_eq!(matched.as_slice(), ["机器 学习"]);
    }

    #[test]
    fn fold_rule_bridges_punctuation_and_line_breaks() {
        let cleaned = normalize("研究方向：计算机\n视觉，图像-处理");
        let matched = match_keywords(&cleaned, &kw(&["计算机视觉", "图像处理", "语音识别"]));
        assert_eq!(matched.as_slice(), ["计算机视觉", "图像处理"]);
    }

    #[test]
    fn duplicate_keywords_reported_once() {
        let matched = match_keywords("a b", &kw(&["A", "B", "A"]));
        assert_eq!(matched.as_slice(), ["A", "B"]);
    }

    #[test]
    fn punctuation_only_keyword_uses_literal_rule() {
        let keywords = kw(&["C++", "--"]);
        assert_eq!(match_keywords("c++ and rust", &keywords).as_slice(), ["C++"]);
        assert!(match_keywords("- -", &kw(&["--"])).is_empty());
        assert_eq!(match_keywords("a--b", &kw(&["--"])).as_slice(), ["--"]);
    }

    #[test]
    fn order_follows_keyword_list_not_text() {
        let matched = match_keywords("zeta then alpha", &kw(&["alpha", "zeta"]));
        assert_eq!(matched.as_slice(), ["alpha", "zeta"]);
    }

    #[test]
    fn no_keywords_no_matches() {
        let matcher = Matcher::new(&KeywordList::default());
        assert!(matcher.is_empty());
        assert!(matcher.match_text("anything").is_empty());
    }

    #[test]
    fn extra_whitespace_in_text_keeps_fold_match() {
        let keywords = kw(&["机器学习"]);
        let text = "机 器  学\t习";
        assert_eq!(match_keywords(text, &keywords).as_slice(), ["机器学习"]);
    }

    #[test]
    fn short_keyword_fold_false_positive_is_kept() {
        // "学习" appears only across a sentence boundary.
        let cleaned = normalize("我在大学。习惯早起");
        assert_eq!(match_keywords(&cleaned, &kw(&["学习"])).as_slice(), ["学习"]);
    }
}
