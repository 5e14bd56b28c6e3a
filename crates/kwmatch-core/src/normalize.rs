//! Text canonicalization for mixed CJK/Latin documents.
//!
//! Two forms are produced here:
//! - [`normalize`]: the cleaned text written out per document. NFKC, CJK
//!   punctuation mapped to ASCII, blank lines dropped, whitespace runs
//!   collapsed, lowercased.
//! - [`fold_key`]: a matching-only form with every non-word character
//!   removed, so that spacing and punctuation differences disappear.
//!
//! Both are total functions: any `&str` is accepted, nothing can fail.

use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

/// CJK punctuation and its ASCII counterpart. Applied after NFKC.
pub const PUNCTUATION_TABLE: [(char, char); 16] = [
    ('\u{FF0C}', ','),  // ，
    ('\u{3002}', '.'),  // 。
    ('\u{FF1A}', ':'),  // ：
    ('\u{FF1B}', ';'),  // ；
    ('\u{FF1F}', '?'),  // ？
    ('\u{FF01}', '!'),  // ！
    ('\u{FF08}', '('),  // （
    ('\u{FF09}', ')'),  // ）
    ('\u{3010}', '['),  // 【
    ('\u{3011}', ']'),  // 】
    ('\u{300A}', '<'),  // 《
    ('\u{300B}', '>'),  // 》
    ('\u{201C}', '"'),  // “
    ('\u{201D}', '"'),  // ”
    ('\u{2018}', '\''), // ‘
    ('\u{2019}', '\''), // ’
];

/// Maps a single character through [`PUNCTUATION_TABLE`].
#[inline]
pub fn translate_punctuation(c: char) -> char {
    PUNCTUATION_TABLE
        .iter()
        .find_map(|&(from, to)| (from == c).then_some(to))
        .unwrap_or(c)
}

/// Whitespace as the cleaning rules understand it: Unicode `White_Space`
/// plus the ASCII information separators (U+001C..U+001F).
#[inline]
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Line boundaries: LF, VT, FF, CR, the information separators, NEL, LS, PS.
/// A CRLF pair produces an empty line in between, which is dropped anyway.
#[inline]
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | '\u{1C}'
            | '\u{1D}'
            | '\u{1E}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Underscore plus general categories `L*` and `N*`. Combining marks (`M*`)
/// are not word characters even when they carry `Other_Alphabetic`.
#[inline]
pub fn is_word_char(c: char) -> bool {
    c == '_'
        || matches!(
            c.general_category_group(),
            GeneralCategoryGroup::Letter | GeneralCategoryGroup::Number
        )
}

fn canonical(text: &str) -> String { text.nfkc().map(translate_punctuation).collect() }

/// Cleans raw document text.
///
/// Surviving lines are joined with `\n` and no trailing newline is added.
///
/// ```
/// use kwmatch_core::normalize::normalize;
/// assert_eq!(normalize("研究方向：机器学习，深度学习"), "研究方向:机器学习,深度学习");
/// let raw = "  Deep\u{00A0}\u{00A0}Learning \r\n\r\n NLP  ";
/// assert_eq!(normalize(raw), "deep learning\nnlp");
/// ```
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let text = canonical(raw);
    let mut cleaned = String::with_capacity(text.len());
    for line in text.split(is_line_break) {
        let line = line.trim_matches(is_space);
        if line.is_empty() {
            continue;
        }
        if !cleaned.is_empty() {
            cleaned.push('\n');
        }
        let mut prev_space = false;
        for c in line.chars() {
            if is_space(c) {
                if !prev_space {
                    cleaned.push(' ');
                }
                prev_space = true;
            } else {
                cleaned.push(c);
                prev_space = false;
            }
        }
    }
    cleaned.to_lowercase()
}

/// Matching key: NFKC, punctuation table, lowercase, then only word
/// characters kept.
///
/// ```
/// use kwmatch_core::normalize::fold_key;
/// assert_eq!(fold_key("机器 学习"), "机器学习");
/// assert_eq!(fold_key("Natural-Language Processing!"), "naturallanguageprocessing");
/// ```
pub fn fold_key(text: &str) -> String {
    canonical(text).to_lowercase().chars().filter(|&c| is_word_char(c)).collect()
}
