use std::fs;
use std::path::{Path, PathBuf};

use kwmatch_core::config::RunConfig;
use kwmatch_core::summary::{KeywordCount, Summary, TopSubjects};
use kwmatch_core::traits::ReportSink;
use kwmatch_core::types::{MatchedKeywords, SubjectKey};
use kwmatch_core::Error;
use tracing::debug;

pub const KEYWORD_SECTION: &str = "[关键词命中统计]";
pub const TOP_SECTION: &str = "[命中关键词最多的教师 Top3]";
pub const ZERO_SECTION: &str = "[未命中任何关键词的教师]";
/// Placeholder for an empty summary section.
pub const NONE_PLACEHOLDER: &str = "无";
/// Placeholder for a search without results.
pub const NO_MATCH_PLACEHOLDER: &str = "无匹配教师";

/// Three labelled sections separated by blank lines, newline-terminated.
pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    out.push_str(KEYWORD_SECTION);
    out.push('\n');
    out.push_str(&render_hit_counts(&summary.keyword_counts));

    out.push('\n');
    out.push_str(TOP_SECTION);
    out.push('\n');
    match &summary.top_subjects {
        TopSubjects::Ranked(ranked) if !ranked.is_empty() => {
            for sc in ranked {
                out.push_str(&format!("{}: {}\n", sc.subject, sc.count));
            }
        }
        _ => {
            out.push_str(NONE_PLACEHOLDER);
            out.push('\n');
        }
    }

    out.push('\n');
    out.push_str(ZERO_SECTION);
    out.push('\n');
    if summary.zero_match.is_empty() {
        out.push_str(NONE_PLACEHOLDER);
        out.push('\n');
    }
    for subject in &summary.zero_match {
        out.push_str(subject);
        out.push('\n');
    }
    out
}

/// `keyword: count` per line, for the listing query.
pub fn render_hit_counts(counts: &[KeywordCount]) -> String {
    counts.iter().map(|kc| format!("{}: {}\n", kc.keyword, kc.count)).collect()
}

/// One subject per line, or the no-match placeholder.
pub fn render_subjects(subjects: &[SubjectKey]) -> String {
    if subjects.is_empty() {
        return format!("{NO_MATCH_PLACEHOLDER}\n");
    }
    subjects.iter().map(|s| format!("{s}\n")).collect()
}

fn write_file(path: &Path, contents: &str) -> kwmatch_core::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::write(path, contents).map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

pub fn write_cleaned(dir: &Path, subject: &str, cleaned: &str) -> kwmatch_core::Result<()> {
    write_file(&dir.join(format!("{subject}.txt")), cleaned)
}

/// One keyword per line, no trailing newline.
pub fn write_matches(
    dir: &Path,
    subject: &str,
    matched: &MatchedKeywords,
) -> kwmatch_core::Result<()> {
    write_file(&dir.join(format!("{subject}.txt")), &matched.as_slice().join("\n"))
}

pub fn write_summary(path: &Path, summary: &Summary) -> kwmatch_core::Result<()> {
    write_file(path, &render_summary(summary))
}

/// Writes cleaned text, per-document keyword lists and the summary to the
/// locations in a [`RunConfig`].
#[derive(Debug, Clone)]
pub struct FileReportSink {
    cleaned_dir: PathBuf,
    keywords_dir: PathBuf,
    summary_path: PathBuf,
}

impl FileReportSink {
    pub fn new(config: &RunConfig) -> Self {
        Self {
            cleaned_dir: config.cleaned_dir.clone(),
            keywords_dir: config.keywords_dir.clone(),
            summary_path: config.summary_path.clone(),
        }
    }
}

impl ReportSink for FileReportSink {
    fn cleaned(&mut self, subject: &str, cleaned: &str) -> kwmatch_core::Result<()> {
        write_cleaned(&self.cleaned_dir, subject, cleaned)
    }

    fn matched(&mut self, subject: &str, matched: &MatchedKeywords) -> kwmatch_core::Result<()> {
        write_matches(&self.keywords_dir, subject, matched)
    }

    fn summary(&mut self, summary: &Summary) -> kwmatch_core::Result<()> {
        write_summary(&self.summary_path, summary)
    }
}
