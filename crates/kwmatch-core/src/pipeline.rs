use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::matcher::Matcher;
use crate::normalize::normalize;
use crate::summary::{summarize, Summary};
use crate::traits::{DocumentSource, ReportSink};
use crate::types::{Document, KeywordList, MatchRecord, MatchedKeywords, SubjectKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub subject: SubjectKey,
    pub cleaned: String,
    pub matched: MatchedKeywords,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunOutput {
    pub keywords: KeywordList,
    pub matches: MatchRecord,
    pub summary: Summary,
}

/// Normalize → match per document, then one summary over all records.
pub struct Pipeline {
    keywords: KeywordList,
    matcher: Matcher,
}

impl Pipeline {
    pub fn new(keywords: KeywordList) -> Self {
        let matcher = Matcher::new(&keywords);
        Self { keywords, matcher }
    }

    pub fn process(&self, doc: &Document) -> ProcessedDocument {
        let cleaned = normalize(&doc.raw);
        let matched = self.matcher.match_text(&cleaned);
        ProcessedDocument { subject: doc.subject.clone(), cleaned, matched }
    }

    pub fn run<S, R>(&self, source: &S, sink: &mut R) -> Result<RunOutput>
    where
        S: DocumentSource + ?Sized,
        R: ReportSink + ?Sized,
    {
        let documents = source.documents()?;
        info!(documents = documents.len(), keywords = self.keywords.len(), "running pipeline");
        let mut matches = MatchRecord::new();
        for doc in &documents {
            if matches.contains_key(&doc.subject) {
                let msg = format!("duplicate subject key '{}'", doc.subject);
                return Err(Error::InvalidConfig(msg));
            }
            let processed = self.process(doc);
            debug!(
                subject = %processed.subject,
                matched = processed.matched.len(),
                "processed document"
            );
            sink.cleaned(&processed.subject, &processed.cleaned)?;
            sink.matched(&processed.subject, &processed.matched)?;
            matches.insert(processed.subject, processed.matched);
        }
        let summary = summarize(&self.keywords, &matches);
        sink.summary(&summary)?;
        Ok(RunOutput { keywords: self.keywords.clone(), matches, summary })
    }
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn cleaned(&mut self, _subject: &str, _cleaned: &str) -> Result<()> { Ok(()) }
    fn matched(&mut self, _subject: &str, _matched: &MatchedKeywords) -> Result<()> { Ok(()) }
    fn summary(&mut self, _summary: &Summary) -> Result<()> { Ok(()) }
}
