use crate::summary::Summary;
use crate::types::{Document, MatchedKeywords};

/// Supplies the corpus. Subject keys must be unique within one call.
pub trait DocumentSource {
    fn documents(&self) -> crate::Result<Vec<Document>>;
}

/// Receives per-document outputs as they are produced and the summary once.
pub trait ReportSink {
    fn cleaned(&mut self, subject: &str, cleaned: &str) -> crate::Result<()>;
    fn matched(&mut self, subject: &str, matched: &MatchedKeywords) -> crate::Result<()>;
    fn summary(&mut self, summary: &Summary) -> crate::Result<()>;
}

impl DocumentSource for Vec<Document> {
    fn documents(&self) -> crate::Result<Vec<Document>> { Ok(self.clone()) }
}

impl DocumentSource for [Document] {
    fn documents(&self) -> crate::Result<Vec<Document>> { Ok(self.to_vec()) }
}
