use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::GB18030;
use kwmatch_core::traits::DocumentSource;
use kwmatch_core::types::{Document, SubjectKey};
use kwmatch_core::Error;
use tracing::{debug, info, warn};

/// Every `*.txt` directly inside a directory, one document per file, keyed
/// by file stem.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self { Self { root: root.into() } }
}

impl DocumentSource for DirectorySource {
    fn documents(&self) -> kwmatch_core::Result<Vec<Document>> {
        if !self.root.is_dir() {
            warn!(path = %self.root.display(), "data directory missing, corpus is empty");
            return Ok(vec![]);
        }
        let files = list_txt_files(&self.root);
        info!(files = files.len(), path = %self.root.display(), "reading corpus");
        let mut docs = Vec::with_capacity(files.len());
        for (file_index, file_path) in files.iter().enumerate() {
            debug!(
                file = file_index + 1,
                total = files.len(),
                path = %file_path.display(),
                "reading document"
            );
            let Some(subject) = subject_key(file_path) else {
                warn!(path = %file_path.display(), "skipping file without a usable stem");
                continue;
            };
            docs.push(Document::new(subject, read_text(file_path)?));
        }
        Ok(docs)
    }
}

/// Decodes as UTF-8 (leading BOM dropped), then GB18030. Bytes that are
/// neither are decoded lossily as UTF-8 rather than failing the run.
pub fn read_text(path: &Path) -> kwmatch_core::Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }
    if let Some(text) = GB18030.decode_without_bom_handling_and_without_replacement(bytes) {
        debug!(path = %path.display(), "decoded as GB18030");
        return Ok(text.into_owned());
    }
    warn!(path = %path.display(), "neither UTF-8 nor GB18030, decoding lossily");
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

pub fn subject_key(path: &Path) -> Option<SubjectKey> {
    path.file_stem().and_then(|s| s.to_str()).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Top-level `*.txt` files, sorted so that a run visits documents in a stable order.
pub fn list_txt_files(root: &Path) -> Vec<PathBuf> {
    let mut txt_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("txt"))
        .map(|e| e.path().to_path_buf())
        .collect();
    txt_files.sort();
    txt_files
}
