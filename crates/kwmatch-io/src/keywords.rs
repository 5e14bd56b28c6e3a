use std::fs;
use std::path::Path;

use kwmatch_core::types::KeywordList;
use kwmatch_core::Error;
use tracing::{debug, warn};

/// Reads one keyword per line. A missing or unreadable file is fatal; an
/// empty list is not.
pub fn load_keywords(path: &Path) -> kwmatch_core::Result<KeywordList> {
    let text = fs::read_to_string(path)
        .map_err(|source| Error::KeywordsUnavailable { path: path.to_path_buf(), source })?;
    let keywords = KeywordList::parse(text.strip_prefix('\u{FEFF}').unwrap_or(&text));
    if keywords.is_empty() {
        warn!(path = %path.display(), "keyword list is empty");
    }
    debug!(count = keywords.len(), "loaded keywords");
    Ok(keywords)
}
