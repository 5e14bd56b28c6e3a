//! kwmatch-io
//!
//! File-backed collaborators around the pure engine in `kwmatch-core`: the
//! corpus reader, the keyword file loader and the report writers. `run_pipeline`
//! wires them to a [`RunConfig`].

pub mod corpus;
pub mod keywords;
pub mod report;

use kwmatch_core::config::RunConfig;
use kwmatch_core::pipeline::{Pipeline, RunOutput};
use tracing::info;

pub use corpus::DirectorySource;
pub use keywords::load_keywords;
pub use report::FileReportSink;

/// Full run: keywords first (fatal if missing), then every document, then the summary.
pub fn run_pipeline(config: &RunConfig) -> kwmatch_core::Result<RunOutput> {
    let keywords = load_keywords(&config.keywords_path)?;
    let pipeline = Pipeline::new(keywords);
    let source = DirectorySource::new(&config.data_dir);
    let mut sink = FileReportSink::new(config);
    let out = pipeline.run(&source, &mut sink)?;
    info!(
        subjects = out.matches.len(),
        summary = %config.summary_path.display(),
        "pipeline finished"
    );
    Ok(out)
}
