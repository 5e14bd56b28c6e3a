use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kwmatch_core::config::{resolve_with_base, RunConfig};
use kwmatch_core::summary::{keyword_hit_counts, subjects_with_keyword};
use kwmatch_io::report::{render_hit_counts, render_subjects};
use kwmatch_io::run_pipeline;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Clean research-interest pages, match them against keywords.txt and write a summary.
#[derive(Parser, Debug)]
#[command(name = "kwmatch", version, about)]
struct Cli {
    /// Base directory for kwmatch.toml and every relative path
    #[arg(long, default_value = ".")]
    base: PathBuf,

    /// Directory of raw *.txt documents
    #[arg(long)]
    data: Option<String>,

    /// Keyword file, one keyword per line
    #[arg(long)]
    keywords: Option<String>,

    /// Where to write the summary report
    #[arg(long)]
    summary: Option<String>,

    /// Print keyword hit counts, most hits first
    #[arg(long, conflicts_with = "search")]
    list: bool,

    /// Print the subjects whose documents contain KEYWORD
    #[arg(long, value_name = "KEYWORD")]
    search: Option<String>,

    /// Print the summary as JSON on stdout
    #[arg(long, conflicts_with_all = ["list", "search"])]
    json: bool,
}

impl Cli {
    fn config(&self) -> Result<RunConfig> {
        let mut config = RunConfig::load(&self.base)
            .with_context(|| format!("loading configuration from {}", self.base.display()))?;
        if let Some(data) = &self.data {
            config.data_dir = resolve_with_base(&self.base, data);
        }
        if let Some(keywords) = &self.keywords {
            config.keywords_path = resolve_with_base(&self.base, keywords);
        }
        if let Some(summary) = &self.summary {
            config.summary_path = resolve_with_base(&self.base, summary);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("kwmatch=info,kwmatch_core=info,kwmatch_io=info")
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let out = run_pipeline(&config).context("pipeline run failed")?;

    if cli.list {
        print!("{}", render_hit_counts(&keyword_hit_counts(&out.keywords, &out.matches)));
    } else if let Some(keyword) = cli.search.as_deref() {
        print!("{}", render_subjects(&subjects_with_keyword(&out.matches, keyword)));
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&out.summary)?);
    } else {
        info!(summary = %config.summary_path.display(), "summary written");
    }
    Ok(())
}
