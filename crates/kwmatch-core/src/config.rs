//! Run configuration and path helpers.
//!
//! Figment merges built-in defaults, `kwmatch.toml`, `kwmatch.<env>.toml` and
//! `KWMATCH_*` env vars. Paths expand `~` and `${VAR}` and relative paths are
//! resolved against the base directory the config was loaded from.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Every location a pipeline run touches. The engine itself never sees this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub data_dir: PathBuf,
    pub cleaned_dir: PathBuf,
    pub keywords_dir: PathBuf,
    pub summary_path: PathBuf,
    pub keywords_path: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            cleaned_dir: PathBuf::from("cleaned"),
            keywords_dir: PathBuf::from("keywords"),
            summary_path: PathBuf::from("summary.txt"),
            keywords_path: PathBuf::from("keywords.txt"),
        }
    }
}

impl RunConfig {
    pub fn load(base: &Path) -> Result<Self> { Self::load_for_env(base, None) }

    /// `env` falls back to `RUST_ENV`, then `dev`.
    pub fn load_for_env(base: &Path, env: Option<&str>) -> Result<Self> {
        let env_name = match env {
            Some(env) => env.to_string(),
            None => env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string()),
        };
        let config: Self = Self::figment(base, &env_name)
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(config.resolved(base))
    }

    pub fn figment(base: &Path, env_name: &str) -> Figment {
        let figment = Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(base.join("kwmatch.toml")));
        let env_file = match env_name {
            "dev" | "development" => Some("kwmatch.dev.toml"),
            "prod" | "production" => Some("kwmatch.prod.toml"),
            "test" | "testing" => Some("kwmatch.test.toml"),
            _ => None,
        };
        let figment = match env_file {
            Some(name) => figment.merge(Toml::file(base.join(name))),
            None => figment,
        };
        figment.merge(Env::prefixed("KWMATCH_"))
    }

    /// Config rooted entirely under `base`, ignoring files and env.
    pub fn under(base: &Path) -> Self { Self::default().resolved(base) }

    pub fn resolved(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| resolve_with_base(base, p.to_string_lossy());
        Self {
            data_dir: resolve(self.data_dir),
            cleaned_dir: resolve(self.cleaned_dir),
            keywords_dir: resolve(self.keywords_dir),
            summary_path: resolve(self.summary_path),
            keywords_path: resolve(self.keywords_path),
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
