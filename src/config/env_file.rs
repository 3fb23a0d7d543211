use crate::utils::error::{Result, SeedError};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

/// Variables gathered from the process environment and dotenv-style files.
///
/// Later sources win: a file loaded after another overrides it, and both
/// override the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvVars {
    vars: HashMap<String, String>,
}

impl EnvVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_process_env() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
                .collect(),
        }
    }

    /// Merges `path` into the set. A missing file is an error only when `required`.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P, required: bool) -> Result<usize> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if !required => {
                tracing::debug!("Skipping optional env file {}: {}", path.display(), e);
                return Ok(0);
            }
            Err(e) => {
                return Err(SeedError::ConfigError {
                    message: format!(
                        "Could not read {}. Make sure it exists. ({})",
                        path.display(),
                        e
                    ),
                })
            }
        };

        let parsed = parse_env(&content);
        let count = parsed.len();
        tracing::debug!("Loaded {} variables from {}", count, path.display());
        self.vars.extend(parsed);
        Ok(count)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Empty values are treated as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_string)
    }
}

/// Parses `KEY=VALUE` lines. Blank lines and `#` comments are skipped, the
/// line splits on the first `=`, and one pair of surrounding double quotes
/// is stripped from the value.
pub fn parse_env(content: &str) -> Vec<(String, String)> {
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    let quoted = QUOTED.get_or_init(|| Regex::new(r#"^"(.*)"$"#).unwrap());

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let (key, value) = line.split_once('=').unwrap_or((line, ""));
            let value = quoted.replace(value.trim(), "$1").into_owned();
            (key.trim().to_string(), value)
        })
        .collect()
}
