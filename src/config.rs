use anyhow::{bail, Context, Result};
use std::collections::HashMap;

/// Environment variables substituted into repository URL templates.
///
/// These are the identifiers the hosting platform injects into every app
/// process; templates reference them as `{WP_APP_REGION_ID}` etc.
const CONTEXT_VARS: &[&str] = &["WP_APP_REGION_ID", "WP_APP_ID", "WP_ENV_ID"];

#[derive(Debug, Clone)]
pub struct Config {
    /// URL template of the remote news repository, e.g.
    /// `https://host/{WP_APP_REGION_ID}/news/`. Must end so that appending
    /// `languages` or `{lang}/index` yields a valid resource path.
    pub repo_url_template: String,

    /// Language used when the requested locale is not in the manifest.
    pub default_language: String,
}

impl Config {
    /// Build a validated configuration.
    pub fn new(
        repo_url_template: impl Into<String>,
        default_language: impl Into<String>,
    ) -> Result<Self> {
        let config = Self {
            repo_url_template: repo_url_template.into(),
            default_language: default_language.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            repo_url_template: std::env::var("NEWS_REPO_URL")
                .context("NEWS_REPO_URL not set")?,
            default_language: std::env::var("NEWS_DEFAULT_LANGUAGE")
                .unwrap_or_else(|_| "en".to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.repo_url_template.trim().is_empty() {
            bail!("news repository URL template is empty");
        }
        if self.default_language.trim().is_empty() {
            bail!("default language is empty");
        }
        Ok(())
    }
}

/// Placeholder values for repository URL templates.
///
/// Built once per aggregation run, either from the process environment or
/// directly by the caller. Placeholders without a value substitute to the
/// empty string (see [`crate::repository::resolve_base_url`]).
#[derive(Debug, Clone, Default)]
pub struct RuntimeContext {
    values: HashMap<String, String>,
}

impl RuntimeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the platform identifiers currently present in the environment.
    pub fn from_env() -> Self {
        let mut context = Self::new();
        for name in CONTEXT_VARS {
            if let Ok(value) = std::env::var(name) {
                context.values.insert(name.to_string(), value);
            }
        }
        context
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}
