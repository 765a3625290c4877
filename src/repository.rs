use crate::config::RuntimeContext;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Resolve a repository URL template against the runtime context.
///
/// Every `{NAME}` placeholder (ASCII alphanumerics and underscores) is
/// replaced with the context value for `NAME`. Placeholders without a value
/// substitute to the empty string: the token is always consumed, missing
/// values never leave the raw `{NAME}` text behind and never fail. Text
/// outside placeholders, including stray braces, passes through untouched.
///
/// Pure function of its inputs; no network access. Recomputed per aggregation
/// run because the platform identifiers may change between process restarts.
pub fn resolve_base_url(template: &str, context: &RuntimeContext) -> String {
    let placeholder =
        PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap());

    let resolved = placeholder
        .replace_all(template, |caps: &regex::Captures| {
            let name = &caps[1];
            context.get(name).unwrap_or_default().to_string()
        })
        .into_owned();

    debug!(template, resolved = %resolved, "resolved repository base URL");
    resolved
}
