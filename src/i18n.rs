//! Translation-directive parsing for template fragments.
//!
//! Page templates embed directives like `greeting [World] [2024]`: a key that
//! names a translation string followed by optional bracketed arguments. The
//! rendering layer hands the rendered fragment to [`parse_directive`] and
//! looks the key up in its string catalog.
//!
//! Grammar:
//!
//! ```text
//! directive = key *ws *( "[" arg "]" *ws )
//! key       = 1*( any char except whitespace and "[" )
//! arg       = *( any char except "]" )
//! ```
//!
//! The key is the first token of the trimmed fragment; arguments are the
//! contents of every bracket group after it, in order.

use regex::Regex;
use std::sync::OnceLock;

static ARG_REGEX: OnceLock<Regex> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub key: String,
    pub args: Vec<String>,
}

/// Parse a rendered template fragment into its key and arguments.
///
/// Never fails: an empty fragment yields an empty key, and text that matches
/// no bracket group yields no arguments.
pub fn parse_directive(fragment: &str) -> Directive {
    let fragment = fragment.trim();

    let key_end = fragment
        .find(|c: char| c.is_whitespace() || c == '[')
        .unwrap_or(fragment.len());
    let key = fragment[..key_end].to_string();

    let arg_pattern = ARG_REGEX.get_or_init(|| Regex::new(r"\[([^\]]*)\]").unwrap());
    let args = arg_pattern
        .captures_iter(&fragment[key_end..])
        .map(|caps| caps[1].to_string())
        .collect();

    Directive { key, args }
}
