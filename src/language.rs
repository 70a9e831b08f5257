//! Supported implementation languages
//!
//! A closed tagged-union over the languages the selector may offer. Parsing
//! is the single funnel from model text into the enum; anything outside the
//! enumeration is surfaced as an error by the caller rather than silently
//! substituted with a default generator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The four languages the selector is allowed to choose from.
///
/// Only Python and JavaScript have code generators wired in; dispatching the
/// coder on the other two is an explicit unsupported-language error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Language {
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "javascript")]
    JavaScript,
    #[serde(rename = "c++")]
    Cpp,
    #[serde(rename = "html/css")]
    HtmlCss,
}

impl Language {
    /// Parse the selector's lower-cased reply. Accepts the canonical names
    /// plus the obvious spellings the model tends to produce.
    pub fn parse(reply: &str) -> Option<Self> {
        match reply.trim().trim_matches(|c: char| c == '"' || c == '.') {
            "python" => Some(Language::Python),
            "javascript" | "js" => Some(Language::JavaScript),
            "c++" | "cpp" => Some(Language::Cpp),
            "html/css" | "html" | "css" | "html-css" => Some(Language::HtmlCss),
            _ => None,
        }
    }

    /// Normalized lower-case name, as stored in the state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::Cpp => "c++",
            Language::HtmlCss => "html/css",
        }
    }

    /// Whether a code generator exists for this language.
    pub fn has_generator(&self) -> bool {
        matches!(self, Language::Python | Language::JavaScript)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!(Language::parse("python"), Some(Language::Python));
        assert_eq!(Language::parse("javascript"), Some(Language::JavaScript));
        assert_eq!(Language::parse("c++"), Some(Language::Cpp));
        assert_eq!(Language::parse("html/css"), Some(Language::HtmlCss));
    }

    #[test]
    fn test_parse_tolerates_quoting_and_whitespace() {
        assert_eq!(Language::parse(" \"javascript\" "), Some(Language::JavaScript));
        assert_eq!(Language::parse("python.\n"), Some(Language::Python));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Language::parse("rust"), None);
        assert_eq!(Language::parse("cobol"), None);
        assert_eq!(Language::parse(""), None);
    }

    #[test]
    fn test_generator_coverage() {
        assert!(Language::Python.has_generator());
        assert!(Language::JavaScript.has_generator());
        assert!(!Language::Cpp.has_generator());
        assert!(!Language::HtmlCss.has_generator());
    }
}
