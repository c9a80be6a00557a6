// SPDX-License-Identifier: MIT
//! Keyword-presence scan over audit output.
//!
//! A deliberately crude check: does the serialized response use
//! user-centric wording, technical wording, both, or neither? Each side is
//! a case-insensitive substring test against a fixed keyword set. This is
//! a boolean presence flag, not a scored classifier.

use serde::Serialize;

/// Phrases that address the reader's users rather than the page's markup.
const USER_CENTRIC_KEYWORDS: &[&str] = &[
    "your users",
    "your visitors",
    "customers",
    "user experience",
    "first impression",
    "frustrating",
    "confusing",
    "trust",
];

/// Implementation-level vocabulary.
const TECHNICAL_KEYWORDS: &[&str] = &[
    "dom",
    "css",
    "html",
    "viewport",
    "selector",
    "javascript",
    "render-blocking",
];

/// Outcome of scanning a response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageScan {
    /// Any user-centric keyword occurred.
    pub user_centric: bool,
    /// Any technical keyword occurred.
    pub technical: bool,
}

impl LanguageScan {
    /// Short human-readable label for report output.
    pub fn label(&self) -> &'static str {
        match (self.user_centric, self.technical) {
            (true, false) => "user-centric",
            (false, true) => "technical",
            (true, true) => "mixed",
            (false, false) => "neutral",
        }
    }
}

/// Scan `text` for both keyword sets, case-insensitively.
pub fn scan_language(text: &str) -> LanguageScan {
    let haystack = text.to_lowercase();
    let hit = |keywords: &[&str]| keywords.iter().any(|k| haystack.contains(k));
    LanguageScan {
        user_centric: hit(USER_CENTRIC_KEYWORDS),
        technical: hit(TECHNICAL_KEYWORDS),
    }
}
