//! Recover a meme URL from free-form agent output
//!
//! The agent is asked to report the generated URL, but its reply is prose.
//! When the tool result did not carry the URL the first image link pointing
//! at the image service is taken from the text instead.

use regex::Regex;

/// Punctuation that ends a sentence rather than the URL
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', ')', '\''];

/// Finds image service URLs in text
#[derive(Debug, Clone)]
pub struct MemeUrlExtractor {
    pattern: Regex,
}

impl MemeUrlExtractor {
    /// Build an extractor for image URLs under `base_url`
    ///
    /// The scheme is matched loosely (`http` or `https`) and the host case
    /// insensitively.
    pub fn new(base_url: &str) -> Result<Self, regex::Error> {
        let base_url = base_url.trim_end_matches('/');
        let host_and_path = base_url
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(base_url);
        let pattern = Regex::new(&format!(
            r#"(?i)https?://{}/images/[^\s"]+"#,
            regex::escape(host_and_path)
        ))?;
        Ok(Self { pattern })
    }

    /// First image URL in `text`, if any
    pub fn extract(&self, text: &str) -> Option<String> {
        self.pattern
            .find(text)
            .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION).to_string())
    }
}
