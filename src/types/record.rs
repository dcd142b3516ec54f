//! Raw record parsing and body tokenization.
//!
//! Each input line is one JSON object describing a single comment. Only the
//! fields the aggregation variants actually read are modeled; everything else
//! in the object is ignored. Field presence is checked lazily so each variant
//! enforces exactly the fields it needs: the diversity variant never fails on
//! a record without a `parent_id`, and the depth variant never fails on a
//! record without a `body`.
//!
//! Parsing is deterministic and side-effect free. A record that fails to
//! parse, or lacks a field its variant requires, contributes nothing to any
//! accumulator because all shared-state writes happen after extraction
//! succeeds.

use regex_lite::Regex;
use serde::Deserialize;

/// Error type for record extraction.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The line is not a valid JSON object.
    #[error("Malformed record: {0}")]
    Json(#[from] serde_json::Error),
    /// A field the current variant requires is absent.
    #[error("Record is missing required field: {0}")]
    MissingField(&'static str),
}

/// One comment record, as deserialized from a single input line.
///
/// `subreddit` is the group key and is required for every variant; the
/// remaining fields are optional at parse time and demanded through the
/// fallible accessors.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    /// Group key: the subreddit the comment was posted in.
    pub subreddit: String,
    /// Comment body text.
    body: Option<String>,
    /// Author account name.
    author: Option<String>,
    /// Fully qualified id of the comment itself.
    name: Option<String>,
    /// Fully qualified id of the comment this one replies to.
    parent_id: Option<String>,
    /// Fully qualified id of the submission the comment belongs to.
    link_id: Option<String>,
}

impl RawRecord {
    /// Parse one input line into a record.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        Ok(serde_json::from_str(line)?)
    }

    /// Comment body, required by the diversity variant.
    pub fn body(&self) -> Result<&str, RecordError> {
        self.body
            .as_deref()
            .ok_or(RecordError::MissingField("body"))
    }

    /// Author name, required by the co-occurrence variant.
    pub fn author(&self) -> Result<&str, RecordError> {
        self.author
            .as_deref()
            .ok_or(RecordError::MissingField("author"))
    }

    /// Comment id, required by the depth variant.
    pub fn comment_id(&self) -> Result<&str, RecordError> {
        self.name
            .as_deref()
            .ok_or(RecordError::MissingField("name"))
    }

    /// Parent id, required by the depth variant.
    pub fn parent_id(&self) -> Result<&str, RecordError> {
        self.parent_id
            .as_deref()
            .ok_or(RecordError::MissingField("parent_id"))
    }

    /// Link id, required by the depth variant.
    pub fn link_id(&self) -> Result<&str, RecordError> {
        self.link_id
            .as_deref()
            .ok_or(RecordError::MissingField("link_id"))
    }

    /// Whether this comment starts a thread.
    ///
    /// A comment is a thread root iff it replies directly to its submission,
    /// i.e. its `parent_id` equals its `link_id`.
    pub fn is_thread_root(&self) -> Result<bool, RecordError> {
        Ok(self.link_id()? == self.parent_id()?)
    }
}

/// Splits comment bodies into normalized tokens.
///
/// Normalization lowercases the body and replaces every character outside
/// `[a-z ]` with a space before splitting on whitespace, so punctuation,
/// digits and markup never produce tokens of their own.
pub struct Tokenizer {
    strip: Regex,
}

impl Tokenizer {
    /// Create a new tokenizer.
    pub fn new() -> Self {
        // Pattern is a compile-time constant; compilation cannot fail.
        let strip = Regex::new(r"[^a-z ]").expect("static token pattern");
        Self { strip }
    }

    /// Tokenize one comment body.
    pub fn tokens(&self, body: &str) -> Vec<String> {
        let lowered = body.to_lowercase();
        let cleaned = self.strip.replace_all(&lowered, " ");
        cleaned.split_whitespace().map(str::to_owned).collect()
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_record() {
        let line = r#"{"subreddit":"rust","body":"Hello, world!","author":"alice","name":"t1_c2","parent_id":"t3_l1","link_id":"t3_l1","score":42}"#;
        let record = RawRecord::parse(line).unwrap();

        assert_eq!(record.subreddit, "rust");
        assert_eq!(record.body().unwrap(), "Hello, world!");
        assert_eq!(record.author().unwrap(), "alice");
        assert_eq!(record.comment_id().unwrap(), "t1_c2");
        assert!(record.is_thread_root().unwrap());
    }

    #[test]
    fn test_reply_is_not_root() {
        let line = r#"{"subreddit":"rust","name":"t1_c3","parent_id":"t1_c2","link_id":"t3_l1"}"#;
        let record = RawRecord::parse(line).unwrap();
        assert!(!record.is_thread_root().unwrap());
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let line = r#"{"subreddit":"rust"}"#;
        let record = RawRecord::parse(line).unwrap();
        assert!(matches!(
            record.body(),
            Err(RecordError::MissingField("body"))
        ));
        assert!(matches!(
            record.author(),
            Err(RecordError::MissingField("author"))
        ));
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        assert!(matches!(
            RawRecord::parse("not json at all"),
            Err(RecordError::Json(_))
        ));
        // A JSON object without the group key is also malformed
        assert!(matches!(
            RawRecord::parse(r#"{"body":"orphan"}"#),
            Err(RecordError::Json(_))
        ));
    }

    #[test]
    fn test_tokenizer_normalizes() {
        let tok = Tokenizer::new();
        assert_eq!(
            tok.tokens("Hello, WORLD! It's 2024..."),
            vec!["hello", "world", "it", "s"]
        );
    }

    #[test]
    fn test_tokenizer_empty_body() {
        let tok = Tokenizer::new();
        assert!(tok.tokens("").is_empty());
        assert!(tok.tokens("!!! 123 ???").is_empty());
    }
}
