//! Parser and binder configuration
//!
//! Every field has a default, so partial JSON documents are accepted.

use serde::{Deserialize, Serialize};

/// Attribute scanned on element nodes
pub const DEFAULT_ATTRIBUTE_NAME: &str = "data-jsBind";

/// Maximum expression nesting before the parser bails out. Each level costs several
/// parser frames, so the limit has to fit an ordinary 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How `0x..` and `0..` literals are converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericLiteralMode {
    /// Hex with base 16, octal with base 8
    #[default]
    Standard,
    /// Hex text parsed with base 8 (always 0), octal text parsed with base 16.
    /// Matches markup written against the legacy binder.
    Legacy,
}

/// What happens when `forEach` or `template` appears twice in one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateDirectivePolicy {
    /// The later occurrence replaces the earlier one
    #[default]
    LastWins,
    /// A repeated singleton directive is a parse error
    Reject,
}

/// What the binder does when an element's attribute fails to bind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorPolicy {
    /// Dispose everything bound so far and return the error
    #[default]
    Abort,
    /// Log the error, leave the element unbound, keep walking
    SkipElement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserOptions {
    pub numeric_literals: NumericLiteralMode,
    pub duplicate_directives: DuplicateDirectivePolicy,
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            numeric_literals: NumericLiteralMode::default(),
            duplicate_directives: DuplicateDirectivePolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParserOptions {
    pub fn with_numeric_literals(mut self, mode: NumericLiteralMode) -> Self {
        self.numeric_literals = mode;
        self
    }

    pub fn with_duplicate_directives(mut self, policy: DuplicateDirectivePolicy) -> Self {
        self.duplicate_directives = policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Binder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BinderConfig {
    pub attribute_name: String,
    pub on_error: ErrorPolicy,
    pub parser: ParserOptions,
}

impl Default for BinderConfig {
    fn default() -> Self {
        BinderConfig {
            attribute_name: DEFAULT_ATTRIBUTE_NAME.to_string(),
            on_error: ErrorPolicy::default(),
            parser: ParserOptions::default(),
        }
    }
}

impl BinderConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        self.attribute_name = name.into();
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    pub fn with_parser_options(mut self, options: ParserOptions) -> Self {
        self.parser = options;
        self
    }
}
