use thiserror::Error;

/// Result type for segmenter operations
pub type Result<T> = std::result::Result<T, SegmenterError>;

/// Errors that can occur while segmenting a file
#[derive(Error, Debug)]
pub enum SegmenterError {
    /// The source could not be turned into a clean syntax tree
    #[error("Failed to parse {path}: {message}")]
    ParseError { path: String, message: String },

    /// Syntax error reported by the producer, before a path is attached
    #[error("syntax error at line {line}, column {column}")]
    SyntaxError { line: usize, column: usize },

    /// Unsupported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),
}

impl SegmenterError {
    /// Create a parse error for a file
    pub fn parse(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }

    /// Attach the failing path to a producer-level syntax error.
    /// Other errors pass through untouched.
    #[must_use]
    pub fn in_file(self, path: &str) -> Self {
        match self {
            Self::SyntaxError { .. } | Self::TreeSitterError(_) => {
                Self::parse(path, self.to_string())
            }
            other => other,
        }
    }

    /// True for failures caused by the file's content rather than the setup
    pub const fn is_parse_failure(&self) -> bool {
        matches!(self, Self::ParseError { .. } | Self::SyntaxError { .. })
    }
}
