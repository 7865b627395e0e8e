use crate::language::Language;
use serde::{Deserialize, Serialize};

/// Configuration for segmentation behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Log every node that produced no unit (missing span or overlap).
    /// Dropped nodes are always counted in the stats either way.
    pub report_dropped: bool,

    /// Reject trees containing syntax errors instead of segmenting what
    /// tree-sitter recovered
    pub strict_parse: bool,

    /// Languages to support (empty = all supported languages)
    pub supported_languages: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self::strict()
    }
}

impl SegmenterConfig {
    /// Malformed files fail, dropped nodes stay silent
    pub fn strict() -> Self {
        Self {
            report_dropped: false,
            strict_parse: true,
            supported_languages: vec![],
        }
    }

    /// Segment whatever tree-sitter recovers and report drops
    pub fn lenient() -> Self {
        Self {
            report_dropped: true,
            strict_parse: false,
            ..Self::strict()
        }
    }

    /// Check whether `language` passes the `supported_languages` filter
    pub fn allows(&self, language: Language) -> bool {
        language.is_supported()
            && (self.supported_languages.is_empty()
                || self
                    .supported_languages
                    .iter()
                    .any(|name| Language::from_name(name) == Some(language)))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        for name in &self.supported_languages {
            if Language::from_name(name).is_none() {
                return Err(format!(
                    "unknown language '{name}' in supported_languages (expected one of: {})",
                    Language::SUPPORTED
                        .iter()
                        .map(|lang| lang.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = SegmenterConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.strict_parse);
        assert!(!config.report_dropped);
    }

    #[test]
    fn test_preset_configs_valid() {
        assert!(SegmenterConfig::strict().validate().is_ok());
        assert!(SegmenterConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_unknown_language_rejected() {
        let config = SegmenterConfig {
            supported_languages: vec!["javascript".into(), "fortran".into()],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("fortran"), "{err}");
    }

    #[test]
    fn test_language_filter() {
        let all = SegmenterConfig::default();
        assert!(all.allows(Language::Tsx));
        assert!(!all.allows(Language::Unknown));

        let js_only = SegmenterConfig {
            supported_languages: vec!["JavaScript".into()],
            ..Default::default()
        };
        assert!(js_only.allows(Language::JavaScript));
        assert!(!js_only.allows(Language::TypeScript));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: SegmenterConfig =
            serde_json::from_str(r#"{"report_dropped": true}"#).unwrap();
        assert!(config.report_dropped);
        assert!(config.strict_parse);
        assert!(config.supported_languages.is_empty());
    }
}
