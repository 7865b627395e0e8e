use crate::collector::Segmentation;
use crate::config::SegmenterConfig;
use crate::error::{Result, SegmenterError};
use crate::extractor::UnitExtractor;
use crate::language::Language;
use crate::syntax::{SyntaxProducer, TreeSitterProducer};
use crate::types::TopLevelNode;
use std::path::Path;

/// Main segmenter interface for processing source files.
///
/// Holds configuration only; every call builds its own parser and line
/// claims, so one segmenter can be shared across threads.
#[derive(Debug, Clone)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    /// Create a new segmenter with configuration
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        config.validate().map_err(SegmenterError::invalid_config)?;
        Ok(Self { config })
    }

    /// Segment source text, detecting the language from `file_path`
    pub fn segment_str(&self, content: &str, file_path: &str) -> Result<Segmentation> {
        let language = Language::from_path(file_path);
        self.segment_with_language(content, file_path, language)
    }

    /// Segment a file from disk. Units carry `path` as given.
    pub fn segment_file(&self, path: impl AsRef<Path>) -> Result<Segmentation> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file_path = path.to_string_lossy();
        let language = Language::from_path(path);

        self.segment_with_language(&content, &file_path, language)
    }

    /// Segment source text with explicit language
    pub fn segment_with_language(
        &self,
        content: &str,
        file_path: &str,
        language: Language,
    ) -> Result<Segmentation> {
        if !self.config.allows(language) {
            return Err(SegmenterError::unsupported_language(language.as_str()));
        }

        if content.trim().is_empty() {
            return Ok(Segmentation::default());
        }

        let mut producer = TreeSitterProducer::new(language, self.config.strict_parse)?;
        self.segment_with_producer(content, file_path, &mut producer)
    }

    /// Segment using any syntax producer
    pub fn segment_with_producer(
        &self,
        content: &str,
        file_path: &str,
        producer: &mut impl SyntaxProducer,
    ) -> Result<Segmentation> {
        let nodes = producer
            .top_level_nodes(content)
            .map_err(|e| e.in_file(file_path))?;
        Ok(self.segment_nodes(content, file_path, &nodes))
    }

    /// Segment an already produced node list. Never fails: malformed nodes
    /// are dropped, not reported as errors.
    #[must_use]
    pub fn segment_nodes(
        &self,
        content: &str,
        file_path: &str,
        nodes: &[TopLevelNode],
    ) -> Segmentation {
        let segmentation = UnitExtractor::new(content, file_path)
            .report_dropped(self.config.report_dropped)
            .run(nodes);

        if self.config.report_dropped && segmentation.stats.dropped() > 0 {
            log::info!("{file_path}: {}", segmentation.stats);
        }

        segmentation
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &SegmenterConfig {
        &self.config
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            config: SegmenterConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LineSpan, NodeKind, UnitKind};

    const JS_CODE: &str = r#"import { readFile } from "fs";

// Loads a file.
export async function load(path) {
  return readFile(path, "utf8");
}

class Cache {
  get(key) {
    return this[key];
  }
}

const cache = new Cache();
console.log(cache);
"#;

    #[test]
    fn test_segment_str() {
        let segmenter = Segmenter::default();
        let out = segmenter.segment_str(JS_CODE, "loader.js").unwrap();

        let summary: Vec<_> = out
            .units
            .iter()
            .map(|u| (u.kind, u.name.as_str(), u.start_line, u.end_line))
            .collect();
        assert_eq!(
            summary,
            vec![
                (UnitKind::Module, "", 1, 1),
                (UnitKind::Function, "load", 4, 6),
                (UnitKind::Class, "Cache", 8, 12),
                (UnitKind::Script, "", 14, 14),
                (UnitKind::Script, "", 15, 15),
            ]
        );
        assert_eq!(out.stats.dropped(), 0);
    }

    #[test]
    fn test_segment_empty_content() {
        let segmenter = Segmenter::default();
        assert!(segmenter.segment_str("", "a.js").unwrap().is_empty());
        assert!(segmenter.segment_str("  \n\t\n", "a.ts").unwrap().is_empty());
    }

    #[test]
    fn test_segment_unknown_extension() {
        let segmenter = Segmenter::default();
        let err = segmenter.segment_str("fn main() {}", "main.rs").unwrap_err();
        assert!(matches!(err, SegmenterError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_language_filter_applies() {
        let segmenter = Segmenter::new(SegmenterConfig {
            supported_languages: vec!["typescript".into()],
            ..Default::default()
        })
        .unwrap();
        assert!(segmenter.segment_str("let a = 1;", "a.js").is_err());
        assert!(segmenter.segment_str("let a = 1;", "a.ts").is_ok());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Segmenter::new(SegmenterConfig {
            supported_languages: vec!["klingon".into()],
            ..Default::default()
        });
        assert!(matches!(result, Err(SegmenterError::InvalidConfig(_))));
    }

    #[test]
    fn test_parse_failure_names_file() {
        let segmenter = Segmenter::default();
        let err = segmenter
            .segment_str("function broken() {\n", "src/broken.js")
            .unwrap_err();
        assert!(err.is_parse_failure());
        assert!(err.to_string().contains("src/broken.js"), "{err}");
    }

    #[test]
    fn test_segment_nodes_with_custom_nodes() {
        let segmenter = Segmenter::default();
        let nodes = vec![
            TopLevelNode::new(NodeKind::Class, None).named("Ghost"),
            TopLevelNode::new(NodeKind::Statement, LineSpan::new(1, 1)),
        ];
        let out = segmenter.segment_nodes("run();", "x.js", &nodes);

        assert_eq!(out.units.len(), 1);
        assert_eq!(out.units[0].kind, UnitKind::Script);
        assert_eq!(out.stats.dropped_without_span, 1);
    }

    #[test]
    fn test_segment_nodes_skips_malformed_spans() {
        let segmenter = Segmenter::new(SegmenterConfig::lenient()).unwrap();
        let nodes = vec![
            TopLevelNode::new(NodeKind::Statement, LineSpan::new(1, 1)),
            TopLevelNode::new(NodeKind::Statement, Some(LineSpan { start: 0, end: 1 })),
            TopLevelNode::new(NodeKind::Function, Some(LineSpan { start: 3, end: 2 })),
            TopLevelNode::new(NodeKind::Statement, Some(LineSpan { start: 3, end: 2 })),
        ];
        let out = segmenter.segment_nodes("a\nb\nc\n", "x.js", &nodes);

        assert_eq!(out.units.len(), 1);
        assert_eq!((out.units[0].start_line, out.units[0].end_line), (1, 1));
        assert_eq!(out.stats.dropped_without_span, 3);
    }

    #[test]
    fn test_segment_file_keeps_given_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.mjs");
        std::fs::write(&path, "export default function main() {}\n").unwrap();

        let out = Segmenter::default().segment_file(&path).unwrap();
        assert_eq!(out.units.len(), 1);
        assert_eq!(out.units[0].kind, UnitKind::Function);
        assert_eq!(out.units[0].name, "main");
        assert_eq!(out.units[0].origin_path, path.to_string_lossy());
    }
}
