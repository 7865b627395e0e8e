use codeunit_segmenter::{Language, SegmenterConfig};
use serde::{Deserialize, Serialize};

/// Configuration for a directory run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// File extensions to segment, without the dot
    pub extensions: Vec<String>,

    /// Directory names never descended into
    pub skip_dirs: Vec<String>,

    /// Worker threads (1 = sequential)
    pub jobs: usize,

    /// Skip files larger than this many bytes
    pub max_file_bytes: Option<u64>,

    pub segmenter: SegmenterConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: Language::SUPPORTED
                .iter()
                .flat_map(|lang| lang.extensions())
                .map(|ext| (*ext).to_string())
                .collect(),
            skip_dirs: vec![".git".to_string()],
            jobs: 1,
            max_file_bytes: None,
            segmenter: SegmenterConfig::default(),
        }
    }
}

impl BatchConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.jobs == 0 {
            return Err("jobs must be > 0".to_string());
        }

        if self.extensions.is_empty() {
            return Err("extensions must not be empty".to_string());
        }

        for ext in &self.extensions {
            if !Language::from_extension(ext.trim_start_matches('.')).is_supported() {
                return Err(format!("extension '{ext}' has no supported language"));
            }
        }

        self.segmenter.validate()
    }

    /// Check if `ext` is selected, ignoring case and a leading dot
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions
            .iter()
            .any(|candidate| candidate.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}
