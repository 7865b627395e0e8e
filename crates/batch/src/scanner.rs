use crate::config::BatchConfig;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Scanner for finding source files under an input directory
pub struct FileScanner<'a> {
    root: PathBuf,
    config: &'a BatchConfig,
}

impl<'a> FileScanner<'a> {
    pub fn new(root: impl AsRef<Path>, config: &'a BatchConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config,
        }
    }

    /// Scan for source files, sorted by walk order (file name per directory)
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_skipped_dir(entry));

        for result in walker {
            match result {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !self.is_source_file(path) {
                        continue;
                    }

                    if let Some(limit) = self.config.max_file_bytes {
                        if let Ok(meta) = entry.metadata() {
                            if meta.len() > limit {
                                log::info!(
                                    "Skipping large file {} ({} bytes > {limit})",
                                    path.display(),
                                    meta.len()
                                );
                                continue;
                            }
                        }
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        log::debug!("Found {} source files under {}", files.len(), self.root.display());
        files
    }

    /// Skip configured directory names, but never the root itself
    fn is_skipped_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.config.skip_dirs.iter().any(|skip| skip == name))
    }

    fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.config.accepts_extension(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        touch(root, "b.js", "b();");
        touch(root, "a.ts", "a();");
        touch(root, "notes.md", "# notes");
        touch(root, "lib/c.mjs", "c();");
        touch(root, ".git/hooks/pre-commit.js", "hook();");
        touch(root, "vendor/.git/x.js", "x();");

        let config = BatchConfig::default();
        let files = FileScanner::new(root, &config).scan();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(rel, vec!["a.ts", "b.js", "lib/c.mjs"]);
    }

    #[test]
    fn test_scan_respects_size_limit() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), "small.js", "a();");
        touch(temp.path(), "big.js", &"x();\n".repeat(100));

        let config = BatchConfig {
            max_file_bytes: Some(64),
            ..Default::default()
        };
        let files = FileScanner::new(temp.path(), &config).scan();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("small.js"));
    }

    #[test]
    fn test_root_named_like_skipped_dir_is_still_scanned() {
        let temp = tempfile::tempdir().unwrap();
        touch(temp.path(), ".git/a.js", "a();");

        let config = BatchConfig::default();
        let files = FileScanner::new(temp.path().join(".git"), &config).scan();
        assert_eq!(files.len(), 1);
    }
}
