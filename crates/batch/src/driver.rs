use crate::config::BatchConfig;
use crate::error::{BatchError, Result};
use crate::report::{BatchReport, FileOutcome};
use crate::scanner::FileScanner;
use crate::writer::{output_path_for, write_units};
use codeunit_segmenter::Segmenter;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Segments a directory tree into a mirrored tree of JSON unit lists
pub struct BatchDriver {
    input: PathBuf,
    output: PathBuf,
    config: BatchConfig,
    segmenter: Segmenter,
}

impl BatchDriver {
    /// Create a driver. Fails if the input is not an accessible directory or
    /// the configuration is invalid.
    pub fn new(
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        config: BatchConfig,
    ) -> Result<Self> {
        config.validate().map_err(BatchError::InvalidConfig)?;

        let input = input.as_ref().to_path_buf();
        let meta = fs::metadata(&input).map_err(|e| {
            BatchError::InvalidPath(format!("could not access {}: {e}", input.display()))
        })?;
        if !meta.is_dir() {
            return Err(BatchError::InvalidPath(format!(
                "not a directory: {}",
                input.display()
            )));
        }

        let segmenter = Segmenter::new(config.segmenter.clone())?;

        Ok(Self {
            input,
            output: output.as_ref().to_path_buf(),
            config,
            segmenter,
        })
    }

    /// Process every source file. `on_outcome` sees each file in walk order,
    /// whatever the number of jobs. Per-file failures end up in the report;
    /// only setup problems (output directory, worker pool) are errors.
    pub fn run(&self, mut on_outcome: impl FnMut(&FileOutcome)) -> Result<BatchReport> {
        let started = Instant::now();
        fs::create_dir_all(&self.output)?;

        let files = FileScanner::new(&self.input, &self.config).scan();
        let jobs = self.plan(files)?;
        log::info!(
            "Segmenting {} files from {} with {} job(s)",
            jobs.len(),
            self.input.display(),
            self.config.jobs
        );

        let mut report = BatchReport::new();
        if self.config.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()
                .map_err(|e| BatchError::Other(format!("failed to start worker pool: {e}")))?;
            let outcomes: Vec<FileOutcome> = pool.install(|| {
                jobs.par_iter()
                    .map(|(source, output)| self.process_file(source, output))
                    .collect()
            });
            for outcome in &outcomes {
                report.record(outcome);
                on_outcome(outcome);
            }
        } else {
            for (source, output) in &jobs {
                let outcome = self.process_file(source, output);
                report.record(&outcome);
                on_outcome(&outcome);
            }
        }

        report.time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        log::info!("{report}");
        Ok(report)
    }

    /// Pair each source with its output path. When two sources map to the
    /// same output (`a.js` and `a.ts`), the later one in walk order wins.
    fn plan(&self, files: Vec<PathBuf>) -> Result<Vec<(PathBuf, PathBuf)>> {
        let mut by_output: HashMap<PathBuf, usize> = HashMap::new();
        let mut jobs: Vec<Option<(PathBuf, PathBuf)>> = Vec::with_capacity(files.len());

        for source in files {
            let output = output_path_for(&self.input, &self.output, &source)?;
            if let Some(previous) = by_output.insert(output.clone(), jobs.len()) {
                if let Some((shadowed, _)) = jobs[previous].take() {
                    log::warn!(
                        "{} and {} both map to {}; skipping the former",
                        shadowed.display(),
                        source.display(),
                        output.display()
                    );
                }
            }
            jobs.push(Some((source, output)));
        }

        Ok(jobs.into_iter().flatten().collect())
    }

    fn process_file(&self, source: &Path, output: &Path) -> FileOutcome {
        let segmentation = match self.segmenter.segment_file(source) {
            Ok(segmentation) => segmentation,
            Err(e) => {
                log::warn!("{}: {e}", source.display());
                return FileOutcome::Failed {
                    source: source.to_path_buf(),
                    error: e.to_string(),
                };
            }
        };

        if segmentation.is_empty() {
            log::debug!("{}: no units", source.display());
            return FileOutcome::Empty {
                source: source.to_path_buf(),
            };
        }

        match write_units(output, &segmentation.units) {
            Ok(()) => FileOutcome::Written {
                source: source.to_path_buf(),
                output: output.to_path_buf(),
                units: segmentation.units.len(),
            },
            Err(e) => {
                log::warn!("{}: failed to write {}: {e}", source.display(), output.display());
                FileOutcome::Failed {
                    source: source.to_path_buf(),
                    error: e.to_string(),
                }
            }
        }
    }

    #[must_use]
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }
}
