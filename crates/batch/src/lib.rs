//! # Codeunit Batch
//!
//! Segments every source file of a directory tree and writes one JSON unit
//! list per file into a mirrored output tree.
//!
//! ## Pipeline
//!
//! ```text
//! Input directory
//!     │
//!     ├──> File Scanner (skips .git, filters by extension)
//!     │      └─> Source files, in walk order
//!     │
//!     ├──> Segmenter (per file, optionally in parallel)
//!     │      └─> Code units
//!     │
//!     └──> Writer
//!            └─> <output>/<relative path>.json
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use codeunit_batch::{BatchConfig, BatchDriver};
//!
//! let driver = BatchDriver::new("src", "out/units", BatchConfig::default())?;
//! let report = driver.run(|outcome| println!("{outcome}"))?;
//! println!("{report}");
//! # Ok::<(), codeunit_batch::BatchError>(())
//! ```

mod config;
mod driver;
mod error;
mod report;
mod scanner;
mod writer;

pub use config::BatchConfig;
pub use driver::BatchDriver;
pub use error::{BatchError, Result};
pub use report::{BatchReport, FileOutcome};
pub use scanner::FileScanner;
pub use writer::{output_path_for, write_units};
