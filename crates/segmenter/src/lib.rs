//! # Codeunit Segmenter
//!
//! Splits a source file into non-overlapping, line-addressable code units
//! for indexing and retrieval.
//!
//! ## Units
//!
//! Every top-level construct of a file ends up in at most one unit:
//! - Functions, classes and imports become named units of their own kind
//! - Exports are unwrapped to the declaration they carry (`export class Foo`
//!   yields a `class` unit named `Foo`)
//! - Everything else at the top level becomes a catch-all `script` unit
//!
//! Once a line belongs to a unit no other unit may touch it, so the result is
//! always a disjoint set of line ranges sorted by start line.
//!
//! ## Architecture
//!
//! ```text
//! Source Code
//!     │
//!     ├──> Language Detection (from extension)
//!     │
//!     ├──> Tree-sitter Parsing → top-level nodes
//!     │
//!     ├──> Unit Extraction
//!     │    ├─> Pass 1: functions, classes, imports, exports
//!     │    ├─> Pass 2: unclaimed statements → script
//!     │    └─> Line claims reject any overlap
//!     │
//!     └──> Collection
//!          └─> Stable sort by start line + stats
//! ```
//!
//! ## Example
//!
//! ```rust
//! use codeunit_segmenter::{Segmenter, SegmenterConfig, UnitKind};
//!
//! let segmenter = Segmenter::new(SegmenterConfig::default()).unwrap();
//!
//! let code = "import fs from 'fs';\n\nfunction read(p) {\n  return fs.readFileSync(p);\n}\n";
//!
//! let segmentation = segmenter.segment_str(code, "read.js").unwrap();
//! assert_eq!(segmentation.units[1].kind, UnitKind::Function);
//! for unit in &segmentation.units {
//!     println!("{} {} at lines {}-{}", unit.kind, unit.name, unit.start_line, unit.end_line);
//! }
//! ```

mod claims;
mod collector;
mod config;
mod error;
mod extractor;
mod language;
mod segmenter;
mod syntax;
mod types;

pub use claims::LineClaims;
pub use collector::{collect_units, SegmentStats, Segmentation};
pub use config::SegmenterConfig;
pub use error::{Result, SegmenterError};
pub use extractor::UnitExtractor;
pub use language::Language;
pub use segmenter::Segmenter;
pub use syntax::{SyntaxProducer, TreeSitterProducer};
pub use types::{
    CodeUnit, Declaration, DeclarationKind, LineSpan, NodeKind, SpannedNode, TopLevelNode,
    UnitKind,
};
