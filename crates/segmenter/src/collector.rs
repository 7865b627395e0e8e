use crate::types::{CodeUnit, LineSpan, SpannedNode, TopLevelNode};
use serde::{Deserialize, Serialize};

/// Sorted units of one file plus what happened to its nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segmentation {
    pub units: Vec<CodeUnit>,
    pub stats: SegmentStats,
}

impl Segmentation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    #[must_use]
    pub fn into_units(self) -> Vec<CodeUnit> {
        self.units
    }
}

/// Statistics about one file's segmentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Top-level nodes reported by the producer
    pub nodes: usize,
    pub units: usize,
    /// Lines owned by some unit
    pub covered_lines: usize,
    /// Nodes skipped because they carry no usable line span
    pub dropped_without_span: usize,
    /// Nodes with a span that lost every line to an earlier unit
    pub dropped_overlapping: usize,
}

impl SegmentStats {
    /// Every node yields at most one unit, so whatever is neither a unit
    /// nor span-less was dropped for overlapping.
    #[must_use]
    pub fn compute(nodes: &[TopLevelNode], units: &[CodeUnit]) -> Self {
        let dropped_without_span = nodes
            .iter()
            .filter(|node| node.span().and_then(LineSpan::validated).is_none())
            .count();
        Self {
            nodes: nodes.len(),
            units: units.len(),
            covered_lines: units.iter().map(CodeUnit::line_count).sum(),
            dropped_without_span,
            dropped_overlapping: nodes
                .len()
                .saturating_sub(dropped_without_span)
                .saturating_sub(units.len()),
        }
    }

    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped_without_span + self.dropped_overlapping
    }
}

impl std::fmt::Display for SegmentStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Nodes: {} | Units: {} | Lines: {} | Dropped: {} (no span: {}, overlap: {})",
            self.nodes,
            self.units,
            self.covered_lines,
            self.dropped(),
            self.dropped_without_span,
            self.dropped_overlapping
        )
    }
}

/// Order units by start line. The sort is stable, so units sharing a start
/// line keep their discovery order.
#[must_use]
pub fn collect_units(mut units: Vec<CodeUnit>, nodes: &[TopLevelNode]) -> Segmentation {
    units.sort_by_key(|unit| unit.start_line);
    let stats = SegmentStats::compute(nodes, &units);
    Segmentation { units, stats }
}
