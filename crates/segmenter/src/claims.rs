use crate::types::LineSpan;
use std::collections::BTreeSet;

/// Lines already owned by an emitted unit. One instance per file.
#[derive(Debug, Clone, Default)]
pub struct LineClaims {
    lines: BTreeSet<usize>,
}

impl LineClaims {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_claimed(&self, line: usize) -> bool {
        self.lines.contains(&line)
    }

    /// True if any line in `span` is already claimed
    #[must_use]
    pub fn any_claimed(&self, span: LineSpan) -> bool {
        if span.end < span.start {
            return false;
        }
        self.lines.range(span.start..=span.end).next().is_some()
    }

    /// Claim every line of `span`. Re-claiming is a no-op.
    pub fn claim_range(&mut self, span: LineSpan) {
        self.lines.extend(span.start..=span.end);
    }

    /// Number of distinct claimed lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
