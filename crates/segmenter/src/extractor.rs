use crate::claims::LineClaims;
use crate::collector::{collect_units, Segmentation};
use crate::types::{CodeUnit, LineSpan, NodeKind, SpannedNode, TopLevelNode, UnitKind};
use std::collections::HashSet;

/// Classifies the top-level nodes of one file into code units.
///
/// The extractor owns the file's line claims, so a fresh one is needed per
/// file. Order matters: the first candidate to claim a line wins.
pub struct UnitExtractor<'a> {
    lines: Vec<&'a str>,
    origin_path: &'a str,
    claims: LineClaims,
    units: Vec<CodeUnit>,
    /// Indices of nodes that already produced a unit
    emitted: HashSet<usize>,
    rejected: usize,
    report_dropped: bool,
}

impl<'a> UnitExtractor<'a> {
    pub fn new(source: &'a str, origin_path: &'a str) -> Self {
        Self {
            lines: source.split('\n').collect(),
            origin_path,
            claims: LineClaims::new(),
            units: Vec::new(),
            emitted: HashSet::new(),
            rejected: 0,
            report_dropped: false,
        }
    }

    /// Builder: log every node that is dropped
    #[must_use]
    pub const fn report_dropped(mut self, report: bool) -> Self {
        self.report_dropped = report;
        self
    }

    /// Run both passes over `nodes` and collect the sorted result
    pub fn run(mut self, nodes: &[TopLevelNode]) -> Segmentation {
        self.classify(nodes);
        self.catch_all(nodes);
        collect_units(self.units, nodes)
    }

    /// First pass: functions, classes, imports and exports, in document order.
    pub fn classify(&mut self, nodes: &[TopLevelNode]) {
        for (index, node) in nodes.iter().enumerate() {
            let accepted = match &node.kind {
                NodeKind::Function => self.add_entry(node, UnitKind::Function, ""),
                NodeKind::Class => self.add_entry(node, UnitKind::Class, ""),
                NodeKind::Import => self.add_entry(node, UnitKind::Module, ""),
                NodeKind::Export(Some(declaration)) => {
                    self.add_entry(declaration, declaration.kind.unit_kind(), "")
                }
                NodeKind::Export(None) => self.add_entry(node, UnitKind::Export, ""),
                NodeKind::Statement => false,
            };
            if accepted {
                self.emitted.insert(index);
            }
        }
    }

    /// Second pass: every node whose first line is still free becomes a
    /// script unit. Nodes that already produced a unit (an export through
    /// its declaration) are not offered again. Must run after
    /// [`Self::classify`].
    pub fn catch_all(&mut self, nodes: &[TopLevelNode]) {
        for (index, node) in nodes.iter().enumerate() {
            if self.emitted.contains(&index) {
                continue;
            }
            let Some(span) = node.span().and_then(LineSpan::validated) else {
                continue;
            };
            if !self.claims.is_claimed(span.start) && self.add_entry(node, UnitKind::Script, "") {
                self.emitted.insert(index);
            }
        }
    }

    /// Offer `node` as a unit of `kind`. Returns false when it was dropped
    /// because it has no usable span (missing, line 0 or inverted) or
    /// touches an already claimed line.
    pub fn add_entry(&mut self, node: &impl SpannedNode, kind: UnitKind, explicit_name: &str) -> bool {
        let Some(span) = node.span().and_then(LineSpan::validated) else {
            self.rejected += 1;
            if self.report_dropped {
                log::debug!("{}: dropped {kind} candidate without line span", self.origin_path);
            }
            return false;
        };

        if self.claims.any_claimed(span) {
            self.rejected += 1;
            if self.report_dropped {
                log::debug!(
                    "{}: dropped {kind} candidate at lines {}-{} (overlaps an earlier unit)",
                    self.origin_path,
                    span.start,
                    span.end
                );
            }
            return false;
        }

        let name = if explicit_name.is_empty() {
            node.identifier().unwrap_or_default().to_string()
        } else {
            explicit_name.to_string()
        };

        // Spans past the end of the text are clamped rather than rejected
        let from = (span.start - 1).min(self.lines.len());
        let to = span.end.min(self.lines.len());
        let snippet = self.lines[from..to].join("\n").trim().to_string();

        self.units.push(CodeUnit {
            kind,
            name,
            start_line: span.start,
            end_line: span.end,
            snippet,
            origin_path: self.origin_path.to_string(),
        });
        self.claims.claim_range(span);
        true
    }

    /// Units accepted so far, in discovery order
    #[must_use]
    pub fn units(&self) -> &[CodeUnit] {
        &self.units
    }

    /// Candidates turned down so far, across both passes
    #[must_use]
    pub const fn rejected(&self) -> usize {
        self.rejected
    }

    #[must_use]
    pub const fn claims(&self) -> &LineClaims {
        &self.claims
    }
}
