use crate::core::{Edge, EdgeKey, RowIdx};
use serde::Serialize;
use std::collections::HashMap;

/// A lane represents a vertical column in the graph
pub type LaneIdx = usize;

/// An edge and the lane it is drawn at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowEntry {
    pub edge: Edge,
    /// Lane of an open or appeared edge; for a folded edge, the slot between
    /// lanes where its stub is drawn
    pub lane: LaneIdx,
}

/// Lane assignments for one commit row.
///
/// Entries keep insertion order, which decides lane order and drives the
/// forward and backward scans of the layout. At most one entry exists per
/// logical edge, whatever its fold state.
#[derive(Debug, Clone, Serialize)]
pub struct Row {
    #[serde(rename = "row")]
    index: RowIdx,
    entries: Vec<RowEntry>,
    #[serde(skip)]
    positions: HashMap<EdgeKey, usize>,
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.entries == other.entries
    }
}

impl Eq for Row {}

impl Row {
    pub fn new(index: RowIdx) -> Self {
        Self {
            index,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Row index of the commit this row belongs to
    pub fn index(&self) -> RowIdx {
        self.index
    }

    pub fn entries(&self) -> &[RowEntry] {
        &self.entries
    }

    pub fn edges(&self) -> impl DoubleEndedIterator<Item = Edge> + '_ {
        self.entries.iter().map(|entry| entry.edge)
    }

    /// Whether the row holds this edge in either fold state
    pub fn contains(&self, key: EdgeKey) -> bool {
        self.positions.contains_key(&key)
    }

    /// Lane of `edge`, only if the row holds it in the same fold state
    pub fn lane_of(&self, edge: &Edge) -> Option<LaneIdx> {
        let entry = &self.entries[*self.positions.get(&edge.key())?];
        (entry.edge == *edge).then_some(entry.lane)
    }

    /// Lane of the commit node
    pub fn commit_lane(&self) -> Option<LaneIdx> {
        self.lane_of(&Edge::commit(self.index))
    }

    /// Number of lanes in the row, reappearing lines included
    pub fn lane_count(&self) -> usize {
        self.entries.iter().filter(|e| e.edge.holds_lane()).count()
    }

    /// Number of lanes taken by open edges, the part bound by the lane budget
    pub fn open_count(&self) -> usize {
        self.entries.iter().filter(|e| e.edge.is_open()).count()
    }

    /// Entries drawn as stubs
    pub fn folded(&self) -> impl Iterator<Item = &RowEntry> + '_ {
        self.entries.iter().filter(|e| e.edge.is_folded())
    }

    /// Appends `edge` unless the row already holds it
    pub(crate) fn insert(&mut self, edge: Edge) -> bool {
        if self.contains(edge.key()) {
            return false;
        }
        self.positions.insert(edge.key(), self.entries.len());
        self.entries.push(RowEntry { edge, lane: 0 });
        true
    }

    pub(crate) fn remove(&mut self, key: EdgeKey) -> Option<Edge> {
        let position = self.positions.remove(&key)?;
        let entry = self.entries.remove(position);
        self.reindex_from(position);
        Some(entry.edge)
    }

    /// Inserts `edges` so that the first of them lands at `position`.
    /// Edges already present are skipped.
    pub(crate) fn splice(&mut self, position: usize, edges: &[Edge]) {
        let fresh: Vec<RowEntry> = edges
            .iter()
            .filter(|edge| !self.contains(edge.key()))
            .map(|&edge| RowEntry { edge, lane: 0 })
            .collect();
        let position = position.min(self.entries.len());
        self.entries.splice(position..position, fresh);
        self.reindex_from(position);
    }

    /// Assigns lanes from entry order: open and appeared edges take
    /// consecutive lanes, folded edges take the slot after the lanes
    /// preceding them.
    pub(crate) fn renumber(&mut self) {
        let mut lane = 0;
        for entry in &mut self.entries {
            entry.lane = lane;
            if entry.edge.holds_lane() {
                lane += 1;
            }
        }
    }

    fn reindex_from(&mut self, start: usize) {
        for (position, entry) in self.entries.iter().enumerate().skip(start) {
            self.positions.insert(entry.edge.key(), position);
        }
    }
}
