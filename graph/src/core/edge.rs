use serde::Serialize;

/// Row index of a commit within the laid out window
pub type RowIdx = usize;

/// Logical identity of an edge, independent of its fold state
pub type EdgeKey = (RowIdx, RowIdx);

/// An edge from a child row to a parent row.
///
/// When `child == parent` the edge stands for the commit node drawn at that
/// row rather than a connecting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// Row of the child commit
    pub child: RowIdx,
    /// Row of the parent commit
    pub parent: RowIdx,
    /// Whether the line is drawn through this row or cut short
    pub state: EdgeState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeState {
    /// Line occupies a lane in the row
    Open,
    /// Line is logically alive but cut short because the lane budget was
    /// exhausted; it takes no lane
    Folded,
    /// A folded line brought back in the row above its parent, so its end
    /// can be drawn; it takes a lane of its own
    Appeared,
}

impl Edge {
    pub fn open(child: RowIdx, parent: RowIdx) -> Self {
        Self {
            child,
            parent,
            state: EdgeState::Open,
        }
    }

    pub fn folded(child: RowIdx, parent: RowIdx) -> Self {
        Self {
            child,
            parent,
            state: EdgeState::Folded,
        }
    }

    pub fn appeared(child: RowIdx, parent: RowIdx) -> Self {
        Self {
            child,
            parent,
            state: EdgeState::Appeared,
        }
    }

    /// The edge representing the commit at `row`
    pub fn commit(row: RowIdx) -> Self {
        Self::open(row, row)
    }

    pub fn key(&self) -> EdgeKey {
        (self.child, self.parent)
    }

    pub fn is_commit(&self) -> bool {
        self.child == self.parent
    }

    pub fn is_open(&self) -> bool {
        self.state == EdgeState::Open
    }

    pub fn is_folded(&self) -> bool {
        self.state == EdgeState::Folded
    }

    /// Whether the edge occupies a lane of its row
    pub fn holds_lane(&self) -> bool {
        self.state != EdgeState::Folded
    }

    /// Same edge, cut short
    pub fn fold(self) -> Self {
        Self {
            state: EdgeState::Folded,
            ..self
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.state {
            EdgeState::Open => write!(f, "{},{}", self.child, self.parent),
            EdgeState::Folded => write!(f, "{},~{}", self.child, self.parent),
            EdgeState::Appeared => write!(f, "{},^{}", self.child, self.parent),
        }
    }
}
