use super::row::Row;
use crate::core::{Commit, Edge, HistoryIndex, RowIdx};
use crate::error::{LayoutError, Result};
use tracing::{debug, trace, warn};

/// Assigns every edge alive at a row to a lane, one row at a time.
///
/// Row `i` is derived from row `i - 1` alone. Building row `i` may still
/// amend row `i - 1` (to let lines that were folded away reappear next to
/// their parent), after which row `i - 1` is final.
#[derive(Debug, Clone)]
pub struct LaneLayout {
    index: HistoryIndex,
    max_lanes: usize,
}

impl LaneLayout {
    pub fn new(commits: &[Commit], max_lanes: usize) -> Result<Self> {
        if max_lanes < 1 {
            return Err(LayoutError::invalid("max_lanes must be at least 1"));
        }
        let index = HistoryIndex::new(commits)?;
        Ok(Self { index, max_lanes })
    }

    pub fn max_lanes(&self) -> usize {
        self.max_lanes
    }

    pub fn history(&self) -> &HistoryIndex {
        &self.index
    }

    /// Lazily yields finalized rows in order
    pub fn rows(&self) -> LaneRows<'_> {
        LaneRows {
            layout: self,
            next: 0,
            pending: None,
            done: false,
        }
    }

    /// Builds every row
    pub fn build(&self) -> Result<Vec<Row>> {
        self.rows().collect()
    }

    fn first_row(&self) -> Row {
        let mut row = Row::new(0);
        row.insert(Edge::commit(0));
        row.renumber();
        row
    }

    /// Builds row `index` from the previous row, then lets edges that skipped
    /// rows reappear in `prev`
    fn next_row(&self, index: RowIdx, prev: &mut Row) -> Result<Row> {
        let mut row = self.assign_lanes(index, prev);
        if row.open_count() > self.max_lanes {
            self.fold_overflow(&mut row)?;
        }
        self.splice_reappearing(prev, &row);

        debug!(
            row = index,
            lanes = row.open_count(),
            folded = row.folded().count(),
            "built lane row"
        );
        Ok(row)
    }

    fn assign_lanes(&self, index: RowIdx, prev: &Row) -> Row {
        let commit_edge = Edge::commit(index);
        let mut row = Row::new(index);

        for edge in prev.edges() {
            if !edge.is_open() {
                continue;
            }
            if !edge.is_commit() {
                // a line passing the previous row either ends at this commit
                // or keeps going
                if edge.parent == index {
                    row.insert(commit_edge);
                } else {
                    row.insert(edge);
                }
            } else {
                for &parent in self.index.parents_of(index - 1) {
                    if parent == index {
                        row.insert(commit_edge);
                    } else {
                        row.insert(Edge::open(index - 1, parent));
                    }
                }
            }
        }
        row.insert(commit_edge);
        row.renumber();
        row
    }

    /// Folds lines started at the previous row, newest first, until the row
    /// fits the lane budget.
    fn fold_overflow(&self, row: &mut Row) -> Result<()> {
        let index = row.index();
        let candidates: Vec<Edge> = row
            .edges()
            .rev()
            .filter(|edge| edge.child + 1 == index && edge.is_open())
            .collect();

        let mut lanes = row.open_count();
        for edge in candidates {
            if lanes == self.max_lanes {
                break;
            }
            row.remove(edge.key());
            row.insert(edge.fold());
            lanes -= 1;
            trace!(row = index, edge = %edge, "folded edge over lane budget");
        }
        row.renumber();

        if lanes != self.max_lanes {
            warn!(row = index, lanes, max_lanes = self.max_lanes, "lane budget not reached");
            return Err(LayoutError::InvariantBroken {
                row: index,
                lanes,
                max_lanes: self.max_lanes,
            });
        }
        Ok(())
    }

    /// Edges into `row` whose child sits above `prev` and which `prev` no
    /// longer carries are put back into `prev` with lanes of their own, so the
    /// end of the line can be drawn from there. They go after the last edge of
    /// `prev` that continues to the left of the commit, keeping crossings low;
    /// lanes after them shift right.
    fn splice_reappearing(&self, prev: &mut Row, row: &Row) {
        let index = row.index();
        let mut reappearing: Vec<Edge> = Vec::new();
        for &child in self.index.children_of(index) {
            if child + 1 == index {
                continue;
            }
            let edge = Edge::appeared(child, index);
            if !prev.contains(edge.key()) && !reappearing.contains(&edge) {
                reappearing.push(edge);
            }
        }
        if reappearing.is_empty() {
            return;
        }

        let Some(commit_lane) = row.commit_lane() else {
            return;
        };
        let edges: Vec<Edge> = prev.edges().collect();
        for (position, edge) in edges.iter().enumerate().rev() {
            let continues_left = row
                .lane_of(edge)
                .is_some_and(|lane| lane < commit_lane);
            if position == 0 || continues_left {
                trace!(row = index, after = position, count = reappearing.len(), "edges reappear");
                prev.splice(position + 1, &reappearing);
                prev.renumber();
                break;
            }
        }
    }
}

/// Forward-only iterator over finalized rows.
///
/// Keeps a two-slot window: the pending previous row, which may still be
/// amended, and the row being built. Stops after the first error.
pub struct LaneRows<'a> {
    layout: &'a LaneLayout,
    next: RowIdx,
    pending: Option<Row>,
    done: bool,
}

impl Iterator for LaneRows<'_> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let total = self.layout.index.len();
        if self.pending.is_none() && self.next == 0 {
            self.pending = Some(self.layout.first_row());
            self.next = 1;
        }

        let mut prev = self.pending.take()?;
        if self.next >= total {
            self.done = true;
            return Some(Ok(prev));
        }

        match self.layout.next_row(self.next, &mut prev) {
            Ok(row) => {
                self.pending = Some(row);
                self.next += 1;
                Some(Ok(prev))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.layout.index.len() - self.next + usize::from(self.pending.is_some());
        (0, Some(remaining))
    }
}

/// Lays out `commits` in one go
pub fn compute_lanes(commits: &[Commit], max_lanes: usize) -> Result<Vec<Row>> {
    LaneLayout::new(commits, max_lanes)?.build()
}
