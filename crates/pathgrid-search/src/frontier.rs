//! Per-strategy frontier containers.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::strategy::Strategy;

/// Sentinel cost for cells not reached by a best-first search.
pub(crate) const UNREACHABLE: i32 = i32::MAX;

/// Entry of the best-first open list, ordered by `f` then insertion order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct OpenEntry {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (max-heap) pops smallest f first, and among
        // equal f the entry pushed earliest.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Open list and cost table of a best-first search.
#[derive(Clone, Debug)]
pub(crate) struct CostFrontier {
    open: BinaryHeap<OpenEntry>,
    best_cost: Vec<i32>,
    seq: u64,
}

impl CostFrontier {
    /// Lowest known accumulated cost of `idx`, or [`UNREACHABLE`].
    #[inline]
    pub(crate) fn best_cost(&self, idx: usize) -> i32 {
        self.best_cost[idx]
    }

    /// Record `cost` for `idx` and push it keyed by `cost + estimate`.
    ///
    /// Returns `false` without touching anything unless `cost` is strictly
    /// lower than the recorded one.
    pub(crate) fn relax(&mut self, idx: usize, cost: i32, estimate: i32) -> bool {
        if cost >= self.best_cost[idx] {
            return false;
        }
        self.best_cost[idx] = cost;
        self.open.push(OpenEntry {
            idx,
            f: cost.saturating_add(estimate),
            seq: self.seq,
        });
        self.seq += 1;
        true
    }
}

/// Discovered-but-unexpanded cells, one variant per [`Strategy`].
///
/// Cells are flat indices into the search bounds.
#[derive(Clone, Debug)]
pub(crate) enum Frontier {
    Fifo(VecDeque<usize>),
    Lifo(Vec<usize>),
    Cheapest(CostFrontier),
}

impl Frontier {
    /// Empty frontier for `strategy` over `len` cells.
    pub(crate) fn new(strategy: Strategy, len: usize) -> Self {
        match strategy {
            Strategy::BreadthFirst => Frontier::Fifo(VecDeque::new()),
            Strategy::DepthFirst => Frontier::Lifo(Vec::new()),
            Strategy::BestFirst => Frontier::Cheapest(CostFrontier {
                open: BinaryHeap::new(),
                best_cost: vec![UNREACHABLE; len],
                seq: 0,
            }),
        }
    }

    /// Add a newly discovered cell to an uninformed frontier.
    ///
    /// Best-first frontiers are fed through [`CostFrontier::relax`].
    pub(crate) fn push(&mut self, idx: usize) {
        match self {
            Frontier::Fifo(q) => q.push_back(idx),
            Frontier::Lifo(s) => s.push(idx),
            // Needs a cost; see `CostFrontier::relax`.
            Frontier::Cheapest(_) => {}
        }
    }

    /// Pop the next cell to expand.
    ///
    /// Best-first entries for cells already in `expanded` are stale and
    /// discarded.
    pub(crate) fn pop(&mut self, expanded: &[bool]) -> Option<usize> {
        match self {
            Frontier::Fifo(q) => q.pop_front(),
            Frontier::Lifo(s) => s.pop(),
            Frontier::Cheapest(c) => {
                while let Some(e) = c.open.pop() {
                    if !expanded[e.idx] {
                        return Some(e.idx);
                    }
                }
                None
            }
        }
    }

    /// Cost table, for best-first frontiers only.
    #[inline]
    pub(crate) fn costs(&self) -> Option<&CostFrontier> {
        match self {
            Frontier::Cheapest(c) => Some(c),
            _ => None,
        }
    }

    /// Cells currently waiting, in no particular order. Best-first
    /// frontiers may list a cell more than once.
    pub(crate) fn indices(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match self {
            Frontier::Fifo(q) => Box::new(q.iter().copied()),
            Frontier::Lifo(s) => Box::new(s.iter().copied()),
            Frontier::Cheapest(c) => Box::new(c.open.iter().map(|e| e.idx)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifo_and_lifo_order() {
        let expanded = vec![false; 4];
        let mut q = Frontier::new(Strategy::BreadthFirst, 4);
        let mut s = Frontier::new(Strategy::DepthFirst, 4);
        for i in 0..3 {
            q.push(i);
            s.push(i);
        }
        assert_eq!(q.pop(&expanded), Some(0));
        assert_eq!(s.pop(&expanded), Some(2));
    }

    #[test]
    fn cheapest_breaks_ties_by_insertion() {
        let expanded = vec![false; 8];
        let mut f = Frontier::new(Strategy::BestFirst, 8);
        let Frontier::Cheapest(c) = &mut f else {
            unreachable!()
        };
        assert!(c.relax(5, 4, 0));
        assert!(c.relax(2, 1, 3));
        assert!(c.relax(7, 2, 2));
        assert!(c.relax(1, 0, 1));
        assert_eq!(f.pop(&expanded), Some(1));
        assert_eq!(f.pop(&expanded), Some(5));
        assert_eq!(f.pop(&expanded), Some(2));
        assert_eq!(f.pop(&expanded), Some(7));
        assert_eq!(f.pop(&expanded), None);
    }

    #[test]
    fn relax_only_accepts_strict_improvements() {
        let mut f = Frontier::new(Strategy::BestFirst, 2);
        let Frontier::Cheapest(c) = &mut f else {
            unreachable!()
        };
        assert!(c.relax(0, 5, 0));
        assert!(!c.relax(0, 5, 0));
        assert!(!c.relax(0, 6, 0));
        assert!(c.relax(0, 3, 0));
        assert_eq!(c.best_cost(0), 3);
        assert_eq!(c.best_cost(1), UNREACHABLE);
    }

    #[test]
    fn cheapest_skips_stale_entries() {
        let mut expanded = vec![false; 3];
        let mut f = Frontier::new(Strategy::BestFirst, 3);
        if let Frontier::Cheapest(c) = &mut f {
            c.relax(0, 4, 0);
            c.relax(0, 2, 0);
            c.relax(1, 3, 0);
        }
        assert_eq!(f.indices().count(), 3);
        assert_eq!(f.pop(&expanded), Some(0));
        expanded[0] = true;
        assert_eq!(f.pop(&expanded), Some(1));
        expanded[1] = true;
        // The older, costlier entry for cell 0 is stale.
        assert_eq!(f.pop(&expanded), None);
    }
}
