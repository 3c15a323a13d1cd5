//! The frontier: nodes discovered but not yet expanded.
//!
//! The frontier stores only `(key, node_id)` entries; nodes themselves live
//! in the search arena. Three disciplines share one type so the search loop
//! never branches on ordering.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::node::{FrontierKey, NodeId};

/// Frontier discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrontierOrder {
    /// FIFO in discovery order. Shortest paths for unit-cost problems only.
    BreadthFirst,
    /// LIFO. Low memory for enumeration; no shortest-path guarantee.
    DepthFirst,
    /// Lowest `f_cost` first, ties in creation order (Dijkstra / A*).
    LowestCost,
}

impl FrontierOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BreadthFirst => "breadth_first",
            Self::DepthFirst => "depth_first",
            Self::LowestCost => "lowest_cost",
        }
    }
}

/// A frontier entry: the ordering key and the node it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierEntry {
    pub key: FrontierKey,
    pub node_id: NodeId,
}

#[derive(Debug)]
enum Queue {
    Fifo(VecDeque<FrontierEntry>),
    Lifo(Vec<FrontierEntry>),
    // `BinaryHeap` is a max-heap; `Reverse` pops the lowest key.
    Heap(BinaryHeap<Reverse<FrontierEntry>>),
}

/// Frontier manager with a high-water mark.
#[derive(Debug)]
pub struct Frontier {
    queue: Queue,
    high_water: usize,
}

impl Frontier {
    #[must_use]
    pub fn new(order: FrontierOrder) -> Self {
        let queue = match order {
            FrontierOrder::BreadthFirst => Queue::Fifo(VecDeque::new()),
            FrontierOrder::DepthFirst => Queue::Lifo(Vec::new()),
            FrontierOrder::LowestCost => Queue::Heap(BinaryHeap::new()),
        };
        Self {
            queue,
            high_water: 0,
        }
    }

    pub fn push(&mut self, entry: FrontierEntry) {
        match &mut self.queue {
            Queue::Fifo(q) => q.push_back(entry),
            Queue::Lifo(q) => q.push(entry),
            Queue::Heap(q) => q.push(Reverse(entry)),
        }
        self.high_water = self.high_water.max(self.len());
    }

    /// Pop the next entry according to the discipline.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        match &mut self.queue {
            Queue::Fifo(q) => q.pop_front(),
            Queue::Lifo(q) => q.pop(),
            Queue::Heap(q) => q.pop().map(|Reverse(e)| e),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match &self.queue {
            Queue::Fifo(q) => q.len(),
            Queue::Lifo(q) => q.len(),
            Queue::Heap(q) => q.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest size the frontier has reached. Never decreases.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
