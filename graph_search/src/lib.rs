use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

/// A trait for graphs that can be searched.
///
/// `Node`: The type of node identifiers (e.g., ProvinceId).
/// `Ctx`: A context object passed to neighbour lookups (e.g., a map mode).
pub trait Graph<Node, Ctx> {
    /// Return the neighbours of a node, in a stable order.
    ///
    /// Nodes the graph knows nothing about have no neighbours.
    fn neighbors(&self, node: Node, context: &Ctx) -> Vec<Node>;
}

/// Open queue plus closed set for a breadth-first search.
///
/// A node is marked visited when it is discovered, not when it is
/// expanded, so every node enters the queue at most once.
#[derive(Debug, Clone)]
pub struct Frontier<Node> {
    open: VecDeque<Node>,
    closed: HashSet<Node>,
}

impl<Node: Copy + Eq + Hash> Frontier<Node> {
    /// Frontier holding only `start`.
    pub fn new(start: Node) -> Self {
        let mut frontier = Self {
            open: VecDeque::new(),
            closed: HashSet::new(),
        };
        frontier.discover(start);
        frontier
    }

    /// Queue `node` unless it was seen before. Returns whether it was queued.
    pub fn discover(&mut self, node: Node) -> bool {
        if self.closed.insert(node) {
            self.open.push_back(node);
            true
        } else {
            false
        }
    }

    /// Next node to expand.
    pub fn pop(&mut self) -> Option<Node> {
        self.open.pop_front()
    }

}

/// Breadth-first search.
pub struct Bfs;

impl Bfs {
    /// Find the first node, in breadth-first order from `start` (inclusive),
    /// that satisfies `goal`.
    ///
    /// Terminates once the connected component of `start` is exhausted.
    pub fn find_first<Node, Ctx, G, F>(
        graph: &G,
        start: Node,
        context: &Ctx,
        mut goal: F,
    ) -> Option<Node>
    where
        Node: Copy + Eq + Hash,
        G: Graph<Node, Ctx>,
        F: FnMut(Node) -> bool,
    {
        let mut frontier = Frontier::new(start);
        while let Some(current) = frontier.pop() {
            if goal(current) {
                return Some(current);
            }
            for neighbor in graph.neighbors(current, context) {
                frontier.discover(neighbor);
            }
        }
        None
    }
}
